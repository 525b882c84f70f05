//! Normalized response envelope.
//!
//! Both adapters return `Envelope<T>`. The two upstreams paginate
//! differently (page cursor vs offset cursor) and the envelope keeps them
//! apart instead of pretending they are the same thing.

use serde::{Deserialize, Serialize};

/// Payload plus optional pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    pub pagination: Option<Pagination>,
}

/// Pagination idiom of the upstream that produced an envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum Pagination {
    Page(PagePagination),
    Offset(OffsetPagination),
}

/// Page-cursor pagination (anime catalog)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagePagination {
    #[serde(default)]
    pub last_visible_page: u32,
    pub has_next_page: bool,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub items: Option<PaginationItems>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationItems {
    pub count: u32,
    pub total: u32,
    pub per_page: u32,
}

/// Offset-cursor pagination (manga catalog)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPagination {
    pub limit: u32,
    pub offset: u32,
    pub total: u32,
}

fn first_page() -> u32 {
    1
}

impl OffsetPagination {
    /// Whether another window exists past this one
    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.limit) < self.total
    }

    /// Offset of the following window
    pub fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.limit)
    }
}

impl<T> Envelope<T> {
    /// Envelope without pagination (single-resource responses)
    pub fn single(data: T) -> Self {
        Self {
            data,
            pagination: None,
        }
    }

    pub fn paged(data: T, pagination: Option<PagePagination>) -> Self {
        Self {
            data,
            pagination: pagination.map(Pagination::Page),
        }
    }

    pub fn offset(data: T, pagination: OffsetPagination) -> Self {
        Self {
            data,
            pagination: Some(Pagination::Offset(pagination)),
        }
    }

    /// Page-cursor metadata, if this envelope carries it
    pub fn page_info(&self) -> Option<&PagePagination> {
        match &self.pagination {
            Some(Pagination::Page(page)) => Some(page),
            _ => None,
        }
    }

    /// Offset-cursor metadata, if this envelope carries it
    pub fn offset_info(&self) -> Option<&OffsetPagination> {
        match &self.pagination {
            Some(Pagination::Offset(offset)) => Some(offset),
            _ => None,
        }
    }

    /// Transform the payload, keeping pagination
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            data: f(self.data),
            pagination: self.pagination,
        }
    }
}
