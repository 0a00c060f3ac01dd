use crate::infrastructure::http::RequestDescriptor;

/// Offset pagination accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pagination {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    /// Page `page` (zero-based) of `per_page` items.
    pub fn page(page: u32, per_page: u32) -> Self {
        Self::new(page.saturating_mul(per_page), per_page)
    }

    pub fn apply(&self, request: RequestDescriptor) -> RequestDescriptor {
        request
            .with_optional_query("skip", self.skip)
            .with_optional_query("limit", self.limit)
    }
}
