//! Page/limit arithmetic shared by every list endpoint.

use serde::Serialize;

/// Highest page a caller may ask for. Anything above it is served as this
/// page, which keeps `skip` far from overflowing.
pub const MAX_PAGE: u64 = 1_000_000;

/// A resolved page request: 1-based `page` and a bounded `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Resolves optional query values. `page` defaults to 1, `limit` to
    /// `default_limit`; both are at least 1, `page` is capped at [`MAX_PAGE`]
    /// and `limit` at `max_limit`.
    pub fn resolve(page: Option<u64>, limit: Option<u64>, default_limit: u64, max_limit: u64) -> Self {
        let page = page.unwrap_or(1).clamp(1, MAX_PAGE);
        let limit = limit.unwrap_or(default_limit).clamp(1, max_limit.max(1));
        Self { page, limit }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn take(&self) -> u64 {
        self.limit
    }
}

/// The `pagination` block of a paginated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl PageInfo {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: total.div_ceil(request.limit),
        }
    }
}
