//! JSON envelopes shared by every endpoint.
//!
//! List endpoints answer `{ data, actions, paging }`; failures answer
//! `{ code, status, errors }`. Field names are part of the client contract.

use serde::{Deserialize, Serialize};

use crate::{
    error::{AccessError, AccessResult},
    rights::AccessRights,
};

const DEFAULT_PAGE_SIZE: u64 = 10;

/// A 1-based page request from the query string.
///
/// Deserialization goes through [`PageRequest::new`], so a request that
/// exists is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u64,
    size: u64,
}

#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default = "first_page")]
    page: u64,
    #[serde(default = "default_size")]
    size: u64,
}

fn first_page() -> u64 {
    1
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = AccessError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(raw.page, raw.size)
    }
}

impl PageRequest {
    /// Validate a page request. Page 0 is read as page 1; size 0 is rejected.
    pub fn new(page: u64, size: u64) -> AccessResult<Self> {
        if size == 0 {
            return Err(AccessError::InvalidInput {
                reason: "size harus lebih dari 0".to_string(),
            });
        }
        Ok(Self {
            page: page.max(1),
            size,
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of rows to skip before this page. Saturates for pages past
    /// any addressable row, which then read as empty.
    pub fn offset(&self) -> usize {
        self.page
            .saturating_sub(1)
            .checked_mul(self.size)
            .and_then(|rows| usize::try_from(rows).ok())
            .unwrap_or(usize::MAX)
    }

    pub fn limit(&self) -> usize {
        usize::try_from(self.size).unwrap_or(usize::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata for a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub current_page: u64,
    pub total_page: u64,
    pub size: u64,
}

impl Paging {
    /// `total` is the number of rows matching the query across all pages.
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            current_page: request.page,
            total_page: total.div_ceil(request.size.max(1)),
            size: request.size,
        }
    }
}

/// The body returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub actions: AccessRights,
    pub paging: Paging,
}

/// The body returned when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub status: String,
    pub errors: String,
}

impl From<&AccessError> for ErrorEnvelope {
    fn from(err: &AccessError) -> Self {
        let code = err.status_code();
        Self {
            code,
            status: reason_phrase(code).to_string(),
            errors: err.public_message(),
        }
    }
}

impl From<AccessError> for ErrorEnvelope {
    fn from(err: AccessError) -> Self {
        Self::from(&err)
    }
}

fn reason_phrase(code: u16) -> &'static str {
    match code {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}
