//! Captured request/response pairs.

use crate::models::{HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured exchange: the request that went out and the response that
/// came back.
///
/// Records are immutable once created. Either side may be missing when the
/// host could not supply it (for example an editor tab whose request was
/// never sent); the formatter renders a placeholder in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    id: String,
    captured_at: DateTime<Utc>,
    request: Option<HttpRequest>,
    response: Option<HttpResponse>,
}

impl EventRecord {
    /// Creates a record for a completed exchange.
    ///
    /// Assigns a fresh UUID v4 and stamps the current UTC time.
    pub fn new(request: HttpRequest, response: HttpResponse) -> Self {
        Self::from_parts(Some(request), Some(response))
    }

    /// Creates a record where either side may be missing.
    pub fn from_parts(request: Option<HttpRequest>, response: Option<HttpResponse>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            captured_at: Utc::now(),
            request,
            response,
        }
    }

    /// Unique identifier of this record.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When the record was captured.
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn request(&self) -> Option<&HttpRequest> {
        self.request.as_ref()
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    /// Whether both the request and the response are present.
    pub fn is_complete(&self) -> bool {
        self.request.is_some() && self.response.is_some()
    }
}
