//! Trace id of the request being served.
//!
//! `RequestTrace` scopes the id task-locally so error rendering and
//! database error mapping can tag their output without an `HttpRequest`.

use std::fmt;
use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace id. Also honored on incoming requests.
pub const TRACE_HEADER: &str = "x-trace-id";

/// Reported outside of any request scope.
pub const NO_TRACE: &str = "unknown";

const MAX_INCOMING_LEN: usize = 64;

task_local! {
    static CURRENT: TraceId;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuse a caller-supplied id when it is a short run of `[A-Za-z0-9_-]`.
    pub fn from_incoming(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let well_formed = !raw.is_empty()
            && raw.len() <= MAX_INCOMING_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        well_formed.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trace id of the current task, or [`NO_TRACE`].
pub fn trace_id() -> String {
    CURRENT
        .try_with(|id| id.0.clone())
        .unwrap_or_else(|_| NO_TRACE.to_string())
}

/// Run `fut` with `id` as the current trace id.
pub async fn scope<F: Future>(id: TraceId, fut: F) -> F::Output {
    CURRENT.scope(id, fut).await
}
