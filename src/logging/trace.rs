use tracing::Span;
use uuid::Uuid;

/// Request-scoped correlation record.
///
/// Threaded through call parameters instead of ambient state: every log
/// event emitted inside `span()` carries the trace and span identifiers,
/// and each downstream call derives a `child()` scope that keeps the trace
/// identifier while taking a span identifier of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceScope {
    trace_id: String,
    span_id: String,
}

impl TraceScope {
    /// Mint a root scope with fresh identifiers.
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4().simple().to_string(),
            span_id: Uuid::new_v4().simple().to_string(),
        }
    }

    /// Adopt identifiers received from an upstream caller.
    pub fn with_ids(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn span_id(&self) -> &str {
        &self.span_id
    }

    /// Derived scope for a downstream call: same trace, new span.
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id.clone(),
            span_id: Uuid::new_v4().simple().to_string(),
        }
    }

    /// A tracing span carrying both identifiers, so events logged inside
    /// it are attributable to this request.
    pub fn span(&self, operation: &str) -> Span {
        tracing::info_span!(
            "op",
            %operation,
            trace_id = %self.trace_id,
            span_id = %self.span_id,
        )
    }
}

impl Default for TraceScope {
    fn default() -> Self {
        Self::new()
    }
}
