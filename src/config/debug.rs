//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Log each query request, per-indicator outcome and session swap.
    pub log_queries: bool,

    /// Log every hover hit (very chatty, one line per frame while hovering).
    pub log_hover: bool,

    /// Log export destinations and row counts.
    pub log_exports: bool,

    /// Activate trace_time macro (for scope-level timing)
    pub log_performance: bool,

    /// Log raw HTTP request urls sent to the providers.
    pub log_provider_requests: bool,
}

pub const DF: LogFlags = LogFlags {
    log_queries: true,
    log_exports: true,

    log_hover: false,
    log_performance: false,
    log_provider_requests: false,
};
