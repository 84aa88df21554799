//! Process-lifetime invocation state.
//!
//! Create one [`InvocationState`] when the execution environment starts and
//! hand it to every invocation. It starts cold and turns warm after the first
//! wrapped invocation finishes, whether or not the handler succeeded.

use crate::extract::TraceContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationState {
    cold_start: bool,
    trace_context: TraceContext,
}

impl InvocationState {
    pub fn new() -> Self {
        Self {
            cold_start: true,
            trace_context: TraceContext::default(),
        }
    }

    /// Whether no invocation has completed yet in this environment.
    pub fn is_cold_start(&self) -> bool {
        self.cold_start
    }

    /// Record that an invocation has run. Never reverts.
    pub fn mark_warm(&mut self) {
        self.cold_start = false;
    }

    /// Trace context stored by the most recent invocation.
    pub fn trace_context(&self) -> &TraceContext {
        &self.trace_context
    }

    /// Replace the stored trace context; the last invocation wins.
    pub fn set_trace_context(&mut self, trace_context: TraceContext) {
        self.trace_context = trace_context;
    }
}

impl Default for InvocationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_cold() {
        let state = InvocationState::new();
        assert!(state.is_cold_start());
        assert!(state.trace_context().is_empty());
    }

    #[test]
    fn test_mark_warm_is_sticky() {
        let mut state = InvocationState::default();
        state.mark_warm();
        state.mark_warm();
        assert!(!state.is_cold_start());
    }

    #[test]
    fn test_trace_context_is_replaced() {
        let mut state = InvocationState::new();
        state.set_trace_context(TraceContext {
            trace_id: Some("1".to_string()),
            parent_id: Some("2".to_string()),
            sample_mode: Some(1),
        });
        state.set_trace_context(TraceContext {
            trace_id: Some("3".to_string()),
            ..Default::default()
        });

        assert_eq!(state.trace_context().trace_id.as_deref(), Some("3"));
        assert!(state.trace_context().parent_id.is_none());
        assert!(state.trace_context().sample_mode.is_none());
    }
}
