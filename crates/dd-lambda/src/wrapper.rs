//! Invocation wrapper.
//!
//! [`Instrumentation`] owns the process-lifetime [`InvocationState`] and the
//! sink metric lines are written to. Create one when the execution
//! environment starts and route every invocation through [`Instrumentation::wrap`].
//!
//! # Example
//!
//! ```rust,no_run
//! use dd_lambda::{Instrumentation, LambdaConfig, LambdaContext};
//!
//! let mut lambda = Instrumentation::new(LambdaConfig::from_env());
//! let context = LambdaContext::new(
//!     "checkout",
//!     "arn:aws:lambda:us-east-1:123456789012:function:checkout",
//!     128,
//!     "Rust 1.75.0",
//! );
//! let event = serde_json::json!({ "headers": { "x-datadog-trace-id": "12345" } });
//!
//! let result: Result<u32, String> = lambda.wrap(&event, &context, || Ok(100));
//! assert_eq!(result, Ok(100));
//! ```

use std::fmt::Display;
use std::io::{Stdout, Write};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info_span, warn};

use crate::config::LambdaConfig;
use crate::context::InvocationContext;
use crate::error::Result;
use crate::extract::{extract_trace_context, TraceContext};
use crate::metric::{write_metric, Metric, MetricValue};
use crate::state::InvocationState;
use crate::tags::{gen_enhanced_tags, EnhancedTags};

pub const INVOCATIONS_METRIC: &str = "aws.lambda.enhanced.invocations";
pub const ERRORS_METRIC: &str = "aws.lambda.enhanced.errors";

/// Instruments handler invocations and emits metrics to `W`.
pub struct Instrumentation<W: Write = Stdout> {
    config: LambdaConfig,
    state: InvocationState,
    sink: W,
}

impl Instrumentation<Stdout> {
    /// Instrumentation writing metrics to standard output.
    pub fn new(config: LambdaConfig) -> Self {
        Self::with_sink(config, std::io::stdout())
    }
}

impl<W: Write> Instrumentation<W> {
    /// Instrumentation writing metrics to `sink`, starting cold.
    pub fn with_sink(config: LambdaConfig, sink: W) -> Self {
        Self::with_state(config, InvocationState::new(), sink)
    }

    /// Instrumentation resuming from existing state.
    pub fn with_state(config: LambdaConfig, state: InvocationState, sink: W) -> Self {
        Self {
            config,
            state,
            sink,
        }
    }

    pub fn config(&self) -> &LambdaConfig {
        &self.config
    }

    pub fn state(&self) -> &InvocationState {
        &self.state
    }

    pub fn is_cold_start(&self) -> bool {
        self.state.is_cold_start()
    }

    /// Trace context extracted by the most recent invocation.
    pub fn trace_context(&self) -> &TraceContext {
        self.state.trace_context()
    }

    /// Enhanced tags for `context` given the current state.
    pub fn enhanced_tags<C>(&self, context: &C) -> EnhancedTags
    where
        C: InvocationContext + ?Sized,
    {
        gen_enhanced_tags(context, &self.state)
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Emit a custom metric to this instrumentation's sink.
    pub fn metric<I, K, V>(
        &mut self,
        name: &str,
        value: impl Into<MetricValue>,
        tags: I,
        time: Option<DateTime<Utc>>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Display,
    {
        write_metric(&mut self.sink, name, value, tags, time)
    }

    /// Run `handler` for one invocation.
    ///
    /// Stores the trace context found in `event`, emits the enhanced
    /// invocation (and on `Err`, error) metric when enabled, and marks the
    /// environment warm once the handler returns or unwinds. The handler's
    /// result is returned untouched.
    pub fn wrap<C, F, T, E>(
        &mut self,
        event: &Value,
        context: &C,
        handler: F,
    ) -> std::result::Result<T, E>
    where
        C: InvocationContext + ?Sized,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let Self {
            config,
            state,
            sink,
        } = self;

        let span = info_span!(
            "invocation",
            function_name = context.function_name(),
            request_id = context.request_id().unwrap_or_default(),
            cold_start = state.is_cold_start(),
        );
        let _entered = span.enter();

        state.set_trace_context(extract_trace_context(event));

        let warm = WarmOnDrop(state);
        record_enhanced(config, &*warm.0, sink, INVOCATIONS_METRIC, context);

        let outcome = handler();

        if outcome.is_err() {
            debug!("handler returned an error");
            record_enhanced(config, &*warm.0, sink, ERRORS_METRIC, context);
        }

        drop(warm);
        outcome
    }
}

struct WarmOnDrop<'a>(&'a mut InvocationState);

impl Drop for WarmOnDrop<'_> {
    fn drop(&mut self) {
        self.0.mark_warm();
    }
}

fn record_enhanced<C, W>(
    config: &LambdaConfig,
    state: &InvocationState,
    sink: &mut W,
    name: &str,
    context: &C,
) where
    C: InvocationContext + ?Sized,
    W: Write,
{
    if !config.enhanced_metrics {
        return;
    }

    let tags = gen_enhanced_tags(context, state);
    if let Err(err) = Metric::new(name, 1).tags(tags.to_metric_tags()).write_to(sink) {
        warn!(error = %err, metric = name, "failed to emit enhanced metric");
    }
}
