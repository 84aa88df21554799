//! Serverless function instrumentation.
//!
//! This crate wraps handler invocations to detect cold starts, extracts
//! Datadog trace propagation headers from incoming events, and writes custom
//! metrics as JSON lines on stdout for a log-based metrics pipeline.
//!
//! # Usage
//!
//! 1. Create one [`Instrumentation`] when the execution environment starts.
//! 2. Route every invocation through [`Instrumentation::wrap`].
//! 3. Emit custom metrics with [`metric()`] or [`Instrumentation::metric`].
//!
//! ```rust,no_run
//! use dd_lambda::{logging, Instrumentation, LambdaConfig, LambdaContext};
//!
//! let config = LambdaConfig::from_env();
//! logging::init(&config).unwrap();
//! let mut lambda = Instrumentation::new(config);
//!
//! let context = LambdaContext::new(
//!     "checkout",
//!     "arn:aws:lambda:us-east-1:123456789012:function:checkout",
//!     256,
//!     "Rust 1.75.0",
//! );
//! let event = serde_json::json!({ "headers": { "x-datadog-trace-id": "12345" } });
//!
//! let res: Result<&str, String> = lambda.wrap(&event, &context, || {
//!     dd_lambda::metric("checkout.items", 3, [("currency", "eur")], None)
//!         .map_err(|e| e.to_string())?;
//!     Ok("done")
//! });
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod logging;
pub mod metric;
pub mod state;
pub mod tags;
pub mod wrapper;

pub use config::{LambdaConfig, LambdaConfigBuilder};
pub use context::{FunctionArn, InvocationContext, LambdaContext};
pub use error::{LambdaError, Result};
pub use extract::{extract_trace_context, TraceContext};
pub use metric::{metric, write_metric, Metric, MetricValue, LAYER_TAG};
pub use state::InvocationState;
pub use tags::{gen_enhanced_tags, EnhancedTags};
pub use wrapper::Instrumentation;

/// Library version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
