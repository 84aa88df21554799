//! Log-based custom metrics.
//!
//! A metric is written as one compact JSON line to standard output, where the
//! log forwarder picks it up:
//!
//! ```text
//! {"e":1215508200,"m":"m1","t":["dd_lambda_layer:datadog-rust","t.a:val"],"v":100}
//! ```
//!
//! - `e` - epoch seconds, floored to the start of the minute
//! - `m` - metric name
//! - `t` - tags, always starting with [`LAYER_TAG`]
//! - `v` - value
//!
//! # Example
//!
//! ```rust,no_run
//! use dd_lambda::metric::Metric;
//!
//! Metric::new("orders.placed", 1)
//!     .tag("env", "prod")
//!     .tag("shop", "eu")
//!     .emit()
//!     .unwrap();
//! ```

use std::fmt::Display;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{LambdaError, Result};

/// Tag identifying this instrumentation layer, prepended to every metric.
pub const LAYER_TAG: &str = "dd_lambda_layer:datadog-rust";

/// Numeric metric value. Integers serialize without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl MetricValue {
    /// NaN and infinities have no JSON number representation.
    pub fn is_finite(&self) -> bool {
        match self {
            MetricValue::Float(v) => v.is_finite(),
            MetricValue::Int(_) | MetricValue::UInt(_) => true,
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty => $variant:ident($wide:ty)),* $(,)?) => {
        $(
            impl From<$t> for MetricValue {
                fn from(v: $t) -> Self {
                    MetricValue::$variant(<$wide>::from(v))
                }
            }
        )*
    };
}

impl_from_int! {
    i8 => Int(i64),
    i16 => Int(i64),
    i32 => Int(i64),
    i64 => Int(i64),
    u8 => Int(i64),
    u16 => Int(i64),
    u32 => Int(i64),
    u64 => UInt(u64),
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        // usize is at most 64 bits on supported targets
        MetricValue::UInt(v as u64)
    }
}

impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::Float(f64::from(v))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

/// Epoch seconds of the start of the minute containing `time`.
pub fn floor_to_minute(time: DateTime<Utc>) -> i64 {
    let secs = time.timestamp();
    secs - secs.rem_euclid(60)
}

/// A single custom metric point.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    name: String,
    value: MetricValue,
    tags: Vec<String>,
    timestamp: i64,
}

#[derive(Serialize)]
struct MetricLine<'a> {
    e: i64,
    m: &'a str,
    t: &'a [String],
    v: &'a MetricValue,
}

impl Metric {
    /// Create a metric stamped with the current minute.
    pub fn new(name: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            tags: vec![LAYER_TAG.to_string()],
            timestamp: floor_to_minute(Utc::now()),
        }
    }

    /// Append a `key:value` tag.
    pub fn tag(mut self, key: impl Display, value: impl Display) -> Self {
        self.tags.push(format!("{}:{}", key, value));
        self
    }

    /// Append tags in iteration order.
    pub fn tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Display,
    {
        self.tags
            .extend(tags.into_iter().map(|(k, v)| format!("{}:{}", k, v)));
        self
    }

    /// Stamp the metric with an explicit time instead of now.
    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.timestamp = floor_to_minute(time);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> MetricValue {
        self.value
    }

    pub fn tag_list(&self) -> &[String] {
        &self.tags
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Encode as a compact JSON object, without the trailing newline.
    ///
    /// Fails with [`LambdaError::InvalidValue`] for NaN or infinite values.
    pub fn to_line(&self) -> Result<String> {
        if !self.value.is_finite() {
            return Err(LambdaError::invalid_value(format!(
                "metric '{}' has non-finite value {:?}",
                self.name, self.value
            )));
        }

        let line = MetricLine {
            e: self.timestamp,
            m: &self.name,
            t: &self.tags,
            v: &self.value,
        };
        Ok(serde_json::to_string(&line)?)
    }

    /// Write the metric line followed by a newline to `writer`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let line = self.to_line()?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the metric line to standard output.
    pub fn emit(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)
    }
}

/// Write a metric to standard output.
///
/// Tags are rendered `key:value` after the layer tag, in the order given.
/// Without `time` the metric is stamped with the current minute.
pub fn metric<I, K, V>(
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
    build(name, value, tags, time).emit()
}

/// Same as [`metric`] but writes to an arbitrary sink.
pub fn write_metric<W, I, K, V>(
    writer: &mut W,
    name: &str,
    value: impl Into<MetricValue>,
    tags: I,
    time: Option<DateTime<Utc>>,
) -> Result<()>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    build(name, value, tags, time).write_to(writer)
}

fn build<I, K, V>(
    name: &str,
    value: impl Into<MetricValue>,
    tags: I,
    time: Option<DateTime<Utc>>,
) -> Metric
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let metric = Metric::new(name, value).tags(tags);
    match time {
        Some(time) => metric.at(time),
        None => metric,
    }
}
