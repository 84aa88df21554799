//! Execution context supplied by the host runtime for each invocation.
//!
//! Any type exposing the function name, invoked ARN, memory limit and runtime
//! description can be used through [`InvocationContext`]. [`LambdaContext`]
//! is the concrete record used when the host does not provide its own type.

use serde::{Deserialize, Serialize};

use crate::error::{LambdaError, Result};

/// Accessors the instrumentation needs from the host's invocation context.
pub trait InvocationContext {
    /// Name of the deployed function.
    fn function_name(&self) -> &str;

    /// Fully qualified ARN the function was invoked through.
    fn invoked_function_arn(&self) -> &str;

    /// Configured memory limit in megabytes.
    fn memory_limit_in_mb(&self) -> u32;

    /// Free-form runtime description, e.g. `"Rust 1.75.0"`.
    fn runtime(&self) -> &str;

    /// Request id of the current invocation, when the host exposes one.
    fn request_id(&self) -> Option<&str> {
        None
    }
}

/// Read-only invocation context record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaContext {
    pub function_name: String,
    pub invoked_function_arn: String,
    pub memory_limit_in_mb: u32,
    pub runtime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_request_id: Option<String>,
}

impl LambdaContext {
    /// Create a context record without a request id.
    pub fn new(
        function_name: impl Into<String>,
        invoked_function_arn: impl Into<String>,
        memory_limit_in_mb: u32,
        runtime: impl Into<String>,
    ) -> Self {
        Self {
            function_name: function_name.into(),
            invoked_function_arn: invoked_function_arn.into(),
            memory_limit_in_mb,
            runtime: runtime.into(),
            aws_request_id: None,
        }
    }

    /// Attach the invocation's request id.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.aws_request_id = Some(request_id.into());
        self
    }
}

impl InvocationContext for LambdaContext {
    fn function_name(&self) -> &str {
        &self.function_name
    }

    fn invoked_function_arn(&self) -> &str {
        &self.invoked_function_arn
    }

    fn memory_limit_in_mb(&self) -> u32 {
        self.memory_limit_in_mb
    }

    fn runtime(&self) -> &str {
        &self.runtime
    }

    fn request_id(&self) -> Option<&str> {
        self.aws_request_id.as_deref()
    }
}

/// Region and account pulled out of a function ARN.
///
/// Layout: `arn:<partition>:lambda:<region>:<account>:function:<name>[:<alias>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArn<'a> {
    pub region: &'a str,
    pub account_id: &'a str,
}

impl<'a> FunctionArn<'a> {
    /// Parse an ARN string. Only the leading `arn` marker and the presence of
    /// the region and account fields are checked.
    pub fn parse(arn: &'a str) -> Result<Self> {
        let mut parts = arn.splitn(6, ':');
        let prefix = parts.next();
        let _partition = parts.next();
        let _service = parts.next();
        let region = parts.next();
        let account_id = parts.next();

        match (prefix, region, account_id) {
            (Some("arn"), Some(region), Some(account_id)) => Ok(Self { region, account_id }),
            _ => Err(LambdaError::invalid_arn(arn)),
        }
    }
}
