//! Enhanced tags derived from the execution environment.
//!
//! These describe the function and the environment it runs in and are
//! attached to the enhanced invocation/error metrics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{FunctionArn, InvocationContext};
use crate::state::InvocationState;

/// Descriptive attributes of the current invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedTags {
    pub cold_start: bool,
    pub functionname: String,
    pub memorysize: u32,
    pub region: String,
    pub account_id: String,
    pub runtime: String,
}

impl EnhancedTags {
    /// Render as ordered `(key, value)` pairs for a metric's tag list.
    pub fn to_metric_tags(&self) -> Vec<(String, String)> {
        vec![
            ("cold_start".to_string(), self.cold_start.to_string()),
            ("functionname".to_string(), self.functionname.clone()),
            ("memorysize".to_string(), self.memorysize.to_string()),
            ("region".to_string(), self.region.clone()),
            ("account_id".to_string(), self.account_id.clone()),
            ("runtime".to_string(), self.runtime.clone()),
        ]
    }
}

/// Build the enhanced tags for `context`.
///
/// `cold_start` is read from `state` as-is. If the ARN cannot be parsed the
/// region and account id are left empty.
pub fn gen_enhanced_tags<C>(context: &C, state: &InvocationState) -> EnhancedTags
where
    C: InvocationContext + ?Sized,
{
    let (region, account_id) = match FunctionArn::parse(context.invoked_function_arn()) {
        Ok(arn) => (arn.region.to_string(), arn.account_id.to_string()),
        Err(err) => {
            debug!(error = %err, "could not derive region and account from function ARN");
            (String::new(), String::new())
        }
    };

    EnhancedTags {
        cold_start: state.is_cold_start(),
        functionname: context.function_name().to_string(),
        memorysize: context.memory_limit_in_mb(),
        region,
        account_id,
        runtime: context.runtime().to_string(),
    }
}
