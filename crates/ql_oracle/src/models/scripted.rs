use std::fmt;

use async_trait::async_trait;

use ql_core::{GenerationRequest, Result, TextOracle};

use crate::fallback;

/// Deterministic offline oracle. Emits the same templated guide the
/// fallback path uses, which makes it handy for local runs and tests.
pub struct ScriptedOracle;

impl ScriptedOracle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ScriptedOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScriptedOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedOracle").finish()
    }
}

#[async_trait]
impl TextOracle for ScriptedOracle {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn generate_body(&self, request: &GenerationRequest) -> Result<String> {
        tracing::debug!("scripting article body about '{}'", request.keywords);
        Ok(fallback::article_body(request))
    }

    async fn generate_title(&self, request: &GenerationRequest) -> Result<String> {
        Ok(fallback::article_title(request))
    }
}
