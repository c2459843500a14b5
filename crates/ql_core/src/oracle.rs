use async_trait::async_trait;
use std::fmt;

use crate::types::GenerationRequest;
use crate::Result;

#[async_trait]
pub trait TextOracle: Send + Sync + fmt::Debug {
    /// Human-readable backend name, used in startup logs
    fn name(&self) -> &str;

    /// Generate the article body for a request
    async fn generate_body(&self, request: &GenerationRequest) -> Result<String>;

    /// Generate an SEO-friendly title for a request
    async fn generate_title(&self, request: &GenerationRequest) -> Result<String>;
}
