pub mod fallback;
pub mod models;
pub mod prompt;

pub use models::create_oracle;

/// Connection settings for a hosted oracle backend.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

pub mod prelude {
    pub use super::models::create_oracle;
    pub use super::Config;
    pub use ql_core::{GeneratedText, GenerationRequest, Result, TextOracle};
}
