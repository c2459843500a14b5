use std::sync::Arc;

use ql_core::{Error, Result, TextOracle};

use crate::Config;

pub mod nebius;
pub mod scripted;

pub use nebius::NebiusOracle;
pub use scripted::ScriptedOracle;

/// Build an oracle backend by name. The scripted backend needs no
/// credentials and is the default for local use.
pub fn create_oracle(name: &str, config: &Config) -> Result<Arc<dyn TextOracle>> {
    match name {
        "nebius" => Ok(Arc::new(NebiusOracle::new(config)?)),
        "scripted" => Ok(Arc::new(ScriptedOracle::new())),
        other => Err(Error::Oracle(format!("unknown oracle backend: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_knows_its_backends() {
        let config = Config::default();
        assert!(create_oracle("scripted", &config).is_ok());
        assert!(create_oracle("gpt-9", &config).is_err());
        // nebius without an api key is refused at construction
        assert!(create_oracle("nebius", &config).is_err());
    }

    #[test]
    fn factory_builds_nebius_with_credentials() {
        let config = Config {
            api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        let oracle = create_oracle("nebius", &config).unwrap();
        assert_eq!(oracle.name(), "Nebius");
    }
}
