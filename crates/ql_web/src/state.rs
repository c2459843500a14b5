use std::sync::Arc;

use ql_auth::TokenService;
use ql_core::{Store, TextOracle};

pub struct AppState {
    pub oracle: Arc<dyn TextOracle>,
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
}
