pub mod error;
pub mod oracle;
pub mod storage;
pub mod types;

pub use error::Error;
pub use oracle::TextOracle;
pub use storage::{ArticleStore, Store, UserStore};
pub use types::{
    Article, ArticleMetadata, GeneratedText, GenerationRequest, Role, Tone, User,
};

pub type Result<T> = std::result::Result<T, Error>;
