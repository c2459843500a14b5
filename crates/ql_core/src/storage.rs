use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{Article, User};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert or replace an article
    async fn save_article(&self, article: &Article) -> Result<()>;

    /// Fetch one article by id
    async fn get_article(&self, id: Uuid) -> Result<Option<Article>>;

    /// All articles by the given author, newest first
    async fn list_by_author(&self, author: &str) -> Result<Vec<Article>>;

    /// All published articles, newest first
    async fn list_published(&self) -> Result<Vec<Article>>;

    /// Flip the published flag; returns the updated article if it exists
    async fn set_published(&self, id: Uuid, published: bool) -> Result<Option<Article>>;

    /// Remove an article
    async fn delete_article(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store a new user; a taken username is a validation error
    async fn create_user(&self, user: &User) -> Result<()>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Record a successful login
    async fn touch_last_login(&self, username: &str) -> Result<()>;
}

/// A backend that holds both articles and users, so one handle can be
/// passed around the application.
pub trait Store: ArticleStore + UserStore {}

impl<T: ArticleStore + UserStore> Store for T {}
