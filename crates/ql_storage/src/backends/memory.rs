use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ql_core::{Article, ArticleStore, Error, Result, User, UserStore};

/// In-memory backend, the default for local runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    articles: RwLock<Vec<Article>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryStorage {
    async fn save_article(&self, article: &Article) -> Result<()> {
        let mut articles = self.articles.write().await;
        if let Some(existing) = articles.iter_mut().find(|a| a.id == article.id) {
            *existing = article.clone();
        } else {
            articles.push(article.clone());
        }
        Ok(())
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn list_by_author(&self, author: &str) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        let mut result: Vec<Article> = articles
            .iter()
            .filter(|a| a.author == author)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn list_published(&self) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        let mut result: Vec<Article> = articles.iter().filter(|a| a.published).cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn set_published(&self, id: Uuid, published: bool) -> Result<Option<Article>> {
        let mut articles = self.articles.write().await;
        match articles.iter_mut().find(|a| a.id == id) {
            Some(article) => {
                article.published = published;
                article.updated_at = chrono::Utc::now();
                Ok(Some(article.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_article(&self, id: Uuid) -> Result<()> {
        let mut articles = self.articles.write().await;
        articles.retain(|a| a.id != id);
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(Error::Validation(format!(
                "username '{}' is already taken",
                user.username
            )));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn touch_last_login(&self, username: &str) -> Result<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(username) {
            user.last_login = Some(chrono::Utc::now());
        }
        Ok(())
    }
}
