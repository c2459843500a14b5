use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use uuid::Uuid;

use ql_core::{Article, ArticleMetadata, ArticleStore, Error, Result, Role, Tone, User, UserStore};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS blog_articles (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        tone TEXT NOT NULL,
        author TEXT NOT NULL,
        word_count INTEGER NOT NULL,
        reading_time_minutes INTEGER NOT NULL,
        seo_score REAL NOT NULL,
        meta_description TEXT NOT NULL,
        tags TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        published INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        username TEXT PRIMARY KEY,
        id TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL,
        created_at TEXT NOT NULL,
        last_login TEXT
    )
    "#,
    // Add future migrations here
];

pub struct SqliteStorage {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl SqliteStorage {
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Storage(format!("failed to open database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn article_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Article> {
        let id: String = row.get("id");
        let tone: String = row.get("tone");
        let tags: String = row.get("tags");
        let word_count: i64 = row.get("word_count");
        let reading_time: i64 = row.get("reading_time_minutes");

        Ok(Article {
            id: Uuid::parse_str(&id)
                .map_err(|e| Error::Storage(format!("invalid article id '{}': {}", id, e)))?,
            title: row.get("title"),
            content: row.get("content"),
            tone: tone.parse::<Tone>()?,
            author: row.get("author"),
            metadata: ArticleMetadata {
                word_count: word_count as usize,
                reading_time_minutes: reading_time as u32,
                seo_score: row.get("seo_score"),
                meta_description: row.get("meta_description"),
                tags: serde_json::from_str(&tags)?,
            },
            created_at: parse_timestamp(row.get("created_at"))?,
            updated_at: parse_timestamp(row.get("updated_at"))?,
            published: row.get("published"),
        })
    }

    fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id: String = row.get("id");
        let role: String = row.get("role");
        let last_login: Option<String> = row.get("last_login");

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| Error::Storage(format!("invalid user id '{}': {}", id, e)))?,
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role: role.parse::<Role>()?,
            created_at: parse_timestamp(row.get("created_at"))?,
            last_login: last_login.map(parse_timestamp).transpose()?,
        })
    }
}

fn parse_timestamp(raw: String) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&chrono::Utc))
        .map_err(|e| Error::Storage(format!("invalid timestamp '{}': {}", raw, e)))
}

#[async_trait]
impl ArticleStore for SqliteStorage {
    async fn save_article(&self, article: &Article) -> Result<()> {
        let tags = serde_json::to_string(&article.metadata.tags)?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO blog_articles
            (id, title, content, tone, author, word_count, reading_time_minutes,
             seo_score, meta_description, tags, created_at, updated_at, published)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(article.id.to_string())
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.tone.as_str())
        .bind(&article.author)
        .bind(article.metadata.word_count as i64)
        .bind(article.metadata.reading_time_minutes as i64)
        .bind(article.metadata.seo_score)
        .bind(&article.metadata.meta_description)
        .bind(tags)
        .bind(article.created_at.to_rfc3339())
        .bind(article.updated_at.to_rfc3339())
        .bind(article.published)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to store article: {}", e)))?;

        Ok(())
    }

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM blog_articles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to fetch article: {}", e)))?;

        row.map(|row| Self::article_from_row(&row)).transpose()
    }

    async fn list_by_author(&self, author: &str) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM blog_articles
            WHERE author = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to list articles: {}", e)))?;

        rows.iter().map(Self::article_from_row).collect()
    }

    async fn list_published(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM blog_articles
            WHERE published = 1
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to list published articles: {}", e)))?;

        rows.iter().map(Self::article_from_row).collect()
    }

    async fn set_published(&self, id: Uuid, published: bool) -> Result<Option<Article>> {
        sqlx::query(
            r#"
            UPDATE blog_articles
            SET published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(published)
        .bind(chrono::Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to update article: {}", e)))?;

        self.get_article(id).await
    }

    async fn delete_article(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM blog_articles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to delete article: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteStorage {
    async fn create_user(&self, user: &User) -> Result<()> {
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(Error::Validation(format!(
                "username '{}' is already taken",
                user.username
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO users
            (username, id, email, password_hash, role, created_at, last_login)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at.to_rfc3339())
        .bind(user.last_login.map(|at| at.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(format!("failed to store user: {}", e)))?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to fetch user: {}", e)))?;

        row.map(|row| Self::user_from_row(&row)).transpose()
    }

    async fn touch_last_login(&self, username: &str) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = ? WHERE username = ?")
            .bind(chrono::Utc::now().to_rfc3339())
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("failed to update user: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn article(author: &str) -> Article {
        let now = Utc::now();
        Article {
            id: Uuid::new_v4(),
            title: "Persisted Article".to_string(),
            content: "Body text for the persisted article.".to_string(),
            tone: Tone::Technical,
            author: author.to_string(),
            metadata: ArticleMetadata {
                word_count: 6,
                reading_time_minutes: 1,
                seo_score: 45.0,
                meta_description: "Body text for the persisted article.".to_string(),
                tags: vec!["persisted".to_string(), "article".to_string()],
            },
            created_at: now,
            updated_at: now,
            published: false,
        }
    }

    #[tokio::test]
    async fn articles_survive_a_round_trip() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::open(&dir.path().join("test.db")).await.unwrap();

        let article = article("ada");
        storage.save_article(&article).await.unwrap();

        let fetched = storage.get_article(article.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, article.title);
        assert_eq!(fetched.tone, Tone::Technical);
        assert_eq!(fetched.metadata.tags, article.metadata.tags);
        assert_eq!(fetched.metadata.seo_score, 45.0);
        assert!(!fetched.published);

        let listed = storage.list_by_author("ada").await.unwrap();
        assert_eq!(listed.len(), 1);

        storage.delete_article(article.id).await.unwrap();
        assert!(storage.get_article(article.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn publishing_is_persisted() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::open(&dir.path().join("test.db")).await.unwrap();

        let article = article("ada");
        storage.save_article(&article).await.unwrap();

        let updated = storage.set_published(article.id, true).await.unwrap().unwrap();
        assert!(updated.published);
        assert_eq!(storage.list_published().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn users_survive_a_round_trip() {
        let dir = tempdir().unwrap();
        let storage = SqliteStorage::open(&dir.path().join("test.db")).await.unwrap();

        let user = User {
            id: Uuid::new_v4(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Writer,
            created_at: Utc::now(),
            last_login: None,
        };
        storage.create_user(&user).await.unwrap();
        assert!(storage.create_user(&user).await.is_err());

        storage.touch_last_login("ada").await.unwrap();
        let fetched = storage.find_by_username("ada").await.unwrap().unwrap();
        assert_eq!(fetched.role, Role::Writer);
        assert!(fetched.last_login.is_some());
    }
}
