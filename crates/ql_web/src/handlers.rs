use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use ql_core::{Article, Error, GenerationRequest, Role, Tone, User};
use ql_oracle::fallback;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Json<Value>> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(Error::Validation("username and password are required".to_string()).into());
    }

    let user = User {
        id: Uuid::new_v4(),
        username: request.username.trim().to_string(),
        email: request.email,
        password_hash: ql_auth::password::hash(&request.password)?,
        role: request.role.unwrap_or_default(),
        created_at: Utc::now(),
        last_login: None,
    };
    state.store.create_user(&user).await?;
    tracing::info!("🙋 Registered user {}", user.username);

    Ok(Json(json!({
        "message": "User registered successfully",
        "user": UserProfile::from(&user),
    })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let Some(user) = state.store.find_by_username(&request.username).await? else {
        return Err(invalid_credentials());
    };
    if !ql_auth::password::verify(&request.password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(&user)?;
    state.store.touch_last_login(&user.username).await?;
    tracing::info!("🔓 User {} logged in", user.username);

    Ok(Json(LoginResponse {
        token,
        user: UserProfile::from(&user),
    }))
}

// The original backend answers bad credentials with 400, not 401; clients
// rely on that to distinguish login failure from an expired session.
fn invalid_credentials() -> ApiError {
    ApiError(Error::Validation("Invalid credentials".to_string()))
}

pub async fn status() -> Json<Value> {
    Json(json!({
        "status": "UP",
        "message": "quill backend is running",
        "timestamp": Utc::now(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBlogRequest {
    pub keywords: String,
    pub tone: Tone,
    pub word_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBlogResponse {
    pub title: String,
    pub content: String,
    pub tone: Tone,
    pub word_count: usize,
    pub reading_time: u32,
    pub seo_score: f64,
    pub meta_description: String,
    pub tags: Vec<String>,
}

pub async fn generate_blog(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(request): Json<GenerateBlogRequest>,
) -> ApiResult<Json<GenerateBlogResponse>> {
    let request = GenerationRequest {
        keywords: request.keywords,
        tone: request.tone,
        word_count: request.word_count,
    };
    request.validate()?;

    tracing::info!(
        "✍️ Generating article about '{}' for {}",
        request.keywords,
        claims.username
    );
    let (text, forced_score) = fallback::generate_or_fallback(state.oracle.as_ref(), &request).await;

    let mut metadata = ql_metadata::compute(&text.title, &text.body, &request.keywords);
    if let Some(score) = forced_score {
        metadata.seo_score = score;
    }

    Ok(Json(GenerateBlogResponse {
        title: text.title,
        content: text.body,
        tone: request.tone,
        word_count: metadata.word_count,
        reading_time: metadata.reading_time_minutes,
        seo_score: metadata.seo_score,
        meta_description: metadata.meta_description,
        tags: metadata.tags,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBlogRequest {
    pub title: String,
    pub content: String,
    pub tone: Tone,
    pub keywords: String,
    #[serde(default)]
    pub publish: bool,
}

pub async fn save_blog(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(request): Json<SaveBlogRequest>,
) -> ApiResult<Json<Article>> {
    if request.title.trim().is_empty() || request.content.trim().is_empty() {
        return Err(Error::Validation("title and content are required".to_string()).into());
    }

    // Derived fields are recomputed here; client-sent metadata is ignored
    let metadata = ql_metadata::compute(&request.title, &request.content, &request.keywords);
    let now = Utc::now();
    let article = Article {
        id: Uuid::new_v4(),
        title: request.title,
        content: request.content,
        tone: request.tone,
        author: claims.username.clone(),
        metadata,
        created_at: now,
        updated_at: now,
        published: request.publish,
    };
    state.store.save_article(&article).await?;
    tracing::info!("💾 Saved article {} by {}", article.id, article.author);

    Ok(Json(article))
}

pub async fn my_blogs(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> ApiResult<Json<Vec<Article>>> {
    let articles = state.store.list_by_author(&claims.username).await?;
    Ok(Json(articles))
}

pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Article>> {
    match state.store.get_article(id).await? {
        Some(article) => Ok(Json(article)),
        None => Err(article_not_found(id)),
    }
}

pub async fn publish_blog(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Article>> {
    let article = state
        .store
        .get_article(id)
        .await?
        .ok_or_else(|| article_not_found(id))?;
    if article.author != claims.username {
        return Err(Error::Auth("only the author may publish an article".to_string()).into());
    }

    let article = state
        .store
        .set_published(id, true)
        .await?
        .ok_or_else(|| article_not_found(id))?;
    tracing::info!("📣 Published article {}", article.id);
    Ok(Json(article))
}

fn article_not_found(id: Uuid) -> ApiError {
    ApiError(Error::NotFound(format!("article {}", id)))
}
