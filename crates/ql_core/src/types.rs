use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::Result;

pub const MIN_WORD_COUNT: u32 = 100;
pub const MAX_WORD_COUNT: u32 = 3000;

/// Writing-style parameter fed into prompt construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Humorous,
    Technical,
    Friendly,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Humorous => "humorous",
            Tone::Technical => "technical",
            Tone::Friendly => "friendly",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "casual" => Ok(Tone::Casual),
            "humorous" => Ok(Tone::Humorous),
            "technical" => Ok(Tone::Technical),
            "friendly" => Ok(Tone::Friendly),
            other => Err(Error::Validation(format!("unknown tone: {}", other))),
        }
    }
}

/// What the caller wants generated. Immutable once validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub keywords: String,
    pub tone: Tone,
    pub word_count: u32,
}

impl GenerationRequest {
    pub fn validate(&self) -> Result<()> {
        if self.keywords.trim().is_empty() {
            return Err(Error::Validation("keywords must not be empty".to_string()));
        }
        if !(MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(&self.word_count) {
            return Err(Error::Validation(format!(
                "word count must be between {} and {}",
                MIN_WORD_COUNT, MAX_WORD_COUNT
            )));
        }
        Ok(())
    }
}

/// Raw output of the text oracle. Opaque UTF-8, arbitrary length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedText {
    pub title: String,
    pub body: String,
}

/// Derived article metadata. Recomputed from the text and the original
/// keywords on every generation or save; replaced, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    pub word_count: usize,
    pub reading_time_minutes: u32,
    pub seo_score: f64,
    pub meta_description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tone: Tone,
    pub author: String,
    pub metadata: ArticleMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Writer,
    Reader,
}

impl Default for Role {
    fn default() -> Self {
        Role::Reader
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Writer => "writer",
            Role::Reader => "reader",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "writer" => Ok(Role::Writer),
            "reader" => Ok(Role::Reader),
            other => Err(Error::Validation(format!("unknown role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 hash, never serialized out of the server
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(word_count: u32) -> GenerationRequest {
        GenerationRequest {
            keywords: "rust, web".to_string(),
            tone: Tone::Professional,
            word_count,
        }
    }

    #[test]
    fn tone_parses_case_insensitively() {
        assert_eq!("Technical".parse::<Tone>().unwrap(), Tone::Technical);
        assert_eq!("FRIENDLY".parse::<Tone>().unwrap(), Tone::Friendly);
        assert!("sarcastic".parse::<Tone>().is_err());
    }

    #[test]
    fn tone_serializes_lowercase() {
        let json = serde_json::to_string(&Tone::Humorous).unwrap();
        assert_eq!(json, "\"humorous\"");
    }

    #[test]
    fn request_validation_enforces_bounds() {
        assert!(request(100).validate().is_ok());
        assert!(request(3000).validate().is_ok());
        assert!(request(99).validate().is_err());
        assert!(request(3001).validate().is_err());

        let mut blank = request(500);
        blank.keywords = "   ".to_string();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            role: Role::default(),
            created_at: Utc::now(),
            last_login: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"reader\""));
    }
}
