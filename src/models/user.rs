use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{GameId, MetricVector};
use crate::error::{AppError, AppResult};

/// Characters that may not appear in a username
pub const FORBIDDEN_USERNAME_CHARS: [char; 6] = ['&', '<', '>', '"', '\'', '/'];

/// The games a user has rated, as catalog ids
///
/// Treated as unordered sets. Duplicates and overlap between the two lists
/// are accepted as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLists {
    pub liked: Vec<GameId>,
    pub disliked: Vec<GameId>,
}

impl GameLists {
    pub fn new(liked: Vec<GameId>, disliked: Vec<GameId>) -> Self {
        Self { liked, disliked }
    }

    /// Parses `{ "liked": [...], "disliked": [...] }` from an untyped payload
    ///
    /// Both fields must be arrays of game ids.
    pub fn from_json(value: &Value) -> AppResult<Self> {
        Ok(Self {
            liked: parse_id_list(value, "liked")?,
            disliked: parse_id_list(value, "disliked")?,
        })
    }
}

fn parse_id_list(value: &Value, field: &str) -> AppResult<Vec<GameId>> {
    let items = value
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::InvalidInput(format!("`{}` must be an array of game ids", field)))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .and_then(|s| Uuid::parse_str(s).ok())
                .ok_or_else(|| {
                    AppError::InvalidInput(format!("`{}` contains an invalid game id: {}", field, item))
                })
        })
        .collect()
}

/// A user profile, without credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub registration_date: DateTime<Utc>,
    /// Taste vector derived from the rated games
    pub metrics: MetricVector,
    pub games: GameLists,
}

impl User {
    /// Creates a user with a neutral taste vector and no rated games
    pub fn new(username: String, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email: email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            registration_date: Utc::now(),
            metrics: MetricVector::baseline(),
            games: GameLists::default(),
        }
    }
}

/// A stored user together with its password hash
#[derive(Debug, Clone, PartialEq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Account creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Rejects empty usernames and names containing markup characters
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.is_empty() {
        return Err(AppError::InvalidInput("Username must not be empty".to_string()));
    }

    if username.contains(FORBIDDEN_USERNAME_CHARS) {
        return Err(AppError::InvalidInput(
            "The following characters are not allowed in usernames: & < > \" ' /".to_string(),
        ));
    }

    Ok(())
}
