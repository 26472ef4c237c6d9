use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    db::UserStore,
    error::{AppError, AppResult},
    models::{user::validate_username, NewUser, User},
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Hashes a password as `salt$hex(sha256(salt || password))`
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{}${:x}", salt, hasher.finalize())
}

/// Checks a password against a hash produced by [`hash_password`]
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, _)) => hash_password(password, salt) == stored,
        None => false,
    }
}

/// Registers a new account with a neutral taste vector
pub async fn create_user(users: &dyn UserStore, new_user: NewUser) -> AppResult<User> {
    validate_username(&new_user.username)?;
    if new_user.password.is_empty() {
        return Err(AppError::InvalidInput("Password must not be empty".to_string()));
    }

    let salt = Uuid::new_v4().simple().to_string();
    let password_hash = hash_password(&new_user.password, &salt);
    let user = User::new(new_user.username, new_user.email);

    users.create(&user, &password_hash).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "Created user");
    Ok(user)
}

/// Returns the user whose credentials match
pub async fn authenticate(users: &dyn UserStore, username: &str, password: &str) -> AppResult<User> {
    let credentials = users
        .find_credentials(username)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(password, &credentials.password_hash) {
        tracing::warn!(username = %username, "Rejected login attempt");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    Ok(credentials.user)
}

/// Looks up a user profile; the password hash is never part of it
pub async fn get_user(users: &dyn UserStore, id: Uuid) -> AppResult<User> {
    users.get_by_id(id).await
}
