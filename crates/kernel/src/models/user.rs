//! Admin user accounts, loaded from a TOML users file.

use std::path::Path;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::pager::Queryable;

/// Errors loading the user directory or hashing passwords.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("failed to read users file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse users file")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate username `{0}`")]
    Duplicate(String),

    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Staff users may use the admin site.
    #[serde(default)]
    pub is_staff: bool,
    /// Inactive accounts cannot log in.
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
    /// Argon2 PHC string.
    #[serde(default, skip_serializing)]
    pub password: String,
}

fn default_true() -> bool {
    true
}

impl AdminUser {
    /// Create an active, non-staff user without a password.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
            is_active: true,
            date_joined: None,
            password: String::new(),
        }
    }

    /// "First Last", or the username when both are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// Verify a password against this user's hash.
    pub fn verify_password(&self, password: &str) -> bool {
        if self.password.is_empty() {
            return false;
        }

        let Ok(parsed_hash) = PasswordHash::new(&self.password) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UserError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

#[derive(Debug, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<AdminUser>,
}

/// All known users, in file order.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<AdminUser>,
}

impl UserDirectory {
    /// Build a directory from a list of users. Usernames must be unique.
    pub fn new(users: Vec<AdminUser>) -> Result<Self, UserError> {
        for (i, user) in users.iter().enumerate() {
            if users[..i].iter().any(|u| u.username == user.username) {
                return Err(UserError::Duplicate(user.username.clone()));
            }
        }
        Ok(Self { users })
    }

    /// Parse a users file.
    ///
    /// ```toml
    /// [[users]]
    /// username = "admin"
    /// first_name = "Ada"
    /// is_staff = true
    /// date_joined = "2024-01-01T00:00:00Z"
    /// password = "$argon2id$v=19$..."
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, UserError> {
        let file: UsersFile = toml::from_str(contents)?;
        Self::new(file.users)
    }

    /// Load a users file. A missing file yields an empty directory.
    pub fn load(path: &Path) -> Result<Self, UserError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "users file not found; nobody can log in");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(UserError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let directory = Self::from_toml_str(&contents)?;
        debug!(users = directory.len(), path = %path.display(), "loaded users");
        Ok(directory)
    }

    /// Find a user by username.
    pub fn find(&self, username: &str) -> Option<&AdminUser> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Check credentials. Inactive accounts never authenticate.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<&AdminUser> {
        self.find(username)
            .filter(|u| u.is_active && u.verify_password(password))
    }

    pub fn all(&self) -> &[AdminUser] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Queryable for UserDirectory {
    type Item = AdminUser;

    fn count(&self) -> u64 {
        self.users.count()
    }

    fn slice(&self, start: u64, end: u64) -> Vec<AdminUser> {
        self.users.slice(start, end)
    }
}
