//! User model and user operations on the data store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::DataStore;
use crate::{AgoraError, Result};

/// User role for permission management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Role {
    /// Regular member.
    #[default]
    User = 0,
    /// Administrator.
    Admin = 1,
}

impl Role {
    /// Convert role to its string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Check if this role grants admin access.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Password hash (Argon2id PHC string).
    pub password: String,
    /// Display name.
    pub name: String,
    /// User role for permissions.
    pub role: Role,
    /// Activity score; drives the rank tier.
    pub score: i64,
    /// Whether the account is suspended.
    pub suspended: bool,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (should be pre-hashed with Argon2id).
    pub password: String,
    /// Display name.
    pub name: String,
    /// User role (defaults to User).
    pub role: Role,
}

impl NewUser {
    /// Create a new user with minimal required fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            name: name.into(),
            role: Role::User,
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

impl DataStore {
    /// Create a new user.
    ///
    /// Returns a conflict error if the username is already taken
    /// (case-insensitive).
    pub fn create_user(&mut self, new: NewUser) -> Result<User> {
        if self
            .users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(&new.username))
        {
            return Err(AgoraError::Conflict("username already exists".to_string()));
        }

        let user = User {
            id: self.allocate_user_id(),
            username: new.username,
            password: new.password,
            name: new.name,
            role: new.role,
            score: 0,
            suspended: false,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    /// Look up a user by ID.
    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Look up a user by username (case-insensitive).
    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
    }

    /// All users, in registration order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Number of posts authored by the given user.
    pub fn post_count_by_author(&self, user_id: i64) -> usize {
        self.posts.iter().filter(|p| p.author_id == user_id).count()
    }

    /// Update a user's display name.
    ///
    /// Post and comment author names are denormalized; existing content keeps
    /// the name it was written under.
    pub fn update_user_name(&mut self, id: i64, name: &str) -> Result<User> {
        let user = self.user_mut(id)?;
        user.name = name.to_string();
        Ok(user.clone())
    }

    /// Replace a user's password hash.
    pub fn update_user_password(&mut self, id: i64, password_hash: &str) -> Result<User> {
        let user = self.user_mut(id)?;
        user.password = password_hash.to_string();
        Ok(user.clone())
    }

    /// Set a user's score to an absolute value.
    pub fn set_user_score(&mut self, id: i64, score: i64) -> Result<User> {
        let user = self.user_mut(id)?;
        user.score = score;
        Ok(user.clone())
    }

    /// Add a (possibly negative) delta to a user's score.
    ///
    /// Unknown authors are ignored: votes on content whose author no longer
    /// exists simply do not move any score.
    pub(crate) fn bump_user_score(&mut self, id: i64, delta: i64) {
        if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
            user.score += delta;
        }
    }

    /// Flip a user's suspended flag; returns the updated user.
    pub fn toggle_user_suspended(&mut self, id: i64) -> Result<User> {
        let user = self.user_mut(id)?;
        user.suspended = !user.suspended;
        Ok(user.clone())
    }

    fn user_mut(&mut self, id: i64) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AgoraError::NotFound("user".to_string()))
    }
}
