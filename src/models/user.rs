//! User model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role held by a user.
///
/// Every user holds exactly one role; `Visitor` carries no privileges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    Representative,
    #[default]
    Visitor,
}

impl Role {
    /// All roles, in login routing precedence order
    pub const ALL: [Role; 4] = [
        Role::Representative,
        Role::Admin,
        Role::Moderator,
        Role::Visitor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Representative => "representative",
            Self::Visitor => "visitor",
        }
    }

    /// Human-readable label shown in the dashboards
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Moderator => "Moderador",
            Self::Representative => "Representante",
            Self::Visitor => "Visitante",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            "representative" => Ok(Self::Representative),
            "visitor" => Ok(Self::Visitor),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Read-only role predicates shared by stored users and session users
pub trait HasRole {
    fn role(&self) -> Role;

    fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    fn is_moderator(&self) -> bool {
        self.role() == Role::Moderator
    }

    fn is_representative(&self) -> bool {
        self.role() == Role::Representative
    }

    fn is_visitor(&self) -> bool {
        self.role() == Role::Visitor
    }
}

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub bio: Option<String>,
    pub locality: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HasRole for User {
    fn role(&self) -> Role {
        self.role
    }
}

/// Data needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub bio: Option<String>,
    pub locality: Option<String>,
}
