//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::SessionConfig,
    constants::{paths, MIN_PASSWORD_LENGTH},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::{HasRole, NewUser, Role, User},
    utils::{non_blank, validate_username},
};

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Fields accepted when creating a user from the command line
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub bio: Option<String>,
    pub locality: Option<String>,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Check a username/password pair
    pub async fn authenticate(
        users: &dyn UserRepository,
        username: &str,
        password: &str,
    ) -> AppResult<User> {
        let user = match users.find_by_username(username.trim()).await? {
            Some(user) => user,
            None => {
                debug!(username = %username, "Login failed: unknown user");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !Self::verify_password(password, &user.password_hash)? {
            debug!(username = %username, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(user)
    }

    /// Page a user lands on after logging in.
    ///
    /// Precedence: representative, admin, moderator, then the landing page.
    pub fn destination_for(user: &impl HasRole) -> &'static str {
        if user.is_representative() {
            paths::REPRESENTATIVE_DASHBOARD
        } else if user.is_admin() {
            paths::ADMIN_DASHBOARD
        } else if user.is_moderator() {
            paths::MODERATOR_DASHBOARD
        } else {
            paths::LANDING
        }
    }

    /// Create a user with a hashed password
    pub async fn create_user(users: &dyn UserRepository, input: CreateUserInput) -> AppResult<User> {
        let username = input.username.trim().to_string();
        validate_username(&username).map_err(|e| AppError::Validation(e.to_string()))?;

        if (input.password.chars().count() as u64) < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if users.find_by_username(&username).await?.is_some() {
            return Err(AppError::AlreadyExists("Username already taken".to_string()));
        }

        let password_hash = Self::hash_password(&input.password)?;

        let user = users
            .create(NewUser {
                username,
                password_hash,
                role: input.role,
                bio: non_blank(input.bio.as_deref()),
                locality: non_blank(input.locality.as_deref()),
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    /// Issue a signed session token for a user
    pub fn issue_token(user: &User, config: &SessionConfig) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))
    }

    /// Verify a session token and extract its claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::MockUserRepository;
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn session_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret".to_string(),
            expiry_hours: 1,
            cookie_secure: false,
        }
    }

    fn user(username: &str, password: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: AuthService::hash_password(password).unwrap(),
            role,
            bio: None,
            locality: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let stored = user("ana", "guitarra123", Role::Representative);
        let expected_id = stored.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .with(eq("ana"))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let user = AuthService::authenticate(&users, "ana", "guitarra123")
            .await
            .unwrap();
        assert_eq!(user.id, expected_id);
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let stored = user("ana", "guitarra123", Role::Representative);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(stored.clone())));

        let result = AuthService::authenticate(&users, "ana", "bateria").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let result = AuthService::authenticate(&users, "nadie", "x").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_destination_precedence() {
        let cases = [
            (Role::Representative, paths::REPRESENTATIVE_DASHBOARD),
            (Role::Admin, paths::ADMIN_DASHBOARD),
            (Role::Moderator, paths::MODERATOR_DASHBOARD),
            (Role::Visitor, paths::LANDING),
        ];
        for (role, expected) in cases {
            let user = User {
                id: Uuid::new_v4(),
                username: "x".to_string(),
                password_hash: String::new(),
                role,
                bio: None,
                locality: None,
                created_at: Utc::now(),
            };
            assert_eq!(AuthService::destination_for(&user), expected);
        }
    }

    #[test]
    fn test_token_round_trip_and_tamper() {
        let config = session_config();
        let user = user("ana", "guitarra123", Role::Admin);

        let token = AuthService::issue_token(&user, &config).unwrap();
        let claims = AuthService::verify_token(&token, &config.secret).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, Role::Admin);

        assert!(AuthService::verify_token(&token, "other-secret").is_err());
    }

    #[tokio::test]
    async fn test_create_user_rejects_short_password() {
        let users = MockUserRepository::new();
        let result = AuthService::create_user(
            &users,
            CreateUserInput {
                username: "ana".to_string(),
                password: "corta".to_string(),
                role: Role::Visitor,
                bio: None,
                locality: None,
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));
        users.expect_create().times(1).returning(|new_user| {
            assert_ne!(new_user.password_hash, "guitarra123");
            assert!(new_user.password_hash.starts_with("$argon2"));
            assert_eq!(new_user.locality.as_deref(), Some("Rosario"));
            assert_eq!(new_user.bio, None);
            Ok(User {
                id: Uuid::new_v4(),
                username: new_user.username,
                password_hash: new_user.password_hash,
                role: new_user.role,
                bio: new_user.bio,
                locality: new_user.locality,
                created_at: Utc::now(),
            })
        });

        let user = AuthService::create_user(
            &users,
            CreateUserInput {
                username: " ana ".to_string(),
                password: "guitarra123".to_string(),
                role: Role::Representative,
                bio: Some("   ".to_string()),
                locality: Some("Rosario".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(user.username, "ana");
        assert!(user.is_representative());
    }

    #[tokio::test]
    async fn test_create_user_duplicate() {
        let existing = user("ana", "guitarra123", Role::Visitor);
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));

        let result = AuthService::create_user(
            &users,
            CreateUserInput {
                username: "ana".to_string(),
                password: "guitarra123".to_string(),
                role: Role::Visitor,
                bio: None,
                locality: None,
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }
}
