//! Authentication request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_USERNAME_LENGTH;

/// Login form
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}
