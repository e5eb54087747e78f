//! Input validation utilities

use std::collections::BTreeMap;

use validator::ValidateUrl;

use crate::constants::MAX_USERNAME_LENGTH;

/// Validate username format
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        return Err("Username cannot be empty");
    }
    if username.chars().count() as u64 > MAX_USERNAME_LENGTH {
        return Err("Username must be at most 150 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '@' | '+'))
    {
        return Err("Username can only contain letters, numbers and @/./+/-/_");
    }
    Ok(())
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Turn an optional free-text field into `None` when it is blank
pub fn non_blank(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_string)
        .filter(|value| !value.is_empty())
}

/// Parse the social networks field of a member form.
///
/// Accepts an empty string (no networks) or a JSON object mapping network
/// names to absolute `http`/`https` URLs.
pub fn parse_social_networks(input: &str) -> Result<BTreeMap<String, String>, &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(BTreeMap::new());
    }

    let networks: BTreeMap<String, String> = serde_json::from_str(trimmed)
        .map_err(|_| "Las redes sociales deben ser un objeto JSON de nombre a URL")?;

    if networks.keys().any(|name| name.trim().is_empty()) {
        return Err("El nombre de cada red social no puede estar vacío");
    }

    if !networks.values().all(|url| is_web_url(url)) {
        return Err("Cada red social debe ser una URL que empiece con http:// o https://");
    }

    Ok(networks)
}

/// Absolute URL with an `http` or `https` scheme
pub fn is_web_url(value: &str) -> bool {
    let scheme = value.split_once("://").map(|(scheme, _)| scheme);
    matches!(scheme, Some(s) if s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
        && value.validate_url()
}
