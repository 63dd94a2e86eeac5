use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tuan")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(ModelError::Validation("role must be one of [user, admin]".into())),
        }
    }
}

/// Trim and require a non-empty name.
pub fn validate_name(name: &str) -> Result<String, ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("name is required".into()));
    }
    if trimmed.chars().count() > 128 {
        return Err(ModelError::Validation("name must be at most 128 characters".into()));
    }
    Ok(trimmed.to_string())
}

/// Stored form of an email: trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize, then check the address has the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<String, ModelError> {
    let normalized = normalize_email(email);
    if normalized.is_empty() {
        return Err(ModelError::Validation("email is required".into()));
    }
    if !looks_like_email(&normalized) {
        return Err(ModelError::Validation("Invalid email".into()));
    }
    Ok(normalized)
}

fn looks_like_email(s: &str) -> bool {
    if s.len() > 255 || s.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = s.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized_and_checked() {
        assert_eq!(validate_email("  A@X.com ").ok().as_deref(), Some("a@x.com"));
        for bad in ["", "plain", "a@b", "a@@b.com", "@b.com", "a@.com", "a@b.com.", "a b@c.com", "a@b..com"] {
            assert!(validate_email(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(validate_name("  Tuan ").ok().as_deref(), Some("Tuan"));
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(129)).is_err());
    }

    #[test]
    fn role_parses_known_values_only() {
        assert_eq!("user".parse::<Role>().ok(), Some(Role::User));
        assert_eq!("admin".parse::<Role>().ok(), Some(Role::Admin));
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::default().to_string(), "user");
    }
}
