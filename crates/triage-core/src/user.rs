//! User and staff-contact types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Role of a user account.
///
/// `Admin` accounts are helpdesk staff: they can log into the dashboard and
/// are eligible as escalation fallback contacts. `User` accounts are chatbot
/// callers, created by self-registration or lazily during escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Helpdesk staff member.
    Admin,
    /// Regular chatbot user.
    User,
}

impl UserRole {
    /// Stable string form used in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }

    /// Parse the stable string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Self::Admin),
            "User" => Some(Self::User),
            _ => None,
        }
    }
}

/// A user record.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Store-assigned identifier.
    pub user_id: UserId,

    /// Full display name.
    pub full_name: String,

    /// Login name; present only for Admin accounts.
    pub username: Option<String>,

    /// Email address (unique across the store).
    pub email: String,

    /// Phone number, if supplied.
    pub phone: Option<String>,

    /// Password hash; null for accounts that never log in.
    /// Never serialized into API responses.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Account role.
    pub role: UserRole,

    /// Free-form caller classification (e.g. "Student", "Faculty").
    pub user_type: Option<String>,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Full display name.
    pub full_name: String,
    /// Login name, Admin accounts only.
    pub username: Option<String>,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Password hash, Admin accounts only.
    pub password_hash: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Caller classification.
    pub user_type: Option<String>,
}

impl NewUser {
    /// A chatbot caller: role `User`, no credentials.
    #[must_use]
    pub fn caller(full_name: String, email: String, phone: Option<String>, user_type: Option<String>) -> Self {
        Self {
            full_name,
            username: None,
            email,
            phone,
            password_hash: None,
            role: UserRole::User,
            user_type,
        }
    }
}

/// The staff identity surfaced to a caller when no FAQ answer is found.
///
/// Either a real Admin user or a static departmental contact synthesized
/// when no staff exist in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackContact {
    /// Contact display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone, if known.
    pub phone: Option<String>,
}

impl From<&User> for FallbackContact {
    fn from(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_string_roundtrip() {
        for role in [UserRole::Admin, UserRole::User] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("Superuser"), None);
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            user_id: UserId::new(1),
            full_name: "Jo Staff".into(),
            username: Some("jstaff".into()),
            email: "jo@example.edu".into(),
            phone: None,
            password_hash: Some("$2b$10$abc".into()),
            role: UserRole::Admin,
            user_type: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$10$abc"));
    }
}
