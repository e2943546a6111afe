//! Back-office administrator accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::password::Password;

/// Administrator domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    /// Stored password as a value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }
}

/// Emails are compared trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Admin account response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "admin")]
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<AdminUser> for AdminResponse {
    fn from(admin: AdminUser) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            role: admin.role,
            created_at: admin.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Admin@Example.COM "), "admin@example.com");
    }

    #[test]
    fn test_response_hides_hash() {
        let now = Utc::now();
        let admin = AdminUser {
            id: Uuid::new_v4(),
            email: "admin@example.com".into(),
            password_hash: "secret-hash".into(),
            role: "admin".into(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&AdminResponse::from(admin.clone())).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!serde_json::to_string(&admin).unwrap().contains("secret-hash"));
    }
}
