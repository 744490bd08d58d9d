use chrono::{DateTime, Utc};

/// Opaque API token. One per user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub key: String,
    pub user_id: i32,
    pub created: DateTime<Utc>,
}

/// Server-side login session.
///
/// Only the SHA-256 of the cookie value is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub key_hash: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: DateTime<Utc>) -> Session {
        Session {
            key_hash: "abc".into(),
            user_id: 1,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn session_expiry() {
        assert!(!session(Utc::now() + Duration::hours(1)).is_expired());
        assert!(session(Utc::now() - Duration::seconds(1)).is_expired());
    }
}
