//! Session and user profile types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user's profile, as returned by the credential exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// An authenticated session: the bearer token plus the profile it was
/// issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for backend requests. Opaque to the client.
    pub access_token: String,

    /// The profile returned alongside the token.
    pub user: UserProfile,

    /// When the credential exchange succeeded.
    pub issued_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session issued now.
    pub fn new(access_token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            access_token: access_token.into(),
            user,
            issued_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_round_trips_through_json() {
        let session = Session::new(
            "t1",
            UserProfile {
                id: "u1".into(),
                name: "A".into(),
                email: "a@x.com".into(),
            },
        );

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
        assert_eq!(back.user.email, "a@x.com");
    }
}
