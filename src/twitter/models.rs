// Serde types for the Twitter REST v1.1 responses we consume.
//
// Only the fields the engine needs are modeled; serde ignores the rest of
// the (very large) user object.

use serde::Deserialize;

/// An account as returned by the API: numeric id, handle and verified flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub id: u64,
    #[serde(rename = "screen_name")]
    pub handle: String,
    #[serde(default)]
    pub verified: bool,
}

impl Account {
    pub fn new(id: u64, handle: impl Into<String>, verified: bool) -> Self {
        Self {
            id,
            handle: handle.into(),
            verified,
        }
    }
}

/// One page of a cursored user listing (`friends/list`, `followers/list`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPage {
    pub users: Vec<Account>,
    #[serde(default)]
    pub next_cursor: i64,
}

/// Error envelope: `{"errors": [{"code": 32, "message": "..."}]}`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorEntry {
    pub code: i64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_user_page() {
        let json = r#"{
            "users": [
                {"id": 1, "id_str": "1", "screen_name": "alice", "verified": false, "followers_count": 10},
                {"id": 2, "id_str": "2", "screen_name": "nasa", "verified": true}
            ],
            "next_cursor": 1489467234237774933,
            "next_cursor_str": "1489467234237774933",
            "previous_cursor": 0
        }"#;
        let page: UserPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.users[0], Account::new(1, "alice", false));
        assert!(page.users[1].verified);
        assert_eq!(page.next_cursor, 1489467234237774933);
    }

    #[test]
    fn test_missing_verified_defaults_false() {
        let json = r#"{"id": 7, "screen_name": "bob"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert!(!account.verified);
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let json = r#"{"errors": [{"code": 32, "message": "Could not authenticate you."}]}"#;
        let env: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(env.errors[0].code, 32);
        assert_eq!(env.errors[0].message, "Could not authenticate you.");
    }
}
