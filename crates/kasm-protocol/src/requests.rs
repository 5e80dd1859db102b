//! One explicit payload struct per remote operation.
//!
//! The API authenticates through the request body: every payload embeds
//! the `api_key`/`api_key_secret` pair inline rather than relying on a
//! header. Explicit structs (instead of an untyped key/value bag) make
//! a missing or misspelled field a compile error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{ExecConfig, NewUser, UserAttributes, UserRecord};

/// API-key credential pair carried in every request body.
///
/// `Debug` never prints the secret and truncates the key, so request
/// payloads are safe to log at debug level.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "api_key")]
    pub key: String,
    #[serde(rename = "api_key_secret")]
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.key.get(..4).unwrap_or("");
        f.debug_struct("Credentials")
            .field("key", &format_args!("{shown}…"))
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Selects a user by id or by username for read operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl UserSelector {
    pub fn by_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            username: None,
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            user_id: None,
            username: Some(username.into()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct GetImagesRequest {
    #[serde(flatten)]
    pub auth: Credentials,
}

#[derive(Clone, Debug, Serialize)]
pub struct CreateUserRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub target_user: NewUser,
}

#[derive(Clone, Debug, Serialize)]
pub struct GetUserRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub target_user: UserSelector,
}

#[derive(Clone, Debug, Serialize)]
pub struct GetUsersRequest {
    #[serde(flatten)]
    pub auth: Credentials,
}

#[derive(Clone, Debug, Serialize)]
pub struct UpdateUserRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub target_user: UserRecord,
}

#[derive(Clone, Debug, Serialize)]
pub struct DeleteUserRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub target_user: UserSelector,
    pub force: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct LogoutUserRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub target_user: UserSelector,
}

#[derive(Clone, Debug, Serialize)]
pub struct GetAttributesRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub target_user: UserSelector,
}

#[derive(Clone, Debug, Serialize)]
pub struct UpdateAttributesRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub target_user_attributes: UserAttributes,
}

#[derive(Clone, Debug, Serialize)]
pub struct RequestKasmRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub user_id: String,
    pub image_id: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct GetKasmStatusRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub user_id: String,
    pub kasm_id: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct DestroyKasmRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub user_id: String,
    pub kasm_id: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExecCommandRequest {
    #[serde(flatten)]
    pub auth: Credentials,
    pub user_id: String,
    pub kasm_id: String,
    pub exec_config: ExecConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("0123456789abcdef", "fedcba9876543210")
    }

    #[test]
    fn credentials_flatten_into_the_payload() {
        let request = RequestKasmRequest {
            auth: credentials(),
            user_id: "u-1".into(),
            image_id: "img-1".into(),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["api_key"], "0123456789abcdef");
        assert_eq!(value["api_key_secret"], "fedcba9876543210");
        assert_eq!(value["user_id"], "u-1");
        assert_eq!(value["image_id"], "img-1");
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let rendered = format!("{:?}", credentials());
        assert!(rendered.contains("0123"));
        assert!(!rendered.contains("0123456789abcdef"));
        assert!(!rendered.contains("fedcba9876543210"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn selector_serializes_only_the_populated_side() {
        let value = serde_json::to_value(UserSelector::by_username("ada")).expect("serialize");
        let object = value.as_object().expect("object");
        assert_eq!(object.get("username").and_then(|v| v.as_str()), Some("ada"));
        assert!(!object.contains_key("user_id"));
    }
}
