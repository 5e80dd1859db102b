//! Response envelopes.
//!
//! Deserialization is strict about required fields (a missing `status`
//! is an error, never a defaulted value) and tolerant of unknown ones,
//! so newer service versions stay decodable.

use serde::{Deserialize, Serialize};

use crate::models::{Image, SessionStatus, UserAttributes, UserRecord};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImagesResponse {
    pub images: Vec<Image>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserRecord,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributesResponse {
    pub user_attributes: UserAttributes,
}

/// Reply to `request_kasm`. The service answers before the container is
/// ready, so only the id and the initial status are guaranteed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestKasmResponse {
    pub kasm_id: String,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kasm_url: Option<String>,
}

/// Reply to `get_kasm_status`: a point-in-time provisioning snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KasmStatusResponse {
    pub operational_status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_message: Option<String>,
    /// Provisioning progress, 0-100.
    #[serde(default)]
    pub operational_progress: u8,
}

/// Issuance acknowledgment for `exec_command_kasm`. The command runs
/// asynchronously on the service side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecCommandResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kasm_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_kasm_reply_needs_only_id_and_status() {
        let reply: RequestKasmResponse =
            serde_json::from_str(r#"{"kasm_id":"abc","status":"running"}"#).expect("decode");
        assert_eq!(reply.kasm_id, "abc");
        assert_eq!(reply.status, SessionStatus::Running);
        assert_eq!(reply.kasm_url, None);
    }

    #[test]
    fn status_reply_defaults_progress_but_requires_status() {
        let reply: KasmStatusResponse =
            serde_json::from_str(r#"{"operational_status":"starting"}"#).expect("decode");
        assert_eq!(reply.operational_status, SessionStatus::Starting);
        assert_eq!(reply.operational_progress, 0);

        let missing = serde_json::from_str::<KasmStatusResponse>(r#"{"operational_progress":50}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let reply: KasmStatusResponse = serde_json::from_str(
            r#"{"operational_status":"running","operational_progress":100,"port_map":{}}"#,
        )
        .expect("decode");
        assert_eq!(reply.operational_status, SessionStatus::Running);
        assert_eq!(reply.operational_progress, 100);
    }
}
