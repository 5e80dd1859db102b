//! Domain snapshots returned by the API (images, users, session state).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state reported for a session container.
///
/// The set is closed: a status string outside this list is a decode
/// failure, not a silently-carried unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Requested,
    Provisioning,
    Starting,
    Running,
    Paused,
    Stopping,
    Destroyed,
    Deleted,
    Error,
}

impl SessionStatus {
    /// Whether commands may be issued against a session in this state.
    pub fn is_running_capable(self) -> bool {
        matches!(self, SessionStatus::Running)
    }

    /// Whether the session can make no further forward progress.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionStatus::Destroyed | SessionStatus::Deleted | SessionStatus::Error
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Requested => "requested",
            SessionStatus::Provisioning => "provisioning",
            SessionStatus::Starting => "starting",
            SessionStatus::Running => "running",
            SessionStatus::Paused => "paused",
            SessionStatus::Stopping => "stopping",
            SessionStatus::Destroyed => "destroyed",
            SessionStatus::Deleted => "deleted",
            SessionStatus::Error => "error",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog entry describing a launchable session template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub image_id: String,
    pub friendly_name: String,
    /// Container registry reference the image is pulled from.
    pub name: String,
    pub available: bool,
}

/// Group membership entry on a user record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Full user record as the service reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_session: Option<String>,
}

/// Fields accepted when creating a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
            locked: false,
            disabled: false,
            organization: None,
            phone: None,
        }
    }
}

/// Per-user attribute record (`get_attributes` / `update_user_attributes`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserAttributes {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_tips: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_login_kasm: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_control_panel: Option<bool>,
}

impl UserAttributes {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ssh_public_key: None,
            default_image: None,
            show_tips: None,
            auto_login_kasm: None,
            toggle_control_panel: None,
        }
    }
}

/// Command submitted against a live session. The service is the sole
/// executor and runs it asynchronously; clients only forward it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecConfig {
    pub cmd: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workdir: Option<String>,
    #[serde(default)]
    pub privileged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ExecConfig {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            ..Self::default()
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn workdir(mut self, dir: impl Into<String>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn privileged(mut self, privileged: bool) -> Self {
        self.privileged = privileged;
        self
    }

    pub fn run_as(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_status_decodes_every_documented_value() {
        for (raw, expected) in [
            ("requested", SessionStatus::Requested),
            ("provisioning", SessionStatus::Provisioning),
            ("starting", SessionStatus::Starting),
            ("running", SessionStatus::Running),
            ("paused", SessionStatus::Paused),
            ("stopping", SessionStatus::Stopping),
            ("destroyed", SessionStatus::Destroyed),
            ("deleted", SessionStatus::Deleted),
            ("error", SessionStatus::Error),
        ] {
            let decoded: SessionStatus =
                serde_json::from_str(&format!("\"{raw}\"")).expect(raw);
            assert_eq!(decoded, expected);
            assert_eq!(decoded.as_str(), raw);
        }
    }

    #[test]
    fn session_status_rejects_arbitrary_strings() {
        assert!(serde_json::from_str::<SessionStatus>("\"melting\"").is_err());
    }

    #[test]
    fn only_running_is_running_capable() {
        assert!(SessionStatus::Running.is_running_capable());
        assert!(!SessionStatus::Requested.is_running_capable());
        assert!(!SessionStatus::Starting.is_running_capable());
        assert!(!SessionStatus::Destroyed.is_running_capable());
    }

    #[test]
    fn user_record_round_trips_through_json() {
        let record = UserRecord {
            user_id: "u-42".into(),
            username: "ada".into(),
            first_name: Some("Ada".into()),
            last_name: None,
            locked: false,
            disabled: true,
            organization: Some("Analytical Engines".into()),
            phone: None,
            groups: vec![Group {
                group_id: Some("g-1".into()),
                name: Some("All Users".into()),
            }],
            realm: Some("local".into()),
            last_session: Some("2026-08-12 09:30:00".into()),
        };
        let bytes = serde_json::to_vec(&record).expect("serialize");
        let back: UserRecord = serde_json::from_slice(&bytes).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn exec_config_omits_empty_optionals() {
        let value = serde_json::to_value(ExecConfig::new("uptime")).expect("serialize");
        let object = value.as_object().expect("object");
        assert_eq!(object.get("cmd").and_then(|v| v.as_str()), Some("uptime"));
        assert!(!object.contains_key("environment"));
        assert!(!object.contains_key("workdir"));
        assert!(!object.contains_key("user"));
    }

    #[test]
    fn exec_config_builder_sets_every_field() {
        let config = ExecConfig::new("id")
            .env("TERM", "xterm")
            .workdir("/tmp")
            .privileged(true)
            .run_as("root");
        assert_eq!(config.environment["TERM"], "xterm");
        assert_eq!(config.workdir.as_deref(), Some("/tmp"));
        assert!(config.privileged);
        assert_eq!(config.user.as_deref(), Some("root"));
    }
}
