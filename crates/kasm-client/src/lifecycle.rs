//! Session lifecycle: request, poll, exec, destroy.
//!
//! The expected progression is `Requested -> (Starting|Running) ->
//! Stopping -> Destroyed`, with `Error` terminal at any point. A
//! [`Session`] is a handle plus the last *observed* status; it holds no
//! authoritative state and the crate keeps no session table. Polling
//! cadence and backoff are deliberately the caller's problem: nothing
//! here sleeps, loops or retries.
//!
//! Usage contract: once a session is destroyed, drop the handle. Poll
//! and exec on a destroyed handle fail fast with a usage error instead
//! of issuing a network call against a nonexistent id. A forgotten
//! `destroy` leaks the remote container; there is no local finalizer.

use kasm_protocol::{ExecCommandResponse, ExecConfig, SessionStatus};

use crate::client::Client;
use crate::errors::{ClientError, Result};

/// Handle to one remote session and the status last observed for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub kasm_id: String,
    pub user_id: String,
    pub image_id: String,
    pub status: SessionStatus,
    pub status_message: Option<String>,
    /// Provisioning progress, 0-100, from the last poll.
    pub progress: u8,
    pub kasm_url: Option<String>,
    pub session_token: Option<String>,
}

impl Session {
    /// Asks the service for a new session. Returns as soon as the
    /// service answers, with whatever status it reports (typically
    /// `requested` or `starting`); it does not wait for readiness.
    pub async fn request(client: &Client, user_id: &str, image_id: &str) -> Result<Self> {
        let created = client.request_kasm(user_id, image_id).await?;
        Ok(Self {
            kasm_id: created.kasm_id,
            user_id: user_id.into(),
            image_id: image_id.into(),
            status: created.status,
            status_message: None,
            progress: 0,
            kasm_url: created.kasm_url,
            session_token: created.session_token,
        })
    }

    /// Refreshes status, message and progress from the service. Pure
    /// read; call it in a loop with your own backoff until
    /// [`SessionStatus::is_running_capable`] or a terminal state.
    pub async fn poll(&mut self, client: &Client) -> Result<SessionStatus> {
        self.ensure_not_destroyed("poll")?;
        let snapshot = client.get_kasm_status(&self.user_id, &self.kasm_id).await?;
        self.status = snapshot.operational_status;
        self.status_message = snapshot.operational_message;
        self.progress = snapshot.operational_progress;
        Ok(self.status)
    }

    /// Forwards a command to the session. The service executes it
    /// asynchronously; the reply only acknowledges issuance.
    ///
    /// Requires that a running status has been observed via [`poll`]
    /// (or reported at request time) first.
    ///
    /// [`poll`]: Session::poll
    pub async fn exec(&self, client: &Client, exec_config: ExecConfig) -> Result<ExecCommandResponse> {
        self.ensure_not_destroyed("exec")?;
        if !self.status.is_running_capable() {
            return Err(ClientError::Usage(format!(
                "session {} is {}; poll until it is running before exec",
                self.kasm_id, self.status
            )));
        }
        client
            .exec_command_kasm(&self.user_id, &self.kasm_id, exec_config)
            .await
    }

    /// Destroys the remote session. Idempotent from the caller's side:
    /// a repeat call on an already-destroyed handle is a no-op success,
    /// and a 404 from the service means the resource was already gone
    /// and is also treated as success.
    pub async fn destroy(&mut self, client: &Client) -> Result<()> {
        if self.status == SessionStatus::Destroyed {
            return Ok(());
        }
        match client.destroy_kasm(&self.user_id, &self.kasm_id).await {
            Ok(()) => {}
            Err(error) if error.is_not_found() => {
                tracing::debug!(kasm_id = %self.kasm_id, "session already gone on destroy");
            }
            Err(error) => return Err(error),
        }
        self.status = SessionStatus::Destroyed;
        self.status_message = None;
        Ok(())
    }

    fn ensure_not_destroyed(&self, operation: &str) -> Result<()> {
        if self.status == SessionStatus::Destroyed {
            return Err(ClientError::Usage(format!(
                "session {} was destroyed; {operation} would target a nonexistent resource",
                self.kasm_id
            )));
        }
        Ok(())
    }
}
