//! Typed client: one async method per remote operation.
//!
//! Every method builds its operation payload around the fixed
//! credentials, executes through the shared [`Transport`], and decodes
//! the reply against that operation's schema. No state is consulted or
//! mutated beyond the immutable endpoint/credentials, so a `Client` is
//! safe to share across concurrent callers.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use kasm_protocol::{
    AttributesResponse, CreateUserRequest, Credentials, DeleteUserRequest, DestroyKasmRequest,
    ExecCommandRequest, ExecCommandResponse, ExecConfig, GetAttributesRequest,
    GetImagesRequest, GetKasmStatusRequest, GetUserRequest, GetUsersRequest, Image,
    ImagesResponse, KasmStatusResponse, LogoutUserRequest, NewUser, RequestKasmRequest,
    RequestKasmResponse,
    UpdateAttributesRequest, UpdateUserRequest, UserAttributes, UserRecord, UserResponse,
    UserSelector, UsersResponse,
};

use crate::errors::{ClientError, Result};
use crate::transport::{AuthChannel, Transport, TransportConfig};

/// Path prefix every developer-API operation lives under.
pub const API_PREFIX: &str = "api/public";

/// Handle to one Kasm deployment. Endpoint and credentials are fixed at
/// construction; every read re-fetches remote state.
#[derive(Clone, Debug)]
pub struct Client {
    base: Url,
    credentials: Credentials,
    transport: Transport,
}

impl Client {
    /// Connects with the default transport policy (TLS verification on,
    /// 30s request timeout).
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self> {
        Self::with_config(endpoint, credentials, TransportConfig::default())
    }

    pub fn with_config(
        endpoint: &str,
        credentials: Credentials,
        config: TransportConfig,
    ) -> Result<Self> {
        if credentials.key.is_empty() || credentials.secret.is_empty() {
            return Err(ClientError::Config(
                "api key and secret must be non-empty".into(),
            ));
        }
        let base = Url::parse(endpoint)
            .map_err(|error| ClientError::Config(format!("invalid endpoint '{endpoint}': {error}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "invalid endpoint '{endpoint}': not an http(s) base URL"
            )));
        }
        let transport = Transport::new(&config)?;
        Ok(Self {
            base,
            credentials,
            transport,
        })
    }

    /// Reads `KASM_ENDPOINT`, `KASM_API_KEY` and `KASM_API_KEY_SECRET`.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("KASM_ENDPOINT")
            .map_err(|_| ClientError::Config("KASM_ENDPOINT is not set".into()))?;
        let key = std::env::var("KASM_API_KEY")
            .map_err(|_| ClientError::Config("KASM_API_KEY is not set".into()))?;
        let secret = std::env::var("KASM_API_KEY_SECRET")
            .map_err(|_| ClientError::Config("KASM_API_KEY_SECRET is not set".into()))?;
        Self::new(&endpoint, Credentials::new(key, secret))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn auth(&self) -> Credentials {
        self.credentials.clone()
    }

    fn operation_url(&self, operation: &'static str) -> Result<Url> {
        let joined = format!(
            "{}/{API_PREFIX}/{operation}",
            self.base.as_str().trim_end_matches('/')
        );
        Url::parse(&joined)
            .map_err(|error| ClientError::Config(format!("invalid operation URL '{joined}': {error}")))
    }

    async fn post_raw<Req: Serialize>(
        &self,
        operation: &'static str,
        payload: &Req,
    ) -> Result<Vec<u8>> {
        let url = self.operation_url(operation)?;
        self.transport
            .execute(operation, Method::POST, url, AuthChannel::Body, Some(payload))
            .await
    }

    async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        operation: &'static str,
        payload: &Req,
    ) -> Result<Resp> {
        let bytes = self.post_raw(operation, payload).await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { operation, source })
    }

    /// POST where the reply body carries nothing of interest (the
    /// service answers `{}` or an empty body on success).
    async fn post_empty<Req: Serialize>(
        &self,
        operation: &'static str,
        payload: &Req,
    ) -> Result<()> {
        self.post_raw(operation, payload).await.map(|_| ())
    }

    // --- image catalog ---

    pub async fn get_images(&self) -> Result<Vec<Image>> {
        let payload = GetImagesRequest { auth: self.auth() };
        let reply: ImagesResponse = self.post("get_images", &payload).await?;
        Ok(reply.images)
    }

    // --- user directory ---

    pub async fn create_user(&self, user: NewUser) -> Result<UserRecord> {
        let payload = CreateUserRequest {
            auth: self.auth(),
            target_user: user,
        };
        let reply: UserResponse = self.post("create_user", &payload).await?;
        Ok(reply.user)
    }

    pub async fn get_user(&self, selector: UserSelector) -> Result<UserRecord> {
        let payload = GetUserRequest {
            auth: self.auth(),
            target_user: selector,
        };
        let reply: UserResponse = self.post("get_user", &payload).await?;
        Ok(reply.user)
    }

    pub async fn get_users(&self) -> Result<Vec<UserRecord>> {
        let payload = GetUsersRequest { auth: self.auth() };
        let reply: UsersResponse = self.post("get_users", &payload).await?;
        Ok(reply.users)
    }

    pub async fn update_user(&self, user: UserRecord) -> Result<UserRecord> {
        let payload = UpdateUserRequest {
            auth: self.auth(),
            target_user: user,
        };
        let reply: UserResponse = self.post("update_user", &payload).await?;
        Ok(reply.user)
    }

    pub async fn delete_user(&self, user_id: &str, force: bool) -> Result<()> {
        let payload = DeleteUserRequest {
            auth: self.auth(),
            target_user: UserSelector::by_id(user_id),
            force,
        };
        self.post_empty("delete_user", &payload).await
    }

    pub async fn logout_user(&self, user_id: &str) -> Result<()> {
        let payload = LogoutUserRequest {
            auth: self.auth(),
            target_user: UserSelector::by_id(user_id),
        };
        self.post_empty("logout_user", &payload).await
    }

    pub async fn get_user_attributes(&self, user_id: &str) -> Result<UserAttributes> {
        let payload = GetAttributesRequest {
            auth: self.auth(),
            target_user: UserSelector::by_id(user_id),
        };
        let reply: AttributesResponse = self.post("get_attributes", &payload).await?;
        Ok(reply.user_attributes)
    }

    pub async fn update_user_attributes(&self, attributes: UserAttributes) -> Result<()> {
        let payload = UpdateAttributesRequest {
            auth: self.auth(),
            target_user_attributes: attributes,
        };
        self.post_empty("update_user_attributes", &payload).await
    }

    // --- session operations (raw; see `Session` for the sequenced
    // lifecycle with state guards) ---

    pub async fn request_kasm(
        &self,
        user_id: &str,
        image_id: &str,
    ) -> Result<RequestKasmResponse> {
        let payload = RequestKasmRequest {
            auth: self.auth(),
            user_id: user_id.into(),
            image_id: image_id.into(),
        };
        self.post("request_kasm", &payload).await
    }

    pub async fn get_kasm_status(
        &self,
        user_id: &str,
        kasm_id: &str,
    ) -> Result<KasmStatusResponse> {
        let payload = GetKasmStatusRequest {
            auth: self.auth(),
            user_id: user_id.into(),
            kasm_id: kasm_id.into(),
        };
        self.post("get_kasm_status", &payload).await
    }

    pub async fn destroy_kasm(&self, user_id: &str, kasm_id: &str) -> Result<()> {
        let payload = DestroyKasmRequest {
            auth: self.auth(),
            user_id: user_id.into(),
            kasm_id: kasm_id.into(),
        };
        self.post_empty("destroy_kasm", &payload).await
    }

    pub async fn exec_command_kasm(
        &self,
        user_id: &str,
        kasm_id: &str,
        exec_config: ExecConfig,
    ) -> Result<ExecCommandResponse> {
        let payload = ExecCommandRequest {
            auth: self.auth(),
            user_id: user_id.into(),
            kasm_id: kasm_id.into(),
            exec_config,
        };
        self.post("exec_command_kasm", &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("key", "secret")
    }

    #[test]
    fn malformed_endpoint_is_a_config_error() {
        let result = Client::new("not a url", credentials());
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn empty_credentials_fail_before_any_call() {
        let result = Client::new("https://kasm.example.com", Credentials::new("", ""));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn operation_urls_keep_the_endpoint_path() {
        let client =
            Client::new("https://kasm.example.com/deploy/", credentials()).expect("client");
        let url = client.operation_url("request_kasm").expect("url");
        assert_eq!(
            url.as_str(),
            "https://kasm.example.com/deploy/api/public/request_kasm"
        );
    }
}
