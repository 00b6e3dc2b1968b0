//! Request core for the Untappd v4 API.
//!
//! # Design
//! `UntappdClient` owns the application credentials, the optional user
//! access token and a [`Transport`]. Every endpoint goes through
//! [`UntappdClient::get`] or [`UntappdClient::post`], which split into a pure
//! `build_request`, one `Transport::execute` call and a pure
//! `parse_response`. Endpoint groups borrow the client; they never copy the
//! token, so `set_token` takes `&mut self` and cannot race an in-flight call.

use serde_json::Value;
use tracing::debug;

use crate::actions::UserActions;
use crate::config::{optional_env, ClientConfig, Credentials, ACCESS_TOKEN_ENV};
use crate::error::ApiError;
use crate::feed::Feed;
use crate::friends::Friends;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::info::GeneralInfo;
use crate::params::QueryParams;
use crate::resolver::Resolver;
use crate::search::Search;
use crate::transport::{Transport, UreqTransport};
use crate::user::UserInfo;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Blocking client for the Untappd v4 API.
#[derive(Debug, Clone)]
pub struct UntappdClient<T = UreqTransport> {
    credentials: Credentials,
    access_token: Option<String>,
    config: ClientConfig,
    transport: T,
}

impl UntappdClient<UreqTransport> {
    /// Client against the production API with default transport settings.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::with_config(Credentials::new(client_id, client_secret), ClientConfig::default())
    }

    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(credentials, config, transport)
    }

    /// Builds a client from `UNTAPPD_CLIENT_ID`, `UNTAPPD_CLIENT_SECRET` and,
    /// if present, `UNTAPPD_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, ApiError> {
        let mut client = Self::with_config(Credentials::from_env()?, ClientConfig::default());
        if let Some(token) = optional_env(ACCESS_TOKEN_ENV) {
            client.set_token(token);
        }
        Ok(client)
    }
}

impl<T: Transport> UntappdClient<T> {
    pub fn with_transport(credentials: Credentials, config: ClientConfig, transport: T) -> Self {
        Self {
            credentials,
            access_token: None,
            config,
            transport,
        }
    }

    /// Stores the access token obtained from Untappd's OAuth flow. Replaces
    /// any previous token; an empty token behaves as if none were set.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.access_token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Authorization for endpoints that accept either mode: the access token
    /// when one is set, else the application id and secret.
    pub fn auth_fragment(&self) -> String {
        match self.token() {
            Some(token) => format!("access_token={token}"),
            None => format!(
                "client_id={}&client_secret={}",
                self.credentials.client_id(),
                self.credentials.client_secret()
            ),
        }
    }

    /// Authorization for user-scoped endpoints.
    pub fn bearer_fragment(&self) -> Result<String, ApiError> {
        self.token()
            .map(|token| format!("access_token={token}"))
            .ok_or(ApiError::MissingToken)
    }

    /// Builds the request for `path` without sending it.
    ///
    /// The URL is `base_url + path + "?" + auth`, followed by `&` and the
    /// encoded `params` only when there are any. `fields` filter the response:
    /// they extend the query string on GET, replacing any param of the same
    /// name, and form the urlencoded body on POST.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        auth: &str,
        params: &QueryParams,
        fields: Option<&QueryParams>,
    ) -> HttpRequest {
        let fields = fields.filter(|fields| !fields.is_empty());
        let query_fields = fields.filter(|_| method == HttpMethod::Get);

        let mut query = params.clone();
        if let Some(fields) = query_fields {
            query.remove_keys_of(fields);
        }
        let mut url = format!("{}{path}?{auth}", self.config.base_url);
        if !query.is_empty() {
            url.push('&');
            url.push_str(&query.encode());
        }
        if let Some(fields) = query_fields {
            url.push('&');
            url.push_str(&fields.encode());
        }

        let mut headers = vec![("user-agent".to_string(), self.config.user_agent.clone())];
        let mut body = None;
        if let Some(fields) = fields.filter(|_| method == HttpMethod::Post) {
            headers.push(("content-type".to_string(), FORM_CONTENT_TYPE.to_string()));
            body = Some(fields.encode());
        }

        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    /// Parses any JSON body, including Untappd error payloads, as success.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(value),
            Err(_) if !response.is_success() => Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            }),
            Err(e) => Err(ApiError::DeserializationError(e.to_string())),
        }
    }

    pub fn get(
        &self,
        path: &str,
        auth: &str,
        params: &QueryParams,
        fields: Option<&QueryParams>,
    ) -> Result<Value, ApiError> {
        self.send(HttpMethod::Get, path, auth, params, fields)
    }

    pub fn post(
        &self,
        path: &str,
        auth: &str,
        params: &QueryParams,
        fields: Option<&QueryParams>,
    ) -> Result<Value, ApiError> {
        self.send(HttpMethod::Post, path, auth, params, fields)
    }

    fn send(
        &self,
        method: HttpMethod,
        path: &str,
        auth: &str,
        params: &QueryParams,
        fields: Option<&QueryParams>,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(method, path, auth, params, fields);
        debug!(method = method.as_str(), endpoint = path, "sending request");
        let response = self.transport.execute(&request)?;
        debug!(endpoint = path, status = response.status, "received response");
        self.parse_response(response)
    }

    pub fn search(&self) -> Search<'_, T> {
        Search::new(self)
    }

    pub fn resolver(&self) -> Resolver<'_, T> {
        Resolver::new(self)
    }

    pub fn feed(&self) -> Feed<'_, T> {
        Feed::new(self)
    }

    pub fn friends(&self) -> Friends<'_, T> {
        Friends::new(self)
    }

    pub fn info(&self) -> GeneralInfo<'_, T> {
        GeneralInfo::new(self)
    }

    pub fn actions(&self) -> UserActions<'_, T> {
        UserActions::new(self)
    }

    pub fn user(&self) -> UserInfo<'_, T> {
        UserInfo::new(self)
    }
}
