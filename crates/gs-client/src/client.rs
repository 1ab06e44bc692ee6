//! HTTP client for the ground station REST service.
//!
//! Wraps `reqwest` with typed request/response bodies for the ARO request,
//! profile, log, telemetry, and mission-control endpoints. Any non-2xx
//! status is surfaced as [`ClientError::Status`]; there is no retry.

use std::time::Duration;

use gs_core::{
    AppConfig, AroRequest, AroRequestStatus, LogEntry, MissionCommand, MissionCommandReply,
    NewAroRequest, TelemetryRecord, UserProfile,
};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;

/// List endpoints answer either with a bare array or with `{"data": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Wrapped { data } | ListBody::Bare(data) => data,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemBody<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ItemBody<T> {
    fn into_inner(self) -> T {
        match self {
            ItemBody::Wrapped { data } | ItemBody::Bare(data) => data,
        }
    }
}

/// `/recent-logs` returns an array, or a single entry when only one log
/// line is available.
#[derive(Deserialize)]
#[serde(untagged)]
enum LogsBody {
    Many(Vec<LogEntry>),
    One(LogEntry),
}

/// Query parameters for `GET /aro-request`.
///
/// `count <= 0` asks for every request; an empty `statuses` list applies no
/// status filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestQuery {
    pub count: i64,
    pub offset: i64,
    pub statuses: Vec<AroRequestStatus>,
}

impl Default for RequestQuery {
    fn default() -> Self {
        Self {
            count: 100,
            offset: 0,
            statuses: Vec::new(),
        }
    }
}

impl RequestQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("count", self.count.to_string()),
            ("offset", self.offset.to_string()),
        ];
        pairs.extend(
            self.statuses
                .iter()
                .map(|status| ("filters", status.as_str().to_string())),
        );
        pairs
    }
}

/// Client for the ground station REST service.
///
/// Use [`GroundStationClient::from_config`] in the console or
/// [`GroundStationClient::with_base_url`] to point at a mock server in tests.
pub struct GroundStationClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl GroundStationClient {
    /// Builds a client from loaded console configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ClientError::InvalidBaseUrl`] for a bad base URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(client.with_token(config.api_token.clone()))
    }

    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ClientError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so that `Url::join` appends to the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_token: None,
        })
    }

    /// Attaches a bearer token to every request.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.api_token = token;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Lists imaging requests, most recent first as ordered by the service.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body does not match.
    pub async fn list_aro_requests(
        &self,
        query: &RequestQuery,
    ) -> Result<Vec<AroRequest>, ClientError> {
        tracing::debug!(
            count = query.count,
            offset = query.offset,
            filters = query.statuses.len(),
            "listing ARO requests"
        );
        let request = self.request(Method::GET, "aro-request")?.query(&query.pairs());
        let body: ListBody<AroRequest> = self.send_json(request).await?;
        Ok(body.into_vec())
    }

    /// Persists a new imaging request and returns the stored record.
    ///
    /// Does not validate the coordinate; see [`crate::submit_request`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body does not match.
    pub async fn create_aro_request(
        &self,
        body: &NewAroRequest,
    ) -> Result<AroRequest, ClientError> {
        let request = self.request(Method::POST, "aro-request")?.json(body);
        let created: ItemBody<AroRequest> = self.send_json(request).await?;
        Ok(created.into_inner())
    }

    /// Asks the service to cancel a request. The response body is ignored.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Status`] on a non-2xx response (404 for unknown ids).
    pub async fn cancel_aro_request(&self, id: i64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("aro-request/{id}"))?;
        self.send(request).await?;
        Ok(())
    }

    /// Fetches the signed-in operator's profile.
    ///
    /// # Errors
    ///
    /// Same as [`GroundStationClient::list_aro_requests`].
    pub async fn get_profile(&self) -> Result<UserProfile, ClientError> {
        let request = self.request(Method::GET, "user/profile")?;
        let profile: ItemBody<UserProfile> = self.send_json(request).await?;
        Ok(profile.into_inner())
    }

    /// Replaces the operator's profile and returns the stored version.
    ///
    /// # Errors
    ///
    /// Same as [`GroundStationClient::list_aro_requests`].
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile, ClientError> {
        let request = self.request(Method::PUT, "user/profile")?.json(profile);
        let stored: ItemBody<UserProfile> = self.send_json(request).await?;
        Ok(stored.into_inner())
    }

    /// Fetches recent ground station log lines. Entries are numbered by
    /// their position in the response.
    ///
    /// # Errors
    ///
    /// Same as [`GroundStationClient::list_aro_requests`].
    pub async fn recent_logs(&self) -> Result<Vec<LogEntry>, ClientError> {
        let request = self.request(Method::GET, "recent-logs")?;
        let body: LogsBody = self.send_json(request).await?;
        let mut entries = match body {
            LogsBody::Many(entries) => entries,
            LogsBody::One(entry) => vec![entry],
        };
        for (idx, entry) in entries.iter_mut().enumerate() {
            entry.id = idx;
        }
        Ok(entries)
    }

    /// Sends a free-form command to mission control.
    ///
    /// # Errors
    ///
    /// Same as [`GroundStationClient::list_aro_requests`].
    pub async fn send_mission_command(
        &self,
        command: &str,
    ) -> Result<MissionCommandReply, ClientError> {
        let body = MissionCommand {
            command: command.to_string(),
        };
        let request = self.request(Method::POST, "mission-control")?.json(&body);
        self.send_json(request).await
    }

    /// Fetches telemetry records.
    ///
    /// # Errors
    ///
    /// Same as [`GroundStationClient::list_aro_requests`].
    pub async fn telemetry(&self) -> Result<Vec<TelemetryRecord>, ClientError> {
        let request = self.request(Method::GET, "telemetry")?;
        let body: ListBody<TelemetryRecord> = self.send_json(request).await?;
        Ok(body.into_vec())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(path)?;
        let mut builder = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Sends the request and asserts a 2xx status.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().to_string();
        tracing::debug!(%method, %url, "sending request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%method, %url, status = status.as_u16(), "request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let url = response.url().to_string();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url,
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GroundStationClient {
        GroundStationClient::with_base_url(base_url, 30, "gs-test")
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let client = test_client("http://localhost:5000/api/v1");
        let url = client.endpoint("aro-request").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/v1/aro-request");
    }

    #[test]
    fn endpoint_strips_trailing_and_leading_slashes() {
        let client = test_client("http://localhost:5000/");
        let url = client.endpoint("/user/profile").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/user/profile");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = GroundStationClient::with_base_url("not a url", 30, "gs-test");
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn query_pairs_repeat_filters() {
        let query = RequestQuery {
            count: 10,
            offset: 20,
            statuses: vec![AroRequestStatus::Pending, AroRequestStatus::Taken],
        };
        assert_eq!(
            query.pairs(),
            vec![
                ("count", "10".to_string()),
                ("offset", "20".to_string()),
                ("filters", "pending".to_string()),
                ("filters", "taken".to_string()),
            ]
        );
    }

    #[test]
    fn list_body_accepts_both_shapes() {
        let bare: ListBody<i32> = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2]);
        let wrapped: ListBody<i32> = serde_json::from_str(r#"{"data":[3]}"#).unwrap();
        assert_eq!(wrapped.into_vec(), vec![3]);
    }
}
