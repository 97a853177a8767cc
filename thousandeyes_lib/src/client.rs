//! HTTP client for the ThousandEyes REST API.

use crate::error::{ApiError, Error, ErrorBody};
use crate::model::{TestEnvelope, WebTransaction};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client as HttpClient, RequestBuilder};
use tracing::{debug, warn};

/// Public API base used when no endpoint is configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.thousandeyes.com/v6";

/// ThousandEyes API client.
///
/// Holds only immutable configuration and a pooled HTTP client, so clones can
/// be shared freely across tasks.
#[derive(Clone)]
pub struct Client {
    api_endpoint: String,
    auth_token: String,
    user_agent: String,
    http: HttpClient,
}

impl Client {
    /// Create a client against the public API with the given auth token.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_API_ENDPOINT, auth_token)
    }

    /// Create a client against a custom API base URL.
    pub fn with_endpoint(api_endpoint: impl Into<String>, auth_token: impl Into<String>) -> Self {
        let api_endpoint = api_endpoint.into().trim_end_matches('/').to_string();
        Self {
            api_endpoint,
            auth_token: auth_token.into(),
            user_agent: format!("thousandeyes-cli/{}", crate::VERSION),
            http: HttpClient::new(),
        }
    }

    /// Base URL every request path is appended to.
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Create a web transaction test. Returns the test as stored by the server.
    pub async fn create_web_transaction(
        &self,
        test: &WebTransaction,
    ) -> Result<WebTransaction, Error> {
        let url = format!("{}/tests/web-transactions/new.json", self.api_endpoint);
        debug!(method = "POST", %url, "creating web transaction");
        self.fetch_test(self.auth(self.http.post(&url)).json(test))
            .await
    }

    /// Get a web transaction test by ID.
    pub async fn get_web_transaction(&self, id: i64) -> Result<WebTransaction, Error> {
        let url = format!("{}/tests/{}.json", self.api_endpoint, id);
        debug!(method = "GET", %url, "fetching web transaction");
        self.fetch_test(self.auth(self.http.get(&url))).await
    }

    /// Update a web transaction test. Only the fields set on `test` are sent.
    pub async fn update_web_transaction(
        &self,
        id: i64,
        test: &WebTransaction,
    ) -> Result<WebTransaction, Error> {
        let url = format!(
            "{}/tests/web-transactions/{}/update.json",
            self.api_endpoint, id
        );
        debug!(method = "POST", %url, "updating web transaction");
        self.fetch_test(self.auth(self.http.post(&url)).json(test))
            .await
    }

    /// Delete a web transaction test. The success body is ignored.
    pub async fn delete_web_transaction(&self, id: i64) -> Result<(), Error> {
        let url = format!(
            "{}/tests/web-transactions/{}/delete.json",
            self.api_endpoint, id
        );
        debug!(method = "POST", %url, "deleting web transaction");
        self.send(self.auth(self.http.post(&url))).await?;
        Ok(())
    }

    fn auth(&self, req: RequestBuilder) -> RequestBuilder {
        let mut headers = HeaderMap::new();
        if let Ok(ua) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, ua);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        req.headers(headers).bearer_auth(&self.auth_token)
    }

    async fn fetch_test(&self, req: RequestBuilder) -> Result<WebTransaction, Error> {
        let body = self.send(req).await?;
        let envelope: TestEnvelope = serde_json::from_str(&body)?;
        envelope.into_first().ok_or(Error::EmptyResponse)
    }

    /// Perform the call and return the raw body of a 2xx response.
    async fn send(&self, req: RequestBuilder) -> Result<String, Error> {
        let res = req.send().await?;
        let status = res.status();
        debug!(status = status.as_u16(), "response received");
        if !status.is_success() {
            // An unreadable error body still yields the status error.
            let body = res.text().await.unwrap_or_default();
            let err = ApiError::new(status.as_u16(), ErrorBody::from_body(&body));
            warn!(status = status.as_u16(), error = %err.body, "API call failed");
            return Err(Error::Api(err));
        }
        Ok(res.text().await?)
    }
}
