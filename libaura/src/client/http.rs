//! Reqwest-backed bank client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{ApiResponse, BankClient, ClientResult};
use crate::error::{ClientError, Result};
use crate::types::{AccountResponse, Credentials, LoginResponse, TransferRequest, TransferResponse};
use crate::Config;

pub struct HttpBankClient {
    client: Client,
    base_url: Url,
}

impl HttpBankClient {
    /// Build a client with an explicit request timeout
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Build a client from the `[server]` section
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url()?, config.server.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a fixed endpoint under the server root
    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Setup(format!("cannot build URL for {}: {}", path, e)))
    }

    /// `/accounts/{id}` with the id encoded as a single path segment
    ///
    /// `.` and `..` would be resolved away as dot-segments, so they are
    /// refused along with the empty id.
    fn accounts_url(&self, account_holder_id: &str) -> std::result::Result<Url, ClientError> {
        if matches!(account_holder_id, "" | "." | "..") {
            return Err(ClientError::InvalidRequest(format!(
                "invalid account holder id '{}'",
                account_holder_id
            )));
        }

        let mut url = self.endpoint("/accounts/")?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Setup(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .push(account_holder_id);
        Ok(url)
    }

    async fn exchange<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let path = url.path().to_string();
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!("{} {} -> {}", method, path, status.as_u16());

        if !status.is_success() {
            return Ok(ApiResponse::error(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Ok(ApiResponse {
            status: status.as_u16(),
            body: decode_body(&bytes)?,
        })
    }
}

#[async_trait]
impl BankClient for HttpBankClient {
    async fn authenticate(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        let url = self.endpoint("/login")?;
        self.exchange(Method::POST, url, Some(credentials)).await
    }

    async fn fetch_accounts(
        &self,
        account_holder_id: &str,
    ) -> ClientResult<Vec<AccountResponse>> {
        let url = self.accounts_url(account_holder_id)?;
        self.exchange::<(), _>(Method::GET, url, None).await
    }

    async fn submit_transfer(&self, request: &TransferRequest) -> ClientResult<TransferResponse> {
        let url = self.endpoint("/transfer")?;
        self.exchange(Method::POST, url, Some(request)).await
    }
}

/// Empty bodies decode to `None`, anything else must be valid JSON
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<Option<T>, ClientError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| ClientError::Decode(e.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout(error.to_string())
    } else if error.is_decode() {
        ClientError::Decode(error.to_string())
    } else {
        ClientError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpBankClient {
        HttpBankClient::new(Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_accounts_url_encodes_id_as_one_segment() {
        let client = client("http://192.168.1.17:8080");
        let path = |id: &str| client.accounts_url(id).unwrap().path().to_string();

        assert_eq!(path("1234"), "/accounts/1234");
        assert_eq!(path("a/b c"), "/accounts/a%2Fb%20c");
        assert_eq!(path("é"), "/accounts/%C3%A9");
        assert_eq!(path("..."), "/accounts/...");
    }

    #[test]
    fn test_accounts_url_refuses_dot_segments() {
        let client = client("http://192.168.1.17:8080");

        for id in ["", ".", ".."] {
            let err = client.accounts_url(id).unwrap_err();
            assert!(matches!(err, ClientError::InvalidRequest(_)), "id={:?}", id);
        }
    }

    #[test]
    fn test_endpoints_resolve_against_server_root() {
        let client = client("http://192.168.1.17:8080/api/");
        assert_eq!(
            client.endpoint("/login").unwrap().as_str(),
            "http://192.168.1.17:8080/login"
        );
        assert_eq!(
            client.accounts_url("1234").unwrap().as_str(),
            "http://192.168.1.17:8080/accounts/1234"
        );
    }

    #[tokio::test]
    async fn test_fetch_accounts_with_dot_dot_id_makes_no_request() {
        // Nothing listens here; an attempted request would be a network error
        let client = client("http://127.0.0.1:9");
        let err = client.fetch_accounts("..").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[test]
    fn test_decode_body_empty_is_absent() {
        let body: Option<LoginResponse> = decode_body(b"").unwrap();
        assert_eq!(body, None);

        let body: Option<LoginResponse> = decode_body(b"  \n").unwrap();
        assert_eq!(body, None);
    }

    #[test]
    fn test_decode_body_valid_json() {
        let body: Option<LoginResponse> = decode_body(br#"{"granted":true}"#).unwrap();
        assert_eq!(body, Some(LoginResponse { granted: true }));
    }

    #[test]
    fn test_decode_body_malformed_json() {
        let err = decode_body::<LoginResponse>(b"{granted: yes").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));

        let err = decode_body::<LoginResponse>(br#"{"allowed":true}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_from_config_rejects_invalid_url() {
        let mut config = Config::default();
        config.server.base_url = "bank".to_string();
        assert!(HttpBankClient::from_config(&config).is_err());
    }
}
