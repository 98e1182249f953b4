//! GitHub GraphQL client using reqwest

use crate::{Error, Result};
use planport_core::Config;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use url::Url;

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

/// GraphQL error
#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    /// Unwrap the envelope, turning `errors` into [`Error::GraphQl`]
    fn into_result(self) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(Error::GraphQl(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        self.data
            .ok_or_else(|| Error::MissingData("data".to_string()))
    }
}

/// Authenticated client for the GitHub GraphQL endpoint
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl GraphQlClient {
    /// Create a client for `endpoint` authenticating with a bearer token
    pub fn new(token: impl Into<String>, endpoint: Url) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Auth("GitHub token is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("planport/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(endpoint = %endpoint, "Created GraphQL client");

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    /// Create a client for the endpoint named in the configuration
    pub fn from_config(config: &Config, token: impl Into<String>) -> Result<Self> {
        Self::new(token, config.graphql_endpoint()?)
    }

    /// Execute a GraphQL query or mutation and deserialize its `data`
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: &serde_json::Value,
    ) -> Result<T> {
        debug!(%variables, "Sending GraphQL request");

        let request_body = json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Auth("Invalid GitHub token".to_string()));
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        decode_response(&text)
    }
}

impl std::fmt::Debug for GraphQlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

/// Decode a GraphQL response body into its `data` payload
fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: GraphQlResponse<T> = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("Failed to parse GraphQL response: {}", e)))?;
    envelope.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Viewer {
        login: String,
    }

    #[derive(Debug, Deserialize)]
    struct ViewerData {
        viewer: Viewer,
    }

    fn endpoint() -> Url {
        Url::parse("https://api.github.com/graphql").unwrap()
    }

    #[test]
    fn test_decode_data() {
        let data: ViewerData = decode_response(r#"{"data":{"viewer":{"login":"octo"}}}"#).unwrap();
        assert_eq!(data.viewer.login, "octo");
    }

    #[test]
    fn test_decode_errors() {
        let body = r#"{"data":null,"errors":[{"message":"Could not resolve to a node"},{"message":"second","path":["node"]}]}"#;
        let err = decode_response::<ViewerData>(body).unwrap_err();
        match err {
            Error::GraphQl(messages) => {
                assert_eq!(messages, vec!["Could not resolve to a node", "second"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_missing_data() {
        let err = decode_response::<ViewerData>(r#"{"data":null}"#).unwrap_err();
        assert!(matches!(err, Error::MissingData(_)));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_response::<ViewerData>("<html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(
            GraphQlClient::new("  ", endpoint()),
            Err(Error::Auth(_))
        ));
    }

    #[test]
    fn test_bad_configured_endpoint_is_core_error() {
        let config = Config::default().with_cli_overrides(Some("not a url".to_string()), None);
        let err = GraphQlClient::from_config(&config, "ghp_secret").unwrap_err();
        assert!(matches!(err, Error::Core(planport_core::Error::Config(_))));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = GraphQlClient::new("ghp_secret", endpoint()).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("api.github.com"));
        assert!(!debug.contains("ghp_secret"));
    }
}
