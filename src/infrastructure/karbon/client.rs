//! HTTP client for the Karbon v3 API

use crate::application::tooling::{KarbonTransport, RemoteRequest, TransportError};
use crate::config::KarbonConfig;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

const ACCESS_KEY_HEADER: HeaderName = HeaderName::from_static("accesskey");

/// Karbon client with credentials and timeout fixed at construction.
#[derive(Clone)]
pub struct KarbonClient {
    base_url: String,
    http: Client,
}

impl KarbonClient {
    pub fn from_config(config: &KarbonConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            header_value(&format!("Bearer {}", config.bearer_token))?,
        );
        headers.insert(ACCESS_KEY_HEADER, header_value(&config.access_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|err| TransportError::Setup(err.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// Build the full URL for a request. Query values are percent-encoded;
    /// the path is appended as given.
    pub fn build_url(&self, request: &RemoteRequest) -> Result<Url, TransportError> {
        let base = self.base_url.trim_end_matches('/');
        let path = request.path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))
            .map_err(|err| TransportError::InvalidUrl(err.to_string()))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl KarbonTransport for KarbonClient {
    async fn get(&self, request: &RemoteRequest) -> Result<Value, TransportError> {
        let url = self.build_url(request)?;
        debug!(path = request.path.as_str(), "Sending request to Karbon API");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(TransportError::Network)?;
        debug!(
            status = status.as_u16(),
            bytes = bytes.len(),
            "Received Karbon API response"
        );

        if !status.is_success() {
            return Err(TransportError::Status {
                status,
                body: serde_json::from_slice(&bytes).ok(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|err| TransportError::Decode(err.to_string()))
    }
}

fn header_value(value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value).map_err(|_| {
        TransportError::Setup("credential contains characters not allowed in headers".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tooling::{ToolError, query};
    use crate::types::{GetWorkItemByIdArgs, GetWorkItemsArgs, SearchClientsArgs};
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::time::Duration;

    async fn local_karbon(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{addr}")
    }

    fn work_item(key: &str) -> RemoteRequest {
        query::work_item_lookup(&GetWorkItemByIdArgs {
            work_item_key: key.to_string(),
        })
    }

    fn client(base_url: &str) -> KarbonClient {
        KarbonClient::from_config(&KarbonConfig {
            base_url: base_url.to_string(),
            bearer_token: "token".to_string(),
            access_key: "key".to_string(),
            timeout: Duration::from_secs(30),
        })
        .expect("client builds")
    }

    #[test]
    fn joins_base_url_and_path_without_double_slash() {
        let request = query::work_item_listing(&GetWorkItemsArgs::default());
        let url = client("https://api.karbonhq.com/v3/")
            .build_url(&request)
            .expect("valid url");
        assert_eq!(url.path(), "/v3/WorkItems");
    }

    #[test]
    fn encodes_query_parameters_in_order() {
        let request = query::work_item_listing(&GetWorkItemsArgs {
            client_key: Some("abc".to_string()),
            ..GetWorkItemsArgs::default()
        });
        let url = client("https://api.karbonhq.com/v3")
            .build_url(&request)
            .expect("valid url");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("$top".to_string(), "100".to_string()),
                ("$orderby".to_string(), "StartDate desc".to_string()),
                ("$filter".to_string(), "ClientKey eq 'abc'".to_string()),
            ]
        );
    }

    #[test]
    fn search_term_survives_encoding() {
        let plan = query::client_search(&SearchClientsArgs {
            search_term: "a&b=c".to_string(),
            max_results: None,
        });
        let url = client("https://api.karbonhq.com/v3")
            .build_url(&plan.client_groups)
            .expect("valid url");
        let filter = url
            .query_pairs()
            .find(|(key, _)| key == "$filter")
            .map(|(_, value)| value.into_owned());
        assert_eq!(filter.as_deref(), Some("contains(FullName, 'a&b=c')"));
    }

    #[test]
    fn rejects_credentials_that_cannot_be_sent_as_headers() {
        let result = KarbonClient::from_config(&KarbonConfig {
            base_url: "https://api.karbonhq.com/v3".to_string(),
            bearer_token: "line\nbreak".to_string(),
            access_key: "key".to_string(),
            timeout: Duration::from_secs(30),
        });
        assert!(matches!(result, Err(TransportError::Setup(_))));
    }

    #[tokio::test]
    async fn non_json_success_body_is_a_decode_failure() {
        let base = local_karbon(
            Router::new().route("/WorkItems/W-1", get(|| async { "<html>maintenance</html>" })),
        )
        .await;

        let err = client(&base)
            .get(&work_item("W-1"))
            .await
            .expect_err("plain text is not JSON");
        assert!(matches!(err, TransportError::Decode(_)));

        let tool_error = ToolError::from_transport(err, "get work item");
        assert!(tool_error.to_string().starts_with("Failed to get work item:"));
    }

    #[tokio::test]
    async fn error_status_keeps_decoded_body() {
        let base = local_karbon(Router::new().route(
            "/WorkItems/missing",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    r#"{"error":{"message":"Work item not found"}}"#,
                )
            }),
        ))
        .await;

        let err = client(&base)
            .get(&work_item("missing"))
            .await
            .expect_err("404 is an error");
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert_eq!(
            ToolError::from_transport(err, "get work item").to_string(),
            "Resource not found: Work item not found"
        );
    }
}
