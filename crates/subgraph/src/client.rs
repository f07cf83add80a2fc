use eyre::{Result, bail, eyre};
use reqwest::{
    Client as HttpClient,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use url::Url;

/// Maximum number of silos requested per page. A page shorter than this
/// signals the end of pagination.
pub const PAGE_SIZE: usize = 1000;

/// One page of silos created strictly after `$lastTimestamp`, oldest first.
const SILOS_QUERY: &str = r#"
query Silos($lastTimestamp: Int!) {
    silos(
        first: 1000
        orderBy: createdTimestamp
        orderDirection: asc
        where: { createdTimestamp_gt: $lastTimestamp }
    ) {
        id
        name
        createdTimestamp
    }
}
"#;

/// A silo creation record as indexed by the subgraph.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Silo {
    /// On-chain address of the silo contract.
    pub id: String,
    /// Display name of the silo's base asset.
    pub name: String,
    /// Creation timestamp, the pagination cursor.
    pub created_timestamp: u64,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    data: Option<SiloPage>,
    errors: Option<Vec<QueryError>>,
}

#[derive(Debug, Deserialize)]
struct SiloPage {
    silos: Vec<Silo>,
}

#[derive(Debug, Deserialize)]
struct QueryError {
    message: String,
}

/// Client for querying silo creation events from one subgraph endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    endpoint: Url,
}

impl Client {
    /// Create a new subgraph client for the given endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self { http: HttpClient::new(), endpoint }
    }

    /// Fetch one page of up to [`PAGE_SIZE`] silos created strictly after
    /// `last_timestamp`, ordered by ascending creation timestamp.
    pub async fn fetch_page(&self, last_timestamp: u64) -> Result<Vec<Silo>> {
        let body = json!({
            "query": SILOS_QUERY,
            "variables": { "lastTimestamp": last_timestamp },
        });
        let resp = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(eyre!("subgraph request failed with status {status}"));
        }

        let parsed = resp.json::<QueryResponse>().await?;
        if let Some(errors) = parsed.errors {
            for err in &errors {
                error!(message = %err.message, "subgraph query error");
            }
            bail!("query errors occurred");
        }
        match parsed.data {
            Some(page) => Ok(page.silos),
            None => bail!("no data found in subgraph response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::{Matcher, Server};

    fn page_body(silos: serde_json::Value) -> String {
        json!({ "data": { "silos": silos } }).to_string()
    }

    #[tokio::test]
    async fn fetch_page_parses_records() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_body(Matcher::PartialJson(json!({ "variables": { "lastTimestamp": 0 } })))
            .with_status(200)
            .with_body(page_body(json!([
                { "id": "0xabc", "name": "USDC", "createdTimestamp": 1 },
                { "id": "0xdef", "name": "WETH", "createdTimestamp": 2 }
            ])))
            .create_async()
            .await;

        let client = Client::new(Url::parse(&server.url()).unwrap());
        let page = client.fetch_page(0).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "0xabc");
        assert_eq!(page[0].name, "USDC");
        assert_eq!(page[1].created_timestamp, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_page_sends_cursor_value() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({ "variables": { "lastTimestamp": 1234 } })))
            .with_status(200)
            .with_body(page_body(json!([])))
            .create_async()
            .await;

        let client = Client::new(Url::parse(&server.url()).unwrap());
        let page = client.fetch_page(1234).await.unwrap();
        assert!(page.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_page_reports_http_status() {
        let mut server = Server::new_async().await;
        let _mock = server.mock("POST", "/").with_status(500).create_async().await;

        let client = Client::new(Url::parse(&server.url()).unwrap());
        let err = client.fetch_page(0).await.unwrap_err();
        assert!(err.to_string().contains("500"), "missing status in: {err}");
    }

    #[tokio::test]
    async fn fetch_page_fails_on_query_errors() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"errors":[{"message":"rate limited"},{"message":"bad query"}]}"#)
            .create_async()
            .await;

        let client = Client::new(Url::parse(&server.url()).unwrap());
        let err = client.fetch_page(0).await.unwrap_err();
        assert_eq!(err.to_string(), "query errors occurred");
    }

    #[tokio::test]
    async fn fetch_page_fails_without_data() {
        let mut server = Server::new_async().await;
        let _mock = server.mock("POST", "/").with_status(200).with_body("{}").create_async().await;

        let client = Client::new(Url::parse(&server.url()).unwrap());
        let err = client.fetch_page(0).await.unwrap_err();
        assert!(err.to_string().contains("no data found"), "unexpected error: {err}");
    }
}
