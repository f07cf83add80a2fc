//! Silotag driver - combines the subgraph fetcher and the tag transformer.

use config::resolve_endpoint;
use eyre::{Context, Result};
use subgraph::{Client, PAGE_SIZE};
use tags::{Tag, transform_page};
use tracing::{debug, info};
use url::Url;

/// Collect the full tag list for `chain_id`, authenticating against the
/// subgraph gateway with `api_key`.
///
/// Any page failure aborts the whole run; accumulated partial results are
/// discarded.
pub async fn return_tags(chain_id: &str, api_key: &str) -> Result<Vec<Tag>> {
    let endpoint = resolve_endpoint(chain_id, api_key)?;
    collect_tags(chain_id, endpoint).await
}

/// Drive pagination against `endpoint`, transforming each page as it
/// arrives.
///
/// Pages are fetched strictly in sequence: the cursor for the next request
/// is the highest creation timestamp of the previous page, and a page
/// shorter than [`PAGE_SIZE`] ends the loop. A total count that is an exact
/// multiple of the page size costs one extra empty round trip.
pub async fn collect_tags(chain_id: &str, endpoint: Url) -> Result<Vec<Tag>> {
    let client = Client::new(endpoint);
    let mut tags = Vec::new();
    let mut last_timestamp = 0u64;

    loop {
        let page = client.fetch_page(last_timestamp).await.wrap_err("Failed fetching data")?;
        debug!(cursor = last_timestamp, records = page.len(), "fetched silo page");

        tags.extend(transform_page(chain_id, &page));
        if page.len() < PAGE_SIZE {
            break;
        }
        last_timestamp =
            page.iter().map(|silo| silo.created_timestamp).max().unwrap_or(last_timestamp);
    }

    info!(chain_id = %chain_id, count = tags.len(), "collected silo tags");
    Ok(tags)
}
