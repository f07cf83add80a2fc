//! Silotag configuration
use clap::Parser;
use eyre::{Result, eyre};
use url::Url;

/// Placeholder token in endpoint templates, replaced by the percent-encoded
/// gateway API key.
pub const API_KEY_PLACEHOLDER: &str = "[api-key]";

/// Supported chain IDs and their Silo v1 subgraph deployments on The Graph
/// gateway.
const CHAIN_ENDPOINTS: &[(&str, &str)] = &[
    (
        "1",
        "https://gateway-arbitrum.network.thegraph.com/api/[api-key]/subgraphs/id/GTEPgSoib9T3Rv6GPbRfM5qvRvNvfhqcFNt7qBMTo6so",
    ),
    (
        "10",
        "https://gateway-arbitrum.network.thegraph.com/api/[api-key]/subgraphs/id/4sGHybYzYYrvGyWmah82oCgFnewNjuivos9DuAFAWHWd",
    ),
    (
        "8453",
        "https://gateway-arbitrum.network.thegraph.com/api/[api-key]/subgraphs/id/6P3Kxn9NMMJ1sZqsAcudtyqH6sMCDbcFdH61sSyDkU1o",
    ),
    (
        "42161",
        "https://gateway-arbitrum.network.thegraph.com/api/[api-key]/subgraphs/id/2ufoztRpybsgogPVW6j9NTn1JmBWFYPKbP7pAabizADU",
    ),
];

/// Comma-separated list of the supported chain IDs, for error messages.
fn supported_chain_ids() -> String {
    CHAIN_ENDPOINTS.iter().map(|(id, _)| *id).collect::<Vec<_>>().join(", ")
}

/// Resolve the subgraph endpoint for `chain_id`, substituting the
/// percent-encoded `api_key` for the [`API_KEY_PLACEHOLDER`] token.
///
/// Fails when `chain_id` is not a numeric string or is not in the supported
/// set; the error text lists the supported chain IDs.
pub fn resolve_endpoint(chain_id: &str, api_key: &str) -> Result<Url> {
    let is_numeric = !chain_id.is_empty() && chain_id.bytes().all(|b| b.is_ascii_digit());
    let template = CHAIN_ENDPOINTS
        .iter()
        .find(|(id, _)| is_numeric && *id == chain_id)
        .map(|(_, template)| *template)
        .ok_or_else(|| {
            eyre!(
                "unsupported chain ID {chain_id}; supported chain IDs: {}",
                supported_chain_ids()
            )
        })?;

    let endpoint = template.replacen(API_KEY_PLACEHOLDER, &urlencoding::encode(api_key), 1);
    Ok(Url::parse(&endpoint)?)
}

/// Chain selection options
#[derive(Debug, Clone, Parser)]
pub struct ChainOpts {
    /// Chain ID of the network to collect silos from
    #[clap(long, env = "CHAIN_ID")]
    pub chain_id: String,
}

/// Subgraph gateway access options
#[derive(Debug, Clone, Parser)]
pub struct SubgraphOpts {
    /// The Graph gateway API key
    #[clap(long, env = "SUBGRAPH_API_KEY")]
    pub api_key: String,
}

/// CLI options for silotag
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Chain selection
    #[clap(flatten)]
    pub chain: ChainOpts,

    /// Subgraph gateway access
    #[clap(flatten)]
    pub subgraph: SubgraphOpts,
}
