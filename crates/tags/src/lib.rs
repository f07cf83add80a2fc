//! Public name-tag records for silo contracts.

use serde::Serialize;
use subgraph::Silo;
use tracing::warn;

/// Maximum length of the name portion of a public name tag.
const MAX_NAME_LEN: usize = 45;
/// Names longer than [`MAX_NAME_LEN`] keep this many characters before the
/// ellipsis.
const TRUNCATED_LEN: usize = 42;
const ELLIPSIS: &str = "...";

/// Fixed project name attached to every tag.
const PROJECT: &str = "Silo v1";
/// Fixed website link attached to every tag.
const WEBSITE: &str = "https://app.silo.finance";

/// A standardized public name tag describing one silo contract.
///
/// The serialized field names are the submission format consumed
/// downstream; they must not change.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Tag {
    /// CAIP-10 style contract address, `eip155:<chainId>:<address>`.
    #[serde(rename = "Contract Address")]
    pub contract_address: String,
    /// Truncated display name with the " Silo" suffix.
    #[serde(rename = "Public Name Tag")]
    pub public_name_tag: String,
    /// Project the contract belongs to.
    #[serde(rename = "Project")]
    pub project: String,
    /// Project website.
    #[serde(rename = "UI/Website Link")]
    pub ui_website_link: String,
    /// Free-form note carrying the untruncated display name.
    #[serde(rename = "Public Note")]
    pub public_note: String,
}

/// Whether a display name is usable in a public tag: non-empty after
/// trimming and free of `<...>` markup.
fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && !contains_markup(trimmed)
}

/// Anything that looks like an HTML/XML tag disqualifies a name.
fn contains_markup(name: &str) -> bool {
    name.find('<').is_some_and(|open| name[open..].contains('>'))
}

/// Truncate `name` to at most [`MAX_NAME_LEN`] characters, ellipsized.
fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_LEN {
        return name.to_owned();
    }
    let mut truncated: String = name.chars().take(TRUNCATED_LEN).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

fn to_tag(chain_id: &str, silo: &Silo) -> Tag {
    Tag {
        contract_address: format!("eip155:{chain_id}:{}", silo.id),
        public_name_tag: format!("{} Silo", truncate_name(&silo.name)),
        project: PROJECT.to_owned(),
        ui_website_link: WEBSITE.to_owned(),
        public_note: format!("The Silo v1 lending market for {}.", silo.name),
    }
}

/// Transform one page of raw silo records into tags, dropping records whose
/// names fail validation. All rejections of a page are reported in a single
/// diagnostic.
pub fn transform_page(chain_id: &str, silos: &[Silo]) -> Vec<Tag> {
    let mut rejected = Vec::new();
    let tags = silos
        .iter()
        .filter(|silo| {
            let valid = is_valid_name(&silo.name);
            if !valid {
                rejected.push(format!("{} ({:?})", silo.id, silo.name));
            }
            valid
        })
        .map(|silo| to_tag(chain_id, silo))
        .collect();

    if !rejected.is_empty() {
        warn!(
            count = rejected.len(),
            rejected = %rejected.join(", "),
            "skipped silos with invalid names"
        );
    }
    tags
}
