//! Briefing data model

pub mod airport;
pub mod briefing;
pub mod reports;

use serde::{Deserialize, Deserializer};

/// Deserialize a possibly-null string field as an empty string
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
