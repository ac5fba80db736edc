//! Records returned by the unauthenticated `available` endpoints.

use serde::{Deserialize, Serialize};

/// An available service, such as the country list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Description.
    pub description: String,
    /// Service type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Relative URI.
    pub uri: String,
}

/// A supported country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Country {
    /// Full name.
    pub full_name: String,
    /// Postal code pattern.
    pub postal_code: String,
    /// Example postal code.
    pub postal_code_example: String,
    /// ISO 3166-1 alpha-3 code.
    pub short_name: String,
    /// Country uses a single postal code.
    pub one_postal_code: bool,
}

/// A satellite available over DVB-S.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableDvbs {
    /// Lineup identifier.
    pub lineup: String,
}
