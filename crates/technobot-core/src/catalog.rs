//! Read-only customer catalog loaded from the recommendations CSV.

use crate::types::CustomerProfile;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Marker separating the product name from its tier suffix.
const TIER_MARKER: &str = " tier ";

/// Remove tier information from a product name.
pub fn clean_product_name(name: &str) -> String {
    match name.find(TIER_MARKER) {
        Some(index) => name[..index].to_string(),
        None => name.to_string(),
    }
}

/// Raw CSV row as written by the recommendation pipeline.
///
/// Numeric and boolean columns are read as strings because the upstream
/// export is not strict about types; conversion below is lenient.
#[derive(Debug, Deserialize)]
struct ProfileRecord {
    user_id: String,
    #[serde(default)]
    age: String,
    #[serde(default)]
    occupation: String,
    #[serde(default)]
    marital_status: String,
    #[serde(default)]
    recommendation_success: String,
    #[serde(default)]
    adopted_products_count: String,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    recommended_product_name_1: Option<String>,
    #[serde(default)]
    recommended_product_name_2: Option<String>,
    #[serde(default)]
    recommended_product_name_3: Option<String>,
}

impl ProfileRecord {
    fn into_profile(self) -> CustomerProfile {
        let recommended_products = [
            self.recommended_product_name_1,
            self.recommended_product_name_2,
            self.recommended_product_name_3,
        ]
        .into_iter()
        .flatten()
        .map(|name| clean_product_name(&name))
        .filter(|name| !name.trim().is_empty())
        .collect();

        CustomerProfile {
            user_id: self.user_id,
            age: self.age.trim().parse().unwrap_or(0),
            occupation: self.occupation,
            marital_status: self.marital_status,
            recommendation_success: parse_flag(&self.recommendation_success),
            adopted_products_count: self.adopted_products_count.trim().parse().unwrap_or(0),
            timestamp: self.timestamp,
            recommended_products,
        }
    }
}

/// Accepts the boolean spellings the export has been seen to produce.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// Dropdown entry pairing a display label with the customer id.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CustomerOption {
    /// Display label for the dropdown.
    pub label: String,
    /// Customer identifier.
    pub user_id: String,
}

/// In-memory customer catalog, immutable for the process lifetime.
#[derive(Debug, Default)]
pub struct CustomerCatalog {
    profiles: Vec<CustomerProfile>,
    by_id: HashMap<String, usize>,
}

impl CustomerCatalog {
    /// Load the catalog from a CSV file.
    ///
    /// A missing or unreadable file yields an empty catalog: the demo keeps
    /// running and lookups resolve to the "not found" placeholder path.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let catalog = Self::from_csv(&contents);
                debug!(
                    "customer catalog loaded (path={}, profiles={})",
                    path.display(),
                    catalog.len()
                );
                catalog
            }
            Err(err) => {
                warn!(
                    "could not load customer data (path={}, error={})",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Build a catalog from CSV contents, skipping rows that do not parse.
    pub fn from_csv(contents: &str) -> Self {
        let mut profiles = Vec::new();
        let mut by_id = HashMap::new();
        let mut reader = csv::Reader::from_reader(contents.as_bytes());
        for row in reader.deserialize::<ProfileRecord>() {
            match row {
                Ok(record) => {
                    let profile = record.into_profile();
                    if profile.user_id.trim().is_empty() {
                        continue;
                    }
                    by_id.insert(profile.user_id.clone(), profiles.len());
                    profiles.push(profile);
                }
                Err(err) => {
                    warn!("skipping malformed customer row: {err}");
                }
            }
        }
        Self { profiles, by_id }
    }

    /// Number of profiles loaded.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the catalog has no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Look up a profile by customer id.
    pub fn lookup(&self, user_id: &str) -> Option<&CustomerProfile> {
        self.by_id
            .get(user_id)
            .and_then(|index| self.profiles.get(*index))
    }

    /// Dropdown options in catalog order.
    pub fn options(&self) -> Vec<CustomerOption> {
        self.profiles
            .iter()
            .map(|profile| {
                let short_id: String = profile.user_id.chars().take(8).collect();
                CustomerOption {
                    label: format!(
                        "ID: {}... | {} tuổi | {} | {}",
                        short_id, profile.age, profile.occupation, profile.marital_status
                    ),
                    user_id: profile.user_id.clone(),
                }
            })
            .collect()
    }
}
