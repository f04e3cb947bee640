//! Lenient VND amount type shared by all transfer payloads.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Transfer amount in whole VND.
///
/// The remote endpoints are inconsistent about the amount field: it may
/// arrive as a JSON number or as a numeric string. Both deserialize to the
/// same value; anything unparseable coerces to zero rather than failing the
/// whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Raw value in VND.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Render with thousands separators, e.g. `1,500,000`.
    pub fn formatted(self) -> String {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        grouped
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawAmount {
            Integer(u64),
            Float(f64),
            Text(String),
        }

        let value = match RawAmount::deserialize(deserializer)? {
            RawAmount::Integer(value) => value,
            RawAmount::Float(value) if value.is_finite() && value > 0.0 => value as u64,
            RawAmount::Float(_) => 0,
            RawAmount::Text(text) => {
                let cleaned: String = text
                    .trim()
                    .chars()
                    .filter(|ch| *ch != ',' && *ch != '.' && *ch != '_')
                    .collect();
                cleaned.parse().unwrap_or(0)
            }
        };
        Ok(Amount(value))
    }
}
