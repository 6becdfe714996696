//! Donation record model matching the persisted frontend `Donation` shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How often a pledge recurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Frequency {
    #[default]
    #[serde(rename = "one-time")]
    OneTime,
    #[serde(rename = "monthly")]
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::OneTime => "one-time",
            Frequency::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accepted donation. Created only by the lifecycle coordinator and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub id: String,
    pub amount: f64,
    pub name: String,
    pub email: String,
    pub frequency: Frequency,
    /// Acceptance instant, stored as ISO-8601 UTC with a `Z` suffix.
    #[serde(with = "iso_utc")]
    pub date: DateTime<Utc>,
    pub receipt_number: String,
}

impl DonationRecord {
    /// Amount rendered the way the site shows it, e.g. `$25.00`.
    pub fn display_amount(&self) -> String {
        format_amount(self.amount)
    }
}

/// Format a currency amount with two decimal places.
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// ISO-8601 UTC timestamps with a `Z` suffix. Sub-second digits are written only as far as needed.
pub(crate) mod iso_utc {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|d| d.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
