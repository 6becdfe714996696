//! Pledge draft model matching the donation form's data.

use serde::{Deserialize, Serialize};

use super::Frequency;

/// Amounts offered as one-click presets on the donation form.
pub const AMOUNT_PRESETS: [f64; 4] = [25.0, 50.0, 100.0, 250.0];

/// Unvalidated form input. Discarded after a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PledgeDraft {
    pub amount: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub frequency: Frequency,
}

impl Default for PledgeDraft {
    fn default() -> Self {
        Self {
            amount: AMOUNT_PRESETS[0],
            name: String::new(),
            email: String::new(),
            frequency: Frequency::OneTime,
        }
    }
}

impl PledgeDraft {
    pub fn new(amount: f64, name: &str, email: &str, frequency: Frequency) -> Self {
        Self {
            amount,
            name: name.to_string(),
            email: email.to_string(),
            frequency,
        }
    }
}
