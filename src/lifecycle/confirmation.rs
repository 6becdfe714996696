//! What the donor sees right after a successful submission.

use serde::Serialize;

use crate::models::DonationRecord;

/// Confirmation text for an accepted donation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub heading: String,
    pub summary: String,
    pub receipt_number: String,
    pub email_notice: String,
}

impl From<&DonationRecord> for Confirmation {
    fn from(record: &DonationRecord) -> Self {
        Self {
            heading: format!("Thank You, {}!", record.name),
            summary: format!(
                "Your {} donation of {} has been received.",
                record.frequency,
                record.display_amount()
            ),
            receipt_number: record.receipt_number.clone(),
            email_notice: format!("A confirmation email has been sent to {}", record.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::Utc;

    #[test]
    fn test_confirmation_text() {
        let record = DonationRecord {
            id: "1".to_string(),
            amount: 100.0,
            name: "Emily Rodriguez".to_string(),
            email: "emily.r@example.com".to_string(),
            frequency: Frequency::Monthly,
            date: Utc::now(),
            receipt_number: "BFG-LRESA6O0-ABCDEFGH".to_string(),
        };

        let confirmation = Confirmation::from(&record);
        assert_eq!(confirmation.heading, "Thank You, Emily Rodriguez!");
        assert_eq!(
            confirmation.summary,
            "Your monthly donation of $100.00 has been received."
        );
        assert_eq!(confirmation.receipt_number, "BFG-LRESA6O0-ABCDEFGH");
        assert_eq!(
            confirmation.email_notice,
            "A confirmation email has been sent to emily.r@example.com"
        );
    }
}
