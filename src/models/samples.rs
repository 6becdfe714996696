//! Showcase donations displayed while nothing has been saved locally.

use chrono::{TimeZone, Utc};

use super::{DonationRecord, Frequency};

fn sample(
    id: &str,
    amount: f64,
    name: &str,
    email: &str,
    frequency: Frequency,
    (y, mo, d, h, mi): (i32, u32, u32, u32, u32),
    receipt_number: &str,
) -> Option<DonationRecord> {
    Some(DonationRecord {
        id: id.to_string(),
        amount,
        name: name.to_string(),
        email: email.to_string(),
        frequency,
        date: Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single()?,
        receipt_number: receipt_number.to_string(),
    })
}

/// The three sample donations the home page shows on a fresh device.
pub fn sample_donations() -> Vec<DonationRecord> {
    [
        sample(
            "1",
            25.0,
            "Sarah Johnson",
            "sarah.j@example.com",
            Frequency::OneTime,
            (2024, 1, 15, 10, 30),
            "BFG-MOCK-001",
        ),
        sample(
            "2",
            50.0,
            "Michael Chen",
            "m.chen@example.com",
            Frequency::Monthly,
            (2024, 1, 10, 14, 20),
            "BFG-MOCK-002",
        ),
        sample(
            "3",
            100.0,
            "Emily Rodriguez",
            "emily.r@example.com",
            Frequency::OneTime,
            (2024, 1, 5, 9, 15),
            "BFG-MOCK-003",
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
