//! Record id and receipt number minting.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Every receipt number starts with this prefix.
pub const RECEIPT_PREFIX: &str = "BFG";

/// Length of the random component of a receipt number.
pub const RECEIPT_RANDOM_LEN: usize = 8;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Source of fresh identifiers for accepted donations.
///
/// Implementations only need to be probably unique; the coordinator checks each candidate against the
/// stored collection and asks again on a collision.
pub trait IdentifierSource: Send + Sync {
    /// Internal record id.
    fn record_id(&self) -> String;

    /// Receipt number shown to the donor, minted at `now`.
    fn receipt_number(&self, now: DateTime<Utc>) -> String;
}

/// UUID v4 record ids and time-plus-random receipt numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentifiers;

impl IdentifierSource for RandomIdentifiers {
    fn record_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn receipt_number(&self, now: DateTime<Utc>) -> String {
        generate_receipt_number(now, &mut rand::thread_rng())
    }
}

/// `BFG-<unix millis in base36>-<random base36>`, all uppercase.
pub fn generate_receipt_number<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let random: String = (0..RECEIPT_RANDOM_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}-{}", RECEIPT_PREFIX, to_base36(millis), random)
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        // Date.now() at 2024-01-15T10:30:00Z
        assert_eq!(to_base36(1_705_314_600_000), "LRESA6O0");
    }

    #[test]
    fn test_receipt_shape() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let receipt = generate_receipt_number(now, &mut StdRng::seed_from_u64(7));
        let parts: Vec<&str> = receipt.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], RECEIPT_PREFIX);
        assert_eq!(parts[1], "LRESA6O0");
        assert_eq!(parts[2].len(), RECEIPT_RANDOM_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_receipts_in_same_instant_differ() {
        let now = Utc::now();
        let ids = RandomIdentifiers;
        let receipts: HashSet<String> = (0..2000).map(|_| ids.receipt_number(now)).collect();
        assert_eq!(receipts.len(), 2000);
    }

    #[test]
    fn test_record_ids_are_uuids() {
        let id = RandomIdentifiers.record_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_ne!(id, RandomIdentifiers.record_id());
    }
}
