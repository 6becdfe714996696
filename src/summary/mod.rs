//! Recent-donation projection and its display helpers.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{sample_donations, DonationRecord, Frequency};

/// Shown in place of the list when there is nothing to display.
pub const EMPTY_MESSAGE: &str = "No donations yet. Be the first!";

/// The `max_items` most recent records, newest first.
///
/// Records sharing a timestamp keep their relative input order.
pub fn recent(records: &[DonationRecord], max_items: usize) -> Vec<DonationRecord> {
    let mut sorted: Vec<&DonationRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(max_items).cloned().collect()
}

/// Coarse age label for `date` as seen from `now`.
pub fn relative_age(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - date).num_milliseconds().div_euclid(86_400_000);
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => format!("{} weeks ago", days / 7),
        _ => format!("{} months ago", days / 30),
    }
}

/// Saved donations, or the showcase samples when nothing has been saved.
pub fn showcase_or_saved(saved: &[DonationRecord]) -> Cow<'_, [DonationRecord]> {
    if saved.is_empty() {
        Cow::Owned(sample_donations())
    } else {
        Cow::Borrowed(saved)
    }
}

/// One line of the recent donations card.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub frequency: Frequency,
    pub age: String,
}

/// The recent donations card.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryView {
    pub rows: Vec<SummaryRow>,
}

impl SummaryView {
    pub fn build(records: &[DonationRecord], max_items: usize, now: DateTime<Utc>) -> Self {
        let rows = recent(records, max_items)
            .into_iter()
            .map(|record| SummaryRow {
                amount: record.display_amount(),
                age: relative_age(record.date, now),
                frequency: record.frequency,
                id: record.id,
                name: record.name,
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fallback text, present only when there are no rows.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(id: &str, date: DateTime<Utc>) -> DonationRecord {
        DonationRecord {
            id: id.to_string(),
            amount: 10.0,
            name: format!("Donor {}", id),
            email: "donor@example.com".to_string(),
            frequency: Frequency::OneTime,
            date,
            receipt_number: format!("BFG-R-{}", id),
        }
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_recent_newest_first_and_truncated() {
        let records: Vec<DonationRecord> = (0..8)
            .map(|i| at(&i.to_string(), base() + Duration::hours(i)))
            .collect();

        let ids: Vec<String> = recent(&records, 3).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["7", "6", "5"]);
    }

    #[test]
    fn test_recent_does_not_mutate_input() {
        let records = vec![at("old", base()), at("new", base() + Duration::days(1))];
        let before = records.clone();
        let _ = recent(&records, 5);
        assert_eq!(records, before);
    }

    #[test]
    fn test_recent_zero_and_empty() {
        assert!(recent(&[at("a", base())], 0).is_empty());
        assert!(recent(&[], 5).is_empty());
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let records = vec![
            at("first", base()),
            at("newest", base() + Duration::minutes(1)),
            at("second", base()),
            at("third", base()),
        ];
        let ids: Vec<String> = recent(&records, 4).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["newest", "first", "second", "third"]);
    }

    #[test]
    fn test_relative_age_buckets() {
        let now = base();
        let ago = |d: i64| relative_age(now - Duration::days(d), now);

        assert_eq!(relative_age(now, now), "Today");
        assert_eq!(relative_age(now - Duration::hours(23), now), "Today");
        assert_eq!(ago(1), "Yesterday");
        assert_eq!(relative_age(now - Duration::hours(47), now), "Yesterday");
        assert_eq!(ago(2), "2 days ago");
        assert_eq!(ago(6), "6 days ago");
        assert_eq!(ago(7), "1 weeks ago");
        assert_eq!(ago(13), "1 weeks ago");
        assert_eq!(ago(14), "2 weeks ago");
        assert_eq!(ago(29), "4 weeks ago");
        assert_eq!(ago(30), "1 months ago");
        assert_eq!(ago(59), "1 months ago");
        assert_eq!(ago(60), "2 months ago");
        assert_eq!(ago(400), "13 months ago");
    }

    #[test]
    fn test_future_date_is_today() {
        let now = base();
        assert_eq!(relative_age(now + Duration::days(3), now), "Today");
    }

    #[test]
    fn test_summary_view_rows() {
        let now = base();
        let mut monthly = at("m", now - Duration::days(1));
        monthly.frequency = Frequency::Monthly;
        monthly.amount = 50.0;
        let records = vec![at("t", now), monthly];

        let view = SummaryView::build(&records, 5, now);
        assert_eq!(view.empty_message(), None);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].age, "Today");
        assert_eq!(view.rows[1].amount, "$50.00");
        assert_eq!(view.rows[1].frequency, Frequency::Monthly);
        assert_eq!(view.rows[1].age, "Yesterday");
    }

    #[test]
    fn test_empty_view_falls_back() {
        let view = SummaryView::build(&[], 5, base());
        assert!(view.is_empty());
        assert_eq!(view.empty_message(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn test_showcase_only_when_nothing_saved() {
        assert_eq!(showcase_or_saved(&[]).len(), 3);

        let saved = vec![at("mine", base())];
        let shown = showcase_or_saved(&saved);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, "mine");
    }
}
