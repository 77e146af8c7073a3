//! Ordered trading-day sequence and its temporal queries.

use chrono::NaiveDate;

/// An ordered, duplicate-free sequence of trading sessions.
///
/// Adjacency in the sequence means "next trading session", not "next
/// calendar day": non-trading days are simply absent. The sequence is
/// immutable once constructed; a fresh snapshot produces a fresh calendar.
///
/// All queries are binary searches over the sorted sequence, so lookups are
/// `O(log n)` and range extraction is a contiguous slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TradingCalendar {
    dates: Vec<NaiveDate>,
}

impl TradingCalendar {
    /// Builds a calendar from session dates in any order.
    ///
    /// Sorts ascending and drops duplicates, so the sequence invariants hold
    /// regardless of what the snapshot contained.
    #[must_use]
    pub fn from_dates(mut dates: Vec<NaiveDate>) -> Self {
        dates.sort_unstable();
        dates.dedup();
        Self { dates }
    }

    /// Returns the number of known sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the calendar has no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Returns the earliest known session.
    #[must_use]
    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Returns the latest known session.
    #[must_use]
    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Returns the full ascending session sequence.
    #[must_use]
    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns true if `date` is exactly a known session.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// Returns the sessions `d` with `start <= d` and, if `end` is given,
    /// `d <= end`, truncated to the first `count` entries if `count` is
    /// given.
    ///
    /// `end` and `count` are alternative upper-bound controls; when both are
    /// present `end` filters first and `count` keeps the earliest entries of
    /// the filtered result.
    #[must_use]
    pub fn dates_in_range(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
        count: Option<usize>,
    ) -> &[NaiveDate] {
        let lo = self.dates.partition_point(|d| *d < start);
        let hi = end.map_or(self.dates.len(), |end| {
            self.dates.partition_point(|d| *d <= end)
        });
        let range = &self.dates[lo..hi.max(lo)];
        match count {
            Some(count) => &range[..count.min(range.len())],
            None => range,
        }
    }

    /// Returns the greatest session `<= as_of`, or `None` if `as_of`
    /// predates the first known session.
    #[must_use]
    pub fn latest_on_or_before(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        let idx = self.dates.partition_point(|d| *d <= as_of);
        idx.checked_sub(1).map(|i| self.dates[i])
    }

    /// Rolls `anchor` back to the nearest session at or before it, then
    /// steps `steps` sessions further into the past.
    ///
    /// A non-session anchor rolls to the greatest session strictly before
    /// it, so `steps = 0` already answers "what was the last session before
    /// this date". Returns `None` when the walk leaves the known range.
    #[must_use]
    pub fn previous(&self, anchor: NaiveDate, steps: usize) -> Option<NaiveDate> {
        let idx = match self.dates.binary_search(&anchor) {
            Ok(i) => i,
            Err(0) => return None,
            Err(i) => i - 1,
        };
        idx.checked_sub(steps).map(|i| self.dates[i])
    }

    /// Rolls `anchor` forward to the nearest session at or after it, then
    /// steps `steps` sessions further into the future.
    ///
    /// Symmetric to [`previous`](Self::previous): a non-session anchor rolls
    /// to the least session strictly after it. Returns `None` when the walk
    /// leaves the known range.
    #[must_use]
    pub fn next(&self, anchor: NaiveDate, steps: usize) -> Option<NaiveDate> {
        let idx = match self.dates.binary_search(&anchor) {
            Ok(i) | Err(i) => i,
        };
        idx.checked_add(steps)
            .and_then(|i| self.dates.get(i))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    /// Four sessions around the 2025-01-04/05 weekend.
    fn calendar() -> TradingCalendar {
        TradingCalendar::from_dates(vec![
            date("2025-01-06"),
            date("2025-01-02"),
            date("2025-01-07"),
            date("2025-01-03"),
            date("2025-01-06"), // duplicate dropped on construction
        ])
    }

    #[test]
    fn test_construction_sorts_and_dedups() {
        let cal = calendar();
        assert_eq!(cal.len(), 4);
        assert_eq!(cal.first(), Some(date("2025-01-02")));
        assert_eq!(cal.last(), Some(date("2025-01-07")));
        assert!(cal.as_slice().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_dates_in_range_inclusive_bounds() {
        let cal = calendar();
        let range = cal.dates_in_range(date("2025-01-01"), Some(date("2025-01-10")), None);
        assert_eq!(
            range,
            &[
                date("2025-01-02"),
                date("2025-01-03"),
                date("2025-01-06"),
                date("2025-01-07"),
            ]
        );

        // Bounds landing exactly on sessions are included.
        let range = cal.dates_in_range(date("2025-01-03"), Some(date("2025-01-06")), None);
        assert_eq!(range, &[date("2025-01-03"), date("2025-01-06")]);
    }

    #[test]
    fn test_dates_in_range_count_keeps_earliest() {
        let cal = calendar();
        let range = cal.dates_in_range(date("2025-01-01"), None, Some(2));
        assert_eq!(range, &[date("2025-01-02"), date("2025-01-03")]);

        // end filters first, count truncates the filtered prefix
        let range = cal.dates_in_range(date("2025-01-01"), Some(date("2025-01-06")), Some(2));
        assert_eq!(range, &[date("2025-01-02"), date("2025-01-03")]);
    }

    #[test]
    fn test_dates_in_range_empty_cases() {
        let cal = calendar();
        assert!(cal.dates_in_range(date("2025-02-01"), None, None).is_empty());
        assert!(
            cal.dates_in_range(date("2025-01-01"), Some(date("2024-12-31")), None)
                .is_empty()
        );
        assert!(cal.dates_in_range(date("2025-01-01"), None, Some(0)).is_empty());
        assert!(
            TradingCalendar::default()
                .dates_in_range(date("2025-01-01"), None, None)
                .is_empty()
        );
    }

    #[test]
    fn test_dates_in_range_count_larger_than_result() {
        let cal = calendar();
        let range = cal.dates_in_range(date("2025-01-06"), None, Some(10));
        assert_eq!(range, &[date("2025-01-06"), date("2025-01-07")]);
    }

    #[test]
    fn test_latest_on_or_before() {
        let cal = calendar();
        // A session returns itself.
        assert_eq!(
            cal.latest_on_or_before(date("2025-01-06")),
            Some(date("2025-01-06"))
        );
        // A weekend rolls back to the Friday session.
        assert_eq!(
            cal.latest_on_or_before(date("2025-01-05")),
            Some(date("2025-01-03"))
        );
        // Before the first known session there is nothing to return.
        assert_eq!(cal.latest_on_or_before(date("2025-01-01")), None);
        // After the last known session the last session wins.
        assert_eq!(
            cal.latest_on_or_before(date("2025-03-01")),
            Some(date("2025-01-07"))
        );
    }

    #[test]
    fn test_previous_from_session_anchor() {
        let cal = calendar();
        assert_eq!(cal.previous(date("2025-01-06"), 0), Some(date("2025-01-06")));
        assert_eq!(cal.previous(date("2025-01-06"), 1), Some(date("2025-01-03")));
        assert_eq!(cal.previous(date("2025-01-06"), 2), Some(date("2025-01-02")));
        assert_eq!(cal.previous(date("2025-01-06"), 3), None);
    }

    #[test]
    fn test_previous_rolls_non_session_anchor_backward() {
        let cal = calendar();
        // Saturday rolls to Friday before stepping.
        assert_eq!(cal.previous(date("2025-01-04"), 0), Some(date("2025-01-03")));
        assert_eq!(cal.previous(date("2025-01-04"), 1), Some(date("2025-01-02")));
        // Anchor before the whole calendar has no earlier session.
        assert_eq!(cal.previous(date("2025-01-01"), 0), None);
    }

    #[test]
    fn test_next_from_session_anchor() {
        let cal = calendar();
        assert_eq!(cal.next(date("2025-01-03"), 0), Some(date("2025-01-03")));
        assert_eq!(cal.next(date("2025-01-03"), 1), Some(date("2025-01-06")));
        assert_eq!(cal.next(date("2025-01-03"), 2), Some(date("2025-01-07")));
        assert_eq!(cal.next(date("2025-01-03"), 3), None);
    }

    #[test]
    fn test_next_rolls_non_session_anchor_forward() {
        let cal = calendar();
        // Sunday rolls to Monday before stepping.
        assert_eq!(cal.next(date("2025-01-05"), 0), Some(date("2025-01-06")));
        assert_eq!(cal.next(date("2025-01-05"), 1), Some(date("2025-01-07")));
        // Anchor past the whole calendar has no later session.
        assert_eq!(cal.next(date("2025-01-08"), 0), None);
    }

    #[test]
    fn test_rolling_directions_differ_for_same_anchor() {
        // The two offset operations are independent directional questions,
        // not inverses: for a weekend anchor they land on different sessions.
        let cal = calendar();
        let anchor = date("2025-01-04");
        assert_eq!(cal.previous(anchor, 0), Some(date("2025-01-03")));
        assert_eq!(cal.next(anchor, 0), Some(date("2025-01-06")));
    }

    #[test]
    fn test_contains() {
        let cal = calendar();
        assert!(cal.contains(date("2025-01-06")));
        assert!(!cal.contains(date("2025-01-05")));
        assert!(!cal.contains(date("2024-12-31")));
    }

    #[test]
    fn test_membership_matches_single_day_range() {
        let cal = calendar();
        for probe in ["2025-01-02", "2025-01-04", "2025-01-07", "2025-01-09"] {
            let d = date(probe);
            let in_range = !cal.dates_in_range(d, Some(d), None).is_empty();
            assert_eq!(cal.contains(d), in_range, "mismatch for {probe}");
        }
    }
}
