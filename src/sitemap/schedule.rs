//! Daily rebuild schedule: next occurrence of a fixed hour in a fixed-offset
//! timezone (the site's editorial timezone, default UTC-5).

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};

/// UTC instant of the next `hour:00:00` in the given fixed offset, strictly
/// after `now`.
pub fn next_run(now: DateTime<Utc>, hour: u32, offset_hours: i32) -> DateTime<Utc> {
    let offset = FixedOffset::east_opt(offset_hours * 3600)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    let local_now = now.with_timezone(&offset);

    let mut target = local_now
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .unwrap_or_else(|| local_now.date_naive().and_hms_opt(0, 0, 0).expect("midnight is valid"));

    if local_now.naive_local() >= target {
        target += Duration::days(1);
    }

    // Fixed offsets have no DST gaps, so the local datetime is unambiguous.
    offset
        .from_local_datetime(&target)
        .single()
        .expect("fixed-offset local datetime is unambiguous")
        .with_timezone(&Utc)
}

/// Sleep duration until the next scheduled rebuild.
pub fn until_next_run(now: DateTime<Utc>, hour: u32, offset_hours: i32) -> std::time::Duration {
    (next_run(now, hour, offset_hours) - now)
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_run_same_day() {
        // 01:00 UTC, schedule 02:00 UTC+0 -> later the same day
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 1, 0, 0).unwrap();
        let next = next_run(now, 2, 0);
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 5, 1, 2, 0, 0).unwrap());
    }

    #[test]
    fn test_next_run_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 2, 0, 0).unwrap();
        let next = next_run(now, 2, 0);
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 5, 2, 2, 0, 0).unwrap());
    }

    #[test]
    fn test_next_run_respects_offset() {
        // 02:00 at UTC-5 is 07:00 UTC
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap();
        let next = next_run(now, 2, -5);
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_until_next_run_positive() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 1, 30, 0).unwrap();
        let wait = until_next_run(now, 2, 0);
        assert_eq!(wait, std::time::Duration::from_secs(30 * 60));
    }
}
