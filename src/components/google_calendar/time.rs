use crate::error::{validation_error, AppResult};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Combine a `YYYY-MM-DD` date string and an `HH:MM` time string into a
/// local-time instant
pub fn combine_local(date_str: &str, time_str: &str) -> AppResult<DateTime<Local>> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| validation_error(&format!("Invalid date: {}", date_str)))?;
    let (hour, minute) = parse_time(time_str)
        .ok_or_else(|| validation_error(&format!("Invalid time: {}", time_str)))?;
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| validation_error("Failed to create datetime"))?;

    match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Ok(dt),
        chrono::LocalResult::Ambiguous(_, _) => Err(validation_error("Ambiguous local time")),
        chrono::LocalResult::None => Err(validation_error("Invalid local time")),
    }
}

/// Compute the half-open UTC window covering the month that contains `day`,
/// bounded by local midnights
pub fn month_window(day: NaiveDate) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let first = day
        .with_day(1)
        .ok_or_else(|| validation_error("Failed to compute month start"))?;
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .ok_or_else(|| validation_error("Failed to compute month end"))?;

    let start = local_midnight(first)?;
    let end = local_midnight(next_first)?;
    Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

fn local_midnight(date: NaiveDate) -> AppResult<DateTime<Local>> {
    let naive = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| validation_error("Failed to create datetime"))?;
    match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Ok(dt),
        // Midnight falling inside a DST transition still has a usable earlier side
        chrono::LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        chrono::LocalResult::None => Err(validation_error("Invalid local time")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parse_time_accepts_hh_mm() {
        assert_eq!(parse_time("09:00"), Some((9, 0)));
        assert_eq!(parse_time("23:59"), Some((23, 59)));
    }

    #[test]
    fn parse_time_rejects_out_of_range() {
        assert_eq!(parse_time("24:00"), None);
        assert_eq!(parse_time("12:60"), None);
        assert_eq!(parse_time("noon"), None);
        assert_eq!(parse_time("12"), None);
    }

    #[test]
    fn combine_local_interprets_in_local_time() {
        let dt = combine_local("2024-06-11", "09:00").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());
        assert_eq!((dt.hour(), dt.minute()), (9, 0));
    }

    #[test]
    fn combine_local_rejects_garbage() {
        assert!(combine_local("tomorrow", "09:00").is_err());
        assert!(combine_local("2024-06-11", "9am").is_err());
    }

    #[test]
    fn month_window_spans_whole_month() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let (start, end) = month_window(day).unwrap();
        assert!(start < end);
        let days = (end - start).num_days();
        assert_eq!(days, 30);
    }

    #[test]
    fn month_window_wraps_december() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let (start, end) = month_window(day).unwrap();
        assert_eq!((end - start).num_days(), 31);
    }
}
