use chrono::{DateTime, Datelike as _, Duration, NaiveDate, NaiveTime, Utc};

/// Display label for the single-day window.
pub const TODAY_LABEL: &str = "اليوم";

/// A reporting interval with a human label. Every window-scoped query treats
/// `end` as exclusive, so the explicit-range variant places `end` at the last
/// millisecond of its final day to keep that day included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: String,
}

/// Query parameters selecting a reporting window.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowParams {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Resolve request parameters into a concrete window.
///
/// Precedence: `period=today`, then an explicit parseable date pair, then the
/// current ISO week. Unparseable dates fall through to the default rather
/// than erroring.
pub fn resolve(params: &WindowParams, now: DateTime<Utc>) -> ReportWindow {
    if params.period.as_deref() == Some("today") {
        return day_of(now);
    }

    if let (Some(start_raw), Some(end_raw)) =
        (params.start_date.as_deref(), params.end_date.as_deref())
        && let (Ok(start_day), Ok(end_day)) =
            (start_raw.parse::<NaiveDate>(), end_raw.parse::<NaiveDate>())
    {
        let start = start_day.and_time(NaiveTime::MIN).and_utc();
        let end =
            end_day.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::milliseconds(1);
        return ReportWindow {
            start,
            end,
            // Label uses the raw input strings, not re-formatted dates
            label: format!("من {start_raw} إلى {end_raw}"),
        };
    }

    week_of(now)
}

/// The UTC day containing `now`: `[midnight, midnight + 24h)`.
pub fn day_of(now: DateTime<Utc>) -> ReportWindow {
    let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    ReportWindow {
        start,
        end: start + Duration::days(1),
        label: TODAY_LABEL.to_string(),
    }
}

/// The ISO week containing `now`: Monday 00:00 UTC through the following
/// Monday, exclusive. The label shows the last included day (the Sunday).
pub fn week_of(now: DateTime<Utc>) -> ReportWindow {
    let today = now.date_naive();
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(7);
    let shown_end = (end - Duration::milliseconds(1)).date_naive();
    ReportWindow {
        start,
        end,
        label: format!("الأسبوع الحالي ({monday} إلى {shown_end})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn today_window_is_exactly_24_hours() {
        let w = day_of(at(2025, 11, 5, 14, 30));
        assert_eq!(w.start, at(2025, 11, 5, 0, 0));
        assert_eq!(w.end - w.start, Duration::days(1));
        assert_eq!(w.label, TODAY_LABEL);
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-11-05 is a Wednesday
        let w = week_of(at(2025, 11, 5, 9, 0));
        assert_eq!(w.start, at(2025, 11, 3, 0, 0));
        assert_eq!(w.end, at(2025, 11, 10, 0, 0));
        assert_eq!(w.label, "الأسبوع الحالي (2025-11-03 إلى 2025-11-09)");
    }

    #[test]
    fn sunday_belongs_to_the_week_that_started_six_days_earlier() {
        // 2025-11-09 is a Sunday
        let w = week_of(at(2025, 11, 9, 23, 0));
        assert_eq!(w.start, at(2025, 11, 3, 0, 0));
    }

    #[test]
    fn monday_is_its_own_week_start() {
        let w = week_of(at(2025, 11, 3, 0, 0));
        assert_eq!(w.start, at(2025, 11, 3, 0, 0));
    }

    #[test]
    fn period_today_takes_precedence_over_dates() {
        let params = WindowParams {
            period: Some("today".to_string()),
            start_date: Some("2025-01-01".to_string()),
            end_date: Some("2025-01-31".to_string()),
        };
        let w = resolve(&params, at(2025, 11, 5, 12, 0));
        assert_eq!(w.label, TODAY_LABEL);
    }

    #[test]
    fn explicit_range_is_inclusive_of_the_end_day() {
        let params = WindowParams {
            period: None,
            start_date: Some("2025-11-01".to_string()),
            end_date: Some("2025-11-07".to_string()),
        };
        let w = resolve(&params, at(2025, 11, 20, 12, 0));
        assert_eq!(w.start, at(2025, 11, 1, 0, 0));
        assert_eq!(w.end, at(2025, 11, 7, 23, 59) + Duration::seconds(59) + Duration::milliseconds(999));
        assert_eq!(w.label, "من 2025-11-01 إلى 2025-11-07");
    }

    #[test]
    fn unparseable_dates_fall_back_to_the_week() {
        let params = WindowParams {
            period: None,
            start_date: Some("not-a-date".to_string()),
            end_date: Some("2025-11-07".to_string()),
        };
        let w = resolve(&params, at(2025, 11, 5, 12, 0));
        assert_eq!(w.start, at(2025, 11, 3, 0, 0));
    }

    #[test]
    fn missing_params_default_to_the_week() {
        let w = resolve(&WindowParams::default(), at(2025, 11, 5, 12, 0));
        assert_eq!(w.end - w.start, Duration::days(7));
    }
}
