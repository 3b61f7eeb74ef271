use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

const SG_OFFSET_SECONDS: i32 = 8 * 60 * 60;

/// Singapore time (UTC+8), the zone every user-facing time is rendered in.
pub fn sg_offset() -> FixedOffset {
    FixedOffset::east_opt(SG_OFFSET_SECONDS).expect("UTC+8 is a valid offset")
}

/// Re-renders an instant in UTC+8 without changing the instant itself.
pub fn to_sg<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<FixedOffset> {
    instant.with_timezone(&sg_offset())
}

/// Formats an instant as `02 Jan 06 15:04 +08`, in UTC+8.
pub fn format_rfc822<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    to_sg(instant).format("%d %b %y %H:%M +08").to_string()
}

/// Midnight at the start of `date`, UTC+8.
pub fn sg_midnight(date: NaiveDate) -> DateTime<FixedOffset> {
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time of day");
    sg_offset()
        .from_local_datetime(&midnight)
        .single()
        .expect("fixed offsets map local times uniquely")
}

/// Midnight UTC+8 of the calendar day (in UTC+8) containing `instant`.
pub fn sg_start_of_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<FixedOffset> {
    sg_midnight(to_sg(instant).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn keeps_instant_when_converting() {
        let utc = Utc.with_ymd_and_hms(2019, 12, 20, 15, 0, 0).unwrap();
        let sg = to_sg(&utc);
        assert_eq!(sg, utc);
        assert_eq!(sg.format("%Y-%m-%d %H:%M").to_string(), "2019-12-20 23:00");
    }

    #[test]
    fn formats_rfc822_in_sg_time() {
        let utc = Utc.with_ymd_and_hms(2019, 12, 20, 17, 5, 0).unwrap();
        assert_eq!(format_rfc822(&utc), "21 Dec 19 01:05 +08");
    }

    #[test]
    fn start_of_day_uses_sg_calendar() {
        // 17:00 UTC is already the next day in UTC+8
        let utc = Utc.with_ymd_and_hms(2018, 11, 18, 17, 0, 0).unwrap();
        let start = sg_start_of_day(&utc);
        assert_eq!(start, Utc.with_ymd_and_hms(2018, 11, 18, 16, 0, 0).unwrap());
        assert_eq!(start.format("%d %b %H:%M").to_string(), "19 Nov 00:00");
    }
}
