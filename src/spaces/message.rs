use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::firestore::{decode_fields, Datastore, FilterOperator, FirestoreResult, Query};
use crate::util::time::{sg_midnight, sg_start_of_day, to_sg};

use super::event::{
    event_between_days, event_during, event_on_day, format_date, format_time_date, Event, EventDocument, Spaces,
};
use super::{EVENT_COLLECTION, PROJECT_ID};

/// Longest date range a user may ask for.
const MAX_RANGE_DAYS: i64 = 33;

const FETCH_FAILED: &str = "Could not fetch bookings.";
const RANGE_TOO_LONG: &str = "The time interval is too long. Please restrict it to at most one month.";
const NOT_UNDERSTOOD: &str = "Cinnabot was unable to understand your command.\n\n";
const HELP: &str = "To use the '/spaces' command, type one of the following:\n\
'/spaces' : to view all bookings for today\n\
'/spaces now' : to view bookings active at this very moment\n\
'/spaces week' : to view all bookings for this week\n\
'/spaces dd/mm(/yy)' : to view all bookings on a specific day\n\
'/spaces dd/mm(/yy) dd/mm(/yy)' : to view all bookings in a specific range of dates";

/// Fetches every event ending after `date`, grouped by venue.
pub fn fetch_spaces_after<D, Tz>(datastore: &D, date: &DateTime<Tz>) -> FirestoreResult<Spaces>
where
    D: Datastore,
    Tz: TimeZone,
{
    let query = Query::from_collection(EVENT_COLLECTION).filter(
        "endDate",
        FilterOperator::GreaterThan,
        date.with_timezone(&Utc),
    );
    let documents = datastore.run_query_and_parse(PROJECT_ID, &query, decode_fields::<EventDocument>, false)?;
    Ok(documents
        .into_iter()
        .map(|document| Event::from(document.into_data()))
        .collect())
}

fn bookings_message<D, P>(datastore: &D, after: DateTime<FixedOffset>, header: String, predicate: P) -> String
where
    D: Datastore,
    P: Fn(&Event) -> bool,
{
    match fetch_spaces_after(datastore, &after) {
        Ok(spaces) => header + &spaces.filter(predicate).render(),
        Err(err) => {
            log::error!("Could not fetch bookings after {after}: {err}");
            FETCH_FAILED.to_string()
        }
    }
}

/// Bookings in progress at `now`.
pub fn bookings_now_message<D: Datastore>(datastore: &D, now: DateTime<Utc>) -> String {
    let now = to_sg(&now);
    let header = format!("Displaying bookings ongoing right now ({}):\n\n", format_time_date(&now));
    bookings_message(datastore, now, header, event_during(now))
}

/// Bookings today that have not finished yet.
pub fn bookings_today_message<D: Datastore>(datastore: &D, now: DateTime<Utc>) -> String {
    let now = to_sg(&now);
    let header = "Displaying bookings for today:\n\n".to_string();
    bookings_message(datastore, now, header, event_on_day(&now))
}

/// Unfinished bookings over the next seven days.
pub fn bookings_week_message<D: Datastore>(datastore: &D, now: DateTime<Utc>) -> String {
    let now = to_sg(&now);
    let week_later = now + Duration::days(7);
    let header = format!(
        "Displaying bookings 7 days from now ({} to {}):\n\n",
        format_date(&now),
        format_date(&week_later)
    );
    bookings_message(datastore, now, header, event_between_days(&now, &week_later))
}

/// Every booking on the day of `date`, finished or not.
pub fn bookings_on_date_message<D: Datastore>(datastore: &D, date: DateTime<FixedOffset>) -> String {
    let header = format!("Displaying all bookings on {}:\n\n", format_date(&date));
    bookings_message(datastore, sg_start_of_day(&date), header, event_on_day(&date))
}

/// Every booking from the start of `first` to the end of `last`.
pub fn bookings_between_message<D: Datastore>(
    datastore: &D,
    first: DateTime<FixedOffset>,
    last: DateTime<FixedOffset>,
) -> String {
    let header = format!(
        "Displaying bookings from {} to {}:\n\n",
        format_date(&first),
        format_date(&last)
    );
    bookings_message(datastore, sg_start_of_day(&first), header, event_between_days(&first, &last))
}

/// Parses `d/m/yy` (either part with or without zero padding), or `d/m` in the
/// current year. The result is midnight UTC+8.
pub fn parse_ddmmyy_date(text: &str, now: DateTime<Utc>) -> Option<DateTime<FixedOffset>> {
    let parts: Vec<&str> = text.split('/').collect();
    let (day, month, year) = match parts.as_slice() {
        [day, month] => (*day, *month, to_sg(&now).year()),
        [day, month, year] => (*day, *month, parse_two_digit_year(year)?),
        _ => return None,
    };
    let day = parse_short_number(day)?;
    let month = parse_short_number(month)?;
    NaiveDate::from_ymd_opt(year, month, day).map(sg_midnight)
}

fn parse_short_number(text: &str) -> Option<u32> {
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// `69`..`99` are the 1900s, `00`..`68` the 2000s.
fn parse_two_digit_year(text: &str) -> Option<i32> {
    if text.len() != 2 {
        return None;
    }
    let year = parse_short_number(text)? as i32;
    Some(if year >= 69 { 1900 + year } else { 2000 + year })
}

/// Reply to `/spaces` with the given arguments; extra arguments are ignored.
pub fn spaces_message<D: Datastore>(datastore: &D, args: &[&str], now: DateTime<Utc>) -> String {
    let first = args.first().copied();
    let reply = match first {
        None | Some("today") => Some(bookings_today_message(datastore, now)),
        Some("now") => Some(bookings_now_message(datastore, now)),
        Some("week") => Some(bookings_week_message(datastore, now)),
        Some("tomorrow") => Some(bookings_on_date_message(datastore, to_sg(&now) + Duration::days(1))),
        Some(arg) => parse_ddmmyy_date(arg, now).and_then(|first_date| match args.get(1) {
            Some(second) => parse_ddmmyy_date(second, now).map(|last_date| {
                if first_date + Duration::days(MAX_RANGE_DAYS) < last_date {
                    RANGE_TOO_LONG.to_string()
                } else {
                    bookings_between_message(datastore, first_date, last_date)
                }
            }),
            None => Some(bookings_on_date_message(datastore, first_date)),
        }),
    };

    reply.unwrap_or_else(|| {
        if first == Some("help") {
            HELP.to_string()
        } else {
            format!("{NOT_UNDERSTOOD}{HELP}")
        }
    })
}
