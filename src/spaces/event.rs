use chrono::{DateTime, Duration, FixedOffset, TimeZone, Timelike};
use serde::Deserialize;

use crate::firestore::{StringValue, TimestampValue};
use crate::util::time::{sg_start_of_day, to_sg};

/// An `events` document as stored by the booking website.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDocument {
    pub name: StringValue,
    pub venue_name: StringValue,
    pub start_date: TimestampValue,
    pub end_date: TimestampValue,
}

/// A booking of one venue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub venue: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl From<EventDocument> for Event {
    fn from(document: EventDocument) -> Self {
        Self {
            name: document.name.into_inner(),
            venue: document.venue_name.into_inner(),
            start: document.start_date.value(),
            end: document.end_date.value(),
        }
    }
}

impl Event {
    /// Start and end, with the date printed once when both fall on the same day.
    pub fn time_info(&self) -> String {
        if to_sg(&self.start).date_naive() == to_sg(&self.end).date_naive() {
            format!(
                "{} to {}, {}",
                format_time(&self.start),
                format_time(&self.end),
                format_date(&self.start)
            )
        } else {
            format!("{} to {}", format_time_date(&self.start), format_time_date(&self.end))
        }
    }

    pub fn render(&self) -> String {
        format!("*{}:* {}", self.name, self.time_info())
    }
}

/// The events booked at one venue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Space {
    venue: String,
    events: Vec<Event>,
}

impl Space {
    pub fn new(venue: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            events: Vec::new(),
        }
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Adds an event without checking its venue.
    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn filter<P>(&self, predicate: P) -> Space
    where
        P: Fn(&Event) -> bool,
    {
        Space {
            venue: self.venue.clone(),
            events: self.events.iter().filter(|event| predicate(*event)).cloned().collect(),
        }
    }

    /// Venue banner followed by the events in start order.
    pub fn render(&self) -> String {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by_key(|event| event.start);

        let mut out = format!("=======================\n{}\n=======================\n", self.venue);
        for event in events {
            out.push_str(&event.render());
            out.push_str("\n\n");
        }
        out
    }
}

/// Bookings grouped by venue, venues in the order they were first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spaces(Vec<Space>);

impl Spaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Space] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add_event(&mut self, event: Event) {
        match self.0.iter_mut().find(|space| space.venue == event.venue) {
            Some(space) => space.add_event(event),
            None => {
                let mut space = Space::new(event.venue.clone());
                space.add_event(event);
                self.0.push(space);
            }
        }
    }

    /// Keeps the events matching `predicate`, dropping spaces left empty.
    pub fn filter<P>(&self, predicate: P) -> Spaces
    where
        P: Fn(&Event) -> bool,
    {
        Spaces(
            self.0
                .iter()
                .map(|space| space.filter(&predicate))
                .filter(|space| !space.events.is_empty())
                .collect(),
        )
    }

    pub fn render(&self) -> String {
        if self.0.is_empty() {
            return "[No bookings recorded]".to_string();
        }
        self.0.iter().map(Space::render).collect()
    }
}

impl FromIterator<Event> for Spaces {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut spaces = Spaces::new();
        for event in iter {
            spaces.add_event(event);
        }
        spaces
    }
}

/// Events overlapping `[first, last)`.
pub fn event_between(first: DateTime<FixedOffset>, last: DateTime<FixedOffset>) -> impl Fn(&Event) -> bool {
    move |event| {
        if event.start < first {
            event.end > first
        } else {
            event.start < last
        }
    }
}

/// Events in progress at `instant`, or starting exactly then.
pub fn event_during(instant: DateTime<FixedOffset>) -> impl Fn(&Event) -> bool {
    move |event| (event.start < instant && event.end > instant) || event.start == instant
}

/// Events overlapping the UTC+8 calendar day containing `date`.
pub fn event_on_day<Tz: TimeZone>(date: &DateTime<Tz>) -> impl Fn(&Event) -> bool {
    event_between(sg_start_of_day(date), end_of_day(date))
}

/// Events overlapping the days from `first` through `last`, inclusive.
pub fn event_between_days<Tz: TimeZone>(first: &DateTime<Tz>, last: &DateTime<Tz>) -> impl Fn(&Event) -> bool {
    event_between(sg_start_of_day(first), end_of_day(last))
}

fn end_of_day<Tz: TimeZone>(date: &DateTime<Tz>) -> DateTime<FixedOffset> {
    sg_start_of_day(&(to_sg(date) + Duration::days(1)))
}

/// `Mon 02 Jan 06`, in UTC+8.
pub fn format_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    to_sg(instant).format("%a %d %b %y").to_string()
}

/// `03PM` on the hour, `03:04PM` otherwise, in UTC+8.
pub fn format_time<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    let local = to_sg(instant);
    if local.minute() == 0 {
        local.format("%I%p").to_string()
    } else {
        local.format("%I:%M%p").to_string()
    }
}

pub fn format_time_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    format!("{}, {}", format_time(instant), format_date(instant))
}
