//! Venue bookings from the college website, rendered for `/spaces`.

mod event;
mod message;

pub use event::{
    event_between, event_between_days, event_during, event_on_day, format_date, format_time, format_time_date, Event,
    EventDocument, Space, Spaces,
};
pub use message::{
    bookings_between_message, bookings_now_message, bookings_on_date_message, bookings_today_message,
    bookings_week_message, fetch_spaces_after, parse_ddmmyy_date, spaces_message,
};

pub const PROJECT_ID: &str = "usc-website-206715";
pub const EVENT_COLLECTION: &str = "events";
