use chrono::{DateTime, Duration, FixedOffset, Utc};

use super::documents::{MachineDocument, SensorDocument};

const WASHER_CYCLE_MINUTES: i64 = 30;
const DRYER_SINGLE_CYCLE_MINUTES: i64 = 45;
const DRYER_DOUBLE_CYCLE_MINUTES: i64 = 2 * DRYER_SINGLE_CYCLE_MINUTES;

/// Overrun past which the sensor is assumed to be stuck.
const NOT_WORKING_AFTER_MINUTES: i64 = -5;
/// Overrun for which the single-tap estimate is still shown.
const SINGLE_TAP_GRACE_MINUTES: i64 = -2;

const NOT_WORKING: &str = " (sensor may not be working)";
const NOT_CERTAIN: &str = " (or less)";

/// A machine joined with the sensor board watching it.
#[derive(Clone, Debug, PartialEq)]
pub struct Machine {
    pub name: String,
    pub level: i64,
    pub ezlink: bool,
    pub washer: bool,
    pub on: bool,
    pub time_changed: DateTime<FixedOffset>,
    pub time_changed_certain: bool,
    pub last_seen: DateTime<FixedOffset>,
}

impl Machine {
    pub fn from_documents(machine: &MachineDocument, sensor: &SensorDocument) -> Self {
        Self {
            name: machine.name.value().to_string(),
            level: sensor.level.value(),
            ezlink: machine.ezlink.value(),
            washer: machine.washer.value(),
            on: machine.on.value(),
            time_changed: machine.time_changed.value(),
            time_changed_certain: machine.time_changed_certain.value(),
            last_seen: sensor.last_seen.value(),
        }
    }

    /// Time left in a cycle of `cycle_minutes`; negative once the cycle has overrun.
    pub fn time_left(&self, cycle_minutes: i64, now: DateTime<Utc>) -> Duration {
        Duration::minutes(cycle_minutes) - (now - self.time_changed.with_timezone(&Utc))
    }

    fn header(&self) -> String {
        let payment = if self.ezlink { "ezlink" } else { "coin" };
        format!("*{} ({payment})*: ", self.name)
    }

    /// Suffix flagging a stuck sensor or an uncertain start time.
    fn caveat(&self, time_left: Duration) -> &'static str {
        if time_left < Duration::minutes(NOT_WORKING_AFTER_MINUTES) {
            NOT_WORKING
        } else if !self.time_changed_certain {
            NOT_CERTAIN
        } else {
            ""
        }
    }
}

/// Orders by name, the ezlink machine first among equal names.
pub(crate) fn display_order(first: &Machine, second: &Machine) -> std::cmp::Ordering {
    first
        .name
        .cmp(&second.name)
        .then_with(|| second.ezlink.cmp(&first.ezlink))
}

pub fn format_time_left(time_left: Duration) -> String {
    format!("{} mins left", time_left.max(Duration::zero()).num_minutes())
}

#[derive(Clone, Debug, PartialEq)]
pub struct Washer(pub Machine);

impl Washer {
    pub fn time_left(&self, now: DateTime<Utc>) -> Duration {
        self.0.time_left(WASHER_CYCLE_MINUTES, now)
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut line = self.0.header();
        if self.0.on {
            let time_left = self.time_left(now);
            line.push_str(&format_time_left(time_left));
            line.push_str(self.0.caveat(time_left));
        } else {
            line.push_str("free");
        }
        line
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dryer(pub Machine);

impl Dryer {
    /// Time left for a single-tap and a double-tap cycle.
    pub fn time_left(&self, now: DateTime<Utc>) -> (Duration, Duration) {
        (
            self.0.time_left(DRYER_SINGLE_CYCLE_MINUTES, now),
            self.0.time_left(DRYER_DOUBLE_CYCLE_MINUTES, now),
        )
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut line = self.0.header();
        if self.0.on {
            let (single, double) = self.time_left(now);
            if single >= Duration::minutes(SINGLE_TAP_GRACE_MINUTES) {
                line.push_str(&format_time_left(single));
                line.push_str(" (single tap) / ");
            }
            line.push_str(&format_time_left(double));
            line.push_str(" (double tap)");
            line.push_str(self.0.caveat(double));
        } else {
            line.push_str("free");
        }
        line
    }
}
