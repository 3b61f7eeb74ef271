use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::firestore::{Datastore, FirestoreResult};
use crate::util::time::format_rfc822;

use super::documents::{fetch_machines, fetch_sensors, MachineDocument, SensorDocument};
use super::machine::{display_order, Dryer, Machine, Washer};
use super::LAUNDRY_LEVELS;

const SEEN_RECENTLY_MINUTES: i64 = 10;

/// The machines of one laundry room.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub level: i64,
    pub washers: Vec<Washer>,
    pub dryers: Vec<Dryer>,
    /// Last heartbeat of the room's sensor board; one board serves a whole level.
    pub sensor_last_seen: Option<DateTime<FixedOffset>>,
}

impl Level {
    pub fn new(level: i64, machines: Vec<Machine>) -> Self {
        let sensor_last_seen = machines.first().map(|machine| machine.last_seen);
        let (washers, dryers): (Vec<Machine>, Vec<Machine>) =
            machines.into_iter().partition(|machine| machine.washer);
        Self {
            level,
            washers: washers.into_iter().map(Washer).collect(),
            dryers: dryers.into_iter().map(Dryer).collect(),
            sensor_last_seen,
        }
    }

    pub fn len(&self) -> usize {
        self.washers.len() + self.dryers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut washers = self.washers.clone();
        washers.sort_by(|a, b| display_order(&a.0, &b.0));
        let mut dryers = self.dryers.clone();
        dryers.sort_by(|a, b| display_order(&a.0, &b.0));

        let mut out = format!("*LEVEL {}*\n", self.level);
        if let Some(last_seen) = self.sensor_last_seen {
            if !seen_recently(last_seen, now) {
                out.push_str(&format!(
                    "\u{2757} Probably not accurate, the sensors were last seen at {}.\n",
                    format_rfc822(&last_seen)
                ));
            }
        }

        if !washers.is_empty() {
            out.push_str("====== *Washers* ======");
            for washer in &washers {
                out.push('\n');
                out.push_str(&washer.render(now));
            }
            out.push('\n');
        }
        if !dryers.is_empty() {
            out.push_str("======= *Dryers* =======");
            for dryer in &dryers {
                out.push('\n');
                out.push_str(&dryer.render(now));
            }
        }
        out
    }
}

pub fn seen_recently(last_seen: DateTime<FixedOffset>, now: DateTime<Utc>) -> bool {
    now - last_seen.with_timezone(&Utc) < Duration::minutes(SEEN_RECENTLY_MINUTES)
}

/// Joins machines to their sensor boards and groups them into the laundry levels.
///
/// Machines whose board is unknown, or whose board reports a level without a
/// laundry room, are logged and left out.
pub fn group_levels(machines: &[MachineDocument], sensors: &HashMap<i64, SensorDocument>) -> Vec<Level> {
    let mut by_level: HashMap<i64, Vec<Machine>> = HashMap::new();
    for document in machines {
        let Some(sensor) = sensors.get(&document.pi_no.value()) else {
            log::warn!(
                "Sensor board {} for machine '{}' is not in Firestore",
                document.pi_no.value(),
                document.name.value()
            );
            continue;
        };
        let machine = Machine::from_documents(document, sensor);
        if !LAUNDRY_LEVELS.contains(&machine.level) {
            log::warn!("Machine '{}' reports level {}, which has no laundry room", machine.name, machine.level);
            continue;
        }
        by_level.entry(machine.level).or_default().push(machine);
    }

    LAUNDRY_LEVELS
        .iter()
        .map(|level| Level::new(*level, by_level.remove(level).unwrap_or_default()))
        .collect()
}

/// Fetches every machine and sensor, one [`Level`] per laundry room in floor order.
pub fn fetch_levels<D: Datastore>(datastore: &D) -> FirestoreResult<Vec<Level>> {
    let sensors = fetch_sensors(datastore)?;
    let machines = fetch_machines(datastore)?;
    Ok(group_levels(&machines, &sensors))
}

/// The laundry availability report sent to users.
pub fn laundry_message<D: Datastore>(datastore: &D, now: DateTime<Utc>) -> String {
    let last_updated = format!("Last updated: {}", format_rfc822(&now));
    let levels = match fetch_levels(datastore) {
        Ok(levels) => levels,
        Err(err) => {
            log::error!("Could not fetch laundry availability: {err}");
            return format!("Could not fetch laundry availability.\n{last_updated}");
        }
    };

    let mut message = String::new();
    for level in levels.iter().filter(|level| !level.is_empty()) {
        message.push_str(&level.render(now));
        message.push_str("\n\n");
    }
    message.push_str(&last_updated);
    message
}
