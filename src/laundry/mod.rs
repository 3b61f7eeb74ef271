//! Washer and dryer availability for the residential laundry rooms.
//!
//! Each machine document names the sensor board (`piNo`) that watches it; the
//! board's document carries the floor and its last heartbeat.

mod documents;
mod level;
mod machine;

pub use documents::{fetch_machines, fetch_sensors, MachineDocument, SensorDocument};
pub use level::{fetch_levels, group_levels, laundry_message, seen_recently, Level};
pub use machine::{format_time_left, Dryer, Machine, Washer};

pub const PROJECT_ID: &str = "usc-laundry-test";
pub const MACHINE_COLLECTION: &str = "laundry_status";
pub const SENSOR_COLLECTION: &str = "pi_status";

/// Floors with a laundry room, in display order.
pub const LAUNDRY_LEVELS: [i64; 2] = [9, 17];
