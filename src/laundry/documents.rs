use std::collections::HashMap;

use serde::Deserialize;

use crate::firestore::{
    decode_fields, BooleanValue, Datastore, FirestoreResult, IntegerValue, Query, StringValue, TimestampValue,
};

use super::{MACHINE_COLLECTION, PROJECT_ID, SENSOR_COLLECTION};

/// A `laundry_status` document: one washer or dryer and the sensor watching it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MachineDocument {
    pub pin_id: StringValue,
    pub name: StringValue,
    pub ezlink: BooleanValue,
    pub washer: BooleanValue,
    pub on: BooleanValue,
    pub time_changed: TimestampValue,
    pub time_changed_certain: BooleanValue,
    pub cinnabot: BooleanValue,
    pub pi_no: IntegerValue,
}

/// A `pi_status` document: heartbeat of the sensor board on one level.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SensorDocument {
    pub pi_no: IntegerValue,
    pub level: IntegerValue,
    pub last_seen: TimestampValue,
}

pub fn fetch_sensors<D: Datastore>(datastore: &D) -> FirestoreResult<HashMap<i64, SensorDocument>> {
    let query = Query::from_collection(SENSOR_COLLECTION);
    let documents = datastore
        .run_query_and_parse(PROJECT_ID, &query, decode_fields::<SensorDocument>, false)
        .map_err(|err| {
            log::error!("Error getting sensor data from Firestore: {err}");
            err
        })?;
    Ok(documents
        .into_iter()
        .map(|document| {
            let sensor = document.into_data();
            (sensor.pi_no.value(), sensor)
        })
        .collect())
}

pub fn fetch_machines<D: Datastore>(datastore: &D) -> FirestoreResult<Vec<MachineDocument>> {
    let query = Query::from_collection(MACHINE_COLLECTION);
    let documents = datastore
        .run_query_and_parse(PROJECT_ID, &query, decode_fields::<MachineDocument>, false)
        .map_err(|err| {
            log::error!("Error getting laundry machine data from Firestore: {err}");
            err
        })?;
    Ok(documents.into_iter().map(|document| document.into_data()).collect())
}
