use chrono::Utc;
use cinnabot::firestore::HttpDatastore;
use cinnabot::laundry::laundry_message;

// Prints the live laundry report. Set FIRESTORE_EMULATOR_HOST to read from a
// local emulator instead of production.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let datastore = HttpDatastore::from_env()?;
    println!("{}", laundry_message(&datastore, Utc::now()));
    Ok(())
}
