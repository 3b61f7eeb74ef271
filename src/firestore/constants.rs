pub const DEFAULT_DATABASE_ID: &str = "(default)";

pub(crate) const FIRESTORE_API_HOST: &str = "https://firestore.googleapis.com";
pub(crate) const FIRESTORE_API_VERSION: &str = "v1beta1";
pub(crate) const EMULATOR_HOST_ENV: &str = "FIRESTORE_EMULATOR_HOST";

/// Wire format of timestamps: whole seconds, UTC, literal `Z`.
pub(crate) const TIMESTAMP_WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
