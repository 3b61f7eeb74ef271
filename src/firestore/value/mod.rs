mod boolean_value;
mod integer_value;
mod scalar;
mod string_value;
mod timestamp_value;
mod wire;

pub use boolean_value::BooleanValue;
pub use integer_value::IntegerValue;
pub use scalar::ScalarValue;
pub use string_value::StringValue;
pub use timestamp_value::TimestampValue;
pub use wire::WireScalar;
