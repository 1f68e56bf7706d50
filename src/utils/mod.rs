pub mod fs;
pub mod telemetry;
