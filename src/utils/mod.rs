pub mod logging;
pub mod serialization;
