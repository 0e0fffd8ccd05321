//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod name;
pub mod sensor_url;
pub mod relay;
pub mod interval;
pub mod property;
pub mod reading;

pub use validation::ValidationError;
pub use name::{EntityName, Unit};
pub use sensor_url::SensorUrl;
pub use relay::RelayState;
pub use interval::PollInterval;
pub use property::Property;
pub use reading::Reading;
