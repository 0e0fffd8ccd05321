//! homectl-server: home monitoring and control over HTTP
//!
//! Keeps a tree of homes, rooms and sensors in SQLite, polls every sensor's
//! data endpoint on an interval, stores the readings as measurements and
//! switches relay-equipped sensors on request.

pub mod db;
pub mod http;
pub mod models;
pub mod poller;
pub mod sensor;

#[cfg(test)]
pub(crate) mod testing;

pub use db::{create_memory_pool, create_pool, DbError};
pub use http::{run_server, ServerConfig, ServerError};
pub use poller::{poll_all, poll_sensor, PollError, PollReport, Poller};
pub use sensor::{HttpSensorClient, SensorClient, SensorError};
