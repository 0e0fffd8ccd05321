//! Background measurement polling
//!
//! Every cycle fetches each sensor's data endpoint in turn and records one
//! measurement per successful fetch. A failing sensor is logged and skipped;
//! it never stops the cycle or the loop.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::watch;

use crate::db::{DbError, Measurement, MeasurementRepo, Sensor, SensorRepo, SettingsRepo};
use crate::models::reading::readings_from_payload;
use crate::models::PollInterval;
use crate::sensor::{SensorClient, SensorError};

/// Why polling one sensor failed
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Outcome of one polling cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    pub polled: usize,
    pub recorded: usize,
    pub failed: usize,
}

/// Fetch one sensor and record its readings.
///
/// Nothing is written when the fetch fails.
pub async fn poll_sensor(
    pool: &SqlitePool,
    client: &dyn SensorClient,
    sensor: &Sensor,
) -> Result<Measurement, PollError> {
    let payload = client.fetch(&sensor.url).await?;
    let readings = readings_from_payload(&payload);
    let measurement = MeasurementRepo::new(pool).record(sensor.id, &readings).await?;
    Ok(measurement)
}

/// Poll every sensor once, sequentially.
pub async fn poll_all(pool: &SqlitePool, client: &dyn SensorClient) -> Result<PollReport, DbError> {
    let sensors = SensorRepo::new(pool).list_all().await?;
    let mut report = PollReport {
        polled: sensors.len(),
        ..PollReport::default()
    };

    for sensor in &sensors {
        match poll_sensor(pool, client, sensor).await {
            Ok(measurement) => {
                report.recorded += 1;
                let values: Vec<f64> = measurement.values.iter().map(|v| v.value).collect();
                tracing::info!(
                    sensor = %sensor.name,
                    sensor_id = sensor.id,
                    timestamp = %measurement.timestamp,
                    ?values,
                    "measurement recorded"
                );
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!(sensor = %sensor.name, sensor_id = sensor.id, error = %e, "failed to poll sensor");
            }
        }
    }

    Ok(report)
}

/// Periodic polling loop
pub struct Poller {
    pool: SqlitePool,
    client: Arc<dyn SensorClient>,
    default_interval: PollInterval,
}

impl Poller {
    pub fn new(pool: SqlitePool, client: Arc<dyn SensorClient>, default_interval: PollInterval) -> Self {
        Self {
            pool,
            client,
            default_interval,
        }
    }

    /// Run cycles until `shutdown` turns true (or its sender is dropped).
    ///
    /// The interval is read from settings after every cycle, so changes made
    /// through the settings endpoint apply from the next wait on.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(default_secs = self.default_interval.as_secs(), "poller started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            match poll_all(&self.pool, self.client.as_ref()).await {
                Ok(report) => tracing::debug!(
                    polled = report.polled,
                    recorded = report.recorded,
                    failed = report.failed,
                    "poll cycle finished"
                ),
                Err(e) => tracing::error!(error = %e, "poll cycle failed"),
            }

            let interval = match SettingsRepo::new(&self.pool).poll_interval(self.default_interval).await {
                Ok(interval) => interval,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read poll interval");
                    self.default_interval
                }
            };

            tokio::select! {
                _ = tokio::time::sleep(interval.as_duration()) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!("poller stopped");
    }
}
