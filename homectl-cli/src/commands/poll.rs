//! One-shot polling: fetch every sensor (or one) once and exit

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use homectl_server::db::SensorRepo;
use homectl_server::{poll_all, poll_sensor};

use super::{open_database, sensor_client};
use crate::config::HomectlConfig;

/// Arguments for the poll command
#[derive(Parser, Debug)]
pub struct PollArgs {
    /// Only poll this sensor id
    #[arg(long, short)]
    pub sensor: Option<i64>,

    /// SQLite database file (default: ~/.homectl/homectl.db)
    #[arg(long, env = "HOMECTL_DATABASE")]
    pub database: Option<PathBuf>,
}

pub async fn run_poll(args: PollArgs, mut config: HomectlConfig) -> Result<()> {
    if let Some(database) = args.database {
        config.database = database;
    }

    let pool = open_database(&config.database).await?;
    let client = sensor_client(&config)?;

    match args.sensor {
        Some(id) => {
            let sensor = SensorRepo::new(&pool)
                .get(id)
                .await
                .with_context(|| format!("Sensor {id} not found"))?;
            let measurement = poll_sensor(&pool, &client, &sensor)
                .await
                .with_context(|| format!("Failed to poll sensor '{}'", sensor.name))?;

            println!("{} @ {}", sensor.name, measurement.timestamp.format("%Y-%m-%d %H:%M:%S"));
            for value in &measurement.values {
                println!("  {:<20} {} {}", value.name, value.value, value.unit);
            }
        }
        None => {
            let report = poll_all(&pool, &client).await.context("Polling failed")?;
            println!(
                "Polled {} sensors: {} recorded, {} failed",
                report.polled, report.recorded, report.failed
            );
            if report.failed > 0 {
                anyhow::bail!("{} of {} sensors failed", report.failed, report.polled);
            }
        }
    }

    pool.close().await;
    Ok(())
}
