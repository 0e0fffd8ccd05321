//! `homectl config` - inspect and create the config file

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::HomectlConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Show config file path
    Path,
    /// Write a config file with default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,

    /// Write to this path instead of ~/.homectl/config.toml
    #[arg(long)]
    pub path: Option<PathBuf>,
}

pub fn run_config(args: ConfigArgs, config: &HomectlConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", HomectlConfig::config_path().display());
            Ok(())
        }
        ConfigCommands::Init(args) => run_init(args),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = args.path.unwrap_or_else(HomectlConfig::config_path);

    if config_path.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {}\n\nUse --force to overwrite",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(&config_path, HomectlConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    println!("Created config at: {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        run_init(InitArgs {
            force: false,
            path: Some(path.clone()),
        })
        .unwrap();
        assert!(HomectlConfig::from_file(&path).is_ok());

        let err = run_init(InitArgs {
            force: false,
            path: Some(path.clone()),
        })
        .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        run_init(InitArgs {
            force: true,
            path: Some(path),
        })
        .unwrap();
    }
}
