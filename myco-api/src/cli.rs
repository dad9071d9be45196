//! Command-line arguments
//!
//! Each flag can also come from its `MYCO_*` environment variable; anything
//! left unset falls through to the TOML file and then compiled defaults.

use clap::Parser;
use myco_common::config::Overrides;
use std::path::PathBuf;

/// Command-line arguments for myco-api
#[derive(Parser, Debug)]
#[command(name = "myco-api")]
#[command(about = "Mushroom catalog and sighting report service")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "MYCO_PORT")]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long, env = "MYCO_HOST")]
    pub host: Option<String>,

    /// SQLite database file
    #[arg(short, long, env = "MYCO_DATABASE")]
    pub database: Option<PathBuf>,

    /// TOML bootstrap file (default: <config dir>/mycolog/config.toml)
    #[arg(short, long, env = "MYCO_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON data set that replaces both collections at startup
    #[arg(long, env = "MYCO_SEED")]
    pub seed: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MYCO_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            database_path: self.database.clone(),
            host: self.host.clone(),
            port: self.port,
            seed_file: self.seed.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        for var in [
            "MYCO_PORT",
            "MYCO_HOST",
            "MYCO_DATABASE",
            "MYCO_CONFIG",
            "MYCO_SEED",
            "MYCO_LOG_LEVEL",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_no_flags_means_no_overrides() {
        clear_env();
        let args = Args::parse_from(["myco-api"]);
        let overrides = args.overrides();

        assert!(overrides.port.is_none());
        assert!(overrides.database_path.is_none());
        assert!(overrides.seed_file.is_none());
    }

    #[test]
    #[serial]
    fn test_flags_become_overrides() {
        clear_env();
        let args = Args::parse_from([
            "myco-api",
            "--port",
            "7100",
            "--database",
            "/tmp/myco.db",
            "--seed",
            "data/test-data.json",
        ]);
        let overrides = args.overrides();

        assert_eq!(overrides.port, Some(7100));
        assert_eq!(overrides.database_path, Some(PathBuf::from("/tmp/myco.db")));
        assert_eq!(overrides.seed_file, Some(PathBuf::from("data/test-data.json")));
    }

    #[test]
    #[serial]
    fn test_environment_supplies_missing_flags() {
        clear_env();
        env::set_var("MYCO_PORT", "7200");
        env::set_var("MYCO_HOST", "0.0.0.0");

        let args = Args::parse_from(["myco-api", "--host", "127.0.0.2"]);
        clear_env();

        assert_eq!(args.port, Some(7200));
        assert_eq!(args.host.as_deref(), Some("127.0.0.2"));
    }
}
