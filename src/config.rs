//! Command line and environment configuration.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::ProjectDirs;

use crate::resources::SONGS_CSV;

/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "songbook.sqlite";
const LOG_FILE_NAME: &str = "songbook.log";
const DEFAULT_RESOURCE_DIR: &str = "resources";

#[derive(Parser, Debug, Default)]
#[command(name = "songbook")]
#[command(about = "Browse the songbook, open song sheets and play accompaniments")]
#[command(version)]
pub struct Args {
    /// SQLite database file
    #[arg(long, env = "SONGBOOK_DB")]
    pub db: Option<PathBuf>,

    /// Directory holding <name>.mp3, <name>.pdf and songs.csv
    #[arg(short, long, env = "SONGBOOK_RESOURCES")]
    pub resources: Option<PathBuf>,

    /// CSV file imported on first launch (defaults to songs.csv in the resource directory)
    #[arg(long, env = "SONGBOOK_CSV")]
    pub csv: Option<PathBuf>,

    /// Log file; the terminal belongs to the UI
    #[arg(long, env = "SONGBOOK_LOG")]
    pub log_file: Option<PathBuf>,

    /// Seed ten placeholder songs into an empty store instead of importing
    #[arg(long)]
    pub sample_data: bool,

    /// Skip the first-launch CSV import
    #[arg(long)]
    pub no_import: bool,
}

/// Fully resolved settings consumed by `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub resource_dir: PathBuf,
    pub csv_path: PathBuf,
    pub log_path: PathBuf,
    pub sample_data: bool,
    pub import: bool,
}

impl Config {
    /// Fill unset arguments with defaults under the platform data directory.
    pub fn resolve(args: Args) -> Result<Self> {
        let needs_data_dir = args.db.is_none() || args.log_file.is_none();
        let data_dir = if needs_data_dir {
            ProjectDirs::from("org", "songbook", "songbook")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| anyhow!("could not locate a data directory; pass --db and --log-file"))?
        } else {
            PathBuf::new()
        };

        Ok(Self::with_data_dir(args, data_dir))
    }

    fn with_data_dir(args: Args, data_dir: PathBuf) -> Self {
        let resource_dir = args
            .resources
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCE_DIR));
        let csv_path = args.csv.unwrap_or_else(|| resource_dir.join(SONGS_CSV));

        Self {
            db_path: args.db.unwrap_or_else(|| data_dir.join(DB_FILE_NAME)),
            log_path: args.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE_NAME)),
            resource_dir,
            csv_path,
            sample_data: args.sample_data,
            import: !args.no_import,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_defaults_to_the_resource_directory() {
        let args = Args {
            resources: Some("/srv/hymns".into()),
            no_import: true,
            ..Args::default()
        };
        let config = Config::with_data_dir(args, PathBuf::from("/data"));

        assert_eq!(config.csv_path, PathBuf::from("/srv/hymns/songs.csv"));
        assert_eq!(config.db_path, PathBuf::from("/data/songbook.sqlite"));
        assert_eq!(config.log_path, PathBuf::from("/data/songbook.log"));
        assert!(!config.import);
        assert!(!config.sample_data);
    }

    #[test]
    fn explicit_paths_win() {
        let args = Args {
            db: Some("db.sqlite".into()),
            csv: Some("other.csv".into()),
            log_file: Some("log.txt".into()),
            ..Args::default()
        };
        let config = Config::resolve(args).unwrap();

        assert_eq!(config.db_path, PathBuf::from("db.sqlite"));
        assert_eq!(config.csv_path, PathBuf::from("other.csv"));
        assert_eq!(config.resource_dir, PathBuf::from("resources"));
        assert!(config.import);
    }
}
