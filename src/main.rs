//! Binary entry point: resolve configuration, bring up logging and the SQLite
//! store, load the songbook on first launch, then drive the Ratatui event loop
//! until the user exits.
use anyhow::Context;
use clap::Parser;
use rusqlite::Connection;
use songbook::playback::default_engine;
use songbook::{
    import_file_if_needed, logging, open_store, run_app, seed_sample_songs, App, Args, Config,
    ResourceBundle,
};
use tracing::{error, info};

/// Store initialization problems are fatal and bubble up to the terminal;
/// load problems are logged and the app starts with whatever the store holds.
fn main() -> anyhow::Result<()> {
    let config = Config::resolve(Args::parse())?;
    logging::init(&config.log_path)?;
    info!(
        db = %config.db_path.display(),
        resources = %config.resource_dir.display(),
        "starting songbook"
    );

    let mut conn = open_store(&config.db_path).context("failed to initialize the song store")?;
    load_songs(&mut conn, &config);

    let bundle = ResourceBundle::new(&config.resource_dir);
    let mut app = App::new(conn, bundle, default_engine())?;
    run_app(&mut app)
}

/// Fill an empty store from the sample set or the CSV source.
fn load_songs(conn: &mut Connection, config: &Config) {
    if config.sample_data {
        if let Err(err) = seed_sample_songs(conn) {
            error!(error = %format!("{err:#}"), "seeding sample songs failed");
        }
    } else if config.import {
        match import_file_if_needed(conn, &config.csv_path) {
            Ok(report) if report.already_loaded => {}
            Ok(report) => info!(
                songs = report.songs,
                skipped = report.skipped,
                "imported {}",
                config.csv_path.display()
            ),
            Err(err) => error!(
                error = %err,
                path = %config.csv_path.display(),
                "CSV import failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use songbook::db::{count_songs, open_in_memory};

    use super::*;

    fn config(dir: &std::path::Path, sample_data: bool) -> Config {
        Config {
            db_path: dir.join("songbook.sqlite"),
            resource_dir: dir.to_path_buf(),
            csv_path: dir.join("songs.csv"),
            log_path: dir.join("songbook.log"),
            sample_data,
            import: true,
        }
    }

    #[test]
    fn load_failures_do_not_stop_startup() {
        let dir = tempfile::tempdir().unwrap();

        // No schema, so seeding fails on its first query.
        let mut bare = Connection::open_in_memory().unwrap();
        load_songs(&mut bare, &config(dir.path(), true));

        // No songs.csv in the resource directory.
        let mut conn = open_in_memory().unwrap();
        load_songs(&mut conn, &config(dir.path(), false));
        assert_eq!(count_songs(&conn).unwrap(), 0);

        load_songs(&mut conn, &config(dir.path(), true));
        assert_eq!(count_songs(&conn).unwrap(), 10);
    }
}
