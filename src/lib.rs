//! Star-schema warehouse provisioning and ELT for song-play event logs.
//!
//! Raw JSON event logs and song metadata sit in S3. The pipeline
//! bulk-copies them into two staging tables, then derives one fact table
//! and four dimension tables from them with set-based SQL.
//!
//! ## Stages
//!
//! - [`pipeline::reset`] — drops and recreates every table
//! - [`pipeline::load_staging_tables`] — `COPY` from S3 into staging
//! - [`pipeline::insert_tables`] — staging → fact and dimensions
//! - [`check::Check`] — read-only invariant report after a load
//!
//! Every stage is a fixed, ordered list of [`Statement`]s executed one at
//! a time against a [`Warehouse`], committing after each.
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod queries;
pub mod tables;
pub mod warehouse;

pub use config::Config;
pub use error::Error;
pub use queries::Statement;
pub use queries::Verb;
pub use warehouse::Warehouse;

// ============================================================================
// TABLE NAMES
// ============================================================================
/// Staging table mirroring the raw JSON play-event logs.
#[rustfmt::skip]
pub const STAGING_EVENTS: &str = "staging_events";
/// Staging table mirroring the raw JSON song metadata.
#[rustfmt::skip]
pub const STAGING_SONGS:  &str = "staging_songs";
/// Fact table, one row per admitted play event.
#[rustfmt::skip]
pub const SONGPLAYS:      &str = "songplays";
/// Dimension table of listeners.
#[rustfmt::skip]
pub const USERS:          &str = "users";
/// Dimension table of catalogued songs.
#[rustfmt::skip]
pub const SONGS:          &str = "songs";
/// Dimension table of catalogued artists.
#[rustfmt::skip]
pub const ARTISTS:        &str = "artists";
/// Dimension table of play timestamps broken into calendar fields.
#[rustfmt::skip]
pub const TIME:           &str = "time";

// ============================================================================
// WAREHOUSE CONSTANTS
// ============================================================================
/// Page value marking a song actually being played.
pub const NEXT_SONG: &str = "NextSong";
/// Region of the source buckets when the config does not name one.
pub const DEFAULT_REGION: &str = "us-west-2";
/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "dwh.toml";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// INFO goes to stderr so that `--dry-run` output on stdout stays a clean
/// script. With `persist`, DEBUG also goes to a file under `logs/`; a dry
/// run passes `false` and leaves no directory behind.
pub fn log(persist: bool) -> std::io::Result<()> {
    let dir = persist.then(|| std::path::Path::new("logs"));
    simplelog::CombinedLogger::init(loggers(dir)?)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::AlreadyExists, e))
}

fn loggers(dir: Option<&std::path::Path>) -> std::io::Result<Vec<Box<dyn simplelog::SharedLogger>>> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let mut sinks: Vec<Box<dyn simplelog::SharedLogger>> = vec![simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )];
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
        let time = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        sinks.push(simplelog::WriteLogger::new(
            log::LevelFilter::Debug,
            config,
            std::fs::File::create(dir.join(format!("{}.log", time)))?,
        ));
    }
    Ok(sinks)
}
