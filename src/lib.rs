//! Query and prediction service over species occurrence records.
//!
//! A static occurrence table is loaded once into an immutable [`occurrence::Dataset`].
//! The [`query`] module answers species listings, record windows, environment
//! statistics and nearest-point lookups over it. The [`model`] and [`predict`] modules
//! resolve per-species classifiers from disk and score environmental feature vectors.
//! Everything is reached through the [`api::API`] context, which the HTTP
//! [`server`] and the interactive [`cli`] share.
#![allow(dead_code)]

pub mod api;
pub mod error;
pub mod model;
pub mod occurrence;
pub mod predict;
pub mod query;

#[cfg(feature = "server")]
pub mod cli;
#[cfg(feature = "server")]
pub mod server;

pub use error::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Latitude, longitude, and planar distances between them.
pub type Degrees = f64;
/// Environmental covariates: sea-surface temperature, salinity, depth.
pub type Measure = f64;
/// Positive-class probability produced by a classifier.
pub type Probability = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// SOURCE TABLE COLUMNS
// ============================================================================
pub const COLUMN_NAME: &str = "scientificName";
pub const COLUMN_DATE: &str = "eventDate";
pub const COLUMN_LAT: &str = "decimalLatitude";
pub const COLUMN_LON: &str = "decimalLongitude";
pub const COLUMN_SST: &str = "sst";
pub const COLUMN_SSS: &str = "sss";
pub const COLUMN_DEPTH: &str = "depth";

// ============================================================================
// QUERY PARAMETERS
// ============================================================================
/// Default number of records returned for a species.
pub const RECORD_LIMIT: usize = 500;

// ============================================================================
// MODEL ARTIFACTS
// ============================================================================
/// Suffix appended to the underscored species name to locate its model.
pub const MODEL_SUFFIX: &str = "_rf.json";
/// Shared fallback model used when no species-specific file exists.
pub const MODEL_GENERIC: &str = const_format::concatcp!("generic", MODEL_SUFFIX);
/// Placeholder for a missing feature. Models were trained with the same value,
/// so it must stay out of the range of real sst, sss and depth readings.
pub const MISSING_FEATURE: Measure = -999.0;
/// Feature order every model artifact is trained against.
pub const FEATURES: [&str; 3] = [COLUMN_SST, COLUMN_SSS, COLUMN_DEPTH];

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}

/// Register Ctrl+C handler for immediate termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
