use civic_stats_analytics::AnalyticsError;
use civic_stats_datasets::DatasetError;
use civic_stats_geography::GeoError;

/// Errors surfaced by the `civic_stats` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A command needs a dataset whose path is not configured.
    #[error("Dataset path '{key}' is not configured (set it under [datasets])")]
    MissingDataset { key: &'static str },

    /// A location could not be decoded and malformed rows are not skipped.
    #[error("Row {row}: {source}")]
    MalformedRow {
        row: usize,
        #[source]
        source: GeoError,
    },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
