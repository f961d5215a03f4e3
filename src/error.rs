use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::Column;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("plot {axis} axis must be a numeric column, got '{column}'")]
    NonNumericAxis { axis: &'static str, column: Column },

    #[error("selected attribute must be a numeric column, got '{0}'")]
    NonNumericAttribute(Column),

    #[error("{name} must be within {min}..={max}, got {value}")]
    BinCountOutOfRange {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("max marker size must be a positive finite number, got {0}")]
    MarkerSize(f32),
}

// ---------------------------------------------------------------------------
// Data errors (a single row that does not fit the penguin schema)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    #[error("unknown island '{0}'")]
    UnknownIsland(String),

    #[error("unknown sex '{0}'")]
    UnknownSex(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}
