//! Progress reporting while the configuration tool runs

pub mod reporter;
