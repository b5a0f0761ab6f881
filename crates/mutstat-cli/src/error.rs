use std::path::PathBuf;

use thiserror::Error;

use mutstat_core::codec::CodecError;

use crate::report::ReportError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: ReportError,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error(transparent)]
    Output(#[from] CodecError),
}
