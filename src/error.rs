use std::path::PathBuf;

/// A matched line whose captured numbers could not be converted.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid {field} value {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line_number}: malformed trade")]
    Extract {
        line_number: usize,
        #[source]
        source: ExtractError,
    },

    #[error("failed to write {}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to render chart to {}", path.display())]
    Chart {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("terminal error")]
    Terminal(#[from] std::io::Error),
}
