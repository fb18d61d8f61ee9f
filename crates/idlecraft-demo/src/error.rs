use std::path::PathBuf;

/// Errors raised by the headless runner.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Neither the requested directory nor the built-in content loaded.
    #[error("data load error in {dir}: {source}")]
    DataLoad {
        dir: PathBuf,
        source: idlecraft_data::DataLoadError,
    },

    /// A command-line value the engine cannot run with.
    #[error("invalid --{name}: {detail}")]
    InvalidArgument { name: &'static str, detail: String },

    /// The run report could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
