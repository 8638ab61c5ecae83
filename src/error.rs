use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported operation: {0} is not provided by this variant")]
    UnsupportedOperation(&'static str),

    #[error("Episode is done at tick {tick}, call reset() before stepping again")]
    PostTerminalStep { tick: usize },

    #[error("Episode not started, call reset() before step()")]
    EpisodeNotStarted,

    #[error("Invalid action: {0}")]
    InvalidAction(i64),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Failed to read price frame: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode price frame: {0}")]
    Decode(#[from] postcard::Error),

    #[error("Render error: {0}")]
    Render(String),
}

pub type EnvResult<T> = Result<T, EnvError>;
