/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the dispatcher
/// can treat failures uniformly (logged detail vs generic user-facing reply).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("search provider error: {0}")]
    Provider(String),

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
