use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    #[error("Hero not found: {0}")]
    HeroNotFound(u32),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Cannot compare more than {max} heroes (got {got})")]
    TooManyHeroes { max: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<calamine::Error> for Error {
    fn from(e: calamine::Error) -> Self {
        Error::Sheet(e.to_string())
    }
}
