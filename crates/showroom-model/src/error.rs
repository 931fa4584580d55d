use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown fuel type: {0}")]
    UnknownFuelType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
