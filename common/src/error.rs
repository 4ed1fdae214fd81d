use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("Unsupported mode {0}, expected one of: mean, median, total")]
    UnknownMode(String),
    #[error("Record {name} is missing field {field}")]
    MissingField { field: &'static str, name: String },
    #[error("Unsupported label rotation {0}, expected one of: 0, 90, 180, 270")]
    UnsupportedRotation(u16),
}
