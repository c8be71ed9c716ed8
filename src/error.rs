#[derive(Debug, thiserror::Error)]
pub enum TheoryError {
    #[error("tuning system cardinality must be positive, got {0}")]
    InvalidCardinality(i64),
    #[error("no complexity weight for canonical interval {interval}")]
    MissingWeight { interval: i64 },
    #[error("{0} is not supported")]
    Unsupported(&'static str),
    #[error("malformed grid shorthand: {0}")]
    Shorthand(String),
}
