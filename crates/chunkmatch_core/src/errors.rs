use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("chunk length must be nonzero")]
    BadChunkLen,

    #[error("modulus {0} out of range")]
    BadModulus(u64),

    #[error("filter needs at least one bit")]
    BadFilterSize,
}

pub type Result<T> = std::result::Result<T, MatchError>;
