pub mod consts;
pub mod errors;
pub mod modulus;
pub mod bits;
pub mod bloom;
pub mod rolling;
pub mod matcher;
pub mod text;

pub use bloom::Bloom;
pub use errors::{MatchError, Result};
pub use matcher::{
    batch_match, match_documents, naive_contains, rolling_contains, BatchOutcome, MatchConfig,
    MatchMode, MatchReport,
};
pub use modulus::Modulus;
pub use rolling::WindowHasher;
pub use text::normalize;
