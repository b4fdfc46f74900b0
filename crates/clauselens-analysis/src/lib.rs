//! clauselens-analysis — Display-oriented contract model and the normalizer
//! that maps the external analysis service's loose JSON payload onto it.

pub mod model;
pub mod normalize;

pub use model::{Clause, Contract, FileType, RiskLevel};
pub use normalize::{normalize, AnalysisError};
