pub mod checks;
pub mod color_identity;
pub mod engine;
pub mod parser;
pub mod report;

pub use crate::domain::model::{
    CardNameTally, ColorIdentityMode, NormalizedDecklist, ResolvedCard, ValidationReport,
    ValidationVerdict,
};
pub use crate::domain::ports::{CardResolver, ConfigProvider};
pub use crate::utils::error::Result;
