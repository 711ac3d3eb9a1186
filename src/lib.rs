pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::ScryfallResolver;
pub use crate::config::TomlConfig;
pub use crate::core::engine::{DeckValidator, ValidationOptions};
pub use crate::domain::model::{
    Color, ColorIdentity, ColorIdentityMode, Legality, ResolvedCard, RuleCategory,
    ValidationReport, ValidationVerdict,
};
pub use crate::domain::ports::{CardResolver, ConfigProvider};
pub use crate::utils::error::{AssistError, Result};
