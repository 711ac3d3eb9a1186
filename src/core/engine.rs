use crate::core::checks::{check_commander_legal, check_deck_size, check_eligibility, check_singleton};
use crate::core::color_identity::{check_card_legality, check_color_identity, not_checked, resolve_tally};
use crate::core::parser::parse_decklist;
use crate::core::report::{assemble, CoreVerdicts, PerCardVerdicts};
use crate::domain::model::{ColorIdentityMode, RuleCategory, ValidationReport};
use crate::domain::ports::{CardResolver, ConfigProvider};
use crate::utils::error::{AssistError, Result};
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_MAX_CONCURRENT_RESOLUTIONS: usize = 8;
pub const MAX_CONCURRENT_RESOLUTIONS_LIMIT: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub color_identity: ColorIdentityMode,
    pub max_concurrent_resolutions: usize,
    pub deadline: Option<Duration>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            color_identity: ColorIdentityMode::Full,
            max_concurrent_resolutions: DEFAULT_MAX_CONCURRENT_RESOLUTIONS,
            deadline: None,
        }
    }
}

impl ValidationOptions {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            color_identity: config.color_identity_mode(),
            max_concurrent_resolutions: config.max_concurrent_resolutions(),
            deadline: config.deadline(),
        }
    }
}

/// Commander deck validation over an abstract card resolver.
///
/// Each call owns its tally, verdicts and report; nothing is shared between calls.
pub struct DeckValidator<R: CardResolver> {
    resolver: R,
    options: ValidationOptions,
}

impl<R: CardResolver> DeckValidator<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_options(resolver, ValidationOptions::default())
    }

    pub fn with_options(resolver: R, options: ValidationOptions) -> Self {
        Self { resolver, options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub async fn validate_deck(
        &self,
        commander_name: &str,
        raw_decklist: &str,
    ) -> Result<ValidationReport> {
        self.validate_deck_until(commander_name, raw_decklist, std::future::pending())
            .await
    }

    /// Like `validate_deck`, but gives up with `AssistError::Cancelled` as soon as `cancel`
    /// completes. In-flight resolutions are dropped; no partial report is returned.
    pub async fn validate_deck_until<F>(
        &self,
        commander_name: &str,
        raw_decklist: &str,
        cancel: F,
    ) -> Result<ValidationReport>
    where
        F: Future<Output = ()>,
    {
        let run = async {
            match self.options.deadline {
                Some(deadline) => {
                    match tokio::time::timeout(deadline, self.run(commander_name, raw_decklist)).await {
                        Ok(result) => result,
                        Err(_) => {
                            tracing::warn!("Validation exceeded its {:?} deadline", deadline);
                            Err(AssistError::DeadlineExceeded { deadline })
                        }
                    }
                }
                None => self.run(commander_name, raw_decklist).await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel => {
                tracing::info!("Validation of '{}' cancelled", commander_name);
                Err(AssistError::Cancelled)
            }
            result = run => result,
        }
    }

    #[tracing::instrument(skip_all, fields(commander = %commander_name))]
    async fn run(&self, commander_name: &str, raw_decklist: &str) -> Result<ValidationReport> {
        let commander_name = commander_name.trim();
        if commander_name.is_empty() {
            return Err(AssistError::input("Commander name is required"));
        }

        let decklist = parse_decklist(raw_decklist)?;
        let tally = decklist.tally();
        tracing::info!(
            "Validating {} entries ({} distinct) for commander '{}'",
            decklist.len(),
            tally.distinct(),
            commander_name
        );

        // 指揮官解析失敗即整體失敗
        let commander = self.resolver.resolve(commander_name).await?;
        tracing::debug!(
            "Commander resolved: {} [{}]",
            commander.name,
            commander.color_identity.describe()
        );

        let core = CoreVerdicts {
            legality: check_commander_legal(&commander),
            eligibility: check_eligibility(&commander),
            deck_size: check_deck_size(tally.total()),
            singleton: check_singleton(&tally),
        };

        let per_card = match self.options.color_identity {
            ColorIdentityMode::Full => {
                let resolutions =
                    resolve_tally(&self.resolver, &tally, self.options.max_concurrent_resolutions)
                        .await?;
                PerCardVerdicts {
                    color_identity: check_color_identity(&commander.color_identity, &resolutions),
                    card_legality: check_card_legality(&resolutions),
                }
            }
            ColorIdentityMode::Skip => {
                tracing::info!("Per-card resolution disabled, color identity not checked");
                PerCardVerdicts {
                    color_identity: not_checked(RuleCategory::ColorIdentity),
                    card_legality: not_checked(RuleCategory::CardLegality),
                }
            }
        };

        let report = assemble(&commander, core, Some(per_card));
        tracing::info!(
            "Validation finished for '{}': {}",
            report.commander_name(),
            if report.is_valid() { "valid" } else { "invalid" }
        );

        Ok(report)
    }
}
