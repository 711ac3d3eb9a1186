// 逐卡檢查: 限流解析每張牌, 再產生色彩識別與卡牌合法性判定

use crate::domain::model::{
    CardNameTally, Color, ColorIdentity, Legality, ResolvedCard, RuleCategory, ValidationVerdict,
};
use crate::core::engine::MAX_CONCURRENT_RESOLUTIONS_LIMIT;
use crate::domain::ports::CardResolver;
use crate::utils::error::{AssistError, Result};
use tokio::sync::Semaphore;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ResolvedCard),
    Unresolved,
}

/// Resolution outcome for each tally name, in tally (name) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardResolutions {
    entries: Vec<(String, Resolution)>,
}

impl CardResolutions {
    pub fn entries(&self) -> &[(String, Resolution)] {
        &self.entries
    }

    pub fn resolved(&self) -> impl Iterator<Item = &ResolvedCard> {
        self.entries.iter().filter_map(|(_, r)| match r {
            Resolution::Resolved(card) => Some(card),
            Resolution::Unresolved => None,
        })
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(name, r)| match r {
            Resolution::Unresolved => Some(name.as_str()),
            Resolution::Resolved(_) => None,
        })
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved().count()
    }
}

impl FromIterator<(String, Resolution)> for CardResolutions {
    fn from_iter<I: IntoIterator<Item = (String, Resolution)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Resolve every distinct name with at most `max_concurrent` lookups in flight.
///
/// A name that is not found is recorded as unresolved. Any other failure does not cancel
/// the remaining lookups; once all have settled the first such error in tally order is
/// returned.
pub async fn resolve_tally<R>(
    resolver: &R,
    tally: &CardNameTally,
    max_concurrent: usize,
) -> Result<CardResolutions>
where
    R: CardResolver + ?Sized,
{
    // 上限同設定檔範圍, 避免超過 Semaphore::MAX_PERMITS
    let semaphore = Semaphore::new(max_concurrent.clamp(1, MAX_CONCURRENT_RESOLUTIONS_LIMIT));

    let tasks = tally.names().map(|name| {
        let semaphore = &semaphore;
        async move {
            let result = match semaphore.acquire().await {
                Ok(_permit) => resolver.resolve(name).await,
                Err(e) => Err(AssistError::transient("resolver pool", e.to_string())),
            };
            (name, result)
        }
    });

    // join_all 保持輸入順序，完成順序不影響結果
    let results = futures::future::join_all(tasks).await;

    let mut entries = Vec::with_capacity(results.len());
    let mut first_error = None;

    for (name, result) in results {
        match result {
            Ok(card) => {
                tracing::debug!("Resolved '{}' as '{}'", name, card.name);
                entries.push((name.to_string(), Resolution::Resolved(card)));
            }
            Err(AssistError::CardNotFound { .. }) => {
                tracing::warn!("Decklist card '{}' could not be resolved", name);
                entries.push((name.to_string(), Resolution::Unresolved));
            }
            Err(e) => {
                tracing::warn!("Resolving '{}' failed: {}", name, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(entries.into_iter().collect()),
    }
}

fn describe_colors(colors: &[Color]) -> String {
    colors.iter().map(|c| c.symbol()).collect()
}

/// Every resolved card's identity must be a subset of the commander's.
pub fn check_color_identity(
    commander_identity: &ColorIdentity,
    resolutions: &CardResolutions,
) -> ValidationVerdict {
    let mut offending = Vec::new();
    let mut violations = 0;

    for (name, resolution) in resolutions.entries() {
        match resolution {
            Resolution::Resolved(card) => {
                let outside = card.color_identity.outside_of(commander_identity);
                if !outside.is_empty() {
                    violations += 1;
                    offending.push(format!("{} ({})", card.name, describe_colors(&outside)));
                }
            }
            Resolution::Unresolved => offending.push(format!("{} (unresolved)", name)),
        }
    }

    let unresolved = resolutions.unresolved_count();
    let identity = commander_identity.describe();

    if unresolved > 0 {
        return ValidationVerdict::fail(
            RuleCategory::ColorIdentity,
            format!(
                "Color identity check incomplete: {} card(s) could not be resolved, {} card(s) outside {}",
                unresolved, violations, identity
            ),
            offending,
        );
    }

    if violations > 0 {
        ValidationVerdict::fail(
            RuleCategory::ColorIdentity,
            format!(
                "{} card(s) outside the commander's color identity ({})",
                violations, identity
            ),
            offending,
        )
    } else {
        ValidationVerdict::pass(
            RuleCategory::ColorIdentity,
            format!(
                "All {} distinct cards are within the commander's color identity ({})",
                resolutions.entries().len(),
                identity
            ),
        )
    }
}

/// Every resolved card must be legal in Commander.
pub fn check_card_legality(resolutions: &CardResolutions) -> ValidationVerdict {
    let mut offending = Vec::new();
    let mut illegal = 0;

    for (name, resolution) in resolutions.entries() {
        match resolution {
            Resolution::Resolved(card) => match card.commander_legality() {
                Legality::Legal => {}
                status => {
                    illegal += 1;
                    offending.push(format!("{} ({})", card.name, status));
                }
            },
            Resolution::Unresolved => offending.push(format!("{} (unresolved)", name)),
        }
    }

    let unresolved = resolutions.unresolved_count();

    if unresolved > 0 {
        ValidationVerdict::fail(
            RuleCategory::CardLegality,
            format!(
                "Card legality check incomplete: {} card(s) could not be resolved, {} card(s) not legal",
                unresolved, illegal
            ),
            offending,
        )
    } else if illegal > 0 {
        ValidationVerdict::fail(
            RuleCategory::CardLegality,
            format!("{} card(s) are banned or not legal in Commander", illegal),
            offending,
        )
    } else {
        ValidationVerdict::pass(
            RuleCategory::CardLegality,
            format!(
                "All {} distinct cards are legal in Commander",
                resolutions.entries().len()
            ),
        )
    }
}

/// Verdict for a per-card rule when resolution is disabled. Never passes.
pub fn not_checked(rule: RuleCategory) -> ValidationVerdict {
    ValidationVerdict::fail(
        rule,
        "Not fully checked: per-card resolution is disabled, each card must be verified individually",
        Vec::new(),
    )
}
