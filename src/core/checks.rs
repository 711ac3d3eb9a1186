// 只需解析指揮官即可完成的規則檢查

use crate::domain::model::{CardNameTally, Legality, ResolvedCard, RuleCategory, ValidationVerdict};

/// Basic lands exempt from the singleton rule (lower-case). Snow-covered basics are not.
pub const BASIC_LANDS: [&str; 6] = ["plains", "island", "swamp", "mountain", "forest", "wastes"];

pub const REQUIRED_DECK_SIZE: usize = 99;

pub fn is_basic_land(name: &str) -> bool {
    BASIC_LANDS.contains(&name.trim().to_lowercase().as_str())
}

/// Every non-basic name must appear at most once. Offenders are listed in name order.
pub fn check_singleton(tally: &CardNameTally) -> ValidationVerdict {
    let duplicates: Vec<String> = tally
        .iter()
        .filter(|(name, count)| *count > 1 && !is_basic_land(name))
        .map(|(name, count)| format!("{} (x{})", name, count))
        .collect();

    if duplicates.is_empty() {
        ValidationVerdict::pass(RuleCategory::SingletonRule, "No duplicates")
    } else {
        ValidationVerdict::fail(
            RuleCategory::SingletonRule,
            format!("Found {} duplicated card(s)", duplicates.len()),
            duplicates,
        )
    }
}

/// Substring heuristic: legendary type line, or oracle text saying it can be your commander.
pub fn check_eligibility(commander: &ResolvedCard) -> ValidationVerdict {
    let is_legendary = commander.type_line.to_lowercase().contains("legendary");
    let has_commander_text = commander
        .oracle_text
        .to_lowercase()
        .contains("can be your commander");

    if is_legendary {
        ValidationVerdict::pass(
            RuleCategory::CommanderEligibility,
            format!("{} is legendary", commander.name),
        )
    } else if has_commander_text {
        ValidationVerdict::pass(
            RuleCategory::CommanderEligibility,
            format!("{} can be your commander", commander.name),
        )
    } else {
        ValidationVerdict::fail(
            RuleCategory::CommanderEligibility,
            format!(
                "{} cannot be a commander (must be legendary or have text allowing it)",
                commander.name
            ),
            vec![commander.name.clone()],
        )
    }
}

pub fn check_commander_legal(commander: &ResolvedCard) -> ValidationVerdict {
    match commander.commander_legality() {
        Legality::Legal => ValidationVerdict::pass(
            RuleCategory::CommanderLegality,
            format!("{} is legal in Commander", commander.name),
        ),
        Legality::Banned => ValidationVerdict::fail(
            RuleCategory::CommanderLegality,
            format!("{} is banned in Commander format", commander.name),
            vec![commander.name.clone()],
        ),
        other => ValidationVerdict::fail(
            RuleCategory::CommanderLegality,
            format!(
                "{} is not legal in Commander format (status: {})",
                commander.name, other
            ),
            vec![commander.name.clone()],
        ),
    }
}

/// `count` is the number of decklist entries; 100 passes with a note since the list may
/// include the commander itself.
pub fn check_deck_size(count: usize) -> ValidationVerdict {
    match count {
        REQUIRED_DECK_SIZE => ValidationVerdict::pass(
            RuleCategory::DeckSize,
            format!("{} cards", count),
        ),
        100 => ValidationVerdict::pass(
            RuleCategory::DeckSize,
            "100 cards (Note: 100 cards including commander, should be 99 in decklist)",
        ),
        _ => ValidationVerdict::fail(
            RuleCategory::DeckSize,
            format!("{} cards (should be 99 cards plus commander)", count),
            Vec::new(),
        ),
    }
}
