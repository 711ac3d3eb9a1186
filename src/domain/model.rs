use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Mana color symbol, ordered W, U, B, R, G.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub fn symbol(self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Blue => "U",
            Color::Black => "B",
            Color::Red => "R",
            Color::Green => "G",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A card's color identity. Empty means colorless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorIdentity(BTreeSet<Color>);

impl ColorIdentity {
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self(colors.into_iter().collect())
    }

    pub fn colorless() -> Self {
        Self::default()
    }

    pub fn is_colorless(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.0.contains(&color)
    }

    pub fn is_within(&self, other: &ColorIdentity) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Colors present here but missing from `allowed`, in WUBRG order.
    pub fn outside_of(&self, allowed: &ColorIdentity) -> Vec<Color> {
        self.0.difference(&allowed.0).copied().collect()
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.0.iter().copied()
    }

    /// Comma-separated symbols, e.g. "W, U, B, G", or "Colorless".
    pub fn describe(&self) -> String {
        if self.is_colorless() {
            return "Colorless".to_string();
        }
        self.0
            .iter()
            .map(|c| c.symbol())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<Color> for ColorIdentity {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Legality status of a card in one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Legality {
    Legal,
    NotLegal,
    Restricted,
    Banned,
    #[serde(other)]
    Unknown,
}

impl Legality {
    pub fn as_str(self) -> &'static str {
        match self {
            Legality::Legal => "legal",
            Legality::NotLegal => "not_legal",
            Legality::Restricted => "restricted",
            Legality::Banned => "banned",
            Legality::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Legality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const COMMANDER_FORMAT: &str = "commander";

/// Canonical card data as returned by a card resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCard {
    pub name: String,
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default)]
    pub color_identity: ColorIdentity,
    #[serde(default)]
    pub legalities: BTreeMap<String, Legality>,
}

impl ResolvedCard {
    /// Legality in `format`; a missing key reads as `Unknown`.
    pub fn legality_in(&self, format: &str) -> Legality {
        self.legalities
            .get(format)
            .copied()
            .unwrap_or(Legality::Unknown)
    }

    pub fn commander_legality(&self) -> Legality {
        self.legality_in(COMMANDER_FORMAT)
    }
}

/// Card names in submission order. Quantity prefixes are stripped, never expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedDecklist {
    entries: Vec<String>,
}

impl NormalizedDecklist {
    /// Blank entries are dropped so that no entry is empty.
    pub fn new(entries: impl IntoIterator<Item = String>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .filter(|e| !e.trim().is_empty())
                .collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tally(&self) -> CardNameTally {
        CardNameTally::from_names(self.entries.iter().map(String::as_str))
    }
}

/// Occurrence count per lower-cased, trimmed card name, enumerated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardNameTally {
    counts: BTreeMap<String, usize>,
}

impl CardNameTally {
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = BTreeMap::new();
        for name in names {
            *counts.entry(Self::key(name)).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn count(&self, name: &str) -> usize {
        self.counts.get(&Self::key(name)).copied().unwrap_or(0)
    }

    /// Total entries, i.e. the decklist length.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    CommanderLegality,
    CommanderEligibility,
    DeckSize,
    SingletonRule,
    ColorIdentity,
    CardLegality,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::CommanderLegality => "commander-legality",
            RuleCategory::CommanderEligibility => "commander-eligibility",
            RuleCategory::DeckSize => "deck-size",
            RuleCategory::SingletonRule => "singleton-rule",
            RuleCategory::ColorIdentity => "color-identity",
            RuleCategory::CardLegality => "card-legality",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RuleCategory::CommanderLegality => "Commander Legality",
            RuleCategory::CommanderEligibility => "Commander Eligibility",
            RuleCategory::DeckSize => "Deck Size",
            RuleCategory::SingletonRule => "Singleton Rule",
            RuleCategory::ColorIdentity => "Color Identity",
            RuleCategory::CardLegality => "Card Legality",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    pub rule: RuleCategory,
    pub passed: bool,
    pub detail: String,
    pub offending_entries: Vec<String>,
}

impl ValidationVerdict {
    pub fn pass(rule: RuleCategory, detail: impl Into<String>) -> Self {
        Self {
            rule,
            passed: true,
            detail: detail.into(),
            offending_entries: Vec::new(),
        }
    }

    pub fn fail(rule: RuleCategory, detail: impl Into<String>, offending_entries: Vec<String>) -> Self {
        Self {
            rule,
            passed: false,
            detail: detail.into(),
            offending_entries,
        }
    }
}

/// How the color-identity rule is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorIdentityMode {
    /// Resolve every distinct decklist card.
    #[default]
    Full,
    /// No per-card resolution; the verdict says the rule was not checked.
    Skip,
}

/// Result of one validation call. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    commander_name: String,
    color_identity: ColorIdentity,
    verdicts: Vec<ValidationVerdict>,
}

impl ValidationReport {
    pub(crate) fn new(
        commander_name: String,
        color_identity: ColorIdentity,
        verdicts: Vec<ValidationVerdict>,
    ) -> Self {
        Self {
            commander_name,
            color_identity,
            verdicts,
        }
    }

    pub fn commander_name(&self) -> &str {
        &self.commander_name
    }

    pub fn color_identity(&self) -> &ColorIdentity {
        &self.color_identity
    }

    pub fn verdicts(&self) -> &[ValidationVerdict] {
        &self.verdicts
    }

    pub fn verdict(&self, rule: RuleCategory) -> Option<&ValidationVerdict> {
        self.verdicts.iter().find(|v| v.rule == rule)
    }

    pub fn is_valid(&self) -> bool {
        self.verdicts.iter().all(|v| v.passed)
    }
}
