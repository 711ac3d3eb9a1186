use crate::domain::model::{ResolvedCard, ValidationReport, ValidationVerdict};

/// Verdicts checked for the commander and the list as a whole.
#[derive(Debug, Clone)]
pub struct CoreVerdicts {
    pub legality: ValidationVerdict,
    pub eligibility: ValidationVerdict,
    pub deck_size: ValidationVerdict,
    pub singleton: ValidationVerdict,
}

/// Verdicts that depend on resolving each decklist card.
#[derive(Debug, Clone)]
pub struct PerCardVerdicts {
    pub color_identity: ValidationVerdict,
    pub card_legality: ValidationVerdict,
}

/// Merge verdicts into a report in fixed order: legality, eligibility, deck size,
/// singleton, then color identity and card legality when present.
pub fn assemble(
    commander: &ResolvedCard,
    core: CoreVerdicts,
    per_card: Option<PerCardVerdicts>,
) -> ValidationReport {
    let mut verdicts = vec![core.legality, core.eligibility, core.deck_size, core.singleton];

    if let Some(per_card) = per_card {
        verdicts.push(per_card.color_identity);
        verdicts.push(per_card.card_legality);
    }

    ValidationReport::new(
        commander.name.clone(),
        commander.color_identity.clone(),
        verdicts,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Color, ColorIdentity, RuleCategory};
    use std::collections::BTreeMap;

    fn verdict(rule: RuleCategory, passed: bool) -> ValidationVerdict {
        if passed {
            ValidationVerdict::pass(rule, "ok")
        } else {
            ValidationVerdict::fail(rule, "failed", vec!["x".to_string()])
        }
    }

    fn commander() -> ResolvedCard {
        ResolvedCard {
            name: "Atraxa, Praetors' Voice".to_string(),
            type_line: "Legendary Creature — Phyrexian Angel Horror".to_string(),
            oracle_text: String::new(),
            color_identity: ColorIdentity::new([Color::White, Color::Blue, Color::Black, Color::Green]),
            legalities: BTreeMap::new(),
        }
    }

    fn core(singleton_passed: bool) -> CoreVerdicts {
        CoreVerdicts {
            legality: verdict(RuleCategory::CommanderLegality, true),
            eligibility: verdict(RuleCategory::CommanderEligibility, true),
            deck_size: verdict(RuleCategory::DeckSize, true),
            singleton: verdict(RuleCategory::SingletonRule, singleton_passed),
        }
    }

    #[test]
    fn test_assemble_fixed_order() {
        let report = assemble(
            &commander(),
            core(true),
            Some(PerCardVerdicts {
                color_identity: verdict(RuleCategory::ColorIdentity, true),
                card_legality: verdict(RuleCategory::CardLegality, true),
            }),
        );

        let rules: Vec<RuleCategory> = report.verdicts().iter().map(|v| v.rule).collect();
        assert_eq!(
            rules,
            vec![
                RuleCategory::CommanderLegality,
                RuleCategory::CommanderEligibility,
                RuleCategory::DeckSize,
                RuleCategory::SingletonRule,
                RuleCategory::ColorIdentity,
                RuleCategory::CardLegality,
            ]
        );
        assert_eq!(report.commander_name(), "Atraxa, Praetors' Voice");
        assert_eq!(report.color_identity().describe(), "W, U, B, G");
        assert!(report.is_valid());
    }

    #[test]
    fn test_assemble_without_per_card_verdicts() {
        let report = assemble(&commander(), core(false), None);

        assert_eq!(report.verdicts().len(), 4);
        assert!(!report.is_valid());
        assert!(report.verdict(RuleCategory::ColorIdentity).is_none());
        assert!(!report.verdict(RuleCategory::SingletonRule).unwrap().passed);
    }
}
