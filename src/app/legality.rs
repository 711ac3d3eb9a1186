use crate::core::checks::{check_commander_legal, check_eligibility};
use crate::domain::model::{ResolvedCard, ValidationVerdict};
use crate::domain::ports::CardResolver;
use crate::utils::error::{AssistError, Result};

/// One card's Commander standing plus its legality in every format.
#[derive(Debug, Clone)]
pub struct LegalityLookup {
    pub card: ResolvedCard,
    pub commander_legality: ValidationVerdict,
    pub eligibility: ValidationVerdict,
}

pub async fn lookup_legality<R>(resolver: &R, name: &str) -> Result<LegalityLookup>
where
    R: CardResolver + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(AssistError::input("Card name is required"));
    }

    let card = resolver.resolve(name).await?;
    tracing::info!("Legality lookup for '{}': {}", card.name, card.commander_legality());

    Ok(LegalityLookup {
        commander_legality: check_commander_legal(&card),
        eligibility: check_eligibility(&card),
        card,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ColorIdentity, Legality};
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    struct SingleCard(ResolvedCard);

    #[async_trait]
    impl CardResolver for SingleCard {
        async fn resolve(&self, name: &str) -> Result<ResolvedCard> {
            if name.eq_ignore_ascii_case(&self.0.name) {
                Ok(self.0.clone())
            } else {
                Err(AssistError::CardNotFound {
                    name: name.to_string(),
                })
            }
        }
    }

    fn mana_crypt() -> ResolvedCard {
        let mut legalities = BTreeMap::new();
        legalities.insert("commander".to_string(), Legality::Banned);
        legalities.insert("vintage".to_string(), Legality::Restricted);
        ResolvedCard {
            name: "Mana Crypt".to_string(),
            type_line: "Artifact".to_string(),
            oracle_text: "{T}: Add {C}{C}.".to_string(),
            color_identity: ColorIdentity::colorless(),
            legalities,
        }
    }

    #[tokio::test]
    async fn test_lookup_banned_card() {
        let resolver = SingleCard(mana_crypt());

        let lookup = lookup_legality(&resolver, "mana crypt").await.unwrap();

        assert_eq!(lookup.card.name, "Mana Crypt");
        assert!(!lookup.commander_legality.passed);
        assert!(lookup.commander_legality.detail.contains("banned"));
        assert!(!lookup.eligibility.passed);
    }

    #[tokio::test]
    async fn test_lookup_unknown_card() {
        let resolver = SingleCard(mana_crypt());

        let err = lookup_legality(&resolver, "Mana Cryptt").await.unwrap_err();

        assert!(matches!(err, AssistError::CardNotFound { .. }));
    }

    #[tokio::test]
    async fn test_lookup_requires_name() {
        let resolver = SingleCard(mana_crypt());

        let err = lookup_legality(&resolver, "   ").await.unwrap_err();

        assert!(matches!(err, AssistError::InputError { .. }));
    }
}
