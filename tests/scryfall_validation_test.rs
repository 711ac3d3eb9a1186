use commander_assist::app::render::render_markdown;
use commander_assist::{
    AssistError, ConfigProvider, DeckValidator, RuleCategory, ScryfallResolver, TomlConfig,
    ValidationOptions,
};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn mock_card<'a>(server: &'a MockServer, fuzzy: &str, body: serde_json::Value) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/cards/named")
            .query_param("fuzzy", fuzzy);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(body);
    })
}

fn settings_for(server: &MockServer, extra: &str) -> TomlConfig {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[resolver]
endpoint = "{}"
timeout_seconds = 5
user_agent = "commander-assist-test"

[validation]
max_concurrent_resolutions = 4
{}
"#,
        server.base_url(),
        extra
    )
    .unwrap();

    let config = TomlConfig::from_file(file.path()).unwrap();
    commander_assist::utils::validation::Validate::validate(&config).unwrap();
    config
}

#[tokio::test]
async fn test_end_to_end_validation_against_scryfall_api() {
    let server = MockServer::start();

    let commander_mock = mock_card(
        &server,
        "Kenrith",
        serde_json::json!({
            "name": "Kenrith, the Returned King",
            "type_line": "Legendary Creature — Human Noble",
            "oracle_text": "{R}: All creatures gain trample and haste until end of turn.",
            "color_identity": ["W", "U", "B", "R", "G"],
            "legalities": {"commander": "legal"}
        }),
    );
    let sol_ring_mock = mock_card(
        &server,
        "sol ring",
        serde_json::json!({
            "name": "Sol Ring",
            "type_line": "Artifact",
            "oracle_text": "{T}: Add {C}{C}.",
            "color_identity": [],
            "legalities": {"commander": "legal"}
        }),
    );
    let crypt_mock = mock_card(
        &server,
        "mana crypt",
        serde_json::json!({
            "name": "Mana Crypt",
            "type_line": "Artifact",
            "color_identity": [],
            "legalities": {"commander": "banned"}
        }),
    );
    let forest_mock = mock_card(
        &server,
        "forest",
        serde_json::json!({
            "name": "Forest",
            "type_line": "Basic Land — Forest",
            "oracle_text": "({T}: Add {G}.)",
            "color_identity": ["G"],
            "legalities": {"commander": "legal"}
        }),
    );
    let missing_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/cards/named")
            .query_param("fuzzy", "notacard");
        then.status(404).json_body(serde_json::json!({
            "object": "error",
            "code": "not_found",
            "details": "No cards found matching “notacard”"
        }));
    });

    let settings = settings_for(&server, "");
    let resolver = ScryfallResolver::from_config(&settings).unwrap();
    let validator = DeckValidator::with_options(resolver, ValidationOptions::from_config(&settings));

    let report = validator
        .validate_deck(
            "Kenrith",
            "1 Sol Ring\n1 Mana Crypt\n10 Forest\nForest\nnotacard\n1 Sol Ring",
        )
        .await
        .unwrap();

    commander_mock.assert_hits(1);
    sol_ring_mock.assert_hits(1);
    crypt_mock.assert_hits(1);
    forest_mock.assert_hits(1);
    missing_mock.assert_hits(1);

    assert_eq!(report.commander_name(), "Kenrith, the Returned King");
    assert!(report.verdict(RuleCategory::CommanderLegality).unwrap().passed);
    assert!(report.verdict(RuleCategory::CommanderEligibility).unwrap().passed);

    let deck_size = report.verdict(RuleCategory::DeckSize).unwrap();
    assert!(!deck_size.passed);
    assert!(deck_size.detail.starts_with("6 cards"));

    assert_eq!(
        report.verdict(RuleCategory::SingletonRule).unwrap().offending_entries,
        vec!["sol ring (x2)"]
    );
    assert_eq!(
        report.verdict(RuleCategory::ColorIdentity).unwrap().offending_entries,
        vec!["notacard (unresolved)"]
    );
    assert_eq!(
        report.verdict(RuleCategory::CardLegality).unwrap().offending_entries,
        vec!["Mana Crypt (banned)", "notacard (unresolved)"]
    );

    let markdown = render_markdown(&report);
    assert!(markdown.contains("**Commander:** Kenrith, the Returned King"));
    assert!(markdown.contains("**Color Identity:** W, U, B, R, G"));
}

#[tokio::test]
async fn test_skip_mode_only_resolves_commander() {
    let server = MockServer::start();

    let commander_mock = mock_card(
        &server,
        "Atraxa, Praetors' Voice",
        serde_json::json!({
            "name": "Atraxa, Praetors' Voice",
            "type_line": "Legendary Creature — Phyrexian Angel Horror",
            "color_identity": ["W", "U", "B", "G"],
            "legalities": {"commander": "legal"}
        }),
    );

    let settings = settings_for(&server, r#"color_identity = "skip""#);
    assert_eq!(
        settings.color_identity_mode(),
        commander_assist::ColorIdentityMode::Skip
    );

    let validator = DeckValidator::with_options(
        ScryfallResolver::from_config(&settings).unwrap(),
        ValidationOptions::from_config(&settings),
    );

    let report = validator
        .validate_deck("Atraxa, Praetors' Voice", r#"["Sol Ring", "Arcane Signet"]"#)
        .await
        .unwrap();

    commander_mock.assert_hits(1);
    assert!(!report.verdict(RuleCategory::ColorIdentity).unwrap().passed);
    assert!(report
        .verdict(RuleCategory::ColorIdentity)
        .unwrap()
        .detail
        .contains("Not fully checked"));
}

#[tokio::test]
async fn test_upstream_outage_is_retryable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/cards/named");
        then.status(502);
    });

    let settings = settings_for(&server, "");
    let validator = DeckValidator::with_options(
        ScryfallResolver::from_config(&settings).unwrap(),
        ValidationOptions::from_config(&settings),
    );

    let err = validator
        .validate_deck("Atraxa, Praetors' Voice", "Sol Ring")
        .await
        .unwrap_err();

    assert!(matches!(err, AssistError::TransientError { .. }));
    assert!(err.is_retryable());
}
