// 驗證結果輸出 (Markdown / JSON)

use crate::app::legality::LegalityLookup;
use crate::domain::model::{Legality, ValidationReport, ValidationVerdict};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    valid: bool,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

fn mark(passed: bool) -> &'static str {
    if passed {
        "✅"
    } else {
        "❌"
    }
}

fn write_verdict(output: &mut String, verdict: &ValidationVerdict) {
    let _ = writeln!(
        output,
        "- {} **{}:** {}",
        mark(verdict.passed),
        verdict.rule.title(),
        verdict.detail
    );
    for entry in &verdict.offending_entries {
        let _ = writeln!(output, "  - {}", entry);
    }
}

pub fn render_markdown(report: &ValidationReport) -> String {
    let mut output = String::new();
    output.push_str("# Commander Deck Validation\n\n");
    let _ = writeln!(output, "**Commander:** {}", report.commander_name());
    let _ = writeln!(
        output,
        "**Color Identity:** {}\n",
        report.color_identity().describe()
    );

    for verdict in report.verdicts() {
        write_verdict(&mut output, verdict);
    }

    let _ = write!(
        output,
        "\n**Result:** {}\n",
        if report.is_valid() {
            "✅ Deck is valid"
        } else {
            "❌ Deck is not valid"
        }
    );

    output
}

pub fn render_json(report: &ValidationReport) -> Result<String> {
    let json = serde_json::to_string_pretty(&JsonReport {
        valid: report.is_valid(),
        report,
    })?;
    Ok(json)
}

pub fn render_legality_markdown(lookup: &LegalityLookup) -> String {
    let card = &lookup.card;
    let mut output = String::new();

    let _ = writeln!(output, "# Legality Check: {}\n", card.name);
    let _ = writeln!(output, "**Commander Format:** {}\n", card.commander_legality());

    let notice = match card.commander_legality() {
        Legality::Banned => "⚠️ This card is **BANNED** in Commander format.",
        Legality::Legal => "✅ This card is **LEGAL** in Commander format.",
        _ => "❌ This card is **NOT LEGAL** in Commander format.",
    };
    let _ = writeln!(output, "{}\n", notice);

    write_verdict(&mut output, &lookup.eligibility);

    if !card.legalities.is_empty() {
        output.push_str("\n**All Format Legalities:**\n");
        for (format, legality) in &card.legalities {
            let _ = writeln!(output, "- {}: {}", format, legality);
        }
    }

    output
}
