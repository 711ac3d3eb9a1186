// 牌表解析: JSON 陣列或逐行文字 (可帶數量前綴, 只移除不展開)

use crate::domain::model::NormalizedDecklist;
use crate::utils::error::{AssistError, Result};
use regex::Regex;
use std::sync::LazyLock;

// 與 Sscanf("%d") 一致: 開頭為 ASCII 整數且不溢位即視為數量 (例如 "2x")
static QUANTITY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^[+-]?[0-9]+").unwrap());

/// Parse a raw submission. Fails with `InputError` when no card name survives parsing.
pub fn parse_decklist(raw: &str) -> Result<NormalizedDecklist> {
    let decklist = match parse_json_array(raw) {
        Some(names) => {
            tracing::debug!("Decklist parsed as JSON array ({} entries)", names.len());
            NormalizedDecklist::new(names)
        }
        None => {
            let names = parse_text_lines(raw);
            tracing::debug!("Decklist parsed as text ({} entries)", names.len());
            NormalizedDecklist::new(names)
        }
    };

    if decklist.is_empty() {
        return Err(AssistError::input("Decklist contains no card names"));
    }

    Ok(decklist)
}

/// Anything other than a plain array of strings falls through to text mode.
fn parse_json_array(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw).ok()
}

fn parse_text_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_quantity)
        .map(str::to_string)
        .collect()
}

fn strip_quantity(line: &str) -> &str {
    match line.split_once(' ') {
        Some((first, rest)) if is_quantity(first) => rest.trim(),
        _ => line,
    }
}

fn is_quantity(token: &str) -> bool {
    QUANTITY_PREFIX
        .find(token)
        .is_some_and(|m| m.as_str().parse::<i64>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &str) -> Vec<String> {
        parse_decklist(raw).unwrap().entries().to_vec()
    }

    #[test]
    fn test_json_array_preserves_order_and_casing() {
        let result = names(r#"["Sol Ring", "arcane signet", "COMMAND TOWER", "Sol Ring"]"#);
        assert_eq!(
            result,
            vec!["Sol Ring", "arcane signet", "COMMAND TOWER", "Sol Ring"]
        );
    }

    #[test]
    fn test_json_array_is_not_prefix_stripped() {
        let result = names(r#"["1 Sol Ring"]"#);
        assert_eq!(result, vec!["1 Sol Ring"]);
    }

    #[test]
    fn test_text_quantities_are_stripped_not_expanded() {
        let result = names("1 Sol Ring\nForest\n2 Mountain");
        assert_eq!(result, vec!["Sol Ring", "Forest", "Mountain"]);
    }

    #[test]
    fn test_text_skips_blank_lines_and_trims() {
        let result = names("\n  1 Sol Ring  \r\n\n\t Arcane Signet\n   \n");
        assert_eq!(result, vec!["Sol Ring", "Arcane Signet"]);
    }

    #[test]
    fn test_text_quantity_with_suffix() {
        let result = names("2x Lightning Bolt\n10 Island");
        assert_eq!(result, vec!["Lightning Bolt", "Island"]);
    }

    #[test]
    fn test_text_extra_spaces_after_quantity() {
        let result = names("1    Sol Ring");
        assert_eq!(result, vec!["Sol Ring"]);
    }

    #[test]
    fn test_non_numeric_first_token_keeps_whole_line() {
        let result = names("Sol Ring\nAtraxa, Praetors' Voice");
        assert_eq!(result, vec!["Sol Ring", "Atraxa, Praetors' Voice"]);
    }

    #[test]
    fn test_leading_number_in_name_is_treated_as_quantity() {
        // 已知限制
        let result = names("1996 World Champion");
        assert_eq!(result, vec!["World Champion"]);
    }

    #[test]
    fn test_single_token_number_line_is_kept() {
        let result = names("42");
        assert_eq!(result, vec!["42"]);
    }

    #[test]
    fn test_non_string_json_falls_back_to_text() {
        assert_eq!(names(r#"{"deck": ["Sol Ring"]}"#), vec![r#"{"deck": ["Sol Ring"]}"#]);
        assert_eq!(names("[1, 2, 3]"), vec!["[1, 2, 3]"]);
        assert_eq!(names(r#"[["Sol Ring"]]"#), vec![r#"[["Sol Ring"]]"#]);
        assert_eq!(names(r#"["Sol Ring", 1]"#), vec![r#"["Sol Ring", 1]"#]);
        assert_eq!(names("7"), vec!["7"]);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            parse_decklist(""),
            Err(AssistError::InputError { .. })
        ));
        assert!(matches!(
            parse_decklist("  \n\n \t "),
            Err(AssistError::InputError { .. })
        ));
        assert!(matches!(
            parse_decklist("[]"),
            Err(AssistError::InputError { .. })
        ));
        assert!(matches!(
            parse_decklist(r#"["", "   "]"#),
            Err(AssistError::InputError { .. })
        ));
    }

    #[test]
    fn test_non_ascii_digits_are_not_quantities() {
        let result = names("٣ Sol Ring\n３ Arcane Signet");
        assert_eq!(result, vec!["٣ Sol Ring", "３ Arcane Signet"]);
    }

    #[test]
    fn test_overflowing_quantity_keeps_whole_line() {
        let result = names("99999999999999999999 Sol Ring\n-5 Forest");
        assert_eq!(result, vec!["99999999999999999999 Sol Ring", "Forest"]);
    }
}
