//! Yes/no answers
//!
//! For prompts like "answer true if the user wants edges shown". The model
//! may reply with a JSON boolean, a wrapper object, or a bare word.

use plotagent_schema::coerce::bool_word;
use serde_json::Value;

use crate::decode::prepare_text;
use crate::error::DecodeError;
use crate::ingestor::IngestOptions;

/// Keys a wrapper object may carry the answer under
const ANSWER_KEYS: [&str; 4] = ["result", "answer", "value", "data"];

/// Longest answer echoed back in a diagnostic
const MAX_ECHO: usize = 80;

/// Parse a yes/no answer with default options
///
/// Accepts `true`/`false`, `{"result": true}` style objects, and the words
/// true/yes/y/false/no/n with surrounding quotes or punctuation.
///
/// # Errors
/// See [`parse_decision_with`]
pub fn parse_decision(raw: &str) -> Result<bool, DecodeError> {
    parse_decision_with(raw, &IngestOptions::default())
}

/// Parse a yes/no answer under the given size and fence options
///
/// # Errors
/// - `DecodeError::TooLarge` / `DecodeError::Empty`, see [`prepare_text`]
/// - `DecodeError::UnrecognisedAnswer` otherwise
pub fn parse_decision_with(raw: &str, options: &IngestOptions) -> Result<bool, DecodeError> {
    let text = prepare_text(raw, options)?;

    let answer = match serde_json::from_str::<Value>(text) {
        Ok(value) => from_value(&value),
        Err(_) => from_word(text),
    };
    answer.ok_or_else(|| DecodeError::UnrecognisedAnswer(text.chars().take(MAX_ECHO).collect()))
}

fn from_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => from_word(s),
        Value::Object(map) => ANSWER_KEYS
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(from_value),
        _ => None,
    }
}

fn from_word(text: &str) -> Option<bool> {
    let word = text
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '.' | '!' | ',' | ';'))
        .to_ascii_lowercase();
    match word.as_str() {
        "y" => Some(true),
        "n" => Some(false),
        // bare 0/1 are too ambiguous as prose answers
        "0" | "1" => None,
        other => bool_word(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_answers() {
        assert_eq!(parse_decision("true"), Ok(true));
        assert_eq!(parse_decision("false"), Ok(false));
        assert_eq!(parse_decision(r#"{"result": true}"#), Ok(true));
        assert_eq!(parse_decision(r#"{"answer": "no"}"#), Ok(false));
        assert_eq!(parse_decision(r#""Yes""#), Ok(true));
    }

    #[test]
    fn word_answers() {
        assert_eq!(parse_decision("Yes."), Ok(true));
        assert_eq!(parse_decision("  NO!  "), Ok(false));
        assert_eq!(parse_decision("True"), Ok(true));
        assert_eq!(parse_decision("'false'"), Ok(false));
        assert_eq!(parse_decision("```\ntrue\n```"), Ok(true));
    }

    #[test]
    fn options_apply_to_answers() {
        let no_fences = IngestOptions::default().with_code_fences(false);
        assert!(matches!(
            parse_decision_with("```\ntrue\n```", &no_fences),
            Err(DecodeError::UnrecognisedAnswer(_))
        ));
        assert_eq!(parse_decision_with("Yes.", &no_fences), Ok(true));

        let tiny = IngestOptions::default().with_max_payload_bytes(4);
        let padded = format!("```\n{}\"yes\"\n```", " ".repeat(1000));
        assert!(matches!(
            parse_decision_with(&padded, &tiny),
            Err(DecodeError::TooLarge { max: 4, .. })
        ));
    }

    #[test]
    fn unrecognised_answers() {
        assert_eq!(parse_decision(""), Err(DecodeError::Empty));
        assert!(matches!(
            parse_decision("I think the user probably wants edges"),
            Err(DecodeError::UnrecognisedAnswer(_))
        ));
        assert!(matches!(
            parse_decision("1"),
            Err(DecodeError::UnrecognisedAnswer(_))
        ));
        assert!(matches!(
            parse_decision(r#"{"verdict": true}"#),
            Err(DecodeError::UnrecognisedAnswer(_))
        ));
    }
}
