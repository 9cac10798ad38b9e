//! Chat macro classification.

use serde::Serialize;

use brochat_core::{ChatMacroRequest, DiceRoll, MacroRequest, MacroType, classify};

use crate::error::ClientResult;

use super::print_json;

/// Classification of one chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub is_macro: bool,
    #[serde(rename = "type", skip_serializing_if = "is_none")]
    pub macro_type: MacroType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dice: Option<DiceRoll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dice_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<ChatMacroRequest>,
}

fn is_none(macro_type: &MacroType) -> bool {
    *macro_type == MacroType::None
}

/// Classifies a chat line, optionally building the request for a channel.
pub fn classify_line(text: &str, channel: Option<&str>) -> Classification {
    let (is_macro, macro_type) = classify(text);
    let parsed = MacroRequest::parse(text);

    let (dice, dice_error) = match parsed.as_ref() {
        Some(request) if request.macro_type == MacroType::Roll => match request.dice_roll() {
            Ok(roll) => (Some(roll), None),
            Err(e) => (None, Some(e.to_string())),
        },
        _ => (None, None),
    };

    let request = match (parsed.as_ref(), channel) {
        (Some(request), Some(channel_id)) => Some(ChatMacroRequest::new(channel_id, request)),
        _ => None,
    };

    Classification {
        is_macro,
        macro_type,
        body: parsed.map(|request| request.body),
        dice,
        dice_error,
        request,
    }
}

/// Prints the classification of a chat line.
pub fn run(text: &str, channel: Option<&str>) -> ClientResult<()> {
    print_json(&classify_line(text, channel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text() {
        let result = classify_line("hello world", None);
        assert!(!result.is_macro);
        assert_eq!(result.macro_type, MacroType::None);
        assert_eq!(result.body, None);
        assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"is_macro":false}"#);
    }

    #[test]
    fn dice_roll_with_channel() {
        let result = classify_line("/ROLL 3d8", Some("c1"));
        assert!(result.is_macro);
        assert_eq!(result.macro_type, MacroType::Roll);
        assert_eq!(result.dice.map(|d| (d.count, d.sides)), Some((3, 8)));
        let request = result.request.unwrap();
        assert_eq!(request.channel_id, "c1");
        assert_eq!(request.arguments, vec!["3d8".to_string()]);
    }

    #[test]
    fn bad_dice_is_reported() {
        let result = classify_line("/roll lots", None);
        assert!(result.dice.is_none());
        assert!(result.dice_error.is_some());
    }

    #[test]
    fn unrecognized_command() {
        let result = classify_line("/dance now", None);
        assert!(result.is_macro);
        assert_eq!(result.macro_type, MacroType::Unrecognized);
        assert_eq!(result.body.as_deref(), Some("now"));
    }
}
