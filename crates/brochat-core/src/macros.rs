//! Chat macro commands.
//!
//! A chat line whose first token starts with `/` is a macro command rather
//! than plain message text. Only the command token is case-insensitive;
//! arguments are passed through untouched.
//!
//! ```
//! use brochat_core::macros::{classify, MacroType};
//!
//! assert_eq!(classify("/ROLL 2d6"), (true, MacroType::Roll));
//! assert_eq!(classify("hello"), (false, MacroType::None));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker character that starts a macro command.
pub const COMMAND_MARKER: char = '/';

/// Upper bound on the number of dice in a single roll.
pub const MAX_DICE: u32 = 100;

/// Upper bound on the number of sides of a die.
pub const MAX_SIDES: u32 = 1000;

/// The kind of a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroType {
    /// Plain chat text.
    #[serde(skip)]
    None,
    /// Dice roll (`/roll`).
    #[serde(rename = "dice-roll")]
    Roll,
    /// Coin flip (`/flip`).
    #[serde(rename = "coin-flip")]
    Flip,
    /// Starts with the command marker but names no known command.
    #[serde(rename = "unknown")]
    Unrecognized,
}

impl MacroType {
    /// Returns the wire name of the macro type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Roll => "dice-roll",
            Self::Flip => "coin-flip",
            Self::Unrecognized => "unknown",
        }
    }

    /// Looks up a lower-cased command token (including the marker).
    fn from_command(token: &str) -> Self {
        match token {
            "/roll" => Self::Roll,
            "/flip" => Self::Flip,
            _ => Self::Unrecognized,
        }
    }
}

impl fmt::Display for MacroType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits a raw line into its first token and the remaining text.
fn split_command(raw: &str) -> (&str, &str) {
    let trimmed = raw.trim_start();
    match trimmed.find(char::is_whitespace) {
        Some(idx) => (&trimmed[..idx], trimmed[idx..].trim()),
        None => (trimmed, ""),
    }
}

/// Classifies a raw chat line.
///
/// Returns `(false, MacroType::None)` for ordinary chat text, including the
/// empty string. A line whose first token starts with `/` is always a
/// macro; if the command is unknown the type is [`MacroType::Unrecognized`]
/// and the caller should answer with an "unknown command" message instead
/// of posting the line as chat text.
pub fn classify(raw: &str) -> (bool, MacroType) {
    let (token, _) = split_command(raw);
    if !token.starts_with(COMMAND_MARKER) {
        return (false, MacroType::None);
    }
    (true, MacroType::from_command(&token.to_lowercase()))
}

/// A classified macro command and its argument text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroRequest {
    /// The macro kind.
    pub macro_type: MacroType,
    /// Everything after the command token, trimmed.
    pub body: String,
}

impl MacroRequest {
    /// Parses a raw chat line into a macro request.
    ///
    /// Returns `None` when the line is plain chat text.
    pub fn parse(raw: &str) -> Option<Self> {
        let (is_macro, macro_type) = classify(raw);
        if !is_macro {
            return None;
        }
        let (_, body) = split_command(raw);
        Some(Self {
            macro_type,
            body: body.to_string(),
        })
    }

    /// Returns the whitespace-separated arguments of the body.
    pub fn arguments(&self) -> Vec<String> {
        self.body.split_whitespace().map(str::to_string).collect()
    }

    /// Interprets the body as dice notation.
    ///
    /// An empty body rolls a single six-sided die.
    pub fn dice_roll(&self) -> Result<DiceRoll, MacroParseError> {
        if self.macro_type != MacroType::Roll {
            return Err(MacroParseError::WrongType {
                expected: MacroType::Roll,
                found: self.macro_type,
            });
        }
        match self.body.split_whitespace().next() {
            Some(token) => token.parse(),
            None => Ok(DiceRoll::default()),
        }
    }
}

/// Errors produced while interpreting macro arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacroParseError {
    /// The roll argument is not valid dice notation.
    #[error("invalid roll command token: {token}")]
    InvalidRollToken { token: String },

    /// The dice count or side count is out of range.
    #[error("roll out of range: {count}d{sides} (max {max_dice}d{max_sides})", max_dice = MAX_DICE, max_sides = MAX_SIDES)]
    RollOutOfRange { count: u32, sides: u32 },

    /// The request is for a different macro.
    #[error("expected a {expected} macro, got {found}")]
    WrongType { expected: MacroType, found: MacroType },
}

/// Dice notation `NdM`: roll `count` dice with `sides` sides each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub count: u32,
    pub sides: u32,
}

impl Default for DiceRoll {
    fn default() -> Self {
        Self { count: 1, sides: 6 }
    }
}

impl std::str::FromStr for DiceRoll {
    type Err = MacroParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MacroParseError::InvalidRollToken {
            token: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (count, sides) = lower.split_once('d').ok_or_else(invalid)?;
        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().map_err(|_| invalid())?
        };
        let sides = sides.parse::<u32>().map_err(|_| invalid())?;

        if count == 0 || count > MAX_DICE || sides < 2 || sides > MAX_SIDES {
            return Err(MacroParseError::RollOutOfRange { count, sides });
        }
        Ok(Self { count, sides })
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// An unprocessed macro command as sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMacroRequest {
    /// The channel the macro was issued in.
    pub channel_id: String,
    /// The macro kind.
    #[serde(rename = "type")]
    pub macro_type: MacroType,
    /// Macro arguments; their meaning depends on the type.
    pub arguments: Vec<String>,
}

impl ChatMacroRequest {
    /// Builds the wire request for a parsed macro in a channel.
    pub fn new(channel_id: impl Into<String>, request: &MacroRequest) -> Self {
        Self {
            channel_id: channel_id.into(),
            macro_type: request.macro_type,
            arguments: request.arguments(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_commands() {
        assert_eq!(classify("/roll 2d6"), (true, MacroType::Roll));
        assert_eq!(classify("/flip"), (true, MacroType::Flip));
        assert_eq!(classify("/FLIP"), (true, MacroType::Flip));
        assert_eq!(classify("/Roll\t3d8"), (true, MacroType::Roll));
    }

    #[test]
    fn classify_unknown_command() {
        assert_eq!(classify("/nonsense"), (true, MacroType::Unrecognized));
        assert_eq!(classify("/"), (true, MacroType::Unrecognized));
        assert_eq!(classify("/rolls 2d6"), (true, MacroType::Unrecognized));
    }

    #[test]
    fn classify_plain_text() {
        assert_eq!(classify("hello world"), (false, MacroType::None));
        assert_eq!(classify(""), (false, MacroType::None));
        assert_eq!(classify("   "), (false, MacroType::None));
        assert_eq!(classify("a /roll later"), (false, MacroType::None));
    }

    #[test]
    fn parse_keeps_argument_case() {
        let request = MacroRequest::parse("/ROLL  2D6 For Luck ").unwrap();
        assert_eq!(request.macro_type, MacroType::Roll);
        assert_eq!(request.body, "2D6 For Luck");
        assert_eq!(request.arguments(), vec!["2D6", "For", "Luck"]);
    }

    #[test]
    fn parse_plain_text_is_none() {
        assert!(MacroRequest::parse("just chatting").is_none());
        assert!(MacroRequest::parse("").is_none());
    }

    #[test]
    fn dice_roll_notation() {
        assert_eq!(
            "2d6".parse::<DiceRoll>().unwrap(),
            DiceRoll { count: 2, sides: 6 }
        );
        assert_eq!(
            "d20".parse::<DiceRoll>().unwrap(),
            DiceRoll { count: 1, sides: 20 }
        );
        assert_eq!(DiceRoll { count: 3, sides: 8 }.to_string(), "3d8");
    }

    #[test]
    fn dice_roll_rejects_garbage() {
        assert_eq!(
            "banana".parse::<DiceRoll>(),
            Err(MacroParseError::InvalidRollToken {
                token: "banana".to_string()
            })
        );
        assert!(matches!(
            "2dx".parse::<DiceRoll>(),
            Err(MacroParseError::InvalidRollToken { .. })
        ));
        assert_eq!(
            "0d6".parse::<DiceRoll>(),
            Err(MacroParseError::RollOutOfRange { count: 0, sides: 6 })
        );
        assert!(matches!(
            "2d1".parse::<DiceRoll>(),
            Err(MacroParseError::RollOutOfRange { .. })
        ));
    }

    #[test]
    fn dice_roll_from_request() {
        let request = MacroRequest::parse("/roll").unwrap();
        assert_eq!(request.dice_roll().unwrap(), DiceRoll::default());

        let request = MacroRequest::parse("/flip heads").unwrap();
        assert!(matches!(
            request.dice_roll(),
            Err(MacroParseError::WrongType { .. })
        ));
    }

    #[test]
    fn chat_macro_request_wire_shape() {
        let request = MacroRequest::parse("/roll 4d10").unwrap();
        let wire = ChatMacroRequest::new("chan-1", &request);
        insta::assert_snapshot!(
            serde_json::to_string(&wire).unwrap(),
            @r#"{"channel_id":"chan-1","type":"dice-roll","arguments":["4d10"]}"#
        );
    }
}
