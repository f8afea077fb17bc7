//! Command line parser with history recall.
//!
//! Supports:
//! - History expansion: `!!` (last command), `!n` (nth command), `!-n` (nth from last)
//! - Quote handling: `"string with spaces"`, `'literal string'`

mod expand;
mod lexer;

pub use lexer::{HistoryRef, Lexer, Token};

use expand::expand_tokens;
use std::fmt;

// =============================================================================
// Parse Error
// =============================================================================

/// Structured error type for parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `!n` or `!!` names an entry the history does not have
    EventNotFound,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventNotFound => write!(f, "event not found"),
        }
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// Parsed Command
// =============================================================================

/// A command line split into its command name and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// True when the line held no words at all
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.args.is_empty()
    }

    /// The line as it is stored in history: words joined by single spaces,
    /// quoted where needed so recalling it yields the same words.
    pub fn to_line(&self) -> String {
        std::iter::once(&self.name)
            .chain(&self.args)
            .map(|word| quote(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote(word: &str) -> String {
    let needs_quotes = word.is_empty()
        || word.starts_with('!')
        || word
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\'');
    if !needs_quotes {
        word.to_string()
    } else if word.contains('\'') {
        let escaped = word.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", word)
    }
}

// =============================================================================
// Parser
// =============================================================================

/// Tokenize a command line and expand history references.
pub fn parse_input(input: &str, history: &[String]) -> Result<ParsedCommand, ParseError> {
    let tokens = Lexer::new(input).tokenize();
    let mut words = expand_tokens(tokens, history)?.into_iter();

    Ok(ParsedCommand {
        name: words.next().unwrap_or_default(),
        args: words.collect(),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let cmd = parse_input("rm -r logs", &[]).unwrap();
        assert_eq!(cmd.name, "rm");
        assert_eq!(cmd.args, vec!["-r", "logs"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_input("   ", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_history_recall_with_extra_args() {
        let history = vec!["ls -l".to_string()];
        let cmd = parse_input("!1 /logs", &history).unwrap();
        assert_eq!(cmd.name, "ls");
        assert_eq!(cmd.args, vec!["-l", "/logs"]);
        assert_eq!(cmd.to_line(), "ls -l /logs");
    }

    #[test]
    fn test_history_event_not_found() {
        let err = parse_input("!4", &["pwd".to_string()]).unwrap_err();
        assert_eq!(err, ParseError::EventNotFound);
        assert_eq!(err.to_string(), "event not found");
    }

    #[test]
    fn test_oversized_history_number_not_found() {
        let history = vec!["pwd".to_string()];
        for line in ["!5000000000000000000000", "!-5000000000000000000000"] {
            assert_eq!(parse_input(line, &history), Err(ParseError::EventNotFound));
        }
    }

    #[test]
    fn test_to_line_quotes_words() {
        let cmd = parse_input("touch 'a b' \"it's\" !x", &[]).unwrap();
        assert_eq!(cmd.args, vec!["a b", "it's", "!x"]);
        let line = cmd.to_line();
        assert_eq!(line, "touch 'a b' \"it's\" '!x'");
        assert_eq!(parse_input(&line, &[]).unwrap(), cmd);
    }
}
