//! History expansion (`!!` → last command, `!n` → nth command).

use super::ParseError;
use super::lexer::{HistoryRef, Lexer, Token};

/// Replace history references with the words of the recalled command.
///
/// Numbers are 1-based; `!-n` counts back from the most recent entry.
pub fn expand_tokens(tokens: Vec<Token>, history: &[String]) -> Result<Vec<String>, ParseError> {
    let mut words = Vec::with_capacity(tokens.len());

    for token in tokens {
        let recalled = match token {
            Token::Word(word) => {
                words.push(word);
                continue;
            }
            Token::History(reference) => recall(reference, history),
        };
        let line = recalled.ok_or(ParseError::EventNotFound)?;

        // Re-tokenize the recalled command without further history expansion
        words.extend(Lexer::new(line).filter_map(|t| match t {
            Token::Word(word) => Some(word),
            Token::History(_) => None,
        }));
    }

    Ok(words)
}

fn recall(reference: HistoryRef, history: &[String]) -> Option<&String> {
    let idx = match reference {
        HistoryRef::Last => history.len().checked_sub(1)?,
        HistoryRef::Number(n) => n.checked_sub(1)?,
        HistoryRef::FromEnd(0) => return None,
        HistoryRef::FromEnd(back) => history.len().checked_sub(back)?,
    };
    history.get(idx)
}

// =============================================================================
// Tests
// =============================================================================
