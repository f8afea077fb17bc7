//! Splits a command line into words and history references.
//!
//! Quoting follows the shell: `'...'` is literal, `"..."` honours `\`
//! escapes, and quoted runs glue onto neighbouring text within one word.
//! A `!` only starts a history reference at the beginning of an unquoted
//! word.

use std::iter::{self, Peekable};
use std::str::Chars;

// =============================================================================
// Token Types
// =============================================================================

/// Which history entry a `!` reference names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRef {
    /// `!!`
    Last,
    /// `!n`, 1-based
    Number(usize),
    /// `!-n`, counted back from the most recent entry
    FromEnd(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    History(HistoryRef),
}

// =============================================================================
// Lexer
// =============================================================================

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    /// Read the reference after a consumed `!`. Leaves the input untouched
    /// and returns `None` when no reference follows.
    fn history_ref(&mut self) -> Option<HistoryRef> {
        if self.chars.next_if_eq(&'!').is_some() {
            return Some(HistoryRef::Last);
        }

        let mut ahead = self.chars.clone();
        let from_end = ahead.next_if_eq(&'-').is_some();
        let digits: String = iter::from_fn(|| ahead.next_if(char::is_ascii_digit)).collect();
        if digits.is_empty() {
            return None;
        }
        self.chars = ahead;

        // Too large for any history: saturate so the lookup fails
        let n = digits.parse().unwrap_or(usize::MAX);
        Some(if from_end {
            HistoryRef::FromEnd(n)
        } else {
            HistoryRef::Number(n)
        })
    }

    /// Accumulate one word into `word` up to unquoted whitespace.
    fn word(&mut self, mut word: String) -> String {
        while let Some(c) = self.chars.next_if(|c| !c.is_whitespace()) {
            match c {
                '\'' => word.extend(iter::from_fn(|| self.chars.next_if(|&c| c != '\''))),
                '"' => {
                    while let Some(c) = self.chars.next_if(|&c| c != '"') {
                        match c {
                            '\\' => word.extend(self.chars.next()),
                            c => word.push(c),
                        }
                    }
                }
                c => {
                    word.push(c);
                    continue;
                }
            }
            // Closing quote, if the line has one
            self.chars.next();
        }
        word
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
        self.chars.peek()?;

        if self.chars.next_if_eq(&'!').is_some() {
            return Some(match self.history_ref() {
                Some(reference) => Token::History(reference),
                None => Token::Word(self.word("!".to_string())),
            });
        }
        Some(Token::Word(self.word(String::new())))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    #[test]
    fn test_command_with_args() {
        assert_eq!(
            lex("  ls   -l /logs "),
            vec![word("ls"), word("-l"), word("/logs")]
        );
    }

    #[test]
    fn test_history_tokens() {
        assert_eq!(lex("!!"), vec![Token::History(HistoryRef::Last)]);
        assert_eq!(lex("!5"), vec![Token::History(HistoryRef::Number(5))]);
        assert_eq!(lex("!-2"), vec![Token::History(HistoryRef::FromEnd(2))]);
        assert_eq!(
            lex("!1 /tmp"),
            vec![Token::History(HistoryRef::Number(1)), word("/tmp")]
        );
    }

    #[test]
    fn test_oversized_history_number_saturates() {
        assert_eq!(
            lex("!5000000000000000000000"),
            vec![Token::History(HistoryRef::Number(usize::MAX))]
        );
        assert_eq!(
            lex("!-99999999999999999999999"),
            vec![Token::History(HistoryRef::FromEnd(usize::MAX))]
        );
    }

    #[test]
    fn test_bang_without_number_is_word() {
        assert_eq!(lex("!x"), vec![word("!x")]);
        assert_eq!(lex("!"), vec![word("!")]);
        assert_eq!(lex("!-"), vec![word("!-")]);
        assert_eq!(lex("a!1"), vec![word("a!1")]);
        assert_eq!(lex("'!1'"), vec![word("!1")]);
    }

    #[test]
    fn test_quotes() {
        assert_eq!(
            lex("touch 'my file' \"a\\\"b\""),
            vec![word("touch"), word("my file"), word("a\"b")]
        );
        assert_eq!(lex("''"), vec![word("")]);
    }

    #[test]
    fn test_quoted_runs_join_word() {
        assert_eq!(lex("run_'a b'\"c\" next"), vec![word("run_a bc"), word("next")]);
    }

    #[test]
    fn test_unclosed_quote() {
        assert_eq!(lex("cat 'open"), vec![word("cat"), word("open")]);
        assert_eq!(lex("cat \"open\\"), vec![word("cat"), word("open")]);
    }
}
