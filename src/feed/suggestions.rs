//! Parsing persisted suggestion lists.
//!
//! Classifier output is stored as the text of a list of strings. Two
//! spellings are accepted:
//!
//! ```text
//! ["Support for abortion rights", "Support for universal healthcare"]
//! ['Support for abortion rights', "Criticism of Democrats or Liberals"]
//! ```
//!
//! The first is JSON; the second is the list literal a Python pipeline
//! writes with `str(list)`, where quotes vary per element.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/// A suggestion list that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at byte {position}")]
pub struct SuggestionError {
    pub position: usize,
    pub message: String,
}

impl SuggestionError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Parse a raw suggestion cell
///
/// Blank input means the row carries no suggestions and yields `None`.
pub fn parse_suggestions(raw: &str) -> Result<Option<Vec<String>>, SuggestionError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(names) = serde_json::from_str::<Vec<String>>(trimmed) {
        return Ok(Some(names));
    }

    ListLiteral::new(raw).parse().map(Some)
}

struct ListLiteral<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
}

impl<'a> ListLiteral<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            len: input.len(),
        }
    }

    fn parse(mut self) -> Result<Vec<String>, SuggestionError> {
        self.skip_whitespace();
        self.expect('[')?;

        let mut names = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some((_, ']')) => {
                    self.chars.next();
                    break;
                }
                Some((pos, quote @ ('\'' | '"'))) => {
                    self.chars.next();
                    names.push(self.string(pos, quote)?);
                }
                Some((pos, c)) => {
                    return Err(SuggestionError::new(pos, format!("expected a quoted string, found {:?}", c)))
                }
                None => return Err(SuggestionError::new(self.len, "unterminated list")),
            }

            self.skip_whitespace();
            match self.chars.next() {
                Some((_, ',')) => continue,
                Some((_, ']')) => break,
                Some((pos, c)) => {
                    return Err(SuggestionError::new(pos, format!("expected ',' or ']', found {:?}", c)))
                }
                None => return Err(SuggestionError::new(self.len, "unterminated list")),
            }
        }

        self.skip_whitespace();
        if let Some((pos, _)) = self.peek() {
            return Err(SuggestionError::new(pos, "unexpected text after list"));
        }

        Ok(names)
    }

    fn string(&mut self, start: usize, quote: char) -> Result<String, SuggestionError> {
        let mut out = String::new();
        while let Some((pos, c)) = self.chars.next() {
            match c {
                '\\' => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, escaped)) => out.push(escaped),
                    None => return Err(SuggestionError::new(pos, "dangling escape")),
                },
                c if c == quote => return Ok(out),
                c => out.push(c),
            }
        }
        Err(SuggestionError::new(start, "unterminated string"))
    }

    fn expect(&mut self, want: char) -> Result<(), SuggestionError> {
        match self.chars.next() {
            Some((_, c)) if c == want => Ok(()),
            Some((pos, c)) => Err(SuggestionError::new(pos, format!("expected {:?}, found {:?}", want, c))),
            None => Err(SuggestionError::new(self.len, format!("expected {:?}", want))),
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_none() {
        assert_eq!(parse_suggestions("").unwrap(), None);
        assert_eq!(parse_suggestions("   ").unwrap(), None);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(parse_suggestions("[]").unwrap(), Some(vec![]));
        assert_eq!(parse_suggestions(" [ ] ").unwrap(), Some(vec![]));
    }

    #[test]
    fn test_json_list() {
        let names = parse_suggestions(r#"["Support for abortion rights", "Support for universal healthcare"]"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            names,
            vec!["Support for abortion rights", "Support for universal healthcare"]
        );
    }

    #[test]
    fn test_python_list_with_mixed_quotes() {
        let raw = r#"['Support for abortion rights', "Support for LGBTQ+ rights and same-sex marriage"]"#;
        let names = parse_suggestions(raw).unwrap().unwrap();
        assert_eq!(
            names,
            vec![
                "Support for abortion rights",
                "Support for LGBTQ+ rights and same-sex marriage"
            ]
        );
    }

    #[test]
    fn test_python_list_escapes_and_trailing_comma() {
        let names = parse_suggestions(r"['it\'s a stance', ]").unwrap().unwrap();
        assert_eq!(names, vec!["it's a stance"]);
    }

    #[test]
    fn test_commas_inside_names_are_kept() {
        let raw = "['Criticism of Joe Biden, Kamala Harris or Democratic Party Leadership']";
        let names = parse_suggestions(raw).unwrap().unwrap();
        assert_eq!(names.len(), 1);
        assert!(names[0].contains("Biden, Kamala"));
    }

    #[test]
    fn test_malformed_lists() {
        assert!(parse_suggestions("Support for abortion rights").is_err());
        assert!(parse_suggestions("['unterminated").is_err());
        assert!(parse_suggestions("['a' 'b']").is_err());
        assert!(parse_suggestions("['a'] extra").is_err());
        assert!(parse_suggestions("[1, 2]").is_err());
    }
}
