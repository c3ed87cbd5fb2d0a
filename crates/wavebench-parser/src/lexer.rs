//! Lexer for the trailing tokens of a `.subckt` header.
//!
//! The tail is split on runs of commas and whitespace. One leading `(`/`[`
//! and one trailing `)`/`]` are stripped from every token, and tokens left
//! empty are dropped.

/// Token types for a subcircuit header tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare word: a pin name or a positional parameter name.
    Word(String),
    /// `name=value` parameter assignment.
    Assignment { name: String, value: String },
    /// The `params:` separator, in its original spelling.
    ParamsMarker(String),
}

impl Token {
    /// Classify one already-split, bracket-stripped token.
    pub fn classify(text: &str) -> Self {
        if text.eq_ignore_ascii_case("params:") {
            Token::ParamsMarker(text.to_string())
        } else if let Some((name, value)) = text.split_once('=') {
            Token::Assignment {
                name: name.to_string(),
                value: value.to_string(),
            }
        } else {
            Token::Word(text.to_string())
        }
    }

    /// The name this token contributes as a pin or parameter.
    pub fn name(&self) -> &str {
        match self {
            Token::Word(w) => w,
            Token::Assignment { name, .. } => name,
            Token::ParamsMarker(m) => m,
        }
    }
}

/// Lexer over a header tail.
pub struct Lexer<'a> {
    rest: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given tail.
    pub fn new(tail: &'a str) -> Self {
        Self { rest: tail }
    }

    /// Tokenize the entire tail.
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    fn next_raw(&mut self) -> Option<&'a str> {
        let start = self.rest.trim_start_matches(is_separator);
        if start.is_empty() {
            self.rest = start;
            return None;
        }
        let end = start.find(is_separator).unwrap_or(start.len());
        let (raw, rest) = start.split_at(end);
        self.rest = rest;
        Some(raw)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let raw = self.next_raw()?;
            let text = strip_brackets(raw);
            if !text.is_empty() {
                return Some(Token::classify(text));
            }
        }
    }
}

/// Tokenize a header tail.
pub fn tokenize(tail: &str) -> Vec<Token> {
    Lexer::new(tail).tokenize()
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

fn strip_brackets(raw: &str) -> &str {
    let s = raw.strip_prefix(['(', '[']).unwrap_or(raw);
    s.strip_suffix([')', ']']).unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tail: &str) -> Vec<String> {
        tokenize(tail).iter().map(|t| t.name().to_string()).collect()
    }

    #[test]
    fn test_whitespace_and_commas() {
        assert_eq!(words("Y A,B ,, VDD\tVSS"), ["Y", "A", "B", "VDD", "VSS"]);
    }

    #[test]
    fn test_brackets_stripped_once() {
        assert_eq!(words("(A B)"), ["A", "B"]);
        assert_eq!(words("[A] ((B))"), ["A", "(B)"]);
        assert_eq!(words("( A Y )"), ["A", "Y"]);
    }

    #[test]
    fn test_empty_tail() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,  ").is_empty());
        assert!(tokenize("() [ ]").is_empty());
    }

    #[test]
    fn test_classification() {
        let tokens = tokenize("A PARAMS: W=1u l");
        assert_eq!(
            tokens,
            vec![
                Token::Word("A".into()),
                Token::ParamsMarker("PARAMS:".into()),
                Token::Assignment {
                    name: "W".into(),
                    value: "1u".into(),
                },
                Token::Word("l".into()),
            ]
        );
    }

    #[test]
    fn test_assignment_keeps_everything_after_first_equals() {
        let tokens = tokenize("K=a=b");
        assert_eq!(
            tokens[0],
            Token::Assignment {
                name: "K".into(),
                value: "a=b".into(),
            }
        );
    }
}
