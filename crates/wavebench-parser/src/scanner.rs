//! `.subckt` header scanning.
//!
//! A header line is `.subckt <name> <tail>` (keyword case-insensitive, any
//! leading whitespace). The tail is lexed into [`Token`]s and classified
//! into pins and parameter names:
//!
//! 1. A `params:` marker splits pins (before) from parameters (after).
//! 2. Without a marker every token is a pin candidate.
//! 3. Pin candidates of the form `name=value` become parameters.
//! 4. If no parameter was found, everything after the last supply-aliased
//!    pin is taken as positional parameters.
//! 5. Both lists are de-duplicated in first-seen order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wavebench_core::AliasSets;

use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token, tokenize};

const KEYWORD: &str = ".subckt";

/// One subcircuit header found in a netlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcktDefinition {
    pub name: String,
    /// Connection pins in declaration order.
    pub pins: Vec<String>,
    /// Parameter names, without values.
    pub params: Vec<String>,
}

impl SubcktDefinition {
    pub fn summary(&self) -> SubcktSummary {
        SubcktSummary {
            name: self.name.clone(),
            pins: self.pins.clone(),
        }
    }
}

/// The `{name, pins}` view returned to callers of [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcktSummary {
    pub name: String,
    pub pins: Vec<String>,
}

/// Classified header tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSplit {
    pub pins: Vec<String>,
    pub params: Vec<String>,
    /// Whether the tail carried an explicit `params:` marker.
    pub explicit_params: bool,
}

/// A matched header line, borrowing from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderLine<'a> {
    pub name: &'a str,
    pub tail: &'a str,
}

/// Match a `.subckt` header line.
pub(crate) fn match_header(line: &str) -> Option<HeaderLine<'_>> {
    let line = line.trim_start();
    if !line.get(..KEYWORD.len())?.eq_ignore_ascii_case(KEYWORD) {
        return None;
    }
    let rest = &line[KEYWORD.len()..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let name_end = rest.find(char::is_whitespace)?;
    let (name, after) = rest.split_at(name_end);

    // The name must be followed by whitespace and at least one more character.
    let mut chars = after.chars();
    chars.next();
    if chars.as_str().is_empty() {
        return None;
    }

    Some(HeaderLine {
        name,
        tail: after.trim(),
    })
}

/// Classify a lexed header tail into pins and parameters.
pub fn classify(tokens: &[Token], aliases: &AliasSets) -> HeaderSplit {
    let marker = tokens
        .iter()
        .position(|t| matches!(t, Token::ParamsMarker(_)));
    let (pin_tokens, param_tokens) = match marker {
        Some(i) => (&tokens[..i], &tokens[i + 1..]),
        None => (tokens, &[][..]),
    };

    let mut params: Vec<&str> = param_tokens.iter().map(Token::name).collect();
    let mut pins: Vec<&str> = Vec::with_capacity(pin_tokens.len());
    for token in pin_tokens {
        match token {
            Token::Assignment { name, .. } => params.push(name),
            other => pins.push(other.name()),
        }
    }

    if params.is_empty()
        && let Some(k) = pins.iter().rposition(|p| aliases.is_supply(p))
        && k + 1 < pins.len()
    {
        log::debug!(
            "treating {:?} as positional parameters after supply pin {}",
            &pins[k + 1..],
            pins[k]
        );
        params = pins.split_off(k + 1);
    }

    let pins = dedupe(pins, &HashSet::new());
    let taken: HashSet<&str> = pins.iter().map(String::as_str).collect();
    let params = dedupe(params, &taken);

    HeaderSplit {
        pins,
        params,
        explicit_params: marker.is_some(),
    }
}

/// Split raw header tail tokens into `(pins, params)`.
///
/// Each input string is lexed, so callers may pass either a single tail or
/// tokens already split on whitespace.
pub fn split_header<S: AsRef<str>>(
    tail_tokens: &[S],
    aliases: &AliasSets,
) -> (Vec<String>, Vec<String>) {
    let tokens: Vec<Token> = tail_tokens
        .iter()
        .flat_map(|t| Lexer::new(t.as_ref()))
        .collect();
    let split = classify(&tokens, aliases);
    (split.pins, split.params)
}

/// Find every subcircuit header in a netlist, in document order.
///
/// Never fails; lines that are not headers are ignored.
pub fn scan(document: &str, aliases: &AliasSets) -> Vec<SubcktDefinition> {
    document
        .lines()
        .filter_map(match_header)
        .map(|header| {
            let split = classify(&tokenize(header.tail), aliases);
            log::debug!(
                "subckt {}: pins={:?} params={:?}",
                header.name,
                split.pins,
                split.params
            );
            SubcktDefinition {
                name: header.name.to_string(),
                pins: split.pins,
                params: split.params,
            }
        })
        .collect()
}

/// Scan a user-supplied netlist, rejecting input with nothing to analyze.
pub fn analyze(document: &str, aliases: &AliasSets) -> Result<Vec<SubcktSummary>> {
    if document.trim().is_empty() {
        return Err(Error::MalformedInput("empty netlist".into()));
    }
    let definitions = scan(document, aliases);
    if definitions.is_empty() {
        return Err(Error::MalformedInput("no .subckt found in netlist".into()));
    }
    Ok(definitions.iter().map(SubcktDefinition::summary).collect())
}

fn dedupe(names: Vec<&str>, exclude: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|n| !n.is_empty() && !exclude.contains(n) && seen.insert(*n))
        .map(str::to_string)
        .collect()
}
