//! Header rewriting.
//!
//! Headers whose parameters are only implied (assignments mixed into the pin
//! list, or trailing names after the supplies) are re-emitted with an
//! explicit `PARAMS:` section so the simulator does not read sizing names as
//! extra pins.

use std::borrow::Cow;

use wavebench_core::AliasSets;

use crate::lexer::tokenize;
use crate::scanner::{HeaderLine, classify, match_header};

/// Default values for well-known device sizing parameters.
pub const PARAM_DEFAULTS: &[(&str, &str)] = &[
    ("WP", "2e-6"),
    ("WN", "1e-6"),
    ("W", "1e-6"),
    ("L", "1e-6"),
    ("M", "1"),
    ("NF", "1"),
    ("AD", "0"),
    ("AS", "0"),
    ("PD", "0"),
    ("PS", "0"),
];

/// Default for a parameter name, matched case-insensitively; `0` if unknown.
pub fn param_default(name: &str) -> &'static str {
    PARAM_DEFAULTS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map_or("0", |(_, value)| value)
}

/// Rewrite every `.subckt` header that lacks an explicit `params:` marker.
///
/// Non-header lines pass through unchanged and lines are joined with `\n`.
pub fn rewrite(document: &str, aliases: &AliasSets) -> String {
    document
        .lines()
        .map(|line| match match_header(line) {
            Some(header) => rewrite_header(line, header, aliases),
            None => Cow::Borrowed(line),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn rewrite_header<'a>(line: &'a str, header: HeaderLine<'_>, aliases: &AliasSets) -> Cow<'a, str> {
    if has_params_prefix(header.tail) {
        return Cow::Borrowed(line);
    }
    let split = classify(&tokenize(header.tail), aliases);
    if split.explicit_params {
        return Cow::Borrowed(line);
    }

    let mut out = format!(".SUBCKT {} {}", header.name, split.pins.join(" "));
    if !split.params.is_empty() {
        out.push_str(" PARAMS:");
        for name in &split.params {
            out.push(' ');
            out.push_str(name);
            out.push('=');
            out.push_str(param_default(name));
        }
    }
    log::debug!("rewrote header {:?} -> {:?}", line.trim(), out);
    Cow::Owned(out)
}

/// A token starting with `params:`, including the glued `params:W=1u` form.
fn has_params_prefix(tail: &str) -> bool {
    tail.split(|c: char| c == ',' || c.is_whitespace())
        .map(|tok| tok.trim_start_matches(['(', '[']))
        .any(|tok| {
            tok.get(..7)
                .is_some_and(|head| head.eq_ignore_ascii_case("params:"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_default_lookup() {
        assert_eq!(param_default("wp"), "2e-6");
        assert_eq!(param_default("NF"), "1");
        assert_eq!(param_default("mult"), "0");
    }

    #[test]
    fn test_positional_params_get_defaults() {
        let out = rewrite(".subckt NAND2 Y A B VDD VSS WP WN", &AliasSets::default());
        assert_eq!(out, ".SUBCKT NAND2 Y A B VDD VSS PARAMS: WP=2e-6 WN=1e-6");
    }

    #[test]
    fn test_assignment_values_replaced_by_defaults() {
        let out = rewrite(".subckt INV A Y VDD VSS w=3u foo=1", &AliasSets::default());
        assert_eq!(out, ".SUBCKT INV A Y VDD VSS PARAMS: w=1e-6 foo=0");
    }

    #[test]
    fn test_explicit_marker_untouched() {
        let line = "  .subckt INV A Y VDD VSS params: W=3u";
        assert_eq!(rewrite(line, &AliasSets::default()), line);
    }

    #[test]
    fn test_plain_header_normalized() {
        let doc = "* inv\n.subckt inv (a, y, vdd, gnd)\nM1 y a vdd vdd p\n.ends\n";
        let out = rewrite(doc, &AliasSets::default());
        assert_eq!(out, "* inv\n.SUBCKT inv a y vdd gnd\nM1 y a vdd vdd p\n.ends");
    }

    #[test]
    fn test_glued_params_marker_left_unchanged() {
        let aliases = AliasSets::default();
        for line in [
            ".subckt INV A Y VDD VSS params:W=1u",
            ".SUBCKT INV A Y VDD VSS PARAMS:W=1u L=0.1u",
            ".subckt INV A Y VDD VSS (Params:W=1u)",
        ] {
            assert_eq!(rewrite(line, &aliases), line);
        }
        assert_eq!(
            rewrite(".subckt INV A Y VDD VSS myparams:W", &aliases),
            ".SUBCKT INV A Y VDD VSS PARAMS: myparams:W=0"
        );
    }
}
