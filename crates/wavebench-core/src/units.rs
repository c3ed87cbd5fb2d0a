//! Number formatting for generated simulator input.

/// Format a value the way it is written into generated netlists.
///
/// Produces the shortest representation that round-trips. Magnitudes below
/// `1e-4` or at/above `1e16` use scientific notation with a signed exponent
/// of at least two digits (`3e-09`, `1e+20`); everything else keeps at least
/// one fractional digit (`1.2`, `25.0`).
pub fn format_number(value: f64) -> String {
    let shortest = format!("{:?}", value);

    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => shortest,
    }
}

/// Format a list of values separated by single spaces.
pub fn format_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(" ")
}
