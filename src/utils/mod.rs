pub mod errors;

/// Formats a float in scientific notation with the given precision
///
/// Used for e-values in delimited output, e.g. `1.00e-50`.
pub fn float_to_sci(val: f64, precision: usize) -> String {
    format!("{:.*e}", precision, val)
}

/// Lowercases a string and strips all whitespace
///
/// Lineage comparisons are whitespace-insensitive and case-insensitive.
pub fn normalize_lineage(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
