//! Value normalization utilities.
//!
//! Dropdown values are free text maintained by hand in the master data, so
//! the same make can show up as `"LG Energy"`, `"lg energy"` or
//! `" LG  Energy "`. These helpers compare values the way a person would.

/// Normalize a value for comparison.
///
/// Performs the following transformations:
/// 1. Trims leading/trailing whitespace
/// 2. Converts to lowercase
/// 3. Collapses runs of whitespace into a single space
///
/// # Examples
///
/// ```
/// use assetry_core::util::values::normalize_value;
///
/// assert_eq!(normalize_value("  LG   Energy "), "lg energy");
/// assert_eq!(normalize_value("SG110CX"), "sg110cx");
/// ```
pub fn normalize_value(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// Trim a raw input, returning `None` when nothing is left.
pub fn clean_input(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Find the option matching `input`.
///
/// An exact match wins; otherwise the first option that is equal after
/// [`normalize_value`] is returned.
///
/// # Examples
///
/// ```
/// use assetry_core::util::values::find_option;
///
/// let options = vec!["Sungrow".to_string(), "Huawei".to_string()];
/// assert_eq!(find_option("sungrow ", &options), Some("Sungrow"));
/// assert_eq!(find_option("SMA", &options), None);
/// ```
pub fn find_option<'a>(input: &str, options: &'a [String]) -> Option<&'a str> {
    if let Some(exact) = options.iter().find(|o| o.as_str() == input) {
        return Some(exact.as_str());
    }
    let wanted = normalize_value(input);
    if wanted.is_empty() {
        return None;
    }
    options
        .iter()
        .find(|o| normalize_value(o) == wanted)
        .map(String::as_str)
}
