use std::collections::{HashMap, HashSet};

use super::NumericLocale;
use crate::model::fold_name;

/// Split one line on commas outside double quotes.
///
/// A quote anywhere toggles quoting and `""` inside quotes is a literal
/// quote. Quote state never carries over to the next line.
pub(super) fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

/// Strip one pair of wrapping double quotes, as left behind by doubled quoting
/// such as `"""Temp"""`.
pub(super) fn strip_wrapping_quotes(name: &str) -> &str {
    if name.len() >= 2 && name.starts_with('"') && name.ends_with('"') {
        name.trim_matches('"')
    } else {
        name
    }
}

/// Turn raw header names into unique column names.
///
/// Empty names become `Unnamed_{position}`. A repeated name (ignoring case)
/// gets `_1`, `_2`, ... appended; the counter skips suffixes that are already
/// taken so the result is always unique.
pub(super) fn normalize_column_names(raw: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(raw.len());

    for (i, raw_name) in raw.iter().enumerate() {
        let trimmed = strip_wrapping_quotes(raw_name.trim());
        let base = if trimmed.trim().is_empty() {
            format!("Unnamed_{i}")
        } else {
            trimmed.to_string()
        };

        let mut name = base.clone();
        if taken.contains(&fold_name(&name)) {
            let counter = counters.entry(fold_name(&base)).or_insert(0);
            loop {
                *counter += 1;
                name = format!("{base}_{counter}");
                if !taken.contains(&fold_name(&name)) {
                    break;
                }
            }
        }

        taken.insert(fold_name(&name));
        names.push(name);
    }

    names
}

/// Unit from the first `(...)` group, e.g. `Sample Temp (Kelvin)` -> `Kelvin`
pub(super) fn extract_unit(raw_name: &str) -> Option<String> {
    let start = raw_name.find('(')?;
    let end = raw_name[start + 1..].find(')')? + start + 1;
    let unit = raw_name[start + 1..end].trim();
    (!unit.is_empty()).then(|| unit.to_string())
}

/// Parse a cell as a number: invariant format first, then the locale fallback.
///
/// Infinity must be spelled out: a bare `inf` stays text. Overflow such as
/// `1e999` reads as infinity.
pub(super) fn parse_number(raw: &str, locale: NumericLocale) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let value = parse_invariant(s).or_else(|| match locale {
        NumericLocale::Invariant => None,
        NumericLocale::DecimalComma => parse_decimal_comma(s),
    })?;
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    (!unsigned.eq_ignore_ascii_case("inf")).then_some(value)
}

fn parse_invariant(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .or_else(|| strip_group_separators(s, ',', '.').and_then(|c| c.parse().ok()))
}

fn parse_decimal_comma(s: &str) -> Option<f64> {
    let ungrouped = strip_group_separators(s, '.', ',').unwrap_or_else(|| s.to_string());
    ungrouped.replacen(',', ".", 1).parse().ok()
}

/// Remove group separators from the integer part of a number.
///
/// Returns `None` when there is nothing to strip or a separator appears after
/// the decimal point or exponent.
fn strip_group_separators(s: &str, group: char, decimal: char) -> Option<String> {
    let int_end = s
        .find(|c: char| c == decimal || c == 'e' || c == 'E')
        .unwrap_or(s.len());
    let (int_part, rest) = s.split_at(int_end);
    if !int_part.contains(group) || rest.contains(group) {
        return None;
    }
    let digits = int_part.trim_start_matches(['+', '-']);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(
        int_part
            .chars()
            .filter(|&c| c != group)
            .chain(rest.chars())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        let raw: Vec<String> = raw.iter().map(|s| s.to_string()).collect();
        normalize_column_names(&raw)
    }

    #[test]
    fn test_duplicate_names_count_from_one() {
        assert_eq!(names(&["A", "A", "B"]), vec!["A", "A_1", "B"]);
        assert_eq!(names(&["A", "a", "A"]), vec!["A", "a_1", "A_2"]);
    }

    #[test]
    fn test_generated_suffix_never_collides() {
        assert_eq!(names(&["A", "A_1", "A"]), vec!["A", "A_1", "A_2"]);
        assert_eq!(names(&["A_1", "A", "A"]), vec!["A_1", "A", "A_2"]);
    }

    #[test]
    fn test_empty_names_are_synthesized() {
        assert_eq!(
            names(&["Time", "", "  ", "\"\""]),
            vec!["Time", "Unnamed_1", "Unnamed_2", "Unnamed_3"]
        );
    }

    #[test]
    fn test_wrapping_quotes_stripped() {
        assert_eq!(names(&[" \"Temp (K)\" "]), vec!["Temp (K)"]);
    }

    #[test]
    fn test_extract_unit() {
        assert_eq!(extract_unit("Sample Temp (Kelvin)"), Some("Kelvin".to_string()));
        assert_eq!(extract_unit("Samp HC (J/mole-K)"), Some("J/mole-K".to_string()));
        assert_eq!(
            extract_unit("Samp HC/Temp (J/mole-K/K) (raw)"),
            Some("J/mole-K/K".to_string())
        );
        assert_eq!(extract_unit("Comment"), None);
        assert_eq!(extract_unit("Broken (unit"), None);
        assert_eq!(extract_unit("Empty ()"), None);
    }

    #[test]
    fn test_parse_number_invariant() {
        let inv = NumericLocale::Invariant;
        assert_eq!(parse_number("1.5", inv), Some(1.5));
        assert_eq!(parse_number(" -2.5E-3 ", inv), Some(-2.5e-3));
        assert_eq!(parse_number("+7", inv), Some(7.0));
        assert_eq!(parse_number("1,234.5", inv), Some(1234.5));
        assert_eq!(parse_number("", inv), None);
        assert_eq!(parse_number("abc", inv), None);
        assert_eq!(parse_number(",5", inv), None);
        assert_eq!(parse_number("1.234,5", inv), None);
    }

    #[test]
    fn test_parse_number_special_values() {
        let inv = NumericLocale::Invariant;
        assert!(parse_number("NaN", inv).map_or(false, f64::is_nan));
        assert!(parse_number("nan", inv).map_or(false, f64::is_nan));
        assert_eq!(parse_number("Infinity", inv), Some(f64::INFINITY));
        assert_eq!(parse_number("-Infinity", inv), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("inf", inv), None);
        assert_eq!(parse_number("-inf", NumericLocale::DecimalComma), None);
        assert_eq!(parse_number("1e999", inv), Some(f64::INFINITY));
    }

    #[test]
    fn test_split_line_quotes() {
        assert_eq!(split_line("a,b,,c"), vec!["a", "b", "", "c"]);
        assert_eq!(split_line(""), vec![""]);
        assert_eq!(split_line("\"1,5\",2"), vec!["1,5", "2"]);
        assert_eq!(split_line("\"say \"\"hi\"\"\",x"), vec!["say \"hi\"", "x"]);
        // mid-field quotes toggle quoting too
        assert_eq!(split_line("x\"y,z\"w,1"), vec!["xy,zw", "1"]);
        // an unbalanced quote runs to the end of the line only
        assert_eq!(split_line("\"open,1"), vec!["open,1"]);
    }

    #[test]
    fn test_parse_number_decimal_comma_fallback() {
        let dc = NumericLocale::DecimalComma;
        assert_eq!(parse_number("1.234,5", dc), Some(1234.5));
        assert_eq!(parse_number("1.000,25", dc), Some(1000.25));
        // Invariant grouping still wins when it applies
        assert_eq!(parse_number("3,5", dc), Some(35.0));
        assert_eq!(parse_number("n/a", dc), None);
    }
}
