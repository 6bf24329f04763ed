//! # Table scanner
//!
//! TriStar exports are plain text reports where every table is preceded by a few header lines,
//! for example
//! ```text
//!    -  Adsorption
//! Relative Pressure (p/p°)   Quantity Adsorbed (cm³/g STP)
//!      0.0512                    45.1234
//!      0.0786                    48,5521
//! ```
//! A table is located by a `TableAnchor`: an ordered list of phrases, each with alternative spellings,
//! matched case-insensitively on text with collapsed whitespace. The phrases may be spread over several
//! header lines. After the header, lines without digits (units) are skipped and every line holding
//! exactly two numbers is a row. The table ends at the first line that is not a row.
use crate::Sorption::sorption_errors::SorptionError;
use log::debug;

/// how many lines the header of one table may span
const MAX_HEADER_LINES: usize = 12;
/// how many unit lines may separate the header from the first row
const MAX_UNIT_LINES: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct TableAnchor {
    /// name used in diagnostics
    pub name: &'static str,
    /// phrases in the order they appear in the header, each with alternative spellings (lower case)
    pub phrases: &'static [&'static [&'static str]],
    /// only whitespace may separate consecutive phrases
    pub contiguous: bool,
}

impl TableAnchor {
    pub const fn new(name: &'static str, phrases: &'static [&'static [&'static str]]) -> Self {
        Self {
            name,
            phrases,
            contiguous: false,
        }
    }

    pub const fn contiguous(mut self) -> Self {
        self.contiguous = true;
        self
    }
}

/// lower case and collapse all runs of whitespace to one space
fn normalize(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// position and length of the earliest alternative found at or after `from`
fn find_any(haystack: &str, from: usize, alternatives: &[&str]) -> Option<(usize, usize)> {
    alternatives
        .iter()
        .filter_map(|alt| haystack[from..].find(alt).map(|pos| (from + pos, alt.len())))
        .min_by_key(|(pos, _)| *pos)
}

/// Parses a number as printed by the instrument: starts with a digit, '.' or ',' as decimal separator,
/// optional exponent.
pub fn parse_number(token: &str) -> Option<f64> {
    let first = token.chars().next()?;
    if !first.is_ascii_digit() {
        return None;
    }
    if !token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | 'e' | 'E' | '-' | '+'))
    {
        return None;
    }
    token.replace(',', ".").parse::<f64>().ok()
}

/// a row is a line with exactly two numbers
pub fn parse_row(line: &str) -> Option<(f64, f64)> {
    let mut tokens = line.split_whitespace();
    let x = parse_number(tokens.next()?)?;
    let y = parse_number(tokens.next()?)?;
    if tokens.next().is_some() {
        return None;
    }
    Some((x, y))
}

/// Checks that the header starting at line `start` contains all phrases of the anchor.
/// Returns the index of the first line after the header.
fn match_header(lines: &[&str], start: usize, anchor: &TableAnchor) -> Option<usize> {
    let mut header = normalize(lines[start]);
    let (pos, len) = find_any(&header, 0, anchor.phrases[0])?;
    let mut cursor = pos + len;
    let mut phrase_idx = 1;
    let mut line_idx = start;
    loop {
        while phrase_idx < anchor.phrases.len() {
            match find_any(&header, cursor, anchor.phrases[phrase_idx]) {
                Some((p, l)) => {
                    if anchor.contiguous && !header[cursor..p].trim().is_empty() {
                        return None;
                    }
                    cursor = p + l;
                    phrase_idx += 1;
                }
                None => break,
            }
        }
        if phrase_idx == anchor.phrases.len() {
            return Some(line_idx + 1);
        }
        if anchor.contiguous && !header[cursor..].trim().is_empty() {
            return None;
        }
        line_idx += 1;
        if line_idx >= lines.len()
            || line_idx - start > MAX_HEADER_LINES
            || parse_row(lines[line_idx]).is_some()
        {
            return None;
        }
        header.push(' ');
        header.push_str(&normalize(lines[line_idx]));
    }
}

/// collects the rows that follow a header
fn collect_rows(lines: &[&str]) -> Vec<(f64, f64)> {
    let mut rows = Vec::new();
    let mut unit_lines = 0;
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_row(trimmed) {
            Some(row) => rows.push(row),
            None if rows.is_empty()
                && unit_lines < MAX_UNIT_LINES
                && !trimmed.chars().any(|c| c.is_ascii_digit()) =>
            {
                unit_lines += 1;
            }
            None => break,
        }
    }
    rows
}

/// Finds the first table matching the anchor and returns its rows.
/// Anchor candidates without rows are skipped; if no candidate yields rows `SorptionError::NotFound` is returned.
pub fn find_table(text: &str, anchor: &TableAnchor) -> Result<Vec<(f64, f64)>, SorptionError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut from = 0;
    while let Some(start) = (from..lines.len())
        .find(|&i| find_any(&normalize(lines[i]), 0, anchor.phrases[0]).is_some())
    {
        if let Some(body) = match_header(&lines, start, anchor) {
            let rows = collect_rows(&lines[body..]);
            if !rows.is_empty() {
                debug!(
                    "{}: {} rows found after line {}",
                    anchor.name,
                    rows.len(),
                    start + 1
                );
                return Ok(rows);
            }
        }
        from = start + 1;
    }
    Err(SorptionError::not_found(anchor.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISO: TableAnchor = TableAnchor::new(
        "Adsorption isotherm",
        &[&["- adsorption"], &["relative pressure"]],
    )
    .contiguous();

    const CUM: TableAnchor = TableAnchor::new(
        "BJH Adsorption Cumulative Pore Area",
        &[
            &["bjh adsorption cumulative"],
            &["pore width (nm)", "pore diameter (nm)"],
            &["pore area (m"],
        ],
    );

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("0.125"), Some(0.125));
        assert_eq!(parse_number("45,5"), Some(45.5));
        assert_eq!(parse_number("1.5e-3"), Some(0.0015));
        assert_eq!(parse_number("12"), Some(12.0));
        assert_eq!(parse_number("-1.0"), None);
        assert_eq!(parse_number("m²/g"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_parse_row() {
        assert_eq!(parse_row("  0.1   50.2 "), Some((0.1, 50.2)));
        assert_eq!(parse_row("0,1\t50,2"), Some((0.1, 50.2)));
        assert_eq!(parse_row("0.1 50.2 3.0"), None);
        assert_eq!(parse_row("0.1"), None);
        assert_eq!(parse_row("Relative Pressure 0.1"), None);
    }

    #[test]
    fn test_isotherm_table_with_units_and_blank_lines() {
        let text = "Isotherm Tabular Report\n\
                    \n\
                       -  Adsorption\n\
                    Relative Pressure (p/p°)\n\
                    Quantity Adsorbed (cm³/g STP)\n\
                    \n\
                    0.0512   45.1234\n\
                    \n\
                    0.0786   48,5521\n\
                    0.1021   50.0\n\
                    Summary Report\n\
                    0.5 0.5\n";
        let rows = find_table(text, &ISO).unwrap();
        assert_eq!(rows, vec![(0.0512, 45.1234), (0.0786, 48.5521), (0.1021, 50.0)]);
    }

    #[test]
    fn test_header_on_one_line() {
        let text = "- Adsorption Relative Pressure (p/p°) Quantity Adsorbed (cm³/g STP)\n0.2 60\n0.3 70\n";
        let rows = find_table(text, &ISO).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_contiguous_anchor_rejects_text_between_phrases() {
        let text = "- Adsorption\nsome comment\nRelative Pressure\n0.2 60\n";
        assert!(find_table(text, &ISO).unwrap_err().is_not_found());
    }

    #[test]
    fn test_anchor_without_rows_is_not_found() {
        let text = "- Adsorption\nRelative Pressure (p/p°)\nno data collected 1\n";
        let err = find_table(text, &ISO).unwrap_err();
        assert_eq!(err, SorptionError::not_found("Adsorption isotherm"));
    }

    #[test]
    fn test_skips_candidate_and_finds_next() {
        // the first "cumulative" section is the pore volume table, its header has no "pore area"
        let text = "BJH Adsorption Cumulative Pore Volume\n\
                    Pore Width (nm)\n\
                    Pore Volume (cm³/g)\n\
                    100.0 0.01\n\
                    50.0 0.02\n\
                    \n\
                    BJH Adsorption Cumulative Pore Area\n\
                    Pore Diameter (nm)\n\
                    Pore Area (m²/g)\n\
                    100.0 1.5\n\
                    50.0 3.5\n";
        let rows = find_table(text, &CUM).unwrap();
        assert_eq!(rows, vec![(100.0, 1.5), (50.0, 3.5)]);
    }

    #[test]
    fn test_missing_anchor() {
        assert!(find_table("nothing here\n1 2\n", &ISO).is_err());
    }
}
