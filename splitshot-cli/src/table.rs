//! Plain-text rendering of results.

use itertools::Itertools;
use splitshot::preferences::DEFAULT_SELECTION;
use splitshot::{Centigrams, PatternResult, WeightClass};

const PATTERN_HEADERS: [&str; 4] = ["Shot Pattern", "Total Weight", "Offset Weight", "Variation"];

pub fn format_total(total: Centigrams) -> String {
    format!("{total}g")
}

/// `+0.1g` when heavy, `-0.1g` when light, `-` on target.
pub fn format_offset(offset: Centigrams) -> String {
    match offset.centigrams() {
        0 => "-".to_string(),
        v if v > 0 => format!("+{offset}g"),
        _ => format!("{offset}g"),
    }
}

/// `4686825` -> `4,686,825`.
pub fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let head = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - head) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_patterns(patterns: &[PatternResult]) -> String {
    let rows = patterns
        .iter()
        .map(|p| {
            vec![
                p.shot_pattern.join(", "),
                format_total(p.total_weight_grams),
                format_offset(p.offset_weight_grams),
                p.variation.to_string(),
            ]
        })
        .collect_vec();
    render(&PATTERN_HEADERS, &rows)
}

pub fn render_catalog(classes: &[WeightClass]) -> String {
    let rows = classes
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.to_string(),
                format_total(c.mass),
                if DEFAULT_SELECTION.contains(&c.id) { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect_vec();
    render(&["Id", "Name", "Weight", "Default"], &rows)
}

fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = (0..headers.len())
        .map(|col| rows.iter().map(|r| r[col].chars().count()).chain([headers[col].len()]).max().unwrap_or(0))
        .collect_vec();

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(render_line(headers.iter().copied(), &widths));
    out.push(widths.iter().map(|w| "-".repeat(*w)).join("  "));
    for row in rows {
        out.push(render_line(row.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells.zip(widths).map(|(cell, &width)| format!("{cell:<width$}")).join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_signed() {
        assert_eq!(format_offset(Centigrams::new(10)), "+0.1g");
        assert_eq!(format_offset(Centigrams::new(-25)), "-0.25g");
        assert_eq!(format_offset(Centigrams::ZERO), "-");
        assert_eq!(format_total(Centigrams::new(120)), "1.2g");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(330), "330");
        assert_eq!(group_thousands(4_686), "4,686");
        assert_eq!(group_thousands(46_868), "46,868");
        assert_eq!(group_thousands(4_686_825), "4,686,825");
    }

    #[test]
    fn renders_aligned_table() {
        let patterns = vec![
            PatternResult {
                shot_pattern: vec!["BB".into(), "AAA".into()],
                total_weight_grams: Centigrams::new(120),
                offset_weight_grams: Centigrams::ZERO,
                variation: 2,
            },
            PatternResult {
                shot_pattern: vec!["BB".into(), "BB".into()],
                total_weight_grams: Centigrams::new(80),
                offset_weight_grams: Centigrams::new(-40),
                variation: 1,
            },
        ];
        let table = render_patterns(&patterns);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Shot Pattern  Total Weight  Offset Weight  Variation");
        assert_eq!(lines[2], "BB, AAA       1.2g          -              2");
        assert_eq!(lines[3], "BB, BB        0.8g          -0.4g          1");
    }

    #[test]
    fn catalog_marks_default_sizes() {
        let table = render_catalog(splitshot::catalog());
        let defaults = table.lines().skip(2).filter(|line| line.ends_with("yes")).count();
        assert_eq!(defaults, DEFAULT_SELECTION.len());
        assert!(table.lines().any(|line| line.starts_with("8 ") && line.ends_with("yes")));
        assert!(table.lines().any(|line| line.starts_with("13 ") && line.ends_with("no")));
    }
}
