use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("field pattern compiles"));

/// How formatted values are written back into a data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstitutionMode {
    /// Replace the first textual occurrence of each raw value anywhere in
    /// the line. Matches the historical output, including its misfires when
    /// an earlier column holds the same digits.
    #[default]
    FirstMatch,

    /// Replace exactly the tokens at the located column positions.
    ByField,
}

impl fmt::Display for SubstitutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionMode::FirstMatch => write!(f, "first-match"),
            SubstitutionMode::ByField => write!(f, "by-field"),
        }
    }
}

/// A token of a line together with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Splits `line` into whitespace-delimited tokens, keeping their spans.
pub fn fields(line: &str) -> Vec<Field<'_>> {
    FIELD_RE
        .find_iter(line)
        .map(|m| Field {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Replaces the first occurrence of `raw` in `line` with `formatted`.
pub fn replace_first(line: &str, raw: &str, formatted: &str) -> String {
    line.replacen(raw, formatted, 1)
}

/// Rebuilds `line` with the tokens at the given indices swapped for new text.
/// Everything between tokens is copied byte-for-byte.
pub fn replace_fields(
    line: &str,
    fields: &[Field<'_>],
    replacements: &[(usize, &str)],
) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut cursor = 0;

    for (index, field) in fields.iter().enumerate() {
        let Some(&(_, text)) = replacements.iter().rev().find(|(i, _)| *i == index) else {
            continue;
        };
        out.push_str(&line[cursor..field.start]);
        out.push_str(text);
        cursor = field.end;
    }

    out.push_str(&line[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_spans() {
        let line = "  root   1 init\n";
        let found = fields(line);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], Field { text: "root", start: 2, end: 6 });
        assert_eq!(found[1].text, "1");
        assert_eq!(&line[found[2].start..found[2].end], "init");
    }

    #[test]
    fn test_fields_agree_with_split_whitespace() {
        let line = "a\tbb  c \u{3000}d\n";
        let spans: Vec<&str> = fields(line).iter().map(|f| f.text).collect();
        let words: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(spans, words);
    }

    #[test]
    fn test_replace_first_hits_earliest_match() {
        let line = "1024 x 1024\n";
        assert_eq!(replace_first(line, "1024", "1.0Ki"), "1.0Ki x 1024\n");
    }

    #[test]
    fn test_replace_fields_keeps_spacing() {
        let line = "root  4096    8192 bash\n";
        let found = fields(line);
        let out = replace_fields(line, &found, &[(1, "4.0Ki"), (2, "8.0Ki")]);
        assert_eq!(out, "root  4.0Ki    8.0Ki bash\n");
    }

    #[test]
    fn test_replace_fields_targets_index_not_text() {
        let line = "500 x 500\n";
        let found = fields(line);
        assert_eq!(replace_fields(line, &found, &[(2, "500Bi")]), "500 x 500Bi\n");
    }

    #[test]
    fn test_replace_fields_without_replacements() {
        let line = " a b \n";
        assert_eq!(replace_fields(line, &fields(line), &[]), line);
    }
}
