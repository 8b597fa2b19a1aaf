//! Canonical serialization of a flag set back into a single import statement.

use rustc_hash::FxHashSet;

/// Renders the canonical `__future__` import statement for `flags`.
///
/// Flags are sorted lexicographically so that the same set always produces
/// the same text: repeated runs over an unchanged tree are byte-identical and
/// version-control diffs stay minimal when the set grows or shrinks.
///
/// If the single-line form fits within `line_length`, it is returned as-is
/// (no parentheses). Otherwise the statement wraps into a parenthesized form
/// with continuation lines aligned under the opening parenthesis. The result
/// never carries trailing whitespace or a trailing newline; the multi-line
/// form embeds `\n` separators.
///
/// A single flag longer than `line_length` still occupies one over-long line;
/// that case is irreducible.
#[must_use]
pub fn canonical_statement(flags: &FxHashSet<String>, leader: &str, line_length: usize) -> String {
    let mut flags: Vec<&str> = flags.iter().map(String::as_str).collect();
    flags.sort_unstable();

    let mut single = format!("{leader}{}", flags.join(", "));
    if flags.is_empty() || single.len() <= line_length {
        // An empty set leaves the lead-in's own trailing space behind.
        single.truncate(single.trim_end().len());
        return single;
    }

    // Parenthesized form: flags flow onto the current line until the next one
    // would overflow, then the line is flushed and a new one starts at the
    // indent column.
    let mut current = format!("{leader}(");
    let indent = " ".repeat(current.len());
    let last_index = flags.len() - 1;

    let mut lines: Vec<String> = Vec::new();
    for (i, flag) in flags.iter().enumerate() {
        let word = if i == last_index {
            format!("{flag})")
        } else {
            format!("{flag}, ")
        };

        if current.len() + word.len() > line_length {
            lines.push(current);
            current = format!("{indent}{word}");
        } else {
            current.push_str(&word);
        }
    }
    lines.push(current);

    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
