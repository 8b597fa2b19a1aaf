//! Line-oriented detection of `from __future__ import` statements.
//!
//! The scanner is a single forward pass over a file's lines. It only needs to
//! recognize the import lead-in, parenthesized continuation lines, and
//! triple-quoted string boundaries; the rest of the file is never tokenized.

/// One physical `__future__` import statement found in a file.
///
/// A statement may span several lines in its parenthesized form. A file may
/// contain more than one (e.g. one before and one after a conditional import
/// block); all of them are reported so the rewriter can merge them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FutureImport {
    /// 1-indexed line containing the lead-in text.
    pub start_line: usize,
    /// 1-indexed line containing the closing parenthesis; equals
    /// `start_line` for single-line statements.
    pub end_line: usize,
    /// Flag names in order of appearance, not deduplicated, not sorted.
    pub flags: Vec<String>,
}

/// Per-line scanner state.
///
/// An explicit enum rather than two booleans: a line is never simultaneously
/// inside a docstring and inside an import continuation, and the `match` on
/// this state keeps that impossible by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Scanning for docstring delimiters and import lead-ins.
    Normal,
    /// Inside a triple-quoted string; lines are skipped verbatim.
    InDocstring,
    /// Inside a parenthesized import; lines accumulate until `)` appears.
    InParens,
}

/// Lazy iterator over the `__future__` imports of a line sequence.
///
/// Single forward pass, not restartable. Construct with [`Scanner::new`] or
/// via the [`scan`] convenience function.
pub struct Scanner<'a, I> {
    lines: I,
    leader: &'a str,
    state: ScanState,
    line_no: usize,
    start_line: usize,
    buffer: Vec<String>,
}

impl<'a, I, S> Scanner<'a, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    /// Creates a scanner over `lines` matching statements that begin with
    /// `leader`.
    pub fn new(lines: I, leader: &'a str) -> Self {
        Self {
            lines,
            leader,
            state: ScanState::Normal,
            line_no: 0,
            start_line: 0,
            buffer: Vec::new(),
        }
    }

    /// Finalizes the accumulated statement into a `FutureImport`.
    ///
    /// Strips the lead-in, then one optional enclosing paren pair, splits on
    /// commas and trims each token. Tokens left empty by a trailing comma are
    /// dropped.
    fn finish(&mut self, end_line: usize) -> FutureImport {
        let text = self.buffer.join("\n");
        self.buffer.clear();

        let rest = text[self.leader.len()..].trim();
        let rest = rest.strip_prefix('(').unwrap_or(rest);
        let rest = rest.strip_suffix(')').unwrap_or(rest);
        let flags = rest
            .split(',')
            .map(|word| word.trim().to_owned())
            .filter(|word| !word.is_empty())
            .collect();

        FutureImport {
            start_line: self.start_line,
            end_line,
            flags,
        }
    }
}

impl<I, S> Iterator for Scanner<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = FutureImport;

    fn next(&mut self) -> Option<FutureImport> {
        while let Some(line) = self.lines.next() {
            self.line_no += 1;
            let line = line.as_ref();

            match self.state {
                ScanState::InDocstring => {
                    // Either delimiter closes the docstring, matching the
                    // single-statement module docstring convention.
                    if is_docstring_delimiter(line) {
                        self.state = ScanState::Normal;
                    }
                }
                ScanState::InParens => {
                    self.buffer.push(line.to_owned());
                    if line.contains(')') {
                        self.state = ScanState::Normal;
                        return Some(self.finish(self.line_no));
                    }
                }
                ScanState::Normal => {
                    if is_docstring_delimiter(line) {
                        self.state = ScanState::InDocstring;
                    } else if line.starts_with(self.leader) {
                        self.start_line = self.line_no;
                        self.buffer.clear();
                        self.buffer.push(line.to_owned());
                        if line.contains('(') && !line.contains(')') {
                            self.state = ScanState::InParens;
                        } else {
                            return Some(self.finish(self.line_no));
                        }
                    }
                }
            }
        }
        // An unterminated parenthesized statement at EOF never emits.
        None
    }
}

/// Scans `source` and collects all `__future__` imports eagerly.
#[must_use]
pub fn scan(source: &str, leader: &str) -> Vec<FutureImport> {
    Scanner::new(source.lines(), leader).collect()
}

/// Whether a line opens or closes a module-level docstring.
///
/// Deliberately naive: only a line *starting* with a triple quote counts.
/// Indented docstrings or delimiters preceded by other tokens on the same
/// physical line are not tracked; anything stricter is a lexer.
fn is_docstring_delimiter(line: &str) -> bool {
    line.starts_with("\"\"\"") || line.starts_with("'''")
}
