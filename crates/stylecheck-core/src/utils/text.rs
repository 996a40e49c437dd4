//! Line and column computation over source text.

/// Tab width used when none is configured.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Maps byte offsets of a source text to 1-based lines and tab-expanded
/// 1-based columns.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
    tab_width: usize,
}

impl<'a> LineIndex<'a> {
    /// Indexes `source`. A zero tab width is treated as 1.
    #[must_use]
    pub fn new(source: &'a str, tab_width: usize) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            source,
            line_starts,
            tab_width: tab_width.max(1),
        }
    }

    /// Number of lines in the source.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the 1-based line containing `offset`.
    #[must_use]
    pub fn line(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// Returns the 1-based (line, column) of `offset`, columns tab expanded.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line(offset);
        let start = self.line_starts[line - 1];
        let end = offset.min(self.source.len());
        let prefix = self.source.get(start..end).unwrap_or("");
        (line, expanded_column(prefix, self.tab_width))
    }
}

/// Returns the 1-based column reached after `prefix`, expanding tabs to the
/// next multiple of `tab_width`.
#[must_use]
pub fn expanded_column(prefix: &str, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let width = prefix.chars().fold(0, |col, ch| {
        if ch == '\t' {
            (col / tab_width + 1) * tab_width
        } else {
            col + 1
        }
    });
    width + 1
}
