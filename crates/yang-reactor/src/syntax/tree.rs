use std::fmt;
use std::sync::Arc;

/// Source location attached to every statement for error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRef {
    /// File name or other identifier of the source. Shared by every statement of one file.
    pub source: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl SourceRef {
    pub fn new(source: impl Into<Arc<str>>, line: usize, column: usize) -> Self {
        Self { source: source.into(), line, column }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

// ─── Raw statement ────────────────────────────────────────────────────────────

/// One `keyword [argument] { children }` node as produced by the grammar layer.
///
/// Nothing here is validated: keywords are plain text and arguments are the
/// literal (unquoted) argument string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement {
    pub keyword: String,
    pub argument: Option<String>,
    pub children: Vec<RawStatement>,
    pub location: SourceRef,
}

impl RawStatement {
    pub fn new(keyword: impl Into<String>, argument: Option<&str>, location: SourceRef) -> Self {
        Self {
            keyword: keyword.into(),
            argument: argument.map(str::to_owned),
            children: Vec::new(),
            location,
        }
    }

    /// Append a child, builder style.
    pub fn with_child(mut self, child: RawStatement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = RawStatement>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of statements in this subtree, including `self`.
    pub fn statement_count(&self) -> usize {
        1 + self.children.iter().map(RawStatement::statement_count).sum::<usize>()
    }
}
