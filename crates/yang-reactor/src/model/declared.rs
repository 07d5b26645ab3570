use crate::stmt::{ArgumentValue, Keyword};
use crate::syntax::SourceRef;

/// A statement exactly as written: literal substatements only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclaredStatement {
    pub keyword: Keyword,
    pub argument: ArgumentValue,
    pub raw_argument: Option<String>,
    pub location: SourceRef,
    pub substatements: Vec<DeclaredStatement>,
}

impl DeclaredStatement {
    /// First direct substatement with `keyword`.
    pub fn find(&self, keyword: &Keyword) -> Option<&DeclaredStatement> {
        self.substatements.iter().find(|s| s.keyword == *keyword)
    }

    pub fn find_all<'a>(&'a self, keyword: &Keyword) -> impl Iterator<Item = &'a DeclaredStatement> + use<'a> {
        let keyword = keyword.clone();
        self.substatements.iter().filter(move |s| s.keyword == keyword)
    }

    /// Total statements in this subtree, including `self`.
    pub fn statement_count(&self) -> usize {
        1 + self.substatements.iter().map(DeclaredStatement::statement_count).sum::<usize>()
    }
}
