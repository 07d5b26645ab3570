use std::sync::Arc;

use crate::namespaces::ModuleIdentifier;
use crate::stmt::{ArgumentValue, Keyword};
use crate::syntax::SourceRef;

/// A statement after inference: declared substatements followed by the ones
/// contributed by reuse, plus the source a linking statement resolved to.
///
/// Substatements are shared: content instantiated by several `uses` is one
/// `Arc` referenced from every site.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStatement {
    pub keyword: Keyword,
    pub argument: ArgumentValue,
    pub raw_argument: Option<String>,
    pub location: SourceRef,
    pub substatements: Vec<Arc<EffectiveStatement>>,
    /// Target of an `import` or `include`; look it up with `SchemaModel::source`.
    pub linked_source: Option<ModuleIdentifier>,
}

impl EffectiveStatement {
    pub fn find(&self, keyword: &Keyword) -> Option<&Arc<EffectiveStatement>> {
        self.substatements.iter().find(|s| s.keyword == *keyword)
    }

    pub fn find_all<'a>(&'a self, keyword: &Keyword) -> impl Iterator<Item = &'a Arc<EffectiveStatement>> + use<'a> {
        let keyword = keyword.clone();
        self.substatements.iter().filter(move |s| s.keyword == keyword)
    }

    /// Substatement with `keyword` whose argument text is `argument`.
    pub fn find_named(&self, keyword: &Keyword, argument: &str) -> Option<&Arc<EffectiveStatement>> {
        self.find_all(keyword).find(|s| s.raw_argument.as_deref() == Some(argument))
    }

    pub fn statement_count(&self) -> usize {
        1 + self.substatements.iter().map(|s| s.statement_count()).sum::<usize>()
    }
}
