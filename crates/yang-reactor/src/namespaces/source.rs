//! Namespaces that link source files to each other.

use std::fmt;

use chrono::NaiveDate;

use crate::reactor::{ContextTree, CtxId};
use crate::stmt::Keyword;
use super::{Namespace, ScopeKind};

/// Identity of a source file: its name plus an optional revision date.
///
/// A missing revision is a key of its own, never equal to any dated one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleIdentifier {
    pub name: String,
    pub revision: Option<NaiveDate>,
}

impl ModuleIdentifier {
    pub fn new(name: impl Into<String>, revision: Option<NaiveDate>) -> Self {
        Self { name: name.into(), revision }
    }

    /// Identity a root statement publishes: its name and the latest of its
    /// `revision` dates.
    pub fn of_root(tree: &ContextTree, root: CtxId) -> Self {
        let ctx = tree.get(root);
        let revision = ctx
            .declared_substatements()
            .iter()
            .map(|&child| tree.get(child))
            .filter(|child| *child.keyword() == Keyword::Revision)
            .filter_map(|child| child.argument().as_date())
            .max();
        Self::new(ctx.raw_argument().unwrap_or_default(), revision)
    }

    /// Identity named by an `import`/`include`: its argument plus the first
    /// `revision-date` substatement.
    pub fn referenced_by(tree: &ContextTree, stmt: CtxId) -> Self {
        let revision = tree
            .first_argument(stmt, &Keyword::RevisionDate)
            .and_then(|arg| arg.as_date());
        Self::new(tree.get(stmt).raw_argument().unwrap_or_default(), revision)
    }
}

impl fmt::Display for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.revision {
            Some(date) => write!(f, "{}@{}", self.name, date.format("%Y-%m-%d")),
            None => f.write_str(&self.name),
        }
    }
}

// ─── Namespaces ───────────────────────────────────────────────────────────────

/// Every loaded root (module or submodule) by identity.
pub struct SourceNamespace;

impl Namespace for SourceNamespace {
    type Key = ModuleIdentifier;
    type Value = CtxId;
    const NAME: &'static str = "source namespace";
    const SCOPE: ScopeKind = ScopeKind::Global;
}

/// Roots included by this root.
pub struct IncludedModuleContext;

impl Namespace for IncludedModuleContext {
    type Key = ModuleIdentifier;
    type Value = CtxId;
    const NAME: &'static str = "included module context";
    const SCOPE: ScopeKind = ScopeKind::Root;
}

/// `include` argument → resolved identity.
pub struct IncludedSubmoduleNameToIdentifier;

impl Namespace for IncludedSubmoduleNameToIdentifier {
    type Key = String;
    type Value = ModuleIdentifier;
    const NAME: &'static str = "included submodule name";
    const SCOPE: ScopeKind = ScopeKind::Root;
}

/// Roots imported by this root.
pub struct ImportedModuleContext;

impl Namespace for ImportedModuleContext {
    type Key = ModuleIdentifier;
    type Value = CtxId;
    const NAME: &'static str = "imported module context";
    const SCOPE: ScopeKind = ScopeKind::Root;
}

/// Prefix → identity, for imports and for the root's own prefix.
pub struct ImportPrefixNamespace;

impl Namespace for ImportPrefixNamespace {
    type Key = String;
    type Value = ModuleIdentifier;
    const NAME: &'static str = "prefix namespace";
    const SCOPE: ScopeKind = ScopeKind::Root;
}
