//! Namespaces behind `grouping` / `uses`.

use crate::reactor::CtxId;
use super::{Namespace, ScopeKind};

/// Groupings defined anywhere in a file, by name.
pub struct GroupingNamespace;

impl Namespace for GroupingNamespace {
    type Key = String;
    type Value = CtxId;
    const NAME: &'static str = "grouping";
    const SCOPE: ScopeKind = ScopeKind::Root;
}

/// Groupings whose every nested `uses` has been applied.
pub struct ExpandedGroupingNamespace;

impl Namespace for ExpandedGroupingNamespace {
    type Key = String;
    type Value = CtxId;
    const NAME: &'static str = "expanded grouping";
    const SCOPE: ScopeKind = ScopeKind::Root;
}

/// `uses` statement → grouping it was expanded from.
pub struct UsesAppliedNamespace;

impl Namespace for UsesAppliedNamespace {
    type Key = CtxId;
    type Value = CtxId;
    const NAME: &'static str = "applied uses";
    const SCOPE: ScopeKind = ScopeKind::Global;
}
