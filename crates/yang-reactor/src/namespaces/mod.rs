//! Typed, scoped key → value stores shared by every file of one compilation.
//!
//! A namespace is a marker type implementing [`Namespace`]; its entries live
//! either once for the whole forest (`Global`) or once per source file
//! (`Root`). Entries are write-once and never removed.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::reactor::CtxId;
use crate::syntax::SourceRef;

pub mod source;
pub mod reuse;

pub use source::{
    ImportPrefixNamespace, ImportedModuleContext, IncludedModuleContext,
    IncludedSubmoduleNameToIdentifier, ModuleIdentifier, SourceNamespace,
};
pub use reuse::{ExpandedGroupingNamespace, GroupingNamespace, UsesAppliedNamespace};

// ─── Namespace declaration ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Root,
}

/// Concrete scope an entry is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceScope {
    Global,
    Root(CtxId),
}

impl NamespaceScope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Global  => ScopeKind::Global,
            Self::Root(_) => ScopeKind::Root,
        }
    }
}

pub trait Namespace: 'static {
    type Key: Clone + Eq + Hash + fmt::Debug + 'static;
    type Value: Clone + fmt::Debug + 'static;

    /// Name used in diagnostics.
    const NAME: &'static str;
    const SCOPE: ScopeKind;
}

// ─── Errors ───────────────────────────────────────────────────────────────────

/// A second write to an existing key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{namespace} already contains an entry for {key}")]
pub struct DuplicateKey {
    pub namespace: &'static str,
    /// Debug rendering of the colliding key.
    pub key: String,
    /// Where the existing entry came from.
    pub existing: SourceRef,
}

// ─── Storage ──────────────────────────────────────────────────────────────────

struct Entry<N: Namespace> {
    key: N::Key,
    value: N::Value,
    origin: SourceRef,
}

struct Entries<N: Namespace> {
    index: HashMap<N::Key, usize>,
    entries: Vec<Entry<N>>,
}

impl<N: Namespace> Entries<N> {
    fn new() -> Self {
        Self { index: HashMap::new(), entries: Vec::new() }
    }

    fn get(&self, key: &N::Key) -> Option<&Entry<N>> {
        self.index.get(key).map(|&i| &self.entries[i])
    }
}

/// Store for every namespace of one compilation run.
#[derive(Default)]
pub struct NamespaceStorage {
    slots: HashMap<(TypeId, NamespaceScope), Box<dyn Any>>,
}

impl NamespaceStorage {
    pub fn new() -> Self { Self::default() }

    fn entries<N: Namespace>(&self, scope: NamespaceScope) -> Option<&Entries<N>> {
        self.slots
            .get(&(TypeId::of::<N>(), scope))
            .and_then(|slot| slot.downcast_ref::<Entries<N>>())
    }

    /// Insert `key → value`. `origin` is the statement that produced the entry,
    /// reported back when a later write collides with it.
    pub fn put<N: Namespace>(
        &mut self,
        scope: NamespaceScope,
        key: N::Key,
        value: N::Value,
        origin: SourceRef,
    ) -> Result<(), DuplicateKey> {
        debug_assert_eq!(scope.kind(), N::SCOPE, "{} used with the wrong scope", N::NAME);

        let slot = self
            .slots
            .entry((TypeId::of::<N>(), scope))
            .or_insert_with(|| Box::new(Entries::<N>::new()));
        let Some(entries) = slot.downcast_mut::<Entries<N>>() else {
            unreachable!("slot for {} holds a foreign entry type", N::NAME);
        };

        if let Some(existing) = entries.get(&key) {
            return Err(DuplicateKey {
                namespace: N::NAME,
                key: format!("{key:?}"),
                existing: existing.origin.clone(),
            });
        }
        tracing::trace!(namespace = N::NAME, ?scope, ?key, "namespace entry added");
        entries.index.insert(key.clone(), entries.entries.len());
        entries.entries.push(Entry { key, value, origin });
        Ok(())
    }

    pub fn get<N: Namespace>(&self, scope: NamespaceScope, key: &N::Key) -> Option<&N::Value> {
        self.entries::<N>(scope)?.get(key).map(|e| &e.value)
    }

    pub fn contains<N: Namespace>(&self, scope: NamespaceScope, key: &N::Key) -> bool {
        self.get::<N>(scope, key).is_some()
    }

    /// Source location of the statement that wrote `key`.
    pub fn origin<N: Namespace>(&self, scope: NamespaceScope, key: &N::Key) -> Option<&SourceRef> {
        self.entries::<N>(scope)?.get(key).map(|e| &e.origin)
    }

    /// Every entry of one namespace in one scope, in insertion order.
    pub fn all_entries<N: Namespace>(
        &self,
        scope: NamespaceScope,
    ) -> impl Iterator<Item = (&N::Key, &N::Value)> + '_ {
        self.entries::<N>(scope)
            .into_iter()
            .flat_map(|e| e.entries.iter().map(|entry| (&entry.key, &entry.value)))
    }
}
