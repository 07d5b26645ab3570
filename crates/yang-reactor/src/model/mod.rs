//! Compiled output: per source file, its declared and effective trees.
//!
//! The model keeps the finished reactor state as backing store, so the
//! namespaces filled during compilation stay queryable afterwards.

pub mod builder;
pub mod declared;
pub mod effective;

pub use builder::StatementBuilder;
pub use declared::DeclaredStatement;
pub use effective::EffectiveStatement;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::namespaces::{ModuleIdentifier, Namespace, NamespaceScope};
use crate::reactor::{ContextTree, CtxId, ReactorState, StatementContext};
use crate::stmt::StatementRegistry;

/// One source file after compilation.
#[derive(Debug, Clone)]
pub struct CompiledSource {
    pub identifier: ModuleIdentifier,
    pub root: CtxId,
    pub declared: DeclaredStatement,
    pub effective: Arc<EffectiveStatement>,
}

pub struct SchemaModel {
    sources: BTreeMap<ModuleIdentifier, CompiledSource>,
    links: HashMap<CtxId, ModuleIdentifier>,
    state: ReactorState,
}

impl SchemaModel {
    /// Materialize every root of a state that completed the last phase.
    pub(crate) fn build(state: ReactorState, registry: &StatementRegistry) -> Self {
        let tree = state.tree();
        let links: HashMap<CtxId, ModuleIdentifier> = tree
            .ids()
            .filter_map(|id| {
                let link = registry.definition(tree.get(id).keyword())?.support.linked_source?;
                link(&state, id).map(|target| (id, target))
            })
            .collect();

        let mut sources = BTreeMap::new();
        {
            let mut builder = StatementBuilder::new(tree, &links);
            for &root in tree.roots() {
                let identifier = ModuleIdentifier::of_root(tree, root);
                let compiled = CompiledSource {
                    identifier: identifier.clone(),
                    root,
                    declared: builder.build_declared(root),
                    effective: builder.build_effective(root),
                };
                sources.insert(identifier, compiled);
            }
        }
        tracing::debug!(sources = sources.len(), contexts = tree.len(), "model built");
        Self { sources, links, state }
    }

    pub fn source(&self, identifier: &ModuleIdentifier) -> Option<&CompiledSource> {
        self.sources.get(identifier)
    }

    /// Every compiled source, ordered by identifier.
    pub fn sources(&self) -> impl Iterator<Item = &CompiledSource> {
        self.sources.values()
    }

    /// Source with `name`, whatever its revision.
    pub fn source_named(&self, name: &str) -> Option<&CompiledSource> {
        self.sources.values().find(|s| s.identifier.name == name)
    }

    pub fn len(&self) -> usize { self.sources.len() }
    pub fn is_empty(&self) -> bool { self.sources.is_empty() }

    /// Effective statement of the file an `import`/`include` resolved to.
    pub fn linked(&self, statement: &EffectiveStatement) -> Option<&Arc<EffectiveStatement>> {
        let target = statement.linked_source.as_ref()?;
        self.source(target).map(|s| &s.effective)
    }

    pub fn lookup<N: Namespace>(&self, scope: NamespaceScope, key: &N::Key) -> Option<&N::Value> {
        self.state.namespaces().get::<N>(scope, key)
    }

    pub fn entries<N: Namespace>(&self, scope: NamespaceScope) -> impl Iterator<Item = (&N::Key, &N::Value)> + '_ {
        self.state.namespaces().all_entries::<N>(scope)
    }

    pub fn context(&self, id: CtxId) -> &StatementContext { self.state.tree().get(id) }
    pub fn tree(&self) -> &ContextTree { self.state.tree() }

    /// Fresh builder over the backing contexts.
    pub fn builder(&self) -> StatementBuilder<'_> {
        StatementBuilder::new(self.state.tree(), &self.links)
    }
}
