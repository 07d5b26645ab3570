//! Projection of finished contexts into declared and effective views.

use std::collections::HashMap;
use std::sync::Arc;

use crate::namespaces::ModuleIdentifier;
use crate::reactor::{ContextTree, CtxId, ModelProcessingPhase};
use super::declared::DeclaredStatement;
use super::effective::EffectiveStatement;

/// Builds statement views over a context tree that went through every phase.
///
/// Effective statements are memoized per context, so a context reachable from
/// several places (grouping content) is built once and every call for the
/// same context returns the same `Arc`.
pub struct StatementBuilder<'a> {
    tree: &'a ContextTree,
    links: &'a HashMap<CtxId, ModuleIdentifier>,
    cache: HashMap<CtxId, Arc<EffectiveStatement>>,
}

impl<'a> StatementBuilder<'a> {
    pub fn new(tree: &'a ContextTree, links: &'a HashMap<CtxId, ModuleIdentifier>) -> Self {
        Self { tree, links, cache: HashMap::new() }
    }

    pub fn build_declared(&self, id: CtxId) -> DeclaredStatement {
        let ctx = self.tree.get(id);
        debug_assert_eq!(ctx.completed_phase(), ModelProcessingPhase::EffectiveModel);
        DeclaredStatement {
            keyword: ctx.keyword().clone(),
            argument: ctx.argument().clone(),
            raw_argument: ctx.raw_argument().map(str::to_owned),
            location: ctx.location().clone(),
            substatements: ctx
                .declared_substatements()
                .iter()
                .map(|&child| self.build_declared(child))
                .collect(),
        }
    }

    pub fn build_effective(&mut self, id: CtxId) -> Arc<EffectiveStatement> {
        if let Some(built) = self.cache.get(&id) {
            return Arc::clone(built);
        }
        let tree = self.tree;
        let ctx = tree.get(id);
        debug_assert_eq!(ctx.completed_phase(), ModelProcessingPhase::EffectiveModel);

        let substatements = tree
            .effective_substatements(id)
            .map(|child| self.build_effective(child))
            .collect();
        let built = Arc::new(EffectiveStatement {
            keyword: ctx.keyword().clone(),
            argument: ctx.argument().clone(),
            raw_argument: ctx.raw_argument().map(str::to_owned),
            location: ctx.location().clone(),
            substatements,
            linked_source: self.links.get(&id).cloned(),
        });
        self.cache.insert(id, Arc::clone(&built));
        built
    }
}
