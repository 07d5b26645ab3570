//! `grouping` / `uses`.
//!
//! A grouping is published by name during statement definition. A module and
//! the submodules it includes share their groupings, so a name is looked up
//! across the whole include family and may be defined only once in it. During full
//! declaration each `uses` waits until its grouping is *expanded* (every
//! `uses` inside the grouping has been applied), then contributes the
//! grouping's data definitions, including those it got from its own `uses`,
//! to the parent of the `uses`. Circular reuse therefore never
//! expands and surfaces as an unresolved prerequisite at the end of the phase.

use crate::error::{Error, ErrorCode};
use crate::namespaces::{
    ExpandedGroupingNamespace, GroupingNamespace, ImportPrefixNamespace, ModuleIdentifier,
    NamespaceScope, SourceNamespace, UsesAppliedNamespace,
};
use crate::reactor::{CtxId, ModelProcessingPhase, PhaseContext, ReactorState};
use crate::stmt::Keyword;
use super::linkage::include_family;

pub fn grouping_definition(cx: &mut PhaseContext<'_>, grouping: CtxId) -> Result<(), Error> {
    let state = cx.state_mut();
    let name = state.tree().get(grouping).raw_argument().unwrap_or_default().to_owned();
    state.add_to_namespace::<GroupingNamespace>(grouping, name, grouping)
}

pub fn grouping_expansion(cx: &mut PhaseContext<'_>, grouping: CtxId) -> Result<(), Error> {
    let state = cx.state();
    let tree = state.tree();
    let name = tree.get(grouping).raw_argument().unwrap_or_default().to_owned();
    if let Some(earlier) = defined_earlier_in_family(state, grouping, &name) {
        let file = ModuleIdentifier::of_root(tree, tree.get(earlier).root());
        return Err(Error::new(
            ErrorCode::N001,
            tree.get(grouping).location().clone(),
            format!("grouping '{name}' is already defined in '{file}'"),
        )
        .with_related(Some(tree.get(earlier).location().clone())));
    }
    let nested_uses: Vec<CtxId> = tree
        .descendants(grouping)
        .into_iter()
        .filter(|&d| *tree.get(d).keyword() == Keyword::Uses)
        .collect();

    let mut action = cx.new_action(grouping);
    for uses in nested_uses {
        action.requires::<UsesAppliedNamespace>(
            NamespaceScope::Global,
            uses,
            ModelProcessingPhase::FullDeclaration,
        );
    }
    let failed_name = name.clone();
    let action = action.apply(
        move |state| state.add_to_namespace::<ExpandedGroupingNamespace>(grouping, name, grouping),
        move |_, state| {
            Error::new(
                ErrorCode::R001,
                state.tree().get(grouping).location().clone(),
                format!("grouping '{failed_name}' cannot be expanded: a `uses` inside it is unresolved"),
            )
        },
    );
    cx.register(action);
    Ok(())
}

pub fn uses_expansion(cx: &mut PhaseContext<'_>, uses: CtxId) -> Result<(), Error> {
    let state = cx.state();
    let ctx = state.tree().get(uses);
    let (prefix, name) = ctx.argument().as_reference().unwrap_or((None, ""));
    let name = name.to_owned();
    let target_root = match prefix {
        None => ctx.root(),
        Some(prefix) => resolve_prefix(state, uses, prefix)?,
    };
    // Every grouping was published during statement definition.
    let defining_root = include_family(state, target_root)
        .into_iter()
        .find(|&root| state.namespaces().contains::<GroupingNamespace>(NamespaceScope::Root(root), &name))
        .unwrap_or(target_root);
    let scope = NamespaceScope::Root(defining_root);
    let display = ctx.raw_argument().unwrap_or_default().to_owned();

    let mut action = cx.new_action(uses);
    let defined = action.requires::<GroupingNamespace>(
        scope,
        name.clone(),
        ModelProcessingPhase::StatementDefinition,
    );
    let expanded = action.requires::<ExpandedGroupingNamespace>(
        scope,
        name,
        ModelProcessingPhase::FullDeclaration,
    );
    let action = action.apply(
        move |state| {
            let grouping = *expanded.resolve(state, uses)?;
            let tree = state.tree();
            let contributed: Vec<CtxId> = tree
                .effective_substatements(grouping)
                .filter(|&c| is_data_definition(tree.get(c).keyword()))
                .collect();
            // Roots are never `uses`, so a parent always exists.
            let parent = tree.get(uses).parent();
            if let Some(parent) = parent {
                state.tree.contribute(parent, contributed);
            }
            state.add_to_namespace::<UsesAppliedNamespace>(uses, uses, grouping)
        },
        move |failed, state| {
            let message = if failed.contains(&defined) {
                format!("grouping '{display}' was not found")
            } else {
                format!("grouping '{display}' is used recursively")
            };
            Error::new(ErrorCode::R001, state.tree().get(uses).location().clone(), message)
        },
    );
    cx.register(action);
    Ok(())
}

/// Statements a `uses` instantiates; the grouping's own documentation,
/// nested groupings and `uses` markers stay behind.
fn is_data_definition(keyword: &Keyword) -> bool {
    matches!(keyword, Keyword::Container | Keyword::Leaf)
}

/// Same-named grouping from another file of `grouping`'s include family that
/// comes first in arena order. Only the later definition is reported.
fn defined_earlier_in_family(state: &ReactorState, grouping: CtxId, name: &str) -> Option<CtxId> {
    let root = state.tree().get(grouping).root();
    let name = name.to_owned();
    include_family(state, root)
        .into_iter()
        .skip(1)
        .filter_map(|other| {
            state.namespaces().get::<GroupingNamespace>(NamespaceScope::Root(other), &name).copied()
        })
        .filter(|earlier| earlier.index() < grouping.index())
        .min()
}

/// Root context a prefix used at `at` stands for.
fn resolve_prefix(state: &ReactorState, at: CtxId, prefix: &str) -> Result<CtxId, Error> {
    state
        .lookup_in_namespace::<ImportPrefixNamespace>(at, &prefix.to_owned())
        .and_then(|identifier| state.namespaces().get::<SourceNamespace>(NamespaceScope::Global, identifier))
        .copied()
        .ok_or_else(|| {
            Error::new(
                ErrorCode::R002,
                state.tree().get(at).location().clone(),
                format!("prefix '{prefix}' does not refer to an imported module"),
            )
        })
}
