//! Source linkage: `module` / `submodule` prefixes, `import` and `include`.

use crate::error::{Error, ErrorCode};
use crate::namespaces::{
    ImportPrefixNamespace, ImportedModuleContext, IncludedModuleContext,
    IncludedSubmoduleNameToIdentifier, ModuleIdentifier, NamespaceScope, SourceNamespace,
};
use crate::reactor::{CtxId, ModelProcessingPhase, PhaseContext, ReactorState};
use crate::stmt::Keyword;

// ─── Own prefix ───────────────────────────────────────────────────────────────

/// `module`: its `prefix` refers to the module itself.
pub fn module_pre_linkage(cx: &mut PhaseContext<'_>, module: CtxId) -> Result<(), Error> {
    let prefix = cx.state().tree().first_child(module, &Keyword::Prefix);
    let identifier = ModuleIdentifier::of_root(cx.state().tree(), module);
    publish_own_prefix(cx.state_mut(), prefix, identifier)
}

/// `submodule`: the `belongs-to` prefix refers to the parent module.
pub fn submodule_pre_linkage(cx: &mut PhaseContext<'_>, submodule: CtxId) -> Result<(), Error> {
    let state = cx.state();
    let tree = state.tree();
    // A missing `belongs-to` is reported by cardinality validation.
    let Some(belongs_to) = tree.first_child(submodule, &Keyword::BelongsTo) else { return Ok(()) };
    let prefix = tree.first_child(belongs_to, &Keyword::Prefix);
    let parent = parent_module(state, tree.get(belongs_to).raw_argument().unwrap_or_default());
    publish_own_prefix(cx.state_mut(), prefix, parent)
}

/// Identity of the loaded module called `name`, latest revision first.
/// Falls back to the undated name so lookups through it fail cleanly.
fn parent_module(state: &ReactorState, name: &str) -> ModuleIdentifier {
    state
        .namespaces()
        .all_entries::<SourceNamespace>(NamespaceScope::Global)
        .filter(|&(identifier, &root)| {
            identifier.name == name && *state.tree().get(root).keyword() == Keyword::Module
        })
        .map(|(identifier, _)| identifier)
        .max()
        .cloned()
        .unwrap_or_else(|| ModuleIdentifier::new(name, None))
}

fn publish_own_prefix(
    state: &mut ReactorState,
    prefix: Option<CtxId>,
    identifier: ModuleIdentifier,
) -> Result<(), Error> {
    // A missing prefix is reported by cardinality validation.
    let Some(prefix) = prefix else { return Ok(()) };
    let name = state.tree().get(prefix).raw_argument().unwrap_or_default().to_owned();
    state.add_to_namespace::<ImportPrefixNamespace>(prefix, name, identifier)
}

/// Roots sharing definitions with `root` through `include`, in either
/// direction and transitively. `root` itself comes first; the rest follow
/// in discovery order. Complete once `SourceLinkage` has finished.
pub fn include_family(state: &ReactorState, root: CtxId) -> Vec<CtxId> {
    let namespaces = state.namespaces();
    let included = |r: CtxId| {
        namespaces
            .all_entries::<IncludedModuleContext>(NamespaceScope::Root(r))
            .map(|(_, &target)| target)
    };
    let mut family = vec![root];
    let mut next = 0;
    while let Some(&current) = family.get(next) {
        next += 1;
        let includers = state
            .tree()
            .roots()
            .iter()
            .copied()
            .filter(|&other| included(other).any(|target| target == current));
        let linked: Vec<CtxId> = included(current).chain(includers).collect();
        for other in linked {
            if !family.contains(&other) {
                family.push(other);
            }
        }
    }
    family
}

// ─── include ──────────────────────────────────────────────────────────────────

pub fn include_linkage(cx: &mut PhaseContext<'_>, include: CtxId) -> Result<(), Error> {
    let identifier = ModuleIdentifier::referenced_by(cx.state().tree(), include);

    let mut action = cx.new_action(include);
    let source = action.requires::<SourceNamespace>(
        NamespaceScope::Global,
        identifier.clone(),
        ModelProcessingPhase::SourceLinkage,
    );
    let action = action.apply(
        move |state| {
            let target = *source.resolve(state, include)?;
            let name = identifier.name.clone();
            state.add_to_namespace::<IncludedModuleContext>(include, identifier.clone(), target)?;
            state.add_to_namespace::<IncludedSubmoduleNameToIdentifier>(include, name, identifier)
        },
        move |_, state| {
            let ctx = state.tree().get(include);
            Error::new(
                ErrorCode::R001,
                ctx.location().clone(),
                format!("Included submodule '{}' was not found", ctx.raw_argument().unwrap_or_default()),
            )
        },
    );
    cx.register(action);
    Ok(())
}

/// Identity an `include` resolved to.
pub fn include_target(state: &ReactorState, include: CtxId) -> Option<ModuleIdentifier> {
    let name = state.tree().get(include).raw_argument()?.to_owned();
    state
        .lookup_in_namespace::<IncludedSubmoduleNameToIdentifier>(include, &name)
        .cloned()
}

// ─── import ───────────────────────────────────────────────────────────────────

pub fn import_linkage(cx: &mut PhaseContext<'_>, import: CtxId) -> Result<(), Error> {
    let tree = cx.state().tree();
    let identifier = ModuleIdentifier::referenced_by(tree, import);
    // A missing prefix is reported by cardinality validation; the import still links.
    let prefix = tree.first_child(import, &Keyword::Prefix);

    let mut action = cx.new_action(import);
    let source = action.requires::<SourceNamespace>(
        NamespaceScope::Global,
        identifier.clone(),
        ModelProcessingPhase::SourceLinkage,
    );
    let action = action.apply(
        move |state| {
            let target = *source.resolve(state, import)?;
            state.add_to_namespace::<ImportedModuleContext>(import, identifier.clone(), target)?;
            match prefix {
                Some(prefix) => {
                    let name = state.tree().get(prefix).raw_argument().unwrap_or_default().to_owned();
                    state.add_to_namespace::<ImportPrefixNamespace>(prefix, name, identifier)
                }
                None => Ok(()),
            }
        },
        move |_, state| {
            let ctx = state.tree().get(import);
            Error::new(
                ErrorCode::R001,
                ctx.location().clone(),
                format!("Imported module '{}' was not found", ctx.raw_argument().unwrap_or_default()),
            )
        },
    );
    cx.register(action);
    Ok(())
}

/// Identity an `import` resolved to.
pub fn import_target(state: &ReactorState, import: CtxId) -> Option<ModuleIdentifier> {
    let identifier = ModuleIdentifier::referenced_by(state.tree(), import);
    state
        .lookup_in_namespace::<ImportedModuleContext>(import, &identifier)
        .map(|_| identifier)
}
