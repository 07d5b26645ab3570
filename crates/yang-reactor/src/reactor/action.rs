//! Inference actions: deferred work gated on namespace entries.
//!
//! A statement hook builds an action with [`ActionBuilder`], declaring the
//! namespace entries it needs as typed [`Prerequisite`]s, and hands it to the
//! scheduler. The scheduler runs `apply` once every prerequisite resolves, or
//! the failure handler if the phase ends first.

use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, ErrorCode};
use crate::namespaces::{Namespace, NamespaceScope, NamespaceStorage};
use super::context::CtxId;
use super::phase::ModelProcessingPhase;
use super::state::ReactorState;

// ─── Prerequisite ─────────────────────────────────────────────────────────────

/// Typed handle to an entry of namespace `N` that an action waits for.
pub struct Prerequisite<N: Namespace> {
    index: usize,
    scope: NamespaceScope,
    key: N::Key,
    phase: ModelProcessingPhase,
    namespace: PhantomData<N>,
}

impl<N: Namespace> Clone for Prerequisite<N> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            scope: self.scope,
            key: self.key.clone(),
            phase: self.phase,
            namespace: PhantomData,
        }
    }
}

impl<N: Namespace> fmt::Debug for Prerequisite<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prerequisite")
            .field("namespace", &N::NAME)
            .field("scope", &self.scope)
            .field("key", &self.key)
            .field("phase", &self.phase)
            .finish()
    }
}

impl<N: Namespace> Prerequisite<N> {
    pub fn key(&self) -> &N::Key { &self.key }
    pub fn scope(&self) -> NamespaceScope { self.scope }

    pub fn get<'s>(&self, state: &'s ReactorState) -> Option<&'s N::Value> {
        state.namespaces.get::<N>(self.scope, &self.key)
    }

    /// Value for use inside the owning action's `apply`, where the scheduler
    /// has already seen it. An absent entry is reported as R001 at `at`.
    pub fn resolve<'s>(&self, state: &'s ReactorState, at: CtxId) -> Result<&'s N::Value, Error> {
        self.get(state).ok_or_else(|| {
            Error::new(
                ErrorCode::R001,
                state.tree.get(at).location().clone(),
                format!("{} has no entry {:?}", N::NAME, self.key),
            )
        })
    }
}

/// Type-erased view of a prerequisite, used by the scheduler.
trait Requirement {
    fn index(&self) -> usize;
    fn is_available(&self, namespaces: &NamespaceStorage) -> bool;
    fn describe(&self) -> String;
}

impl<N: Namespace> Requirement for Prerequisite<N> {
    fn index(&self) -> usize { self.index }

    fn is_available(&self, namespaces: &NamespaceStorage) -> bool {
        namespaces.contains::<N>(self.scope, &self.key)
    }

    fn describe(&self) -> String {
        format!("{} entry {:?} (required by {})", N::NAME, self.key, self.phase)
    }
}

/// Prerequisites that were still unresolved when the phase ended.
#[derive(Debug, Clone, Default)]
pub struct FailedPrerequisites {
    indices: Vec<usize>,
}

impl FailedPrerequisites {
    pub fn contains<N: Namespace>(&self, prerequisite: &Prerequisite<N>) -> bool {
        self.indices.contains(&prerequisite.index)
    }

    pub fn is_empty(&self) -> bool { self.indices.is_empty() }
}

// ─── Action ───────────────────────────────────────────────────────────────────

type ApplyFn = Box<dyn FnOnce(&mut ReactorState) -> Result<(), Error>>;
type FailureFn = Box<dyn FnOnce(&FailedPrerequisites, &ReactorState) -> Error>;

pub struct InferenceAction {
    owner: CtxId,
    phase: ModelProcessingPhase,
    prerequisites: Vec<Box<dyn Requirement>>,
    apply: ApplyFn,
    on_failure: FailureFn,
}

impl InferenceAction {
    pub fn owner(&self) -> CtxId { self.owner }
    pub fn phase(&self) -> ModelProcessingPhase { self.phase }

    pub(crate) fn is_runnable(&self, namespaces: &NamespaceStorage) -> bool {
        self.prerequisites.iter().all(|p| p.is_available(namespaces))
    }

    pub(crate) fn run(self, state: &mut ReactorState) -> Result<(), Error> {
        (self.apply)(state)
    }

    /// Give up on the action: collect what is missing and let the owner
    /// phrase the diagnostic.
    pub(crate) fn fail(self, state: &ReactorState) -> Error {
        let mut failed = FailedPrerequisites::default();
        for p in self.prerequisites.iter().filter(|p| !p.is_available(&state.namespaces)) {
            tracing::trace!(owner = ?self.owner, missing = %p.describe(), "prerequisite unresolved");
            failed.indices.push(p.index());
        }
        (self.on_failure)(&failed, state)
    }
}

impl fmt::Debug for InferenceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs: Vec<String> = self.prerequisites.iter().map(|p| p.describe()).collect();
        f.debug_struct("InferenceAction")
            .field("owner", &self.owner)
            .field("phase", &self.phase)
            .field("prerequisites", &needs)
            .finish_non_exhaustive()
    }
}

// ─── Builder ──────────────────────────────────────────────────────────────────

pub struct ActionBuilder {
    owner: CtxId,
    phase: ModelProcessingPhase,
    prerequisites: Vec<Box<dyn Requirement>>,
}

impl ActionBuilder {
    pub fn new(owner: CtxId, phase: ModelProcessingPhase) -> Self {
        Self { owner, phase, prerequisites: Vec::new() }
    }

    /// Wait for `key` in namespace `N` under `scope`. `phase` is the phase by
    /// which the entry must exist; it cannot be later than the action's own.
    pub fn requires<N: Namespace>(
        &mut self,
        scope: NamespaceScope,
        key: N::Key,
        phase: ModelProcessingPhase,
    ) -> Prerequisite<N> {
        debug_assert!(phase <= self.phase, "prerequisite due after its action's phase");
        let prerequisite = Prerequisite {
            index: self.prerequisites.len(),
            scope,
            key,
            phase,
            namespace: PhantomData,
        };
        self.prerequisites.push(Box::new(prerequisite.clone()));
        prerequisite
    }

    pub fn apply(
        self,
        apply: impl FnOnce(&mut ReactorState) -> Result<(), Error> + 'static,
        on_failure: impl FnOnce(&FailedPrerequisites, &ReactorState) -> Error + 'static,
    ) -> InferenceAction {
        InferenceAction {
            owner: self.owner,
            phase: self.phase,
            prerequisites: self.prerequisites,
            apply: Box::new(apply),
            on_failure: Box::new(on_failure),
        }
    }
}
