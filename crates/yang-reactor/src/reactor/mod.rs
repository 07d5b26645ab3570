//! Cross-source statement reactor.
//!
//! Drives the whole forest of loaded files through the processing phases:
//! 1. Construction: one context tree per file, roots published by identity
//! 2. Per phase: statement hooks register inference actions
//! 3. Fixpoint: pending actions run as soon as their prerequisites resolve
//! 4. Phase end: leftovers fail, cardinality is checked before the effective model
//!
//! Phases are a global barrier: work for one file in phase `k + 1` may read
//! what another file published in phase `k`.

pub mod action;
pub mod context;
pub mod phase;
pub mod state;


pub use action::{ActionBuilder, FailedPrerequisites, InferenceAction, Prerequisite};
pub use context::{ContextTree, CtxId, StatementContext};
pub use phase::ModelProcessingPhase;
pub use state::ReactorState;

use tracing::{debug, trace, warn};

use crate::config::ReactorConfig;
use crate::error::Error;
use crate::model::SchemaModel;
use crate::namespaces::{ModuleIdentifier, SourceNamespace};
use crate::stmt::StatementRegistry;
use crate::syntax::RawStatement;

// ─── Hook context ─────────────────────────────────────────────────────────────

/// What a statement hook sees while its phase is being entered.
pub struct PhaseContext<'a> {
    state: &'a mut ReactorState,
    queue: &'a mut Vec<InferenceAction>,
    phase: ModelProcessingPhase,
}

impl<'a> PhaseContext<'a> {
    pub fn phase(&self) -> ModelProcessingPhase { self.phase }
    pub fn state(&self) -> &ReactorState { self.state }
    pub fn state_mut(&mut self) -> &mut ReactorState { self.state }

    /// Start an action owned by `owner` that must resolve within this phase.
    pub fn new_action(&self, owner: CtxId) -> ActionBuilder {
        ActionBuilder::new(owner, self.phase)
    }

    pub fn register(&mut self, action: InferenceAction) {
        trace!(owner = %action.owner(), phase = %self.phase, "action registered");
        self.queue.push(action);
    }
}

// ─── Reactor ──────────────────────────────────────────────────────────────────

pub struct Reactor {
    registry: StatementRegistry,
    config: ReactorConfig,
}

impl Reactor {
    pub fn new(config: ReactorConfig) -> Self {
        let registry = StatementRegistry::standard(config.extension_policy);
        Self { registry, config }
    }

    pub fn with_registry(config: ReactorConfig, registry: StatementRegistry) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &StatementRegistry { &self.registry }
    pub fn config(&self) -> &ReactorConfig { &self.config }

    /// Compile a forest of source files into a linked, validated model.
    ///
    /// Returns every diagnostic collected up to the stage that failed.
    pub fn compile(
        &self,
        sources: impl IntoIterator<Item = RawStatement>,
    ) -> Result<SchemaModel, Vec<Error>> {
        let mut state = self.build_forest(sources)?;
        for phase in ModelProcessingPhase::ORDERED.into_iter().skip(1) {
            self.run_phase(&mut state, phase)?;
        }
        Ok(SchemaModel::build(state, &self.registry))
    }

    /// Phase `Init`: build every file's contexts and publish each root under
    /// its identity. All files are processed before reporting.
    pub fn build_forest(
        &self,
        sources: impl IntoIterator<Item = RawStatement>,
    ) -> Result<ReactorState, Vec<Error>> {
        let mut state = ReactorState::new(self.config.clone());
        let mut errors = Vec::new();

        for raw in sources {
            let root = match state.tree.create_root(&raw, &self.registry) {
                Ok(root) => root,
                Err(errs) => {
                    errors.extend(errs);
                    continue;
                }
            };
            let identifier = ModuleIdentifier::of_root(&state.tree, root);
            debug!(source = %identifier, statements = raw.statement_count(), "source loaded");
            if let Err(e) = state.add_to_namespace::<SourceNamespace>(root, identifier, root) {
                errors.push(e);
            }
        }

        if errors.is_empty() {
            state.tree.mark_completed(ModelProcessingPhase::Init);
            Ok(state)
        } else {
            warn!(errors = errors.len(), "source construction failed");
            Err(errors)
        }
    }

    /// Take every context through `phase`.
    pub fn run_phase(
        &self,
        state: &mut ReactorState,
        phase: ModelProcessingPhase,
    ) -> Result<(), Vec<Error>> {
        debug!(%phase, contexts = state.tree.len(), "entering phase");
        let mut errors = Vec::new();
        let mut pending = Vec::new();

        // 1. Phase-entry hooks register this phase's actions.
        for id in state.tree.ids() {
            let ctx = state.tree.get(id);
            if ctx.completed_phase() >= phase || ctx.is_opaque() {
                continue;
            }
            let Some(hook) = self
                .registry
                .definition(ctx.keyword())
                .and_then(|def| def.support.hook(phase))
            else {
                continue;
            };
            let mut cx = PhaseContext { state: &mut *state, queue: &mut pending, phase };
            if let Err(e) = hook(&mut cx, id) {
                errors.push(e);
            }
        }

        // 2–3. Apply runnable actions until a whole pass makes no progress.
        let mut passes = 0;
        while !pending.is_empty() {
            passes += 1;
            let before = pending.len();
            let mut waiting = Vec::with_capacity(before);
            for action in pending {
                if action.is_runnable(&state.namespaces) {
                    trace!(owner = %action.owner(), %phase, "action applied");
                    if let Err(e) = action.run(state) {
                        errors.push(e);
                    }
                } else {
                    waiting.push(action);
                }
            }
            pending = waiting;
            if pending.len() == before {
                break;
            }
        }
        debug!(%phase, passes, unresolved = pending.len(), "fixpoint reached");

        // 4. Whatever is still waiting can never resolve.
        for action in pending {
            errors.push(action.fail(state));
        }

        // Child sets are final once reuse has been expanded.
        if phase == ModelProcessingPhase::FullDeclaration {
            errors.extend(self.validate_substatements(state));
        }

        if !errors.is_empty() {
            warn!(%phase, errors = errors.len(), "phase failed");
            return Err(errors);
        }

        // 5. Barrier.
        state.tree.mark_completed(phase);
        Ok(())
    }

    fn validate_substatements(&self, state: &ReactorState) -> Vec<Error> {
        let tree = &state.tree;
        let mut errors = Vec::new();
        for id in tree.ids() {
            let ctx = tree.get(id);
            if ctx.is_opaque() {
                continue;
            }
            let version = state.yang_version(id);
            let Some(validator) = self.registry.validator(ctx.keyword(), version) else {
                continue;
            };
            let children = tree.effective_substatements(id).map(|c| {
                let child = tree.get(c);
                (child.keyword(), child.location())
            });
            errors.extend(validator.validate(ctx.location(), children));
        }
        errors
    }
}

impl Default for Reactor {
    fn default() -> Self { Self::new(ReactorConfig::default()) }
}
