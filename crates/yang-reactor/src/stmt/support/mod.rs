//! Kind-specific behaviour of statements.
//!
//! Instead of one type per keyword, a definition carries a `StatementSupport`
//! table of plain function pointers, looked up by the reactor when a phase is
//! entered and by the model builder when cross-references are materialized.

pub mod linkage;
pub mod reuse;

use crate::error::Error;
use crate::namespaces::ModuleIdentifier;
use crate::reactor::{CtxId, ModelProcessingPhase, PhaseContext, ReactorState};

/// Phase-entry hook: may publish namespace entries and register actions.
pub type Hook = fn(&mut PhaseContext<'_>, CtxId) -> Result<(), Error>;

/// Resolves the source file a linking statement points at, once compiled.
pub type LinkFn = fn(&ReactorState, CtxId) -> Option<ModuleIdentifier>;

#[derive(Clone, Copy, Default)]
pub struct StatementSupport {
    pub on_pre_linkage: Option<Hook>,
    pub on_linkage: Option<Hook>,
    pub on_statement_definition: Option<Hook>,
    pub on_full_declaration: Option<Hook>,
    pub linked_source: Option<LinkFn>,
}

impl StatementSupport {
    pub fn hook(&self, phase: ModelProcessingPhase) -> Option<Hook> {
        match phase {
            ModelProcessingPhase::SourcePreLinkage    => self.on_pre_linkage,
            ModelProcessingPhase::SourceLinkage       => self.on_linkage,
            ModelProcessingPhase::StatementDefinition => self.on_statement_definition,
            ModelProcessingPhase::FullDeclaration     => self.on_full_declaration,
            ModelProcessingPhase::Init | ModelProcessingPhase::EffectiveModel => None,
        }
    }
}
