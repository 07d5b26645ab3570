pub mod config;
pub mod error;
pub mod syntax;
pub mod stmt;
pub mod namespaces;
pub mod reactor;
pub mod model;

pub use config::{ExtensionPolicy, ReactorConfig};
pub use error::{Error, ErrorCode, ErrorKind};
pub use syntax::{RawStatement, SourceRef};
pub use stmt::{Keyword, StatementRegistry, YangVersion};
pub use namespaces::{ModuleIdentifier, NamespaceScope};
pub use reactor::{CtxId, ModelProcessingPhase, Reactor};
pub use model::{CompiledSource, DeclaredStatement, EffectiveStatement, SchemaModel};

// ─── Public API ───────────────────────────────────────────────────────────────

/// Link and validate a forest of parsed source files with default settings.
///
/// Every file is one raw `module` or `submodule` tree. Either every file
/// compiles, or all diagnostics of the first failing stage are returned.
pub fn compile(sources: impl IntoIterator<Item = RawStatement>) -> Result<SchemaModel, Vec<Error>> {
    Reactor::default().compile(sources)
}

/// Same as [`compile`] with explicit settings.
pub fn compile_with(
    config: ReactorConfig,
    sources: impl IntoIterator<Item = RawStatement>,
) -> Result<SchemaModel, Vec<Error>> {
    Reactor::new(config).compile(sources)
}
