use std::fmt;

/// Global processing phases, in order. Every context finishes phase `k`
/// before any context starts phase `k + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelProcessingPhase {
    /// Context trees are built and roots are published.
    Init,
    /// Roots publish their own prefix.
    SourcePreLinkage,
    /// `import` / `include` resolve across files.
    SourceLinkage,
    /// Named definitions (groupings) are published.
    StatementDefinition,
    /// Reuse is expanded; child sets become final and are validated.
    FullDeclaration,
    /// Contexts are frozen; declared/effective views can be built.
    EffectiveModel,
}

impl ModelProcessingPhase {
    pub const ORDERED: [Self; 6] = [
        Self::Init,
        Self::SourcePreLinkage,
        Self::SourceLinkage,
        Self::StatementDefinition,
        Self::FullDeclaration,
        Self::EffectiveModel,
    ];

    pub fn next(self) -> Option<Self> {
        let i = Self::ORDERED.iter().position(|p| *p == self)?;
        Self::ORDERED.get(i + 1).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init                => "init",
            Self::SourcePreLinkage    => "source-pre-linkage",
            Self::SourceLinkage       => "source-linkage",
            Self::StatementDefinition => "statement-definition",
            Self::FullDeclaration     => "full-declaration",
            Self::EffectiveModel      => "effective-model",
        }
    }
}

impl fmt::Display for ModelProcessingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
