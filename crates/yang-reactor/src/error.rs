use crate::syntax::SourceRef;

/// Error codes prefixed by the stage that raised them:
/// A = argument, K = keyword/structure, N = namespace, R = resolution, C = cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // Arguments
    A001, // argument does not match its grammar
    A002, // argument required but absent
    A003, // argument given to a statement that takes none

    // Keywords / structure
    K001, // unknown statement keyword
    K002, // root statement is neither `module` nor `submodule`

    // Namespaces
    N001, // duplicate key in namespace

    // Resolution
    R001, // inference prerequisite never became available
    R002, // unknown prefix

    // Cardinality
    C001, // missing mandatory substatement
    C002, // substatement repeated beyond its limit
    C003, // substatement not permitted here
}

/// The five diagnostic families a caller can match on without caring
/// which exact check produced the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    UnknownStatement,
    DuplicateKey,
    UnresolvedPrerequisite,
    SubstatementCardinality,
}

impl ErrorCode {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::A001 | Self::A002 | Self::A003 => ErrorKind::InvalidArgument,
            Self::K001 | Self::K002 => ErrorKind::UnknownStatement,
            Self::N001 => ErrorKind::DuplicateKey,
            Self::R001 | Self::R002 => ErrorKind::UnresolvedPrerequisite,
            Self::C001 | Self::C002 | Self::C003 => ErrorKind::SubstatementCardinality,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A001 => "A001",
            Self::A002 => "A002",
            Self::A003 => "A003",
            Self::K001 => "K001",
            Self::K002 => "K002",
            Self::N001 => "N001",
            Self::R001 => "R001",
            Self::R002 => "R002",
            Self::C001 => "C001",
            Self::C002 => "C002",
            Self::C003 => "C003",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing diagnostic.
///
/// `related` carries the second location for conflicts that involve two
/// statements (duplicate namespace keys).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("[{code}] {location}: {message}")]
pub struct Error {
    pub code: ErrorCode,
    pub location: SourceRef,
    pub message: String,
    pub related: Option<SourceRef>,
}

impl Error {
    pub fn new(code: ErrorCode, location: SourceRef, message: impl Into<String>) -> Self {
        Self { code, location, message: message.into(), related: None }
    }

    pub fn with_related(mut self, related: Option<SourceRef>) -> Self {
        self.related = related;
        self
    }

    pub fn kind(&self) -> ErrorKind { self.code.kind() }
}
