//! Statement vocabulary: keywords, argument grammars, substatement rules and
//! per-keyword behaviour, gathered in one registry.

pub mod definition;
pub mod keyword;
pub mod registry;
pub mod support;
pub mod validator;

pub use definition::{ArgumentKind, ArgumentValue, StatementDefinition, YangVersion, parse_revision_date};
pub use keyword::Keyword;
pub use registry::StatementRegistry;
pub use support::StatementSupport;
pub use validator::{Cardinality, SubstatementValidator, SubstatementValidatorBuilder};
