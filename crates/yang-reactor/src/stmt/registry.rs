//! Statement definition registry: the single source of truth for keywords.
//!
//! Consumed by:
//!   • context construction: keyword lookup, argument grammar
//!   • the reactor: phase hooks, substatement validators
//!   • the model builder: linked sources
//!
//! Adding a statement = registering one `StatementDefinition` here.

use std::collections::HashMap;

use crate::config::ExtensionPolicy;
use crate::error::{Error, ErrorCode};
use crate::syntax::SourceRef;
use super::definition::{ArgumentKind, StatementDefinition, YangVersion};
use super::keyword::Keyword;
use super::support::{StatementSupport, linkage, reuse};
use super::validator::{SubstatementValidator, SubstatementValidatorBuilder};

pub struct StatementRegistry {
    definitions: HashMap<Keyword, StatementDefinition>,
    /// Version-specific validators replacing the base one.
    overrides: HashMap<(Keyword, YangVersion), SubstatementValidator>,
    /// Shared by every extension use and everything below it.
    opaque: StatementDefinition,
    extension_policy: ExtensionPolicy,
}

impl StatementRegistry {
    pub fn new(extension_policy: ExtensionPolicy) -> Self {
        let opaque = StatementDefinition::new(
            Keyword::Extension(String::new()),
            ArgumentKind::Opaque,
            SubstatementValidator::builder(Keyword::Extension(String::new())).build(),
        );
        Self { definitions: HashMap::new(), overrides: HashMap::new(), opaque, extension_policy }
    }

    pub fn register(&mut self, definition: StatementDefinition) {
        self.definitions.insert(definition.keyword.clone(), definition);
    }

    /// Use `validator` instead of the base one in sources declaring `version`.
    pub fn register_override(&mut self, version: YangVersion, validator: SubstatementValidator) {
        self.overrides.insert((validator.keyword().clone(), version), validator);
    }

    pub fn extension_policy(&self) -> ExtensionPolicy { self.extension_policy }

    /// Definition for keyword text as written in a source.
    pub fn lookup(&self, keyword: &str, location: &SourceRef) -> Result<&StatementDefinition, Error> {
        if let Some(definition) = Keyword::builtin(keyword).and_then(|k| self.definitions.get(&k)) {
            return Ok(definition);
        }
        if is_extension_use(keyword) && self.extension_policy == ExtensionPolicy::Opaque {
            tracing::trace!(keyword, %location, "extension statement kept opaque");
            return Ok(&self.opaque);
        }
        Err(Error::new(
            ErrorCode::K001,
            location.clone(),
            format!("unknown statement `{keyword}`"),
        ))
    }

    pub fn definition(&self, keyword: &Keyword) -> Option<&StatementDefinition> {
        match keyword {
            Keyword::Extension(_) => Some(&self.opaque),
            _ => self.definitions.get(keyword),
        }
    }

    pub fn opaque(&self) -> &StatementDefinition { &self.opaque }

    /// Validator for `keyword` in a source of the given language version.
    pub fn validator(&self, keyword: &Keyword, version: YangVersion) -> Option<&SubstatementValidator> {
        self.overrides
            .get(&(keyword.clone(), version))
            .or_else(|| self.definitions.get(keyword).map(|d| &d.validator))
    }

    /// Registry with every built-in statement.
    pub fn standard(extension_policy: ExtensionPolicy) -> Self {
        let mut r = Self::new(extension_policy);
        for definition in standard_definitions() {
            r.register(definition);
        }
        for validator in rfc7950_validators() {
            r.register_override(YangVersion::V1_1, validator);
        }
        r
    }
}

impl Default for StatementRegistry {
    fn default() -> Self { Self::standard(ExtensionPolicy::default()) }
}

/// `prefix:name`, both parts identifiers.
fn is_extension_use(keyword: &str) -> bool {
    let is_identifier = |s: &str| {
        let mut chars = s.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    };
    keyword
        .split_once(':')
        .is_some_and(|(prefix, name)| is_identifier(prefix) && is_identifier(name))
}

// ─── Built-in statements ──────────────────────────────────────────────────────

fn def(keyword: Keyword, argument: ArgumentKind, validator: SubstatementValidator) -> StatementDefinition {
    StatementDefinition::new(keyword, argument, validator)
}

/// Statement without substatements.
fn leaf_stmt(keyword: Keyword, argument: ArgumentKind) -> StatementDefinition {
    let validator = SubstatementValidator::builder(keyword.clone()).build();
    def(keyword, argument, validator)
}

/// Body shared by `module` and `submodule` after their header.
fn with_body(builder: SubstatementValidatorBuilder) -> SubstatementValidator {
    builder
        .add_optional(Keyword::YangVersion)
        .add_any(Keyword::Import)
        .add_any(Keyword::Include)
        .add_optional(Keyword::Organization)
        .add_optional(Keyword::Contact)
        .add_optional(Keyword::Description)
        .add_optional(Keyword::Reference)
        .add_any(Keyword::Revision)
        .add_any(Keyword::Grouping)
        .add_any(Keyword::Container)
        .add_any(Keyword::Leaf)
        .add_any(Keyword::Uses)
        .build()
}

fn standard_definitions() -> Vec<StatementDefinition> {
    use ArgumentKind as A;
    use Keyword as K;

    vec![
        def(
            K::Module,
            A::Identifier,
            with_body(
                SubstatementValidator::builder(K::Module)
                    .add_mandatory(K::Namespace)
                    .add_mandatory(K::Prefix),
            ),
        )
        .with_support(StatementSupport {
            on_pre_linkage: Some(linkage::module_pre_linkage),
            ..Default::default()
        }),
        def(
            K::Submodule,
            A::Identifier,
            with_body(SubstatementValidator::builder(K::Submodule).add_mandatory(K::BelongsTo)),
        )
        .with_support(StatementSupport {
            on_pre_linkage: Some(linkage::submodule_pre_linkage),
            ..Default::default()
        }),
        def(
            K::BelongsTo,
            A::Identifier,
            SubstatementValidator::builder(K::BelongsTo).add_mandatory(K::Prefix).build(),
        ),
        def(
            K::Import,
            A::Identifier,
            SubstatementValidator::builder(K::Import)
                .add_mandatory(K::Prefix)
                .add_optional(K::RevisionDate)
                .build(),
        )
        .with_support(StatementSupport {
            on_linkage: Some(linkage::import_linkage),
            linked_source: Some(linkage::import_target),
            ..Default::default()
        }),
        def(
            K::Include,
            A::Identifier,
            SubstatementValidator::builder(K::Include).add_optional(K::RevisionDate).build(),
        )
        .with_support(StatementSupport {
            on_linkage: Some(linkage::include_linkage),
            linked_source: Some(linkage::include_target),
            ..Default::default()
        }),
        def(
            K::Revision,
            A::Date,
            SubstatementValidator::builder(K::Revision)
                .add_optional(K::Description)
                .add_optional(K::Reference)
                .build(),
        ),
        def(
            K::Grouping,
            A::Identifier,
            SubstatementValidator::builder(K::Grouping)
                .add_optional(K::Description)
                .add_optional(K::Reference)
                .add_any(K::Grouping)
                .add_any(K::Container)
                .add_any(K::Leaf)
                .add_any(K::Uses)
                .build(),
        )
        .with_support(StatementSupport {
            on_statement_definition: Some(reuse::grouping_definition),
            on_full_declaration: Some(reuse::grouping_expansion),
            ..Default::default()
        }),
        def(
            K::Uses,
            A::PrefixedIdentifier,
            SubstatementValidator::builder(K::Uses)
                .add_optional(K::Description)
                .add_optional(K::Reference)
                .build(),
        )
        .with_support(StatementSupport {
            on_full_declaration: Some(reuse::uses_expansion),
            ..Default::default()
        }),
        def(
            K::Container,
            A::Identifier,
            SubstatementValidator::builder(K::Container)
                .add_optional(K::Description)
                .add_optional(K::Reference)
                .add_any(K::Grouping)
                .add_any(K::Container)
                .add_any(K::Leaf)
                .add_any(K::Uses)
                .build(),
        ),
        def(
            K::Leaf,
            A::Identifier,
            SubstatementValidator::builder(K::Leaf)
                .add_mandatory(K::Type)
                .add_optional(K::Description)
                .add_optional(K::Reference)
                .build(),
        ),
        leaf_stmt(K::Type, A::PrefixedIdentifier),
        leaf_stmt(K::YangVersion, A::YangVersion),
        leaf_stmt(K::Namespace, A::String),
        leaf_stmt(K::Prefix, A::Identifier),
        leaf_stmt(K::RevisionDate, A::Date),
        leaf_stmt(K::Organization, A::String),
        leaf_stmt(K::Contact, A::String),
        leaf_stmt(K::Description, A::String),
        leaf_stmt(K::Reference, A::String),
    ]
}

/// YANG 1.1 lets `import` and `include` carry documentation.
fn rfc7950_validators() -> Vec<SubstatementValidator> {
    use Keyword as K;

    vec![
        SubstatementValidator::builder(K::Import)
            .add_mandatory(K::Prefix)
            .add_optional(K::RevisionDate)
            .add_optional(K::Description)
            .add_optional(K::Reference)
            .build(),
        SubstatementValidator::builder(K::Include)
            .add_optional(K::RevisionDate)
            .add_optional(K::Description)
            .add_optional(K::Reference)
            .build(),
    ]
}
