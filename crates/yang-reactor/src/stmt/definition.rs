//! Statement definitions and argument grammars.
//!
//! A `StatementDefinition` is the immutable descriptor shared by every
//! occurrence of one keyword: how its argument is parsed, which substatements
//! it accepts and which phase hooks it contributes to the reactor.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{Error, ErrorCode};
use crate::syntax::SourceRef;
use super::keyword::Keyword;
use super::support::StatementSupport;
use super::validator::SubstatementValidator;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("identifier pattern is valid")
});

static PREFIXED_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([A-Za-z_][A-Za-z0-9_.\-]*):)?([A-Za-z_][A-Za-z0-9_.\-]*)$")
        .expect("prefixed identifier pattern is valid")
});

static REVISION_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("revision date pattern is valid")
});

// ─── YANG version ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum YangVersion {
    /// RFC 6020.
    #[default]
    V1,
    /// RFC 7950.
    V1_1,
}

impl YangVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1   => "1",
            Self::V1_1 => "1.1",
        }
    }
}

impl fmt::Display for YangVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Arguments ────────────────────────────────────────────────────────────────

/// Grammar of a statement argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// The statement takes no argument.
    None,
    String,
    Identifier,
    /// `[prefix:]identifier`
    PrefixedIdentifier,
    /// `yyyy-MM-dd`
    Date,
    YangVersion,
    /// Extension uses: anything or nothing, kept verbatim.
    Opaque,
}

impl ArgumentKind {
    /// Human-readable grammar, used in diagnostics.
    pub fn grammar(&self) -> &'static str {
        match self {
            Self::None               => "no argument",
            Self::String             => "a string",
            Self::Identifier         => "an identifier",
            Self::PrefixedIdentifier => "an identifier with an optional `prefix:`",
            Self::Date               => "a date in format yyyy-MM-dd",
            Self::YangVersion        => "`1` or `1.1`",
            Self::Opaque             => "any text",
        }
    }
}

/// Parsed argument value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArgumentValue {
    None,
    String(String),
    Identifier(String),
    Reference { prefix: Option<String>, name: String },
    Date(NaiveDate),
    Version(YangVersion),
}

impl ArgumentValue {
    /// Textual payload of string-like arguments.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Identifier(s) => Some(s),
            Self::Reference { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_version(&self) -> Option<YangVersion> {
        match self {
            Self::Version(v) => Some(*v),
            _ => None,
        }
    }

    /// `(prefix, name)` of a prefixed identifier.
    pub fn as_reference(&self) -> Option<(Option<&str>, &str)> {
        match self {
            Self::Reference { prefix, name } => Some((prefix.as_deref(), name)),
            _ => None,
        }
    }
}

// ─── Definition ───────────────────────────────────────────────────────────────

pub struct StatementDefinition {
    pub keyword: Keyword,
    pub argument: ArgumentKind,
    pub validator: SubstatementValidator,
    pub support: StatementSupport,
}

impl StatementDefinition {
    pub fn new(keyword: Keyword, argument: ArgumentKind, validator: SubstatementValidator) -> Self {
        Self { keyword, argument, validator, support: StatementSupport::default() }
    }

    pub fn with_support(mut self, support: StatementSupport) -> Self {
        self.support = support;
        self
    }

    pub fn is_opaque(&self) -> bool {
        self.argument == ArgumentKind::Opaque
    }

    /// Parse the raw argument text of one occurrence of this statement.
    pub fn parse_argument(&self, raw: Option<&str>, location: &SourceRef) -> Result<ArgumentValue, Error> {
        let text = match (self.argument, raw) {
            (ArgumentKind::None, None) => return Ok(ArgumentValue::None),
            (ArgumentKind::None, Some(text)) => {
                return Err(Error::new(
                    ErrorCode::A003,
                    location.clone(),
                    format!("`{}` takes no argument, got '{text}'", self.keyword),
                ));
            }
            (ArgumentKind::Opaque, None) => return Ok(ArgumentValue::None),
            (ArgumentKind::Opaque, Some(text)) => return Ok(ArgumentValue::String(text.to_owned())),
            (kind, None) => {
                return Err(Error::new(
                    ErrorCode::A002,
                    location.clone(),
                    format!("`{}` requires an argument: {}", self.keyword, kind.grammar()),
                ));
            }
            (_, Some(text)) => text,
        };

        let parsed = match self.argument {
            ArgumentKind::String => Some(ArgumentValue::String(text.to_owned())),
            ArgumentKind::Identifier => IDENTIFIER
                .is_match(text)
                .then(|| ArgumentValue::Identifier(text.to_owned())),
            ArgumentKind::PrefixedIdentifier => PREFIXED_IDENTIFIER.captures(text).map(|caps| {
                ArgumentValue::Reference {
                    prefix: caps.get(1).map(|m| m.as_str().to_owned()),
                    name: caps[2].to_owned(),
                }
            }),
            ArgumentKind::Date => parse_revision_date(text).map(ArgumentValue::Date),
            ArgumentKind::YangVersion => match text {
                "1"   => Some(ArgumentValue::Version(YangVersion::V1)),
                "1.1" => Some(ArgumentValue::Version(YangVersion::V1_1)),
                _ => None,
            },
            ArgumentKind::None | ArgumentKind::Opaque => None,
        };

        parsed.ok_or_else(|| {
            Error::new(
                ErrorCode::A001,
                location.clone(),
                format!(
                    "argument '{text}' of `{}` is not valid: expected {}",
                    self.keyword,
                    self.argument.grammar(),
                ),
            )
        })
    }
}

/// Strict `yyyy-MM-dd`; the shape is checked before the calendar so that
/// `2013-7-30` is rejected instead of being read leniently.
pub fn parse_revision_date(text: &str) -> Option<NaiveDate> {
    if !REVISION_DATE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}
