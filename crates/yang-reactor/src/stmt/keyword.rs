use std::fmt;

/// Identity of a statement keyword.
///
/// Built-in keywords form a closed set; everything written as `prefix:name`
/// is an extension use and keeps its literal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keyword {
    Module,
    Submodule,
    YangVersion,
    Namespace,
    Prefix,
    BelongsTo,
    Import,
    Include,
    Revision,
    RevisionDate,
    Organization,
    Contact,
    Description,
    Reference,
    Grouping,
    Uses,
    Container,
    Leaf,
    Type,
    Extension(String),
}

impl Keyword {
    pub const BUILTIN: [Keyword; 19] = [
        Keyword::Module,
        Keyword::Submodule,
        Keyword::YangVersion,
        Keyword::Namespace,
        Keyword::Prefix,
        Keyword::BelongsTo,
        Keyword::Import,
        Keyword::Include,
        Keyword::Revision,
        Keyword::RevisionDate,
        Keyword::Organization,
        Keyword::Contact,
        Keyword::Description,
        Keyword::Reference,
        Keyword::Grouping,
        Keyword::Uses,
        Keyword::Container,
        Keyword::Leaf,
        Keyword::Type,
    ];

    /// Built-in keyword for `text`, `None` for anything else.
    pub fn builtin(text: &str) -> Option<Self> {
        Self::BUILTIN.into_iter().find(|k| k.as_str() == text)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Module       => "module",
            Self::Submodule    => "submodule",
            Self::YangVersion  => "yang-version",
            Self::Namespace    => "namespace",
            Self::Prefix       => "prefix",
            Self::BelongsTo    => "belongs-to",
            Self::Import       => "import",
            Self::Include      => "include",
            Self::Revision     => "revision",
            Self::RevisionDate => "revision-date",
            Self::Organization => "organization",
            Self::Contact      => "contact",
            Self::Description  => "description",
            Self::Reference    => "reference",
            Self::Grouping     => "grouping",
            Self::Uses         => "uses",
            Self::Container    => "container",
            Self::Leaf         => "leaf",
            Self::Type         => "type",
            Self::Extension(text) => text,
        }
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, Self::Extension(_))
    }

    /// Roots of a source file.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Module | Self::Submodule)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
