//! Compilation settings.

/// What to do with a `prefix:name` keyword that is not a built-in statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ExtensionPolicy {
    /// Keep the statement and its whole subtree without interpreting it.
    #[default]
    Opaque,
    /// Report it like any other unknown keyword.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct ReactorConfig {
    pub extension_policy: ExtensionPolicy,
    /// Used for files without a `yang-version` statement.
    pub default_yang_version: crate::stmt::YangVersion,
}

impl ReactorConfig {
    pub fn with_extension_policy(mut self, policy: ExtensionPolicy) -> Self {
        self.extension_policy = policy;
        self
    }

    pub fn with_default_yang_version(mut self, version: crate::stmt::YangVersion) -> Self {
        self.default_yang_version = version;
        self
    }
}
