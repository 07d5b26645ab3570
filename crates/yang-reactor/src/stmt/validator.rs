//! Substatement cardinality rules.
//!
//! Each statement definition carries one validator describing which child
//! keywords it accepts and how often. Anything not listed is forbidden, except
//! extension uses, which may appear under any statement.

use crate::error::{Error, ErrorCode};
use crate::syntax::SourceRef;
use super::keyword::Keyword;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one.
    Mandatory,
    /// Zero or one.
    Optional,
    /// Zero or more.
    Any,
}

impl Cardinality {
    fn max(&self) -> Option<usize> {
        match self {
            Self::Mandatory | Self::Optional => Some(1),
            Self::Any => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubstatementValidator {
    keyword: Keyword,
    rules: Vec<(Keyword, Cardinality)>,
}

impl SubstatementValidator {
    pub fn builder(keyword: Keyword) -> SubstatementValidatorBuilder {
        SubstatementValidatorBuilder { keyword, rules: Vec::new() }
    }

    pub fn keyword(&self) -> &Keyword { &self.keyword }

    pub fn cardinality(&self, child: &Keyword) -> Option<Cardinality> {
        self.rules.iter().find(|(k, _)| k == child).map(|(_, c)| *c)
    }

    /// Check the complete child list of one statement.
    ///
    /// Forbidden and repeated children are reported at the child in source
    /// order; missing mandatory children are reported at the parent afterwards.
    pub fn validate<'a>(
        &self,
        location: &SourceRef,
        children: impl IntoIterator<Item = (&'a Keyword, &'a SourceRef)>,
    ) -> Vec<Error> {
        let mut errors = Vec::new();
        let mut counts = vec![0usize; self.rules.len()];

        for (child, child_location) in children {
            if child.is_extension() {
                continue;
            }
            let Some(slot) = self.rules.iter().position(|(k, _)| k == child) else {
                errors.push(Error::new(
                    ErrorCode::C003,
                    child_location.clone(),
                    format!("`{child}` is not a valid substatement of `{}`", self.keyword),
                ));
                continue;
            };
            counts[slot] += 1;
            if let Some(max) = self.rules[slot].1.max() {
                if counts[slot] == max + 1 {
                    errors.push(Error::new(
                        ErrorCode::C002,
                        child_location.clone(),
                        format!("`{child}` may appear at most once in `{}`", self.keyword),
                    ));
                }
            }
        }

        for ((keyword, cardinality), count) in self.rules.iter().zip(&counts) {
            if *cardinality == Cardinality::Mandatory && *count == 0 {
                errors.push(Error::new(
                    ErrorCode::C001,
                    location.clone(),
                    format!("missing mandatory substatement `{keyword}` in `{}`", self.keyword),
                ));
            }
        }

        errors
    }
}

// ─── Builder ──────────────────────────────────────────────────────────────────

pub struct SubstatementValidatorBuilder {
    keyword: Keyword,
    rules: Vec<(Keyword, Cardinality)>,
}

impl SubstatementValidatorBuilder {
    pub fn add_mandatory(self, child: Keyword) -> Self { self.add(child, Cardinality::Mandatory) }
    pub fn add_optional(self, child: Keyword) -> Self { self.add(child, Cardinality::Optional) }
    pub fn add_any(self, child: Keyword) -> Self { self.add(child, Cardinality::Any) }

    /// A later rule for the same keyword replaces the earlier one.
    pub fn add(mut self, child: Keyword, cardinality: Cardinality) -> Self {
        match self.rules.iter_mut().find(|(k, _)| *k == child) {
            Some(rule) => rule.1 = cardinality,
            None => self.rules.push((child, cardinality)),
        }
        self
    }

    pub fn build(self) -> SubstatementValidator {
        SubstatementValidator { keyword: self.keyword, rules: self.rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize) -> SourceRef { SourceRef::new("v.yang", line, 1) }

    fn import_validator() -> SubstatementValidator {
        SubstatementValidator::builder(Keyword::Import)
            .add_mandatory(Keyword::Prefix)
            .add_optional(Keyword::RevisionDate)
            .build()
    }

    fn check(children: &[(Keyword, SourceRef)]) -> Vec<Error> {
        import_validator().validate(&at(1), children.iter().map(|(k, l)| (k, l)))
    }

    #[test]
    fn mandatory_present_once_is_valid() {
        assert!(check(&[(Keyword::Prefix, at(2))]).is_empty());
    }

    #[test]
    fn missing_mandatory_names_the_keyword() {
        let errs = check(&[(Keyword::RevisionDate, at(2))]);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::C001);
        assert!(errs[0].message.contains("prefix"));
        assert_eq!(errs[0].location, at(1));
    }

    #[test]
    fn optional_twice_is_reported_at_second_occurrence() {
        let errs = check(&[
            (Keyword::Prefix, at(2)),
            (Keyword::RevisionDate, at(3)),
            (Keyword::RevisionDate, at(4)),
        ]);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::C002);
        assert_eq!(errs[0].location, at(4));
    }

    #[test]
    fn repeated_mandatory_reported_once() {
        let errs = check(&[
            (Keyword::Prefix, at(2)),
            (Keyword::Prefix, at(3)),
            (Keyword::Prefix, at(4)),
        ]);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::C002);
    }

    #[test]
    fn unknown_child_is_forbidden_but_extensions_pass() {
        let errs = check(&[
            (Keyword::Prefix, at(2)),
            (Keyword::Leaf, at(3)),
            (Keyword::Extension("oc-ext:openconfig-version".into()), at(4)),
        ]);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::C003);
        assert!(errs[0].message.contains("leaf"));
    }

    #[test]
    fn later_rule_overrides_earlier() {
        let v = SubstatementValidator::builder(Keyword::Include)
            .add_optional(Keyword::Description)
            .add_any(Keyword::Description)
            .build();
        assert_eq!(v.cardinality(&Keyword::Description), Some(Cardinality::Any));
        assert_eq!(v.cardinality(&Keyword::Reference), None);
    }
}
