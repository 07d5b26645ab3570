//! Argument grammars, unknown keywords and substatement cardinality.
//! Error codes: A001–A002, K001–K002, C001–C003.

mod common;

use common::*;
use yang_reactor::{ErrorCode, ErrorKind, ExtensionPolicy, Keyword, ReactorConfig, compile_with};

// ─── A: arguments ─────────────────────────────────────────────────────────────

#[test]
fn a001_revision_date_is_parsed() {
    let model = ok([module("a", [stmt("revision", "2013-07-30")])]);
    let source = model.sources().next().unwrap();
    assert_eq!(
        source.identifier.revision,
        chrono::NaiveDate::from_ymd_opt(2013, 7, 30),
    );
}

#[test]
fn a001_impossible_date() {
    let errs = err([module("a", [stmt("revision", "2013-13-99")])]);
    assert!(has(&errs, ErrorCode::A001));
    assert!(has_msg(&errs, "2013-13-99"));
    assert_eq!(errs[0].kind(), ErrorKind::InvalidArgument);
}

#[test]
fn a001_unpadded_date() {
    let errs = err([module("a", [stmt("revision", "2013-7-30")])]);
    assert!(has(&errs, ErrorCode::A001));
}

#[test]
fn a001_bad_revision_date_in_include() {
    let errs = err([module("a", [stmt("include", "s").with_child(stmt("revision-date", "30-07-2013"))])]);
    assert!(has(&errs, ErrorCode::A001));
}

#[test]
fn a001_bad_yang_version() {
    let errs = err([module("a", [stmt("yang-version", "2")])]);
    assert!(has(&errs, ErrorCode::A001));
}

#[test]
fn a001_bad_identifier() {
    let errs = err([module("a", [stmt("container", "9lives")])]);
    assert!(has(&errs, ErrorCode::A001));
    assert!(has_msg(&errs, "9lives"));
}

#[test]
fn a002_missing_argument() {
    let errs = err([module("a", [bare("container")])]);
    assert!(has(&errs, ErrorCode::A002));
}

#[test]
fn argument_errors_are_all_reported() {
    let errs = err([
        module("a", [stmt("revision", "2013-13-99"), stmt("container", "9lives")]),
        module("b", [bare("leaf")]),
    ]);
    assert_eq!(errs.len(), 3);
}

// ─── K: keywords ──────────────────────────────────────────────────────────────

#[test]
fn k001_unknown_keyword() {
    let errs = err([module("a", [stmt("anyxml", "x")])]);
    assert!(has(&errs, ErrorCode::K001));
    assert!(has_msg(&errs, "anyxml"));
}

#[test]
fn k001_extension_under_reject_policy() {
    let config = ReactorConfig::default().with_extension_policy(ExtensionPolicy::Reject);
    let errs = compile_with(config, [module("a", [stmt("oc-ext:openconfig-version", "1.0.0")])])
        .err()
        .unwrap();
    assert!(has(&errs, ErrorCode::K001));
}

#[test]
fn extension_subtree_is_opaque() {
    let ext = stmt("oc-ext:origin", "x")
        .with_child(bare("leaf"))
        .with_child(stmt("whatever", "y"));
    let model = ok([module("a", [ext])]);
    let a = &model.sources().next().unwrap().effective;
    let ext = a.substatements.last().unwrap();
    assert_eq!(ext.keyword, Keyword::Extension("oc-ext:origin".to_owned()));
    assert_eq!(ext.substatements.len(), 2);
    assert!(ext.substatements.iter().all(|s| s.keyword.is_extension()));
}

#[test]
fn k002_root_must_be_module_or_submodule() {
    let errs = err([located("c.yang", stmt("container", "c"))]);
    assert!(has(&errs, ErrorCode::K002));
    let errs = err([located("x.yang", stmt("x:root", "c"))]);
    assert!(has(&errs, ErrorCode::K002));
}

// ─── C: cardinality ───────────────────────────────────────────────────────────

#[test]
fn c001_missing_mandatory_is_named() {
    let cases = [
        (located("a.yang", stmt("module", "a").with_child(stmt("prefix", "a"))), "namespace"),
        (located("a.yang", stmt("module", "a").with_child(stmt("namespace", "urn:a"))), "prefix"),
        (located("s.yang", stmt("submodule", "s")), "belongs-to"),
        (
            located("s.yang", stmt("submodule", "s").with_child(stmt("belongs-to", "a"))),
            "prefix",
        ),
        (module("a", [stmt("leaf", "x")]), "type"),
    ];
    for (source, keyword) in cases {
        let errs = err([source]);
        assert!(has(&errs, ErrorCode::C001), "no C001 for {keyword}: {errs:#?}");
        assert!(has_msg(&errs, &format!("`{keyword}`")));
    }
}

#[test]
fn c001_import_needs_prefix() {
    let errs = err([module("a", []), module("b", [stmt("import", "a")])]);
    assert!(has(&errs, ErrorCode::C001));
    assert!(has_msg(&errs, "missing mandatory substatement `prefix` in `import`"));
}

#[test]
fn mandatory_once_is_accepted() {
    ok([module("a", [leaf("x")])]);
    ok([module("a", []), submodule("s", "a", [])]);
}

#[test]
fn c002_repeated_single_statements() {
    let repeats = [
        "yang-version",
        "organization",
        "contact",
        "description",
        "reference",
        "namespace",
        "prefix",
    ];
    for keyword in repeats {
        let value = if keyword == "yang-version" { "1" } else { "text" };
        let errs = err([module("a", [stmt(keyword, value), stmt(keyword, value)])]);
        assert!(has(&errs, ErrorCode::C002), "no C002 for {keyword}: {errs:#?}");
        assert_eq!(errs.len(), 1, "{keyword}: {errs:#?}");
    }
}

#[test]
fn c002_leaf_type_twice() {
    let errs = err([module("a", [leaf("x").with_child(stmt("type", "int8"))])]);
    assert!(has(&errs, ErrorCode::C002));
    assert!(has_msg(&errs, "`type` may appear at most once in `leaf`"));
}

#[test]
fn c002_revision_date_twice() {
    let include = stmt("include", "s")
        .with_child(stmt("revision-date", "2013-07-30"))
        .with_child(stmt("revision-date", "2013-07-30"));
    let child = submodule("s", "a", [stmt("revision", "2013-07-30")]);
    let errs = err([module("a", [include]), child]);
    assert!(has(&errs, ErrorCode::C002));
}

#[test]
fn optional_once_or_never_is_accepted() {
    ok([module("a", [stmt("description", "d"), stmt("organization", "o"), stmt("contact", "c")])]);
    ok([module("a", [stmt("yang-version", "1.1")])]);
    ok([module("a", [])]);
}

#[test]
fn repeatable_statements_may_repeat() {
    ok([module(
        "a",
        [
            stmt("revision", "2013-07-30"),
            stmt("revision", "2012-01-01"),
            leaf("x"),
            leaf("y"),
            stmt("container", "c"),
            stmt("container", "d"),
        ],
    )]);
}

#[test]
fn c003_forbidden_substatement() {
    let errs = err([module("a", [stmt("container", "c").with_child(stmt("type", "string"))])]);
    assert!(has(&errs, ErrorCode::C003));
    assert!(has_msg(&errs, "`type` is not a valid substatement of `container`"));

    let errs = err([module("a", [stmt("revision-date", "2013-07-30")])]);
    assert!(has(&errs, ErrorCode::C003));
}

#[test]
fn c003_module_only_statements_in_submodule() {
    let errs = err([submodule("s", "a", [stmt("namespace", "urn:s")])]);
    assert!(has(&errs, ErrorCode::C003));
}

#[test]
fn cardinality_errors_are_collected_across_files() {
    let errs = err([
        located("a.yang", stmt("module", "a").with_child(stmt("prefix", "a"))),
        module("b", [stmt("leaf", "x")]),
    ]);
    assert_eq!(errs.len(), 2);
    assert!(errs.iter().all(|e| e.kind() == ErrorKind::SubstatementCardinality));
    assert_eq!(errs[0].location.source.as_ref(), "a.yang");
    assert_eq!(errs[1].location.source.as_ref(), "b.yang");
}
