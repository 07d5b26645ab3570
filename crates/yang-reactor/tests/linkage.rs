//! Cross-file linkage through `include` and `import`.
//!
//! Sources are compiled as a forest through the public `compile()` API.

mod common;

use pretty_assertions::assert_eq;

use common::*;
use yang_reactor::namespaces::{
    ImportPrefixNamespace, ImportedModuleContext, IncludedModuleContext,
    IncludedSubmoduleNameToIdentifier,
};
use yang_reactor::{
    ErrorCode, ErrorKind, Keyword, ModuleIdentifier, NamespaceScope, ReactorConfig, YangVersion,
    compile_with,
};

fn id(name: &str) -> ModuleIdentifier {
    ModuleIdentifier::new(name, None)
}

fn dated(name: &str, date: &str) -> ModuleIdentifier {
    ModuleIdentifier::new(name, yang_reactor::stmt::parse_revision_date(date))
}

fn module_a() -> yang_reactor::RawStatement {
    module("moduleA", [])
}

fn submodule_b() -> yang_reactor::RawStatement {
    submodule("submoduleB", "moduleA", [stmt("include", "moduleA")])
}

// ─── include ──────────────────────────────────────────────────────────────────

#[test]
fn include_records_the_included_context() {
    let model = ok([module_a(), submodule_b()]);
    let root_a = model.source(&id("moduleA")).unwrap().root;
    let root_b = model.source(&id("submoduleB")).unwrap().root;

    assert_eq!(
        model.lookup::<IncludedModuleContext>(NamespaceScope::Root(root_b), &id("moduleA")),
        Some(&root_a),
    );
    assert_eq!(
        model.lookup::<IncludedSubmoduleNameToIdentifier>(NamespaceScope::Root(root_b), &"moduleA".to_owned()),
        Some(&id("moduleA")),
    );
    // Nothing is recorded on the included side.
    assert_eq!(model.lookup::<IncludedModuleContext>(NamespaceScope::Root(root_a), &id("submoduleB")), None);
}

#[test]
fn include_without_target_fails() {
    let errs = err([submodule_b()]);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].kind(), ErrorKind::UnresolvedPrerequisite);
    assert!(has_msg(&errs, "Included submodule 'moduleA' was not found"));
    assert_eq!(errs[0].location.source.as_ref(), "submoduleB.yang");
}

#[test]
fn load_order_does_not_change_the_model() {
    let forward = ok([module_a(), submodule_b()]);
    let backward = ok([submodule_b(), module_a()]);
    assert_eq!(forward.len(), backward.len());
    for source in forward.sources() {
        let other = backward.source(&source.identifier).unwrap();
        assert_eq!(source.declared, other.declared);
        assert_eq!(*source.effective, *other.effective);
    }
}

#[test]
fn include_with_revision_date_matches_that_revision() {
    let parent = module(
        "a",
        [stmt("include", "s").with_child(stmt("revision-date", "2013-07-30"))],
    );
    let child = submodule("s", "a", [stmt("revision", "2013-07-30")]);
    let model = ok([parent, child]);
    let root_a = model.source(&id("a")).unwrap().root;
    assert!(model
        .lookup::<IncludedModuleContext>(NamespaceScope::Root(root_a), &dated("s", "2013-07-30"))
        .is_some());
}

#[test]
fn undated_include_does_not_match_a_dated_source() {
    let parent = module("a", [stmt("include", "s")]);
    let child = submodule("s", "a", [stmt("revision", "2013-07-30")]);
    let errs = err([parent, child]);
    assert!(has(&errs, ErrorCode::R001));
    assert!(has_msg(&errs, "Included submodule 's' was not found"));
}

#[test]
fn dated_include_does_not_match_another_revision() {
    let parent = module(
        "a",
        [stmt("include", "s").with_child(stmt("revision-date", "2014-01-01"))],
    );
    let child = submodule("s", "a", [stmt("revision", "2013-07-30")]);
    assert!(has(&err([parent, child]), ErrorCode::R001));
}

#[test]
fn effective_include_points_at_its_target() {
    let model = ok([module("a", [stmt("include", "s")]), submodule("s", "a", [leaf("x")])]);
    let a = &model.source(&id("a")).unwrap().effective;
    let include = a.find(&Keyword::Include).unwrap();
    assert_eq!(include.linked_source, Some(id("s")));

    let target = model.linked(include).unwrap();
    assert_eq!(target.keyword, Keyword::Submodule);
    assert!(target.find_named(&Keyword::Leaf, "x").is_some());
}

// ─── import ───────────────────────────────────────────────────────────────────

#[test]
fn import_binds_its_prefix() {
    let importer = module("b", [stmt("import", "a").with_child(stmt("prefix", "pa"))]);
    let model = ok([module("a", []), importer]);
    let root_a = model.source(&id("a")).unwrap().root;
    let root_b = model.source(&id("b")).unwrap().root;

    assert_eq!(
        model.lookup::<ImportPrefixNamespace>(NamespaceScope::Root(root_b), &"pa".to_owned()),
        Some(&id("a")),
    );
    assert_eq!(
        model.lookup::<ImportedModuleContext>(NamespaceScope::Root(root_b), &id("a")),
        Some(&root_a),
    );
    let import = model.source(&id("b")).unwrap().effective.find(&Keyword::Import).cloned().unwrap();
    assert_eq!(model.linked(&import).unwrap().keyword, Keyword::Module);
}

#[test]
fn import_of_missing_module_fails() {
    let errs = err([module("b", [stmt("import", "zz").with_child(stmt("prefix", "z"))])]);
    assert!(has(&errs, ErrorCode::R001));
    assert!(has_msg(&errs, "Imported module 'zz' was not found"));
}

#[test]
fn own_prefix_refers_to_the_module() {
    let model = ok([module("a", []), submodule("s", "a", [])]);
    let root_a = model.source(&id("a")).unwrap().root;
    let root_s = model.source(&id("s")).unwrap().root;
    assert_eq!(
        model.lookup::<ImportPrefixNamespace>(NamespaceScope::Root(root_a), &"a".to_owned()),
        Some(&id("a")),
    );
    assert_eq!(
        model.lookup::<ImportPrefixNamespace>(NamespaceScope::Root(root_s), &"a".to_owned()),
        Some(&id("a")),
    );
}

#[test]
fn belongs_to_prefix_picks_the_latest_parent_revision() {
    let parent = |date: &str| module("a", [stmt("revision", date)]);
    let model = ok([parent("2012-01-01"), parent("2013-07-30"), submodule("s", "a", [])]);
    let root_s = model.source(&id("s")).unwrap().root;
    let prefix = model
        .lookup::<ImportPrefixNamespace>(NamespaceScope::Root(root_s), &"a".to_owned())
        .unwrap();
    assert_eq!(prefix.to_string(), "a@2013-07-30");
}

#[test]
fn prefix_bound_twice_is_a_duplicate() {
    let importer = module(
        "b",
        [
            stmt("import", "a").with_child(stmt("prefix", "x")),
            stmt("import", "c").with_child(stmt("prefix", "x")),
        ],
    );
    let errs = err([module("a", []), module("c", []), importer]);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].code, ErrorCode::N001);
    assert!(errs[0].related.is_some());
}

#[test]
fn import_cannot_rebind_own_prefix() {
    let importer = module("b", [stmt("import", "a").with_child(stmt("prefix", "b"))]);
    assert!(has(&err([module("a", []), importer]), ErrorCode::N001));
}

// ─── YANG 1.1 ─────────────────────────────────────────────────────────────────

fn documented_import(version: Option<&str>) -> yang_reactor::RawStatement {
    let mut body = Vec::new();
    if let Some(version) = version {
        body.push(stmt("yang-version", version));
    }
    body.push(
        stmt("import", "a")
            .with_child(stmt("prefix", "pa"))
            .with_child(stmt("description", "shared types")),
    );
    module("b", body)
}

#[test]
fn import_description_needs_yang_1_1() {
    let errs = err([module("a", []), documented_import(None)]);
    assert!(has(&errs, ErrorCode::C003));
    assert!(has_msg(&errs, "`description` is not a valid substatement of `import`"));

    ok([module("a", []), documented_import(Some("1.1"))]);
}

#[test]
fn default_version_comes_from_config() {
    let config = ReactorConfig::default().with_default_yang_version(YangVersion::V1_1);
    compile_with(config.clone(), [module("a", []), documented_import(None)]).unwrap();

    // An explicit statement wins over the default.
    let errs = compile_with(config, [module("a", []), documented_import(Some("1"))]).err().unwrap();
    assert!(has(&errs, ErrorCode::C003));
}
