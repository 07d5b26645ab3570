//! Raw-tree builders and assertion helpers shared by the integration tests.

#![allow(dead_code)]

use yang_reactor::{Error, ErrorCode, RawStatement, SchemaModel, SourceRef, compile};

pub fn stmt(keyword: &str, argument: &str) -> RawStatement {
    RawStatement::new(keyword, Some(argument), SourceRef::default())
}

pub fn bare(keyword: &str) -> RawStatement {
    RawStatement::new(keyword, None, SourceRef::default())
}

/// Stamp every statement with `source` and its preorder line number.
pub fn located(source: &str, mut raw: RawStatement) -> RawStatement {
    fn walk(raw: &mut RawStatement, source: &str, line: &mut usize) {
        *line += 1;
        raw.location = SourceRef::new(source, *line, 1);
        for child in &mut raw.children {
            walk(child, source, line);
        }
    }
    walk(&mut raw, source, &mut 0);
    raw
}

/// `module name { namespace urn:name; prefix name; body }`.
pub fn module(name: &str, body: impl IntoIterator<Item = RawStatement>) -> RawStatement {
    let root = stmt("module", name)
        .with_child(stmt("namespace", &format!("urn:{name}")))
        .with_child(stmt("prefix", name))
        .with_children(body);
    located(&format!("{name}.yang"), root)
}

/// `submodule name { belongs-to parent { prefix parent; } body }`.
pub fn submodule(name: &str, parent: &str, body: impl IntoIterator<Item = RawStatement>) -> RawStatement {
    let root = stmt("submodule", name)
        .with_child(stmt("belongs-to", parent).with_child(stmt("prefix", parent)))
        .with_children(body);
    located(&format!("{name}.yang"), root)
}

pub fn leaf(name: &str) -> RawStatement {
    stmt("leaf", name).with_child(stmt("type", "string"))
}

pub fn ok(sources: impl IntoIterator<Item = RawStatement>) -> SchemaModel {
    compile(sources).unwrap_or_else(|errs| {
        panic!("expected compile to succeed, got errors: {errs:#?}");
    })
}

pub fn err(sources: impl IntoIterator<Item = RawStatement>) -> Vec<Error> {
    match compile(sources) {
        Ok(_)  => panic!("expected compile to fail but it succeeded"),
        Err(e) => e,
    }
}

pub fn has(errs: &[Error], code: ErrorCode) -> bool {
    errs.iter().any(|e| e.code == code)
}

pub fn has_msg(errs: &[Error], s: &str) -> bool {
    errs.iter().any(|e| e.message.contains(s))
}
