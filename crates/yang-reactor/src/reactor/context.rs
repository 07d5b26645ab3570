//! Statement contexts: one per source statement, stored in a single arena.
//!
//! Parents own their children through the arena; every context refers to its
//! parent and its file root by `CtxId`, never by pointer.

use std::fmt;

use crate::error::{Error, ErrorCode};
use crate::stmt::{ArgumentValue, Keyword, StatementRegistry};
use crate::syntax::{RawStatement, SourceRef};
use super::phase::ModelProcessingPhase;

/// Index of a context in its `ContextTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CtxId(usize);

impl CtxId {
    pub fn from_index(index: usize) -> Self { Self(index) }
    pub fn index(self) -> usize { self.0 }
}

impl fmt::Display for CtxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ─── Context ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StatementContext {
    keyword: Keyword,
    raw_argument: Option<String>,
    argument: ArgumentValue,
    parent: Option<CtxId>,
    root: CtxId,
    children: Vec<CtxId>,
    /// Children pulled in by reuse; they belong to another parent.
    contributed: Vec<CtxId>,
    completed: ModelProcessingPhase,
    location: SourceRef,
    /// Inside an extension subtree: never validated, no hooks.
    opaque: bool,
}

impl StatementContext {
    pub fn keyword(&self) -> &Keyword { &self.keyword }
    pub fn raw_argument(&self) -> Option<&str> { self.raw_argument.as_deref() }
    pub fn argument(&self) -> &ArgumentValue { &self.argument }
    pub fn parent(&self) -> Option<CtxId> { self.parent }
    pub fn root(&self) -> CtxId { self.root }
    pub fn location(&self) -> &SourceRef { &self.location }
    pub fn completed_phase(&self) -> ModelProcessingPhase { self.completed }
    pub fn is_opaque(&self) -> bool { self.opaque }

    /// Children as written in the source, in source order.
    pub fn declared_substatements(&self) -> &[CtxId] { &self.children }

    /// Children contributed by inference, in the order they were applied.
    pub fn contributed_substatements(&self) -> &[CtxId] { &self.contributed }
}

// ─── Tree ─────────────────────────────────────────────────────────────────────

/// Arena holding the contexts of every loaded file.
#[derive(Debug, Default)]
pub struct ContextTree {
    contexts: Vec<StatementContext>,
    roots: Vec<CtxId>,
}

impl ContextTree {
    pub fn new() -> Self { Self::default() }

    /// # Panics
    /// If `id` does not come from this tree.
    pub fn get(&self, id: CtxId) -> &StatementContext {
        &self.contexts[id.0]
    }

    pub fn len(&self) -> usize { self.contexts.len() }
    pub fn is_empty(&self) -> bool { self.contexts.is_empty() }

    /// File roots in load order.
    pub fn roots(&self) -> &[CtxId] { &self.roots }

    /// Every context id, files in load order, each file depth-first.
    pub fn ids(&self) -> impl Iterator<Item = CtxId> + use<> {
        (0..self.contexts.len()).map(CtxId)
    }

    pub fn first_child(&self, id: CtxId, keyword: &Keyword) -> Option<CtxId> {
        self.get(id)
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).keyword == *keyword)
    }

    /// Argument of the first declared child with `keyword`.
    pub fn first_argument(&self, id: CtxId, keyword: &Keyword) -> Option<&ArgumentValue> {
        self.first_child(id, keyword).map(|c| &self.get(c).argument)
    }

    /// Declared followed by contributed children.
    pub fn effective_substatements(&self, id: CtxId) -> impl Iterator<Item = CtxId> + '_ {
        let ctx = self.get(id);
        ctx.children.iter().chain(&ctx.contributed).copied()
    }

    /// Declared descendants of `id` in depth-first order, excluding `id`.
    pub fn descendants(&self, id: CtxId) -> Vec<CtxId> {
        let mut out = Vec::new();
        let mut stack: Vec<CtxId> = self.get(id).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.get(next).children.iter().rev().copied());
        }
        out
    }

    pub(crate) fn contribute(&mut self, parent: CtxId, children: impl IntoIterator<Item = CtxId>) {
        self.contexts[parent.0].contributed.extend(children);
    }

    pub(crate) fn mark_completed(&mut self, phase: ModelProcessingPhase) {
        for ctx in &mut self.contexts {
            if ctx.completed < phase {
                ctx.completed = phase;
            }
        }
    }

    // ── Construction ──────────────────────────────────────────────────────────

    /// Build the contexts of one file, depth-first.
    ///
    /// Keyword and argument errors are collected for the whole file instead of
    /// stopping at the first one. On error the file's contexts stay in the
    /// arena but are not registered as a root.
    pub fn create_root(
        &mut self,
        raw: &RawStatement,
        registry: &StatementRegistry,
    ) -> Result<CtxId, Vec<Error>> {
        if Keyword::builtin(&raw.keyword).is_none_or(|k| !k.is_root()) {
            return Err(vec![Error::new(
                ErrorCode::K002,
                raw.location.clone(),
                format!("`{}` cannot be the root of a source, expected `module` or `submodule`", raw.keyword),
            )]);
        }

        let mut errors = Vec::new();
        let root = self.build(raw, None, None, false, registry, &mut errors);
        match root {
            Some(root) if errors.is_empty() => {
                self.roots.push(root);
                Ok(root)
            }
            _ => Err(errors),
        }
    }

    fn build(
        &mut self,
        raw: &RawStatement,
        parent: Option<CtxId>,
        root: Option<CtxId>,
        in_extension: bool,
        registry: &StatementRegistry,
        errors: &mut Vec<Error>,
    ) -> Option<CtxId> {
        let definition = if in_extension {
            registry.opaque()
        } else {
            match registry.lookup(&raw.keyword, &raw.location) {
                Ok(def) => def,
                Err(e) => {
                    errors.push(e);
                    return None;
                }
            }
        };
        let opaque = definition.is_opaque();
        let keyword = if opaque {
            Keyword::Extension(raw.keyword.clone())
        } else {
            definition.keyword.clone()
        };
        let argument = definition
            .parse_argument(raw.argument.as_deref(), &raw.location)
            .unwrap_or_else(|e| {
                errors.push(e);
                ArgumentValue::None
            });

        let id = CtxId(self.contexts.len());
        self.contexts.push(StatementContext {
            keyword,
            raw_argument: raw.argument.clone(),
            argument,
            parent,
            root: root.unwrap_or(id),
            children: Vec::new(),
            contributed: Vec::new(),
            completed: ModelProcessingPhase::Init,
            location: raw.location.clone(),
            opaque,
        });
        if let Some(parent) = parent {
            self.contexts[parent.0].children.push(id);
        }

        let root = root.unwrap_or(id);
        for child in &raw.children {
            self.build(child, Some(id), Some(root), opaque, registry, errors);
        }
        Some(id)
    }
}
