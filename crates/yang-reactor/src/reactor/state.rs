use crate::config::ReactorConfig;
use crate::error::{Error, ErrorCode};
use crate::namespaces::{Namespace, NamespaceScope, NamespaceStorage, ScopeKind};
use crate::stmt::{Keyword, YangVersion};
use super::context::{ContextTree, CtxId};

/// Mutable state of one compilation run: the context arena plus the
/// namespace store every file writes into. Created per run, never reused.
pub struct ReactorState {
    pub(crate) tree: ContextTree,
    pub(crate) namespaces: NamespaceStorage,
    config: ReactorConfig,
}

impl ReactorState {
    pub fn new(config: ReactorConfig) -> Self {
        Self { tree: ContextTree::new(), namespaces: NamespaceStorage::new(), config }
    }

    pub fn tree(&self) -> &ContextTree { &self.tree }
    pub fn namespaces(&self) -> &NamespaceStorage { &self.namespaces }
    pub fn config(&self) -> &ReactorConfig { &self.config }

    /// Scope `N` resolves to when written or read from `ctx`.
    pub fn scope_of<N: Namespace>(&self, ctx: CtxId) -> NamespaceScope {
        match N::SCOPE {
            ScopeKind::Global => NamespaceScope::Global,
            ScopeKind::Root   => NamespaceScope::Root(self.tree.get(ctx).root()),
        }
    }

    /// Write into `N` on behalf of `ctx`, in `ctx`'s default scope.
    /// A collision is reported at `ctx` with the existing entry as related location.
    pub fn add_to_namespace<N: Namespace>(
        &mut self,
        ctx: CtxId,
        key: N::Key,
        value: N::Value,
    ) -> Result<(), Error> {
        let scope = self.scope_of::<N>(ctx);
        let location = self.tree.get(ctx).location().clone();
        self.namespaces
            .put::<N>(scope, key, value, location.clone())
            .map_err(|dup| {
                let related = Some(dup.existing.clone());
                Error::new(ErrorCode::N001, location, dup.to_string()).with_related(related)
            })
    }

    pub fn lookup_in_namespace<N: Namespace>(&self, ctx: CtxId, key: &N::Key) -> Option<&N::Value> {
        self.namespaces.get::<N>(self.scope_of::<N>(ctx), key)
    }

    /// Language version of the file `ctx` belongs to.
    pub fn yang_version(&self, ctx: CtxId) -> YangVersion {
        let root = self.tree.get(ctx).root();
        self.tree
            .first_argument(root, &Keyword::YangVersion)
            .and_then(|arg| arg.as_version())
            .unwrap_or(self.config.default_yang_version)
    }
}
