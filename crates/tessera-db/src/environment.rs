//! Environment accessor for handler provisioning
//!
//! Application code asks the [`Environment`] for a [`CrudHandler`] instead of
//! building one, so it never sees how the store behind it was opened. The
//! factory runs only when a handler is requested.

use crate::config::StoreConfig;
use crate::handler::CrudHandler;
use futures::future::{BoxFuture, FutureExt};
use native_db::Models;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::warn;

type HandlerFactory = Arc<dyn Fn() -> BoxFuture<'static, Option<CrudHandler>> + Send + Sync>;

/// Deferred, asynchronous access to a configured [`CrudHandler`]
///
/// The default environment has no factory and yields `None`.
#[derive(Clone, Default)]
pub struct Environment {
    crud_handler: Option<HandlerFactory>,
}

impl Environment {
    /// Create an unconfigured environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handler factory
    pub fn with_crud_handler<F, Fut>(mut self, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<CrudHandler>> + Send + 'static,
    {
        let boxed: HandlerFactory = Arc::new(move || factory().boxed());
        self.crud_handler = Some(boxed);
        self
    }

    /// Install a factory backed by the store `config` selects
    ///
    /// The store is opened on the first request and the same handler is
    /// shared by every later request. If opening fails the request yields
    /// `None`.
    pub fn with_store(self, config: StoreConfig, models: &'static Models) -> Self {
        let shared: Arc<OnceCell<CrudHandler>> = Arc::new(OnceCell::new());
        self.with_crud_handler(move || {
            let shared = Arc::clone(&shared);
            let config = config.clone();
            async move {
                match shared
                    .get_or_try_init(|| CrudHandler::open(config, models))
                    .await
                {
                    Ok(handler) => Some(handler.clone()),
                    Err(e) => {
                        warn!(error = %e, "Failed to open store for environment");
                        None
                    }
                }
            }
        })
    }

    /// Check whether a handler factory is installed
    pub fn is_configured(&self) -> bool {
        self.crud_handler.is_some()
    }

    /// Run the factory and return its handler
    pub async fn crud_handler(&self) -> Option<CrudHandler> {
        match &self.crud_handler {
            Some(factory) => factory().await,
            None => None,
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{book_dto, Book, MODELS};
    use crate::store::Store;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_default_yields_none() {
        let env = Environment::default();
        assert!(!env.is_configured());
        assert!(env.crud_handler().await.is_none());
    }

    #[tokio::test]
    async fn test_factory_is_lazy() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let env = Environment::new().with_crud_handler(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Store::in_memory(&MODELS).ok().map(CrudHandler::new) }
        });

        assert!(env.is_configured());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(env.crud_handler().await.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_factory_may_yield_none() {
        let env = Environment::new().with_crud_handler(|| async { None });
        assert!(env.is_configured());
        assert!(env.crud_handler().await.is_none());
    }

    #[tokio::test]
    async fn test_with_store_shares_one_handler() {
        let env = Environment::new().with_store(StoreConfig::in_memory(), &MODELS);

        let first = env.crud_handler().await.unwrap();
        let id = first
            .create_item::<Book>(book_dto("Dune", 1965))
            .await
            .unwrap();

        let second = env.clone().crud_handler().await.unwrap();
        let loaded: Book = second.read_item(&id).await.unwrap();
        assert_eq!(loaded.title, "Dune");
    }

    #[tokio::test]
    async fn test_with_persistent_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::persistent(dir.path().join("library.db"));
        let env = Environment::new().with_store(config, &MODELS);

        let handler = env.crud_handler().await.unwrap();
        handler
            .create_item::<Book>(book_dto("Dune", 1965))
            .await
            .unwrap();
        assert!(env.crud_handler().await.is_some());
    }

    #[tokio::test]
    async fn test_with_store_open_failure_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let config = StoreConfig::persistent(blocker.join("library.db"));

        let env = Environment::new().with_store(config, &MODELS);
        assert!(env.crud_handler().await.is_none());
    }

    #[test]
    fn test_debug() {
        assert_eq!(
            format!("{:?}", Environment::new()),
            "Environment { configured: false }"
        );
    }
}
