//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    CommentService, CommentServiceImpl, PostService, PostServiceImpl,
};
use crate::application::subscriptions::SubscriptionHub;
use crate::config::Settings;
use crate::infrastructure::repositories::{PgCommentRepository, PgPostRepository};
use crate::infrastructure::{cache, database};
use crate::presentation::http::routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<dyn PostService>,
    pub comment_service: Arc<dyn CommentService>,
    pub hub: Arc<SubscriptionHub>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool and bring the schema up to date
        let db = database::create_pool(&settings.database).await?;
        database::run_migrations(&db).await?;
        tracing::info!("Database connection pool created");

        // An unreachable cache backend must not block startup; reads then
        // always fall through to storage.
        let redis_cache = match cache::create_redis_cache(&settings.redis).await {
            Ok(redis_cache) => Some(Arc::new(redis_cache)),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, running without cache");
                None
            }
        };

        let post_store = Arc::new(PgPostRepository::new(db.clone()));
        let comment_store = Arc::new(PgCommentRepository::new(db));

        let hub = Arc::new(SubscriptionHub::new(
            settings.subscriptions.channel_capacity,
        ));

        let post_service: Arc<dyn PostService> = Arc::new(PostServiceImpl::new(
            post_store.clone(),
            comment_store.clone(),
            redis_cache.clone(),
            settings.cache.ttl_secs,
        ));
        let comment_service: Arc<dyn CommentService> = Arc::new(CommentServiceImpl::new(
            comment_store,
            post_store,
            redis_cache,
            hub.clone(),
        ));

        let state = AppState {
            post_service,
            comment_service,
            hub,
        };

        let router = routes::create_router(state);

        // Bind to address
        let addr: SocketAddr = settings.server_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
