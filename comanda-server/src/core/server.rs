//! Server Implementation
//!
//! HTTP 服务器启动和管理

use crate::core::tasks::BackgroundTasks;
use crate::core::{Config, Result, ServerError, ServerState};
use crate::middleware::logging_middleware;
use axum::{Router, middleware};
use tokio_util::sync::CancellationToken;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

/// 组装所有路由
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::comandas::router())
        .merge(crate::api::cozinha::router())
        .merge(crate::api::cardapio::router())
        .merge(crate::api::fornecedores::router())
        .merge(crate::api::compras::router())
        .merge(crate::api::relatorios::router())
        .merge(crate::api::alertas::router())
}

/// 完整应用: 路由 + 状态 + 中间件
///
/// 测试中直接对返回的 Router 调用 `oneshot`。
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
    shutdown: CancellationToken,
}

impl Server {
    /// 状态由调用方先行初始化 ([`ServerState::initialize`])
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state,
            shutdown: CancellationToken::new(),
        }
    }

    /// 取消后服务器优雅退出 (与 ctrl-c 等效)
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub async fn run(&self) -> Result<()> {
        if self.config.is_production() && self.config.seed_demo_data {
            tracing::warn!("SEED_DEMO_DATA is enabled in production");
        }

        let mut tasks = BackgroundTasks::with_token(self.shutdown.child_token());
        self.state.start_background_tasks(&mut tasks);

        let addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local = listener
            .local_addr()
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!(
            environment = %self.config.environment,
            "🍽️ Comanda server listening on http://{}",
            local
        );

        let app = build_app(self.state.clone());
        let token = self.shutdown.clone();
        let shutdown = async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::info!("Received ctrl-c, shutting down..."),
                _ = token.cancelled() => tracing::info!("Shutdown requested"),
            }
        };

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve);

        tasks.shutdown(self.config.shutdown_timeout()).await;
        served?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
