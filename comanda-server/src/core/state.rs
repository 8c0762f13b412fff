//! 服务器状态
//!
//! 所有处理器共享的状态：配置、各数据文件的存储句柄、订单管理器和状态监控。

use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::{Config, Result};
use crate::orders::{OrdersManager, TransitionMonitor, seed, uptime};
use crate::store::{FileStore, JsonCodec, MenuCsvCodec, MenuStore, PurchaseStore, SupplierStore};
use chrono::FixedOffset;
use std::sync::Arc;
use tokio::time::Instant;

/// 服务器状态 - 克隆成本低 (内部均为 Arc)
///
/// ```ignore
/// let state = ServerState::initialize(&config).await?;
/// let orders = state.orders.list().await?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    /// 订单 (comandas.json)
    pub orders: OrdersManager,
    /// 菜单 (cardapio.csv)
    pub menu: MenuStore,
    /// 供应商 (fornecedores.json)
    pub suppliers: SupplierStore,
    /// 采购 (compras.json)
    pub purchases: PurchaseStore,
    /// 订单状态监控
    pub monitor: Arc<TransitionMonitor>,
    /// 启动时间 (健康检查的 uptime)
    pub started_at: Instant,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据目录和四个数据文件 (缺失时创建空文件)
    /// 2. 演示数据 (SEED_DEMO_DATA=true 且订单为空)
    pub async fn initialize(config: &Config) -> Result<Self> {
        let orders = FileStore::open(config.orders_file(), JsonCodec).await?;
        let menu = FileStore::open(config.menu_file(), MenuCsvCodec).await?;
        let suppliers = FileStore::open(config.suppliers_file(), JsonCodec).await?;
        let purchases = FileStore::open(config.purchases_file(), JsonCodec).await?;

        if config.seed_demo_data {
            let written = seed::seed_if_empty(&orders).await?;
            if written > 0 {
                tracing::info!(count = written, "Seeded demo orders");
            }
        }

        tracing::info!(data_dir = %config.data_dir.display(), "Data files ready");

        Ok(Self {
            config: config.clone(),
            orders: OrdersManager::new(orders),
            menu,
            suppliers,
            purchases,
            monitor: Arc::new(TransitionMonitor::new()),
            started_at: Instant::now(),
        })
    }

    /// 报表使用的本地时区
    pub fn offset(&self) -> FixedOffset {
        self.config.report_offset()
    }

    /// 启动后台任务
    ///
    /// - 订单状态监控 (Worker)
    /// - 运行时长日志 (Periodic)
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let monitor = self.monitor.clone();
        let store = self.orders.store().clone();
        let interval = self.config.alert_poll_interval();
        let token = tasks.shutdown_token();
        tasks.spawn("alert_monitor", TaskKind::Worker, async move {
            monitor.run(store, interval, token).await;
        });

        let started = self.started_at;
        let token = tasks.shutdown_token();
        tasks.spawn("uptime_log", TaskKind::Periodic, uptime::run(started, token));

        tasks.log_summary();
    }
}
