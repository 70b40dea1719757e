use std::path::PathBuf;
use std::sync::Arc;

use shared::models::{SalesRecord, Tenant, User};
use tokio::sync::RwLock;

use crate::auth::JwtService;
use crate::core::{Config, Result, StoreBackend};
use crate::directory::Directory;
use crate::directory::seed::demo_sales;
use crate::ledger::SalesLedger;
use crate::store::{MemoryStore, RecordStore, RedbStore};

/// The three collections a server instance persists
pub struct Stores {
    pub sales: Arc<dyn RecordStore<SalesRecord>>,
    pub tenants: Arc<dyn RecordStore<Tenant>>,
    pub users: Arc<dyn RecordStore<User>>,
}

impl Stores {
    /// All collections backed by one store instance
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: RecordStore<SalesRecord> + RecordStore<Tenant> + RecordStore<User> + 'static,
    {
        Self {
            sales: store.clone(),
            tenants: store.clone(),
            users: store,
        }
    }
}

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆一份。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | ledger | Arc<RwLock<SalesLedger>> | 売上台帳 |
/// | directory | Arc<RwLock<Directory>> | tenants + users |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
///
/// Every mutation holds the write lock for its whole check-then-write, so
/// two concurrent inserts for the same tenant and period cannot both pass
/// the duplicate check.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    pub ledger: Arc<RwLock<SalesLedger>>,
    pub directory: Arc<RwLock<Directory>>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. Record store (`STORE_BACKEND`)
    /// 3. Ledger + directory (one load each)
    /// 4. Demo data for empty collections (`SEED_DEMO_DATA`)
    pub async fn initialize(config: &Config) -> Result<Self> {
        let stores = match config.store_backend {
            StoreBackend::Redb => {
                config.ensure_work_dir_structure()?;
                let path = config.database_path();
                tracing::info!(path = %path.display(), "Opening redb record store");
                Stores::shared(Arc::new(RedbStore::open(&path)?))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory record store, data is lost on exit");
                Stores::shared(Arc::new(MemoryStore::new()))
            }
        };
        Self::with_stores(config.clone(), stores)
    }

    /// Build state over explicit stores
    pub fn with_stores(config: Config, stores: Stores) -> Result<Self> {
        let mut ledger = SalesLedger::open(stores.sales)?;
        let mut directory = Directory::open(stores.tenants, stores.users)?;

        if config.seed_demo_data {
            let (_, err) = directory.seed_demo().into_parts();
            if let Some(e) = err {
                tracing::warn!(error = %e, "Demo directory seeded but not persisted");
            }
            let (_, err) = ledger.seed(demo_sales()).into_parts();
            if let Some(e) = err {
                tracing::warn!(error = %e, "Demo sales seeded but not persisted");
            }
        }

        Ok(Self {
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            config,
            ledger: Arc::new(RwLock::new(ledger)),
            directory: Arc::new(RwLock::new(directory)),
        })
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 打印启动横幅内容
    pub async fn print_banner_content(&self) {
        let ledger = self.ledger.read().await;
        let directory = self.directory.read().await;
        tracing::info!("Work dir : {}", self.config.work_dir);
        tracing::info!("Backend  : {:?}", self.config.store_backend);
        tracing::info!(
            "Data     : {} sales records, {} tenants, {} users",
            ledger.len(),
            directory.list_tenants().len(),
            directory.list_users().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_state_is_seeded() {
        let state = ServerState::initialize(&Config::for_tests()).await.unwrap();
        assert_eq!(state.ledger.read().await.len(), 6);
        assert_eq!(state.directory.read().await.list_tenants().len(), 3);
    }

    #[tokio::test]
    async fn test_seeding_can_be_disabled() {
        let mut config = Config::for_tests();
        config.seed_demo_data = false;
        let state = ServerState::initialize(&config).await.unwrap();
        assert!(state.ledger.read().await.is_empty());
        assert!(state.directory.read().await.list_users().is_empty());
    }

    #[tokio::test]
    async fn test_redb_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::for_tests().with_overrides(dir.path().to_string_lossy(), 0);
        config.store_backend = StoreBackend::Redb;

        {
            let state = ServerState::initialize(&config).await.unwrap();
            let mut ledger = state.ledger.write().await;
            let period = "2030-01".parse().unwrap();
            let committed = ledger.insert("1", "tenantA", period, 500u64).unwrap();
            assert!(committed.is_persisted());
        }

        let state = ServerState::initialize(&config).await.unwrap();
        assert_eq!(state.ledger.read().await.len(), 7);
        assert!(config.database_path().exists());
    }
}
