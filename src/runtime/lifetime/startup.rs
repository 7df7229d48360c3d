use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::EnrollmentService;
use crate::storage::{Storage, create_storage};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub enrollment: Arc<EnrollmentService>,
}

/// 输出数据库概况
async fn report_store(storage: &Arc<dyn Storage>) {
    match (storage.count_users().await, storage.count_classes().await) {
        (Ok(users), Ok(classes)) => {
            info!("Store ready: {} user(s), {} class(es)", users, classes);
            if users == 0 {
                debug!("No users found, the web layer must register accounts first");
            }
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("Failed to read store statistics: {}", e);
        }
    }
}

/// 启动前准备：连接数据库、运行迁移、创建服务
pub async fn prepare_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = create_storage().await?;
    report_store(&storage).await;

    let enrollment = Arc::new(EnrollmentService::from_config());
    warn!(
        "Join code generator ready (max attempts: {}, conflict retries: {})",
        config.join_code.max_attempts, config.join_code.max_conflict_retries
    );

    Ok(StartupContext {
        storage,
        enrollment,
    })
}
