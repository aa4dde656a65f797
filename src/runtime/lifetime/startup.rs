use crate::errors::Result;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_code;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@localhost";
const GENERATED_PASSWORD_LEN: usize = 16;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

// ADMIN_PASSWORD 未设置时生成随机密码并打印到日志
fn admin_password() -> String {
    match std::env::var("ADMIN_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ => {
            let generated = generate_random_code(GENERATED_PASSWORD_LEN);
            warn!("==========================================================");
            warn!("  ADMIN_PASSWORD not set, generated password for '{ADMIN_USERNAME}':");
            warn!("  {}", generated);
            warn!("  Save it now or set ADMIN_PASSWORD before the first start");
            warn!("==========================================================");
            generated
        }
    }
}

/// 空库首次启动时创建默认管理员
///
/// 已有任何用户则不做处理并返回 `None`，此时不会调用 `password`。
pub async fn seed_admin(
    storage: &Arc<dyn Storage>,
    password: impl FnOnce() -> String,
) -> Result<Option<User>> {
    let existing = storage.count_users().await?;
    if existing > 0 {
        debug!("{} user(s) present, admin seed skipped", existing);
        return Ok(None);
    }

    let admin = storage
        .create_user(CreateUserRequest {
            username: ADMIN_USERNAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password: hash_password(&password())?,
            role: UserRole::Admin,
            display_name: Some("Administrator".to_string()),
        })
        .await?;

    info!("Default admin account created (ID: {})", admin.id);
    Ok(Some(admin))
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    if let Err(e) = seed_admin(&storage, admin_password).await {
        error!("Failed to seed default admin: {}", e);
    }

    StartupContext { storage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::SeaOrmStorage;
    use crate::utils::password::verify_password;

    async fn empty_storage() -> Arc<dyn Storage> {
        let storage = SeaOrmStorage::connect(&DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 30,
        })
        .await
        .expect("in-memory database");
        Arc::new(storage)
    }

    #[tokio::test]
    async fn test_seed_creates_admin_once() {
        let storage = empty_storage().await;

        let admin = seed_admin(&storage, || "SeedPass123".to_string())
            .await
            .expect("seed")
            .expect("admin created");
        assert!(admin.is_admin());
        assert!(verify_password("SeedPass123", &admin.password_hash));

        let again = seed_admin(&storage, || panic!("password requested with users present"))
            .await
            .expect("seed");
        assert!(again.is_none());
        assert_eq!(storage.count_users().await.expect("count"), 1);
    }
}
