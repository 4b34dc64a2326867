use crate::adapter::database_config::{var_or, ConfigError};
use std::net::SocketAddr;

/// 永続化先の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// プロセス内のメモリストア（再起動で消える）
    Memory,
    /// MySQL
    MySql,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "mysql" => Ok(StorageBackend::MySql),
            other => Err(ConfigError::InvalidValue(format!(
                "Invalid BOOKING_STORAGE: {} (expected memory or mysql)",
                other
            ))),
        }
    }
}

/// HTTPサーバーの設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub storage: StorageBackend,
}

impl ServerConfig {
    /// 環境変数から設定を読み取る
    ///
    /// * `SERVER_ADDRESS` - 待ち受けアドレス（デフォルト `0.0.0.0:3000`）
    /// * `BOOKING_STORAGE` - `memory` または `mysql`（デフォルト `memory`）
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_address = var_or("SERVER_ADDRESS", "0.0.0.0:3000")
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue(format!("Invalid SERVER_ADDRESS: {}", e)))?;
        let storage = StorageBackend::parse(&var_or("BOOKING_STORAGE", "memory"))?;

        Ok(Self {
            bind_address,
            storage,
        })
    }
}
