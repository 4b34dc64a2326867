use crate::domain::port::RepositoryError;

/// データベースエラー型
/// データベース操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatabaseError {
    /// データベース接続エラー
    #[error("Database connection error: {0}")]
    ConnectionError(String),
    /// SQLクエリエラー
    #[error("Database query error: {0}")]
    QueryError(String),
    /// 取得した行をドメインモデルに復元できない
    #[error("Row mapping error: {0}")]
    MappingError(String),
    /// マイグレーションエラー
    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// DatabaseErrorからRepositoryErrorへの変換
impl From<DatabaseError> for RepositoryError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConnectionError(msg) => RepositoryError::ConnectionFailed(msg),
            DatabaseError::QueryError(msg) => RepositoryError::OperationFailed(msg),
            DatabaseError::MappingError(msg) => RepositoryError::FetchFailed(msg),
            DatabaseError::MigrationError(msg) => RepositoryError::OperationFailed(msg),
        }
    }
}
