use crate::domain::error::DomainError;
use crate::domain::model::{BookingId, FlightId, PassengerId};
use crate::domain::port::RepositoryError;

/// IDで検索したリソースが存在しない
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceNotFound {
    #[error("Passenger with ID {0} not found.")]
    Passenger(PassengerId),
    #[error("Flight with ID {0} not found.")]
    Flight(FlightId),
    #[error("Booking with ID {0} not found.")]
    Booking(BookingId),
}

/// アプリケーション層のエラー型
/// ドメインエラー、未検出、リポジトリエラーをラップする
/// ドメイン由来のメッセージはそのまま呼び出し側に伝える
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    /// ドメインエラー（ビジネスルール違反）
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// エンティティが見つからない
    #[error(transparent)]
    NotFound(#[from] ResourceNotFound),
    /// リポジトリエラー（永続化の失敗）
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
