// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::model::{Booking, BookingId, Flight, FlightId, Passenger, PassengerId};
use async_trait::async_trait;

/// リポジトリエラー型
/// リポジトリ操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum RepositoryError {
    /// データベース接続に失敗
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// 操作に失敗
    #[error("Operation failed: {0}")]
    OperationFailed(String),
    /// データの取得に失敗
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    /// 楽観ロックの競合（読み込み後に他の更新が入った）
    #[error("Concurrent modification: {0}")]
    Conflict(String),
}

/// 乗客リポジトリトレイト
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    /// 乗客を保存する
    /// IDがなければ採番し、あればそのIDのレコードを上書きする
    ///
    /// # Returns
    /// * `Ok(Passenger)` - IDが確定した乗客
    /// * `Err(RepositoryError)` - 保存失敗
    async fn save(&self, passenger: &Passenger) -> Result<Passenger, RepositoryError>;

    /// IDで乗客を検索する
    /// 見つからない場合は `Ok(None)`
    async fn find_by_id(&self, passenger_id: PassengerId)
        -> Result<Option<Passenger>, RepositoryError>;
}

/// 便リポジトリトレイト
/// 永続化済みの便の保存はバージョンを比較してから行う
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// 便を保存する
    ///
    /// # Returns
    /// * `Ok(Flight)` - IDと新しいバージョンが確定した便
    /// * `Err(RepositoryError::Conflict)` - 保存済みのバージョンと一致しない
    /// * `Err(RepositoryError)` - その他の保存失敗
    async fn save(&self, flight: &Flight) -> Result<Flight, RepositoryError>;

    /// IDで便を検索する
    /// 見つからない場合は `Ok(None)`
    async fn find_by_id(&self, flight_id: FlightId) -> Result<Option<Flight>, RepositoryError>;
}

/// 予約リポジトリトレイト
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 予約を保存する
    /// IDがなければ採番し、あればそのIDのレコードを上書きする
    async fn save(&self, booking: &Booking) -> Result<Booking, RepositoryError>;

    /// IDで予約を検索する
    /// 見つからない場合は `Ok(None)`
    async fn find_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>, RepositoryError>;

    /// すべての予約を取得する
    /// 並び順はストアに依存する
    async fn find_all(&self) -> Result<Vec<Booking>, RepositoryError>;
}
