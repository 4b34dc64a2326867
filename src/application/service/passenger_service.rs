use crate::application::{ApplicationError, ResourceNotFound};
use crate::domain::model::{Passenger, PassengerId};
use crate::domain::port::PassengerRepository;
use std::sync::Arc;

/// 乗客アプリケーションサービス
/// 乗客の登録と取得を提供する
pub struct PassengerApplicationService {
    passenger_repository: Arc<dyn PassengerRepository>,
}

impl PassengerApplicationService {
    pub fn new(passenger_repository: Arc<dyn PassengerRepository>) -> Self {
        Self {
            passenger_repository,
        }
    }

    /// 新しい乗客を登録
    ///
    /// # Returns
    /// * `Ok(Passenger)` - IDが採番された乗客
    /// * `Err(ApplicationError::Domain)` - 名前またはメールアドレスが空
    pub async fn register_passenger(
        &self,
        name: String,
        email: String,
    ) -> Result<Passenger, ApplicationError> {
        let passenger = Passenger::create(name, email)?;
        let passenger = self.passenger_repository.save(&passenger).await?;
        tracing::info!(passenger_id = %passenger.id(), "passenger registered");
        Ok(passenger)
    }

    /// 乗客IDで乗客を取得
    /// 存在しなければ `ResourceNotFound::Passenger`
    pub async fn get_passenger(&self, passenger_id: PassengerId) -> Result<Passenger, ApplicationError> {
        let passenger = self
            .passenger_repository
            .find_by_id(passenger_id)
            .await?
            .ok_or(ResourceNotFound::Passenger(passenger_id))?;
        Ok(passenger)
    }
}
