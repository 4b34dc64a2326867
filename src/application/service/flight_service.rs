use crate::application::{ApplicationError, ResourceNotFound};
use crate::domain::model::{Flight, FlightId};
use crate::domain::port::FlightRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// 便アプリケーションサービス
/// 便の登録と取得を提供する
pub struct FlightApplicationService {
    flight_repository: Arc<dyn FlightRepository>,
}

impl FlightApplicationService {
    pub fn new(flight_repository: Arc<dyn FlightRepository>) -> Self {
        Self { flight_repository }
    }

    /// 新しい便を登録
    /// 使用中座席数0で作成する
    ///
    /// # Arguments
    /// * `origin` - 出発地
    /// * `destination` - 到着地
    /// * `capacity` - 座席数（1以上）
    /// * `departure_time` - 出発時刻
    pub async fn schedule_flight(
        &self,
        origin: String,
        destination: String,
        capacity: u32,
        departure_time: DateTime<Utc>,
    ) -> Result<Flight, ApplicationError> {
        let flight = Flight::create(origin, destination, capacity, departure_time)?;
        let flight = self.flight_repository.save(&flight).await?;
        tracing::info!(
            flight_id = %flight.id(),
            capacity = flight.capacity(),
            "flight scheduled"
        );
        Ok(flight)
    }

    /// 便IDで便を取得
    /// 存在しなければ `ResourceNotFound::Flight`
    pub async fn get_flight(&self, flight_id: FlightId) -> Result<Flight, ApplicationError> {
        let flight = self
            .flight_repository
            .find_by_id(flight_id)
            .await?
            .ok_or(ResourceNotFound::Flight(flight_id))?;
        Ok(flight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::driven::InMemoryFlightRepository;
    use crate::domain::error::DomainError;
    use chrono::{Duration, TimeZone};

    fn departure() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap() + Duration::days(1)
    }

    #[tokio::test]
    async fn test_schedule_and_get_flight() {
        let service = FlightApplicationService::new(Arc::new(InMemoryFlightRepository::new()));

        let scheduled = service
            .schedule_flight("BUE".to_string(), "MAD".to_string(), 180, departure())
            .await
            .unwrap();
        assert!(scheduled.id().is_persisted());
        assert_eq!(scheduled.occupied_seats(), 0);

        let found = service
            .get_flight(scheduled.id().value().unwrap())
            .await
            .unwrap();
        assert_eq!(found.capacity(), 180);
        assert_eq!(found.departure_time(), departure());
    }

    #[tokio::test]
    async fn test_schedule_with_zero_capacity_is_rejected() {
        let service = FlightApplicationService::new(Arc::new(InMemoryFlightRepository::new()));

        let err = service
            .schedule_flight("BUE".to_string(), "MAD".to_string(), 0, departure())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_get_missing_flight() {
        let service = FlightApplicationService::new(Arc::new(InMemoryFlightRepository::new()));
        let err = service.get_flight(FlightId::new(467)).await.unwrap_err();
        assert_eq!(err.to_string(), "Flight with ID 467 not found.");
    }
}
