use crate::application::{ApplicationError, ResourceNotFound};
use crate::domain::error::DomainError;
use crate::domain::model::{Booking, BookingId, BookingStatus, FlightId, PassengerId};
use crate::domain::port::{BookingRepository, FlightRepository, PassengerRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

mod flight_service;
mod passenger_service;

pub use flight_service::FlightApplicationService;
pub use passenger_service::PassengerApplicationService;

/// 予約アプリケーションサービス
/// 乗客・便の取得、座席の予約/解放、予約の永続化を協調させる
///
/// ストアは独立したスナップショットを保持するため、変更した便と予約は
/// 明示的に保存し直す
pub struct BookingApplicationService {
    passenger_repository: Arc<dyn PassengerRepository>,
    flight_repository: Arc<dyn FlightRepository>,
    booking_repository: Arc<dyn BookingRepository>,
}

impl BookingApplicationService {
    /// 新しい予約アプリケーションサービスを作成
    ///
    /// # Arguments
    /// * `passenger_repository` - 乗客リポジトリ
    /// * `flight_repository` - 便リポジトリ
    /// * `booking_repository` - 予約リポジトリ
    pub fn new(
        passenger_repository: Arc<dyn PassengerRepository>,
        flight_repository: Arc<dyn FlightRepository>,
        booking_repository: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            passenger_repository,
            flight_repository,
            booking_repository,
        }
    }

    /// 座席を予約して新しい予約を作成
    ///
    /// 乗客の取得 → 便の取得 → 座席予約 → 便の保存 → 予約の作成 → 予約の保存
    /// の順に実行し、途中で失敗した場合は以降の処理を行わない
    ///
    /// # Returns
    /// * `Ok(Booking)` - IDが採番された確定済みの予約
    /// * `Err(ApplicationError::NotFound)` - 乗客または便が存在しない
    /// * `Err(ApplicationError::Domain)` - 出発済み・満席
    /// * `Err(ApplicationError::Repository)` - 永続化の失敗（便の競合更新を含む）
    #[tracing::instrument(skip(self), fields(correlation_id = %Uuid::new_v4()))]
    pub async fn create_booking(
        &self,
        passenger_id: PassengerId,
        flight_id: FlightId,
        current_time: DateTime<Utc>,
    ) -> Result<Booking, ApplicationError> {
        let passenger = self
            .passenger_repository
            .find_by_id(passenger_id)
            .await?
            .ok_or(ResourceNotFound::Passenger(passenger_id))?;

        let mut flight = self
            .flight_repository
            .find_by_id(flight_id)
            .await?
            .ok_or(ResourceNotFound::Flight(flight_id))?;

        flight.reserve_seat(current_time)?;
        let flight = self.flight_repository.save(&flight).await?;

        let booking = Booking::create(passenger, flight, current_time)?;
        let booking = self.booking_repository.save(&booking).await.map_err(|e| {
            // 便の保存は完了しているため座席は予約されたまま残る
            tracing::error!(
                flight_id = %flight_id,
                passenger_id = %passenger_id,
                error = %e,
                "booking could not be saved after its seat was reserved"
            );
            e
        })?;

        tracing::info!(
            booking_id = %booking.id(),
            available_seats = booking.flight().available_seats(),
            "booking confirmed"
        );
        Ok(booking)
    }

    /// 予約をキャンセルして座席を解放
    ///
    /// 予約が参照する便はストアから取得し直してからキャンセルする。
    /// 成功した場合は便と予約の両方を保存する
    ///
    /// # Returns
    /// * `Ok(Booking)` - キャンセル済みの予約
    /// * `Err(ApplicationError::NotFound)` - 予約または便が存在しない
    /// * `Err(ApplicationError::Domain)` - キャンセル済み・出発後・座席解放の失敗
    /// * `Err(ApplicationError::Repository)` - 永続化の失敗
    #[tracing::instrument(skip(self), fields(correlation_id = %Uuid::new_v4()))]
    pub async fn cancel_booking(
        &self,
        booking_id: BookingId,
        current_time: DateTime<Utc>,
    ) -> Result<Booking, ApplicationError> {
        let mut booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or(ResourceNotFound::Booking(booking_id))?;

        // キャンセル済みなら便を引かずにドメインのガードに任せる
        if booking.status() == BookingStatus::Confirmed {
            let flight_id = booking
                .flight()
                .id()
                .value()
                .ok_or_else(|| {
                    DomainError::invalid_argument("Booking references an unsaved flight.")
                })?;
            let current_flight = self
                .flight_repository
                .find_by_id(flight_id)
                .await?
                .ok_or(ResourceNotFound::Flight(flight_id))?;
            booking.refresh_flight(current_flight)?;
        }

        booking.cancel(current_time)?;

        let flight = self.flight_repository.save(booking.flight()).await?;
        booking.refresh_flight(flight)?;
        let booking = self.booking_repository.save(&booking).await.map_err(|e| {
            // 座席は解放済みだが予約は確定のまま残る
            tracing::error!(
                booking_id = %booking_id,
                error = %e,
                "booking could not be saved after its seat was released"
            );
            e
        })?;

        tracing::info!(booking_id = %booking_id, "booking cancelled");
        Ok(booking)
    }

    /// 予約IDで予約を取得
    ///
    /// # Returns
    /// * `Ok(Some(Booking))` - 予約が見つかった
    /// * `Ok(None)` - 予約が見つからなかった
    /// * `Err(ApplicationError)` - 取得失敗
    pub async fn get_booking(&self, booking_id: BookingId) -> Result<Option<Booking>, ApplicationError> {
        self.booking_repository
            .find_by_id(booking_id)
            .await
            .map_err(ApplicationError::from)
    }

    /// すべての予約を取得
    /// 並び順はストアに依存する
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, ApplicationError> {
        self.booking_repository
            .find_all()
            .await
            .map_err(ApplicationError::from)
    }
}
