use crate::domain::error::DomainError;
use crate::domain::model::{BookingId, BookingStatus, Flight, Identity, Passenger};
use chrono::{DateTime, Utc};

/// 予約集約
/// 乗客と便を参照し、予約のライフサイクルを管理する
///
/// 便は保存済みスナップショットとして保持する。キャンセル前に
/// `refresh_flight` で最新の便に差し替えること
#[derive(Debug, Clone)]
pub struct Booking {
    id: Identity<BookingId>,
    passenger: Passenger,
    flight: Flight,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    fn build(
        id: Identity<BookingId>,
        passenger: Passenger,
        flight: Flight,
        status: BookingStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if !passenger.id().is_persisted() {
            return Err(DomainError::invalid_argument(
                "Passenger must be persisted before it can be booked.",
            ));
        }
        if !flight.id().is_persisted() {
            return Err(DomainError::invalid_argument(
                "Flight must be persisted before it can be booked.",
            ));
        }
        Ok(Self {
            id,
            passenger,
            flight,
            status,
            created_at,
        })
    }

    /// 確定状態の新しい予約を作成
    ///
    /// 座席の予約は行わない。呼び出し側が事前に `Flight::reserve_seat` を
    /// 成功させている必要がある
    pub fn create(
        passenger: Passenger,
        flight: Flight,
        current_time: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::build(
            Identity::Transient,
            passenger,
            flight,
            BookingStatus::Confirmed,
            current_time,
        )
    }

    /// ストアから取得したデータで予約を再構築
    pub fn from_persistence(
        id: BookingId,
        passenger: Passenger,
        flight: Flight,
        status: BookingStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::build(Identity::Persisted(id), passenger, flight, status, created_at)
    }

    pub fn id(&self) -> Identity<BookingId> {
        self.id
    }

    pub fn passenger(&self) -> &Passenger {
        &self.passenger
    }

    pub fn flight(&self) -> &Flight {
        &self.flight
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 便のスナップショットを最新のものに差し替える
    /// 同一の便でなければエラー
    pub fn refresh_flight(&mut self, flight: Flight) -> Result<(), DomainError> {
        if !self.flight.id().same_as(&flight.id()) {
            return Err(DomainError::InvalidArgument(format!(
                "Booking {} references Flight {}, not Flight {}.",
                self.id,
                self.flight.id(),
                flight.id()
            )));
        }
        self.flight = flight;
        Ok(())
    }

    /// 予約をキャンセルする
    /// 事前条件:
    /// - ステータスがConfirmed
    /// - 便が出発していない
    ///
    /// 座席の解放が成功してからステータスを変更する。
    /// 失敗時は予約も便も変更されない
    pub fn cancel(&mut self, current_time: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status == BookingStatus::Cancelled {
            return Err(DomainError::BookingAlreadyCancelled(self.id));
        }
        if self.flight.has_departed_at(current_time) {
            return Err(DomainError::BookingCancellationWindowClosed(self.id));
        }

        self.flight.release_seat(current_time)?;
        self.status = BookingStatus::Cancelled;
        Ok(())
    }
}

impl PartialEq for Booking {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.id.same_as(&other.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FlightId, PassengerId};
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap()
    }

    fn passenger() -> Passenger {
        Passenger::from_persistence(PassengerId::new(101), "John Doe", "john.doe@example.com")
            .unwrap()
    }

    fn flight(occupied: u32, departure: DateTime<Utc>) -> Flight {
        Flight::from_persistence(FlightId::new(467), "BUE", "MAD", 100, occupied, departure, 3)
            .unwrap()
    }

    fn booking(status: BookingStatus, flight: Flight) -> Booking {
        Booking::from_persistence(BookingId::new(23), passenger(), flight, status, fixed_now())
            .unwrap()
    }

    #[test]
    fn test_create_confirmed_booking() {
        let now = fixed_now();
        let booking = Booking::create(passenger(), flight(1, now + Duration::days(5)), now).unwrap();
        assert_eq!(booking.id(), Identity::Transient);
        assert_eq!(booking.passenger(), &passenger());
        assert_eq!(booking.flight().id(), Identity::Persisted(FlightId::new(467)));
        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.created_at(), now);
    }

    #[test]
    fn test_create_does_not_reserve_seat() {
        let now = fixed_now();
        let booking = Booking::create(passenger(), flight(4, now + Duration::days(5)), now).unwrap();
        assert_eq!(booking.flight().occupied_seats(), 4);
    }

    #[test]
    fn test_create_with_transient_passenger_rejected() {
        let now = fixed_now();
        let transient = Passenger::create("John Doe", "john.doe@example.com").unwrap();
        let err = Booking::create(transient, flight(1, now + Duration::days(5)), now).unwrap_err();
        assert!(err.to_string().contains("Passenger must be persisted"));
    }

    #[test]
    fn test_create_with_transient_flight_rejected() {
        let now = fixed_now();
        let transient = Flight::create("BUE", "MAD", 100, now + Duration::days(5)).unwrap();
        let err = Booking::create(passenger(), transient, now).unwrap_err();
        assert!(err.to_string().contains("Flight must be persisted"));
    }

    #[test]
    fn test_cancel_releases_seat() {
        let now = fixed_now();
        let mut booking = booking(BookingStatus::Confirmed, flight(99, now + Duration::days(5)));
        booking.cancel(now).unwrap();
        assert_eq!(booking.status(), BookingStatus::Cancelled);
        assert_eq!(booking.flight().capacity(), 100);
        assert_eq!(booking.flight().occupied_seats(), 98);
        assert_eq!(booking.flight().available_seats(), 2);
    }

    #[test]
    fn test_cancel_already_cancelled_booking() {
        let now = fixed_now();
        let mut booking = booking(BookingStatus::Cancelled, flight(10, now + Duration::days(5)));
        let result = booking.cancel(now);
        assert_eq!(
            result,
            Err(DomainError::BookingAlreadyCancelled(Identity::Persisted(BookingId::new(23))))
        );
        assert_eq!(booking.status(), BookingStatus::Cancelled);
        assert_eq!(booking.flight().occupied_seats(), 10);
    }

    #[test]
    fn test_cancel_after_departure() {
        let now = fixed_now();
        let mut booking = booking(BookingStatus::Confirmed, flight(10, now - Duration::days(5)));
        let result = booking.cancel(now);
        assert_eq!(
            result,
            Err(DomainError::BookingCancellationWindowClosed(Identity::Persisted(
                BookingId::new(23)
            )))
        );
        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.flight().occupied_seats(), 10);
    }

    #[test]
    fn test_failed_seat_release_keeps_booking_confirmed() {
        let now = fixed_now();
        let mut booking = booking(BookingStatus::Confirmed, flight(0, now + Duration::days(5)));
        let result = booking.cancel(now);
        assert!(matches!(result, Err(DomainError::EmptyFlightSeatRelease(_))));
        assert_eq!(booking.status(), BookingStatus::Confirmed);
    }

    #[test]
    fn test_cancel_twice_fails_second_time() {
        let now = fixed_now();
        let mut booking = booking(BookingStatus::Confirmed, flight(1, now + Duration::days(5)));
        booking.cancel(now).unwrap();
        assert!(matches!(
            booking.cancel(now),
            Err(DomainError::BookingAlreadyCancelled(_))
        ));
        assert_eq!(booking.flight().occupied_seats(), 0);
    }

    #[test]
    fn test_refresh_flight_replaces_snapshot() {
        let now = fixed_now();
        let mut booking = booking(BookingStatus::Confirmed, flight(1, now + Duration::days(5)));
        booking.refresh_flight(flight(42, now + Duration::days(5))).unwrap();
        assert_eq!(booking.flight().occupied_seats(), 42);
    }

    #[test]
    fn test_refresh_flight_with_other_flight_rejected() {
        let now = fixed_now();
        let mut booking = booking(BookingStatus::Confirmed, flight(1, now + Duration::days(5)));
        let other =
            Flight::from_persistence(FlightId::new(1), "MAD", "BUE", 10, 0, now, 0).unwrap();
        assert!(matches!(
            booking.refresh_flight(other),
            Err(DomainError::InvalidArgument(_))
        ));
        assert_eq!(booking.flight().id(), Identity::Persisted(FlightId::new(467)));
    }
}
