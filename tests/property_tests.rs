use chrono::{DateTime, Duration, TimeZone, Utc};
use flight_booking::domain::error::DomainError;
use flight_booking::domain::model::{
    Booking, BookingStatus, Flight, FlightId, Passenger, PassengerId,
};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap()
}

fn persisted_flight(capacity: u32, occupied_seats: u32) -> Flight {
    Flight::from_persistence(
        FlightId::new(467),
        "BUE",
        "MAD",
        capacity,
        occupied_seats,
        now() + Duration::days(1),
        0,
    )
    .unwrap()
}

// 便の座席カウンタのプロパティベーステスト
proptest! {
    /// 予約と解放をどの順で繰り返しても使用中座席数は 0..=capacity に収まり、
    /// 失敗した操作は状態を変えない
    #[test]
    fn test_occupied_seats_stay_within_capacity(
        capacity in 1u32..20,
        operations in prop::collection::vec(any::<bool>(), 0..100),
    ) {
        let mut flight = persisted_flight(capacity, 0);
        let mut expected = 0u32;

        for reserve in operations {
            if reserve {
                let result = flight.reserve_seat(now());
                if expected == capacity {
                    prop_assert!(matches!(result, Err(DomainError::FlightOverbooked(_))));
                } else {
                    prop_assert!(result.is_ok());
                    expected += 1;
                }
            } else {
                let result = flight.release_seat(now());
                if expected == 0 {
                    prop_assert!(matches!(result, Err(DomainError::EmptyFlightSeatRelease(_))));
                } else {
                    prop_assert!(result.is_ok());
                    expected -= 1;
                }
            }

            prop_assert_eq!(flight.occupied_seats(), expected);
            prop_assert!(flight.occupied_seats() <= flight.capacity());
            prop_assert_eq!(flight.available_seats(), capacity - expected);
        }
    }

    /// 空席がある便で予約してから解放すると元の使用中座席数に戻る
    #[test]
    fn test_reserve_then_release_restores_occupancy(
        capacity in 1u32..500,
        occupied_ratio in 0.0f64..1.0,
    ) {
        let occupied = ((capacity as f64) * occupied_ratio) as u32;
        prop_assume!(occupied < capacity);

        let mut flight = persisted_flight(capacity, occupied);
        flight.reserve_seat(now()).unwrap();
        flight.release_seat(now()).unwrap();

        prop_assert_eq!(flight.occupied_seats(), occupied);
    }

    /// 出発後の便は使用中座席数に関係なく変更できない
    #[test]
    fn test_departed_flight_rejects_all_seat_changes(
        capacity in 1u32..100,
        occupied_ratio in 0.0f64..=1.0,
        minutes_after in 1i64..10_000,
    ) {
        let occupied = ((capacity as f64) * occupied_ratio) as u32;
        let mut flight = persisted_flight(capacity, occupied.min(capacity));
        let later = flight.departure_time() + Duration::minutes(minutes_after);

        prop_assert!(matches!(
            flight.reserve_seat(later),
            Err(DomainError::FlightAlreadyDeparted(_))
        ));
        prop_assert!(matches!(
            flight.release_seat(later),
            Err(DomainError::FlightAlreadyDeparted(_))
        ));
        prop_assert_eq!(flight.occupied_seats(), occupied.min(capacity));
    }
}

// 予約ステータスのプロパティベーステスト
proptest! {
    /// キャンセル済みの予約は何度キャンセルしてもキャンセル済みのまま
    #[test]
    fn test_cancelled_is_terminal(
        capacity in 1u32..50,
        attempts in 1usize..10,
    ) {
        let passenger =
            Passenger::from_persistence(PassengerId::new(101), "John Doe", "john@example.com")
                .unwrap();
        let mut booking = Booking::create(passenger, persisted_flight(capacity, 1), now()).unwrap();

        booking.cancel(now()).unwrap();
        prop_assert_eq!(booking.status(), BookingStatus::Cancelled);
        prop_assert_eq!(booking.flight().occupied_seats(), 0);

        for _ in 0..attempts {
            let result = booking.cancel(now());
            prop_assert!(matches!(result, Err(DomainError::BookingAlreadyCancelled(_))));
            prop_assert_eq!(booking.status(), BookingStatus::Cancelled);
            prop_assert_eq!(booking.flight().occupied_seats(), 0);
        }
    }
}
