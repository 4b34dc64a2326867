use crate::domain::model::{Booking, Flight, Passenger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 乗客のレスポンスDTO
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PassengerResponse {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
}

/// 便のレスポンスDTO
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlightResponse {
    pub id: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub capacity: u32,
    pub occupied_seats: u32,
    pub available_seats: u32,
    pub departure_time: DateTime<Utc>,
}

/// 予約のレスポンスDTO
/// 乗客と便は予約が保持しているスナップショットを返す
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BookingResponse {
    pub id: Option<i64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub passenger: PassengerResponse,
    pub flight: FlightResponse,
}

impl PassengerResponse {
    pub fn from_passenger(passenger: &Passenger) -> Self {
        Self {
            id: passenger.id().value().map(|id| id.value()),
            name: passenger.name().to_string(),
            email: passenger.email().to_string(),
        }
    }
}

impl FlightResponse {
    pub fn from_flight(flight: &Flight) -> Self {
        Self {
            id: flight.id().value().map(|id| id.value()),
            origin: flight.origin().to_string(),
            destination: flight.destination().to_string(),
            capacity: flight.capacity(),
            occupied_seats: flight.occupied_seats(),
            available_seats: flight.available_seats(),
            departure_time: flight.departure_time(),
        }
    }
}

impl BookingResponse {
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            id: booking.id().value().map(|id| id.value()),
            status: booking.status().to_string(),
            created_at: booking.created_at(),
            passenger: PassengerResponse::from_passenger(booking.passenger()),
            flight: FlightResponse::from_flight(booking.flight()),
        }
    }
}
