use crate::domain::error::DomainError;
use crate::domain::model::{FlightId, PassengerId};
use crate::domain::validation::required;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 乗客登録用のリクエストDTO
#[derive(Serialize, Deserialize, Default)]
pub struct CreatePassengerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CreatePassengerRequest {
    /// 必須項目を取り出す（名前, メールアドレス）
    pub fn into_parts(self) -> Result<(String, String), DomainError> {
        let name = required(self.name, "Passenger name is required.")?;
        let email = required(self.email, "Passenger email is required.")?;
        Ok((name, email))
    }
}

/// 便登録用のリクエストDTO
#[derive(Serialize, Deserialize, Default)]
pub struct CreateFlightRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    // 負数もドメインのエラーとして返すため符号付きで受け取る
    pub capacity: Option<i64>,
    pub departure_time: Option<DateTime<Utc>>,
}

/// 検証済みの便登録パラメータ
pub struct FlightParams {
    pub origin: String,
    pub destination: String,
    pub capacity: u32,
    pub departure_time: DateTime<Utc>,
}

impl CreateFlightRequest {
    pub fn into_params(self) -> Result<FlightParams, DomainError> {
        let origin = required(self.origin, "Flight origin is required.")?;
        let destination = required(self.destination, "Flight destination is required.")?;
        let capacity = required(self.capacity, "Flight capacity is required.")?;
        let departure_time = required(self.departure_time, "Flight departure time is required.")?;

        if capacity <= 0 {
            return Err(DomainError::invalid_argument("Capacity must be positive"));
        }
        let capacity = u32::try_from(capacity)
            .map_err(|_| DomainError::invalid_argument("Capacity is out of range"))?;

        Ok(FlightParams {
            origin,
            destination,
            capacity,
            departure_time,
        })
    }
}

/// 予約作成用のリクエストDTO
#[derive(Serialize, Deserialize, Default)]
pub struct CreateBookingRequest {
    pub passenger_id: Option<PassengerId>,
    pub flight_id: Option<FlightId>,
}

impl CreateBookingRequest {
    pub fn into_ids(self) -> Result<(PassengerId, FlightId), DomainError> {
        let passenger_id = required(
            self.passenger_id,
            "Passenger ID is required to create a booking.",
        )?;
        let flight_id = required(self.flight_id, "Flight ID is required to create a booking.")?;
        Ok((passenger_id, flight_id))
    }
}
