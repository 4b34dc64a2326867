// ドメインモデル（エンティティと値オブジェクト）

mod booking;
mod flight;
mod passenger;
mod value_objects;

pub use value_objects::{BookingId, BookingStatus, FlightId, Identity, PassengerId};

pub use booking::Booking;
pub use flight::Flight;
pub use passenger::Passenger;
