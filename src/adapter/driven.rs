// 駆動される側アダプター（リポジトリ実装）

mod booking_repository;
mod flight_repository;
mod in_memory_repository;
mod passenger_repository;

pub use booking_repository::MySqlBookingRepository;
pub use flight_repository::MySqlFlightRepository;
pub use in_memory_repository::{
    InMemoryBookingRepository, InMemoryFlightRepository, InMemoryPassengerRepository,
};
pub use passenger_repository::MySqlPassengerRepository;
