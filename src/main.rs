use flight_booking::adapter::driven::{
    InMemoryBookingRepository, InMemoryFlightRepository, InMemoryPassengerRepository,
    MySqlBookingRepository, MySqlFlightRepository, MySqlPassengerRepository,
};
use flight_booking::adapter::driver::{create_router, AppState};
use flight_booking::adapter::{DatabaseConfig, DatabaseMigration, ServerConfig, StorageBackend};
use flight_booking::application::service::{
    BookingApplicationService, FlightApplicationService, PassengerApplicationService,
};
use flight_booking::domain::port::{BookingRepository, FlightRepository, PassengerRepository};

use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Repositories = (
    Arc<dyn PassengerRepository>,
    Arc<dyn FlightRepository>,
    Arc<dyn BookingRepository>,
);

// 設定に応じてリポジトリを作成
async fn build_repositories(
    storage: StorageBackend,
) -> Result<Repositories, Box<dyn std::error::Error>> {
    match storage {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on restart");
            let passengers = Arc::new(InMemoryPassengerRepository::new());
            let flights = Arc::new(InMemoryFlightRepository::new());
            let bookings: Arc<dyn BookingRepository> = Arc::new(InMemoryBookingRepository::new(
                passengers.clone(),
                flights.clone(),
            ));
            Ok((
                passengers as Arc<dyn PassengerRepository>,
                flights as Arc<dyn FlightRepository>,
                bookings,
            ))
        }
        StorageBackend::MySql => {
            let config = DatabaseConfig::from_env()?;
            tracing::info!(host = %config.host, port = config.port, "connecting to MySQL");

            let pool = config.connect().await?;

            DatabaseMigration::new(pool.clone()).run().await?;

            let passengers: Arc<dyn PassengerRepository> =
                Arc::new(MySqlPassengerRepository::new(pool.clone()));
            let flights: Arc<dyn FlightRepository> =
                Arc::new(MySqlFlightRepository::new(pool.clone()));
            let bookings: Arc<dyn BookingRepository> = Arc::new(MySqlBookingRepository::new(pool));
            Ok((passengers, flights, bookings))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .envファイルから環境変数を読み込む（RUST_LOGも含む）
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flight_booking=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(storage = ?config.storage, "starting flight booking service");

    let (passenger_repository, flight_repository, booking_repository) =
        build_repositories(config.storage).await?;

    let app_state = AppState {
        passenger_service: Arc::new(PassengerApplicationService::new(
            passenger_repository.clone(),
        )),
        flight_service: Arc::new(FlightApplicationService::new(flight_repository.clone())),
        booking_service: Arc::new(BookingApplicationService::new(
            passenger_repository,
            flight_repository,
            booking_repository,
        )),
    };

    let app = create_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!(address = %config.bind_address, "REST API server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
