pub mod app;
pub mod domain;
pub mod error;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::tramo_service::TramoService;
pub use domain::boundary::BoundaryLoader;
pub use domain::province::normalize as normalize_province;
pub use error::TramosError;
pub use infra::config::Config;
pub use storage::traffic::{PgTrafficStore, TrafficStore};
