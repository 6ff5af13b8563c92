//! Courtboard Service: board fetching, cached snapshots, and the validated
//! mutation path on top of `courtboard-core`.

pub mod board;
pub mod cache;
pub mod config;
pub mod error;
pub mod mutation;
pub mod telemetry;
pub mod transport;

pub use board::BoardService;
pub use cache::BoardCache;
pub use config::{LogConfig, LogFormat, ServiceConfig};
pub use error::ServiceError;
pub use mutation::{MutationResponse, MutationService};
pub use telemetry::init_tracing;
pub use transport::ApiAdapter;

pub(crate) const LOG_TARGET: &str = "courtboard::service";
