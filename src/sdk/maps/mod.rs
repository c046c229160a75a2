pub mod entity;
pub mod error;
pub mod gateway;
pub mod polyline;
pub mod provider;
pub mod response;
pub mod service;
pub mod status;

pub use entity::{Coordinate, Place, Route, RouteSummary};
pub use error::MapsError;
pub use gateway::MapsGateway;
pub use provider::{GoogleMaps, HereEndpoints, HereMaps, ProviderKind};
pub use response::Envelope;
pub use service::MapsProvider;
pub use status::{status_of, Outcome, OutcomeStatus};
