pub mod sdk;

pub use sdk::config::MapsConfig;
pub use sdk::maps::{
    Coordinate, Envelope, MapsError, MapsGateway, MapsProvider, Outcome, OutcomeStatus, Place,
    Route, RouteSummary,
};
