//! Data types shared by the skyfare crates: locations, search criteria, flight offers,
//! and the filter state that narrows a result set.
//!
//! Field names follow the provider's camelCase JSON so the same types travel over the wire
//! unchanged.

pub mod criteria;
pub mod filters;
pub mod location;
pub mod offer;
pub mod request;

pub use criteria::PassengerKind;
pub use criteria::Passengers;
pub use criteria::SearchCriteria;
pub use criteria::TravelClass;
pub use criteria::TripType;
pub use filters::FilterState;
pub use filters::PriceSort;
pub use location::Address;
pub use location::Location;
pub use location::LocationSubType;
pub use location::SelectedLocation;
pub use offer::FlightOffer;
pub use offer::Itinerary;
pub use offer::Price;
pub use offer::Segment;
pub use offer::SegmentEndpoint;
pub use request::FlightSearchRequest;
pub use request::LocationsResponse;
pub use request::SearchResponse;
