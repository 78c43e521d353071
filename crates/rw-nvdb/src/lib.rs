//! `rw-nvdb`: NVDB v3 adapters around the width join.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`response`] | `RoadnetResponse`, `ObjectResponse` → `LineFeature`s         |
//! | [`geometry`] | `parse_line_string` (NVDB `LAT LON` WKT)                      |
//! | [`query`]    | `NvdbConfig`, `LayerKind`, viewport query URLs               |
//! | [`request`]  | `RequestSequence`, `RequestTicket` (stale-response guard)    |
//! | [`layers`]   | `LayerResponses`, `LayerSet::assemble`                       |
//! | [`export`]   | GeoJSON `FeatureCollection` output                           |
//! | [`error`]    | `NvdbError`, `NvdbResult<T>`                                 |
//!
//! No HTTP client lives here: callers fetch [`NvdbConfig::layer_url`] with
//! whatever client they have and hand the bytes to the response decoders.

pub mod error;
pub mod export;
pub mod geometry;
pub mod layers;
pub mod query;
pub mod request;
pub mod response;


pub use error::{NvdbError, NvdbResult};
pub use export::{feature_to_geojson, to_feature_collection};
pub use geometry::parse_line_string;
pub use layers::{LayerResponses, LayerSet};
pub use query::{LayerKind, NvdbConfig};
pub use request::{RequestSequence, RequestTicket};
pub use response::{ObjectResponse, RoadnetResponse};
