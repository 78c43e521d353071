//! `rw-match`: grid spatial index and nearest-feature attribute matching.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                  |
//! |--------------------|-----------------------------------------------------------|
//! | [`grid`]           | `GridIndex`, `CellKey`, `IndexedPoint`, bounded nearest   |
//! | [`representative`] | `RepresentativePoint` trait, `MiddleVertex`, `AlongLineMidpoint` |
//! | [`matcher`]        | `SpatialMatcher`, `MatchOptions`, `MatchReport`           |
//! | [`radius`]         | `features_within_radius`                                  |
//! | [`clearance`]      | `VehicleFilter`, `Passability`                            |
//! | [`error`]          | `MatchError`, `MatchResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs the per-target query phase on Rayon's thread pool.   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public config types. |

pub mod clearance;
pub mod error;
pub mod grid;
pub mod matcher;
pub mod radius;
pub mod representative;

#[cfg(test)]
mod tests;

pub use clearance::{Passability, VehicleFilter, classify};
pub use error::{MatchError, MatchResult};
pub use grid::{CellKey, GridIndex, IndexedPoint, Nearest};
pub use matcher::{
    MatchOptions, MatchReport, SpatialMatcher, SpatialMatcherBuilder, attach_nearest_attribute,
};
pub use radius::{RadiusHit, features_within_radius};
pub use representative::{AlongLineMidpoint, MiddleVertex, RepresentativePoint};
