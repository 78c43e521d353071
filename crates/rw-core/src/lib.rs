//! `rw-core`: foundational types for the `roadwidth` workspace.
//!
//! This crate is a dependency of every other `rw-*` crate.  It has no
//! `rw-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`geo`]       | `LonLat`, `BBox`, haversine distance                    |
//! | [`feature`]   | `LineFeature`, `AttrValue`, `Attributes`                |
//! | [`number`]    | lenient parsing (`"4,2"` → 4.2) and fixed-decimal display |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod feature;
pub mod geo;
pub mod number;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use feature::{AttrValue, Attributes, LineFeature};
pub use geo::{BBox, EARTH_RADIUS_M, LonLat, haversine_m};
pub use number::{format_fixed, normalize_number, normalize_str, parse_number};
