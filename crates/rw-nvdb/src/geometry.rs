//! WKT line geometry as NVDB writes it.
//!
//! With `srid=4326` NVDB emits `LINESTRING Z(lat lon z, …)`: latitude
//! first.  Everything downstream uses `LonLat`, so axes are swapped here
//! and nowhere else.

use geo::LineString;
use log::trace;
use wkt::TryFromWkt;

use rw_core::LonLat;

/// Parse a WKT `LINESTRING` (2D or `Z`) in NVDB axis order.
///
/// Returns `None` for other geometry types, malformed text, or an empty
/// line.  Callers treat `None` as "feature has no geometry".
pub fn parse_line_string(text: &str) -> Option<Vec<LonLat>> {
    let text = text.trim();
    if !text.starts_with("LINESTRING") {
        trace!("not a LINESTRING: {:.40}", text);
        return None;
    }

    let line = match LineString::<f64>::try_from_wkt_str(text) {
        Ok(line) => line,
        Err(e) => {
            trace!("unparseable LINESTRING ({e}): {:.40}", text);
            return None;
        }
    };

    let coords: Vec<LonLat> = line.coords().map(|c| LonLat::new(c.y, c.x)).collect();
    (!coords.is_empty()).then_some(coords)
}
