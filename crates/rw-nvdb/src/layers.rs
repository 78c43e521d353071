//! Viewport layer assembly.
//!
//! One refresh round produces up to four decoded responses.  Assembly turns
//! them into feature layers and joins road width onto the road network:
//!
//! ```text
//! stale ticket          → discarded, nothing applied
//! zoom < min_zoom       → every layer cleared
//! otherwise             → decode each present response;
//!                         roadnet + width both present → width join
//! ```
//!
//! A layer whose response is missing (fetch failed) is `None`: the caller
//! keeps whatever it showed before.

use log::debug;

use rw_core::LineFeature;
use rw_match::{MatchReport, RepresentativePoint, SpatialMatcher};

use crate::request::{RequestSequence, RequestTicket};
use crate::response::{ObjectResponse, RoadnetResponse};
use crate::{LayerKind, NvdbConfig, NvdbResult};

/// Raw responses of one refresh round.
#[derive(Debug)]
pub struct LayerResponses {
    pub ticket:  RequestTicket,
    pub zoom:    f64,
    pub roadnet: Option<RoadnetResponse>,
    pub height:  Option<ObjectResponse>,
    pub width:   Option<ObjectResponse>,
    pub weight:  Option<ObjectResponse>,
}

impl LayerResponses {
    /// A round with no responses yet.
    pub fn new(ticket: RequestTicket, zoom: f64) -> Self {
        Self { ticket, zoom, roadnet: None, height: None, width: None, weight: None }
    }
}

/// Decoded layers ready for display.  `None` means "leave unchanged".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerSet {
    pub roadnet: Option<Vec<LineFeature>>,
    pub height:  Option<Vec<LineFeature>>,
    pub width:   Option<Vec<LineFeature>>,
    pub weight:  Option<Vec<LineFeature>>,
    /// Present when the width join ran.
    pub width_join: Option<MatchReport>,
}

impl LayerSet {
    /// Every layer set to empty.
    pub fn cleared() -> Self {
        Self {
            roadnet:    Some(Vec::new()),
            height:     Some(Vec::new()),
            width:      Some(Vec::new()),
            weight:     Some(Vec::new()),
            width_join: None,
        }
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&[LineFeature]> {
        match kind {
            LayerKind::Roadnet => self.roadnet.as_deref(),
            LayerKind::Height => self.height.as_deref(),
            LayerKind::Width => self.width.as_deref(),
            LayerKind::Weight => self.weight.as_deref(),
        }
    }

    /// Assemble one refresh round.
    ///
    /// Returns `Ok(None)` if `responses.ticket` is no longer current in
    /// `sequence`.
    ///
    /// # Errors
    ///
    /// Propagates [`NvdbError`](crate::NvdbError) from object-layer
    /// conversion.
    pub fn assemble<P: RepresentativePoint>(
        responses: LayerResponses,
        sequence:  &RequestSequence,
        config:    &NvdbConfig,
        matcher:   &SpatialMatcher<P>,
    ) -> NvdbResult<Option<LayerSet>> {
        if !sequence.is_current(responses.ticket) {
            debug!("discarding stale responses for {:?}", responses.ticket);
            return Ok(None);
        }

        if !config.should_fetch(responses.zoom) {
            debug!("zoom {} below {}, clearing layers", responses.zoom, config.min_zoom);
            return Ok(Some(LayerSet::cleared()));
        }

        let mut roadnet = responses.roadnet.map(RoadnetResponse::into_features);
        let height = responses.height.map(|r| r.into_features(LayerKind::Height)).transpose()?;
        let width = responses.width.map(|r| r.into_features(LayerKind::Width)).transpose()?;
        let weight = responses.weight.map(|r| r.into_features(LayerKind::Weight)).transpose()?;

        let width_join = match (roadnet.as_mut(), width.as_ref()) {
            (Some(roads), Some(widths)) => Some(matcher.attach_nearest_attribute(roads, widths)),
            _ => None,
        };

        Ok(Some(LayerSet { roadnet, height, width, weight, width_join }))
    }
}
