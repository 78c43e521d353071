//! NVDB v3 query configuration and URL construction.
//!
//! The HTTP client itself lives outside this crate; this module only knows
//! which endpoint serves which layer and how a viewport query is spelled.
//!
//! | Layer      | Endpoint                     | NVDB type                    |
//! |------------|------------------------------|------------------------------|
//! | `Roadnet`  | `/vegnett/veglenkesekvenser` | road-link sequences          |
//! | `Height`   | `/vegobjekter/591`           | height restriction           |
//! | `Width`    | `/vegobjekter/838`           | road width                   |
//! | `Weight`   | `/vegobjekter/904`           | load class (bruksklasse)     |

use serde::{Deserialize, Serialize};

use rw_core::BBox;

/// One of the four NVDB layers the front-end shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Roadnet,
    Height,
    Width,
    Weight,
}

impl LayerKind {
    pub const ALL: [LayerKind; 4] =
        [LayerKind::Roadnet, LayerKind::Height, LayerKind::Width, LayerKind::Weight];

    /// `true` for the `vegobjekter` layers, which need properties and
    /// geometry included explicitly.
    #[inline]
    pub fn is_object_layer(self) -> bool {
        !matches!(self, LayerKind::Roadnet)
    }

    pub fn path(self, config: &NvdbConfig) -> &str {
        match self {
            LayerKind::Roadnet => &config.roadnet_path,
            LayerKind::Height => &config.height_path,
            LayerKind::Width => &config.width_path,
            LayerKind::Weight => &config.weight_path,
        }
    }
}

/// Endpoint configuration.  `Default` matches the public NVDB read API
/// behind a local `/nvdb` proxy prefix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NvdbConfig {
    pub base_url:     String,
    pub roadnet_path: String,
    pub height_path:  String,
    pub width_path:   String,
    pub weight_path:  String,
    /// `antall`: page size per request.
    pub max_features: u32,
    /// Below this zoom nothing is fetched and all layers are cleared.
    pub min_zoom:     f64,
}

impl Default for NvdbConfig {
    fn default() -> Self {
        Self {
            base_url:     "/nvdb".into(),
            roadnet_path: "/vegnett/veglenkesekvenser".into(),
            height_path:  "/vegobjekter/591".into(),
            width_path:   "/vegobjekter/838".into(),
            weight_path:  "/vegobjekter/904".into(),
            max_features: 300,
            min_zoom:     10.0,
        }
    }
}

impl NvdbConfig {
    /// Query URL for `kind` restricted to `bbox`.
    ///
    /// ```
    /// use rw_core::BBox;
    /// use rw_nvdb::{LayerKind, NvdbConfig};
    ///
    /// let bbox = BBox::new(7.95, 58.12, 8.05, 58.17).unwrap();
    /// assert_eq!(
    ///     NvdbConfig::default().layer_url(LayerKind::Width, &bbox),
    ///     "/nvdb/vegobjekter/838?srid=4326&kartutsnitt=7.9500,58.1200,8.0500,58.1700\
    ///      &antall=300&inkluder=egenskaper,geometri",
    /// );
    /// ```
    pub fn layer_url(&self, kind: LayerKind, bbox: &BBox) -> String {
        let mut url = format!(
            "{}{}?srid=4326&kartutsnitt={}&antall={}",
            self.base_url,
            kind.path(self),
            bbox,
            self.max_features
        );
        if kind.is_object_layer() {
            url.push_str("&inkluder=egenskaper,geometri");
        }
        url
    }

    #[inline]
    pub fn should_fetch(&self, zoom: f64) -> bool {
        zoom >= self.min_zoom
    }
}
