//! Terrain scene references.
//!
//! A terrain scene is a 3-D bathymetry/relief visualization resource with a
//! fixed camera transform, registered against the campaign after the loads
//! finish so downstream renderers can place the data over the seafloor.

use cl_common::{uri, Error, Result};
use serde::{Deserialize, Serialize};

/// One X3D terrain scene with its rendering transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainScene {
    /// Scene URI (the registration key; re-registering the same URI is an
    /// update, never a duplicate).
    pub uri: String,

    /// Optional display name override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Camera position (geocentric meters).
    pub position: [f64; 3],

    /// Camera orientation, axis-angle (x, y, z, radians).
    pub orientation: [f64; 4],

    /// Center of rotation (geocentric meters).
    pub center_of_rotation: [f64; 3],

    /// Vertical exaggeration factor applied to the relief.
    pub vertical_exaggeration: f64,
}

impl TerrainScene {
    /// Create a scene reference, validating the URI up front.
    pub fn new(
        uri: impl Into<String>,
        position: [f64; 3],
        orientation: [f64; 4],
        center_of_rotation: [f64; 3],
        vertical_exaggeration: f64,
    ) -> Result<Self> {
        let uri = uri.into();
        uri::validate_http_uri(&uri).map_err(|reason| Error::InvalidScene {
            uri: uri.clone(),
            reason,
        })?;
        Ok(TerrainScene {
            uri,
            name: None,
            position,
            orientation,
            center_of_rotation,
            vertical_exaggeration,
        })
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
