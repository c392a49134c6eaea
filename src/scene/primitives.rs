use serde::Serialize;

/// Translucent triangulated surface: per-vertex coordinate columns plus one
/// `(i, j, k)` vertex-index triple per face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfacePrimitive {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<u32>,
    pub j: Vec<u32>,
    pub k: Vec<u32>,
    pub color: String,
    pub opacity: f64,
    pub name: String,
    /// Shown in the legend so the viewer can offer an uncover toggle.
    pub show_legend: bool,
    pub hoverable: bool,
}

/// One sphere marker per node. `sizes` are diameters; `colors` are scalar
/// values mapped through the renderer's continuous color scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPrimitive {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub sizes: Vec<f64>,
    pub colors: Vec<f64>,
    pub opacity: f64,
    pub show_scale: bool,
    pub colorbar: Colorbar,
    pub show_legend: bool,
    pub hoverable: bool,
}

/// Scale legend attached to the marker colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Colorbar {
    /// Bar thickness in canvas pixels.
    pub thickness: f64,
    /// Horizontal anchor as a fraction of the canvas width.
    pub x: f64,
    /// Bar length as a fraction of the canvas height.
    pub len: f64,
    pub tick0: f64,
    pub dtick: f64,
}

impl Default for Colorbar {
    fn default() -> Self {
        Colorbar {
            thickness: 30.0,
            x: 0.95,
            len: 0.8,
            tick0: 0.0,
            dtick: 1.0,
        }
    }
}

/// Disconnected line segments. A `None` entry is the break sentinel that ends
/// one segment; it serializes to JSON `null` and is never an in-domain float.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePrimitive {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub z: Vec<Option<f64>>,
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    pub show_legend: bool,
    pub hoverable: bool,
}
