use crate::error::{ParameterError, Result};

use super::TriangleMesh;

/// Default model color (light blue).
pub const DEFAULT_COLOR: [f64; 3] = [0.1, 0.6, 0.9];

/// Default outline thickness where the model crosses a 2D slice view.
pub const DEFAULT_SLICE_INTERSECTION_THICKNESS: u32 = 2;

/// Display properties attached to a generated mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayStyle {
    color: [f64; 3],
    opacity: f64,
    slice_intersection_thickness: u32,
    visible: bool,
    visible_2d: bool,
}

impl DisplayStyle {
    /// Creates the default sphere style with the given opacity.
    ///
    /// # Errors
    ///
    /// Returns an error if `opacity` is outside `[0, 1]`.
    pub fn with_opacity(opacity: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ParameterError::OutOfRange {
                parameter: "opacity",
                value: opacity,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        Ok(Self {
            color: DEFAULT_COLOR,
            opacity,
            slice_intersection_thickness: DEFAULT_SLICE_INTERSECTION_THICKNESS,
            visible: true,
            visible_2d: true,
        })
    }

    /// Returns the RGB color, each channel in `[0, 1]`.
    #[must_use]
    pub fn color(&self) -> [f64; 3] {
        self.color
    }

    /// Returns the opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Returns the slice intersection outline thickness in pixels.
    #[must_use]
    pub fn slice_intersection_thickness(&self) -> u32 {
        self.slice_intersection_thickness
    }

    /// Returns whether the model is shown in 3D views.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Returns whether the model is shown in 2D slice views.
    #[must_use]
    pub fn visible_2d(&self) -> bool {
        self.visible_2d
    }
}

/// A renderable mesh together with its display style.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDescriptor {
    /// The tessellated geometry.
    pub mesh: TriangleMesh,
    /// How the geometry should be displayed.
    pub style: DisplayStyle,
}

impl MeshDescriptor {
    /// Bundles a mesh with a display style.
    #[must_use]
    pub fn new(mesh: TriangleMesh, style: DisplayStyle) -> Self {
        Self { mesh, style }
    }
}
