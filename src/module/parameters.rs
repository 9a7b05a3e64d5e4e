use crate::error::{ParameterError, Result};
use crate::scene::NodeId;

/// Default opacity applied to the generated model.
pub const DEFAULT_IMAGE_THRESHOLD: f64 = 0.5;

/// User choices that drive the sphere module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleParameters {
    /// Markups node supplying the control points.
    pub input_markups: Option<NodeId>,
    /// Model node receiving the generated sphere.
    pub output_model: Option<NodeId>,
    image_threshold: f64,
    auto_update: bool,
}

impl Default for ModuleParameters {
    fn default() -> Self {
        Self {
            input_markups: None,
            output_model: None,
            image_threshold: DEFAULT_IMAGE_THRESHOLD,
            auto_update: false,
        }
    }
}

impl ModuleParameters {
    /// Returns the image threshold. It is applied as model opacity.
    #[must_use]
    pub fn image_threshold(&self) -> f64 {
        self.image_threshold
    }

    /// Sets the image threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is outside `[0, 1]`.
    pub fn set_image_threshold(&mut self, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ParameterError::OutOfRange {
                parameter: "image_threshold",
                value,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        self.image_threshold = value;
        Ok(())
    }

    /// Returns whether the model follows point edits automatically.
    #[must_use]
    pub fn auto_update(&self) -> bool {
        self.auto_update
    }

    pub(crate) fn set_auto_update(&mut self, enabled: bool) {
        self.auto_update = enabled;
    }
}

/// Optional UI affordances, fixed when the module is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiCapabilities {
    /// The host offers an auto-update toggle.
    pub auto_update_toggle: bool,
    /// The host shows the center of mass of the input points.
    pub center_of_mass_label: bool,
}

impl Default for UiCapabilities {
    fn default() -> Self {
        Self {
            auto_update_toggle: true,
            center_of_mass_label: true,
        }
    }
}
