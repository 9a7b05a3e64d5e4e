//! Interactive sphere module.
//!
//! [`SphereModule`] is the host-facing controller: it owns the user's
//! parameter choices, decides when the apply action is available, keeps the
//! output model valid, reruns the fit when observed points change and turns
//! failures into user-visible messages.

mod parameters;

pub use parameters::{ModuleParameters, UiCapabilities, DEFAULT_IMAGE_THRESHOLD};

use tracing::{debug, info, warn};

use crate::error::{InputError, Result};
use crate::math::Point3;
use crate::operations::fit::{Process, Processed};
use crate::scene::{NodeId, Scene, SceneEvent, SubscriptionId};
use crate::sink::OutputSink;
use crate::source::PointSource;
use crate::tessellation::TessellationParams;

/// Name given to model nodes the module creates.
pub const DEFAULT_OUTPUT_NAME: &str = "SphereOutput";

/// Tooltip shown while the apply action is available.
pub const APPLY_TOOLTIP: &str = "Create sphere";

/// Tooltip shown while inputs are missing.
pub const APPLY_DISABLED_TOOLTIP: &str = "Select input markups and output model";

/// Availability of the apply action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyState {
    /// Whether the action can be triggered.
    pub enabled: bool,
    /// Explanation shown next to the action.
    pub tooltip: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct Observation {
    node: NodeId,
    subscription: SubscriptionId,
}

/// Formats a center of mass for display, two decimals per coordinate.
#[must_use]
pub fn format_center_of_mass(center: &Point3) -> String {
    format!("({:.2}, {:.2}, {:.2})", center.x, center.y, center.z)
}

/// Controller wiring parameters, scene and sphere fitting together.
#[derive(Debug)]
pub struct SphereModule {
    capabilities: UiCapabilities,
    tessellation: TessellationParams,
    params: Option<ModuleParameters>,
    entered: bool,
    observation: Option<Observation>,
    center_of_mass_text: Option<String>,
    error_message: Option<String>,
}

impl Default for SphereModule {
    fn default() -> Self {
        Self::new(UiCapabilities::default())
    }
}

impl SphereModule {
    /// Creates a module for a host offering the given UI affordances.
    #[must_use]
    pub fn new(capabilities: UiCapabilities) -> Self {
        Self {
            capabilities,
            tessellation: TessellationParams::default(),
            params: None,
            entered: false,
            observation: None,
            center_of_mass_text: None,
            error_message: None,
        }
    }

    /// Sets custom tessellation parameters for generated spheres.
    #[must_use]
    pub fn with_tessellation(mut self, params: TessellationParams) -> Self {
        self.tessellation = params;
        self
    }

    /// Returns the UI affordances this module was built for.
    #[must_use]
    pub fn capabilities(&self) -> UiCapabilities {
        self.capabilities
    }

    /// Returns the current parameters, if initialized.
    #[must_use]
    pub fn parameters(&self) -> Option<&ModuleParameters> {
        self.params.as_ref()
    }

    /// Returns `true` while the module is shown to the user.
    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Returns the last center of mass label text.
    #[must_use]
    pub fn center_of_mass_text(&self) -> Option<&str> {
        self.center_of_mass_text.as_deref()
    }

    /// Returns the message describing the last failed apply.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns `true` if point edits are currently being observed.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observation.is_some()
    }

    // --- Lifecycle ---

    /// Called each time the user opens the module.
    pub fn enter(&mut self, scene: &mut Scene) {
        self.entered = true;
        self.initialize_parameters(scene);
    }

    /// Called each time the user switches to another module.
    ///
    /// Auto-update keeps running while the module is hidden.
    pub fn exit(&mut self) {
        self.entered = false;
    }

    /// Called when the module is destroyed. Stops observing point edits.
    pub fn cleanup(&mut self, scene: &mut Scene) {
        self.stop_observing(scene);
    }

    /// Called just before the scene is closed. Parameters are dropped.
    pub fn on_scene_start_close(&mut self, scene: &mut Scene) {
        self.stop_observing(scene);
        self.params = None;
    }

    /// Called just after the scene is closed.
    pub fn on_scene_end_close(&mut self, scene: &mut Scene) {
        if self.entered {
            self.initialize_parameters(scene);
        }
    }

    /// Ensures parameters exist and fills in default selections.
    ///
    /// An unset input picks the first markups node in the scene; an unset
    /// output gets a new model node named [`DEFAULT_OUTPUT_NAME`].
    pub fn initialize_parameters(&mut self, scene: &mut Scene) {
        let params = self.params.get_or_insert_with(ModuleParameters::default);
        if params.input_markups.is_none() {
            params.input_markups = scene.first_markups();
        }
        if params.output_model.is_none() {
            params.output_model = Some(scene.add_model(DEFAULT_OUTPUT_NAME));
        }
        let auto_update = params.auto_update();

        if auto_update && self.capabilities.auto_update_toggle {
            // Reattach after a reload; the observed node may have changed
            if let Err(e) = self.set_auto_update(scene, true) {
                warn!(error = %e, "could not restore auto-update");
            }
        }
    }

    // --- Parameter edits ---

    fn params_mut(&mut self) -> Result<&mut ModuleParameters> {
        self.params
            .as_mut()
            .ok_or_else(|| InputError::Missing("parameter node").into())
    }

    /// Selects the markups node supplying points.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are not initialized.
    pub fn select_input(&mut self, scene: &mut Scene, input: Option<NodeId>) -> Result<()> {
        let params = self.params_mut()?;
        params.input_markups = input;
        let auto_update = params.auto_update();
        self.set_auto_update(scene, auto_update)?;
        Ok(())
    }

    /// Selects the model node receiving the sphere.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are not initialized.
    pub fn select_output(&mut self, output: Option<NodeId>) -> Result<()> {
        self.params_mut()?.output_model = output;
        Ok(())
    }

    /// Sets the image threshold, applied as model opacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are not initialized or `value` is
    /// outside `[0, 1]`.
    pub fn set_image_threshold(&mut self, value: f64) -> Result<()> {
        self.params_mut()?.set_image_threshold(value)
    }

    /// Turns automatic recomputation on point edits on or off.
    ///
    /// Returns whether point edits are observed afterwards. Enabling has no
    /// effect when the host offers no auto-update toggle; observation only
    /// starts once an input markups node is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are not initialized.
    pub fn set_auto_update(&mut self, scene: &mut Scene, enabled: bool) -> Result<bool> {
        let enabled = enabled && self.capabilities.auto_update_toggle;
        let params = self.params_mut()?;
        params.set_auto_update(enabled);
        let input = params.input_markups;

        self.stop_observing(scene);
        if let (true, Some(node)) = (enabled, input) {
            match scene.subscribe(node) {
                Ok(subscription) => {
                    debug!(?node, "observing point edits");
                    self.observation = Some(Observation { node, subscription });
                }
                Err(e) => warn!(?node, error = %e, "cannot observe input"),
            }
        }
        Ok(self.is_observing())
    }

    fn stop_observing(&mut self, scene: &mut Scene) {
        if let Some(obs) = self.observation.take() {
            debug!(node = ?obs.node, "stopped observing point edits");
            scene.unsubscribe(obs.subscription);
        }
    }

    // --- Actions ---

    /// Reports whether apply can run: both an input and an output must be
    /// selected.
    #[must_use]
    pub fn apply_state(&self) -> ApplyState {
        let ready = self
            .params
            .as_ref()
            .is_some_and(|p| p.input_markups.is_some() && p.output_model.is_some());
        ApplyState {
            enabled: ready,
            tooltip: if ready {
                APPLY_TOOLTIP
            } else {
                APPLY_DISABLED_TOOLTIP
            },
        }
    }

    /// Generates the sphere from the selected input into the selected output.
    ///
    /// An output selection that cannot hold geometry is replaced by a new
    /// model node first. On success the center of mass label is refreshed;
    /// on failure [`Self::error_message`] describes the problem.
    ///
    /// # Errors
    ///
    /// Returns an error if no input is selected, fewer than two points are
    /// available, or the opacity is out of range.
    pub fn apply(&mut self, scene: &mut Scene) -> Result<Processed> {
        let result = self.run(scene);
        match &result {
            Ok(processed) => {
                self.error_message = None;
                if self.capabilities.center_of_mass_label {
                    self.center_of_mass_text = Some(format_center_of_mass(&processed.center_of_mass));
                }
            }
            Err(e) => {
                warn!(error = %e, "sphere update failed");
                self.error_message = Some(format!("Error updating the sphere: {e}"));
            }
        }
        result
    }

    fn run(&mut self, scene: &mut Scene) -> Result<Processed> {
        let tessellation = self.tessellation;
        let params = self.params_mut()?;

        let output = scene.ensure_valid_target(params.output_model, DEFAULT_OUTPUT_NAME);
        params.output_model = Some(output);

        let source: Option<&dyn PointSource> = params
            .input_markups
            .and_then(|id| scene.markups(id).ok())
            .map(|m| m as &dyn PointSource);
        let processed = Process::new(params.image_threshold())
            .with_params(tessellation)
            .execute(source)?;

        scene.store(output, processed.mesh.clone())?;
        info!(
            radius = processed.sphere.radius(),
            vertices = processed.mesh.mesh.vertex_count(),
            "sphere model updated"
        );
        Ok(processed)
    }

    /// Processes pending scene events.
    ///
    /// Takes the events of this module's subscription, leaving other
    /// subscribers' events queued. If auto-update is on and any of them
    /// reports an edit of the observed input, the sphere is regenerated once.
    /// Returns the outcome of that regeneration, or `None` if nothing ran.
    pub fn handle_events(&mut self, scene: &mut Scene) -> Option<Result<Processed>> {
        let obs = self.observation?;
        let events = scene.take_events(obs.subscription);
        let auto_update = self.params.as_ref().is_some_and(ModuleParameters::auto_update);

        let touched = events
            .iter()
            .any(|event| matches!(event, SceneEvent::PointsModified { node, .. } if *node == obs.node));
        if !(auto_update && touched) {
            return None;
        }
        debug!(node = ?obs.node, "input points changed, regenerating sphere");
        Some(self.apply(scene))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SphereFitError;
    use approx::assert_relative_eq;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn scene_with_points(points: &[Point3]) -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let markups = scene.add_markups("F");
        for &pt in points {
            scene.add_control_point(markups, pt).unwrap();
        }
        (scene, markups)
    }

    fn entered_module(scene: &mut Scene) -> SphereModule {
        let mut module = SphereModule::new(UiCapabilities::default())
            .with_tessellation(TessellationParams::new(16, 12));
        module.enter(scene);
        module
    }

    #[test]
    fn enter_selects_defaults() {
        init_tracing();
        let (mut scene, markups) = scene_with_points(&[]);
        let module = entered_module(&mut scene);

        let params = module.parameters().unwrap();
        assert_eq!(params.input_markups, Some(markups));
        let output = params.output_model.unwrap();
        assert_eq!(scene.model(output).unwrap().name, DEFAULT_OUTPUT_NAME);
        assert!(module.apply_state().enabled);
        assert_eq!(module.apply_state().tooltip, APPLY_TOOLTIP);
    }

    #[test]
    fn apply_disabled_without_input() {
        let mut scene = Scene::new();
        let module = entered_module(&mut scene);
        let state = module.apply_state();
        assert!(!state.enabled);
        assert_eq!(state.tooltip, APPLY_DISABLED_TOOLTIP);
    }

    #[test]
    fn apply_disabled_before_initialization() {
        let module = SphereModule::default();
        assert!(!module.apply_state().enabled);
    }

    #[test]
    fn apply_generates_sphere_model() {
        init_tracing();
        let (mut scene, _) = scene_with_points(&[p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        module.set_image_threshold(0.7).unwrap();

        let processed = module.apply(&mut scene).unwrap();
        assert_relative_eq!(processed.sphere.radius(), 5.0);

        let output = module.parameters().unwrap().output_model.unwrap();
        let stored = scene.model(output).unwrap().descriptor.as_ref().unwrap();
        assert!(stored.mesh.vertex_count() > 0);
        assert_relative_eq!(stored.style.opacity(), 0.7);
        assert_eq!(module.center_of_mass_text(), Some("(5.00, 0.00, 0.00)"));
        assert!(module.error_message().is_none());
    }

    #[test]
    fn apply_with_one_point_reports_error() {
        let (mut scene, _) = scene_with_points(&[p(1.0, 1.0, 1.0)]);
        let mut module = entered_module(&mut scene);

        let err = module.apply(&mut scene).unwrap_err();
        assert!(matches!(
            err,
            SphereFitError::Input(InputError::Insufficient { found: 1, .. })
        ));
        let message = module.error_message().unwrap();
        assert!(message.starts_with("Error updating the sphere: "));
        assert!(module.center_of_mass_text().is_none());
    }

    #[test]
    fn apply_without_input_reports_missing() {
        let mut scene = Scene::new();
        let mut module = entered_module(&mut scene);
        let err = module.apply(&mut scene).unwrap_err();
        assert!(matches!(err, SphereFitError::Input(InputError::Missing(_))));
        assert!(module.error_message().is_some());
    }

    #[test]
    fn apply_replaces_invalid_output() {
        let (mut scene, markups) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        let replaced = module.parameters().unwrap().output_model.unwrap();
        scene.remove_node(replaced).unwrap();

        module.apply(&mut scene).unwrap();
        let output = module.parameters().unwrap().output_model.unwrap();
        assert_ne!(output, replaced);
        assert!(scene.model(output).unwrap().descriptor.is_some());
        // The input is untouched
        assert_eq!(scene.markups(markups).unwrap().points.len(), 2);
    }

    #[test]
    fn apply_replaces_output_pointing_at_markups() {
        let (mut scene, _) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let other = scene.add_markups("NotAModel");
        let mut module = entered_module(&mut scene);
        module.select_output(Some(other)).unwrap();

        module.apply(&mut scene).unwrap();
        let output = module.parameters().unwrap().output_model.unwrap();
        assert!(scene.is_valid_target(output));
        assert!(scene.node(other).is_err());
    }

    #[test]
    fn repeated_apply_overwrites_geometry() {
        let (mut scene, markups) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        module.apply(&mut scene).unwrap();
        scene.set_control_point(markups, 1, p(6.0, 0.0, 0.0)).unwrap();
        module.apply(&mut scene).unwrap();

        let output = module.parameters().unwrap().output_model.unwrap();
        let stored = scene.model(output).unwrap().descriptor.as_ref().unwrap();
        let max_x = stored
            .mesh
            .vertices
            .iter()
            .map(|v| v.x)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(max_x > 5.9);
    }

    #[test]
    fn auto_update_regenerates_on_edit() {
        init_tracing();
        let (mut scene, markups) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        assert!(module.set_auto_update(&mut scene, true).unwrap());

        scene.set_control_point(markups, 1, p(0.0, 8.0, 0.0)).unwrap();
        let processed = module.handle_events(&mut scene).unwrap().unwrap();
        assert_relative_eq!(processed.sphere.radius(), 4.0);
        assert_eq!(*processed.sphere.center(), p(0.0, 4.0, 0.0));

        // Nothing pending: no recomputation
        assert!(module.handle_events(&mut scene).is_none());
    }

    #[test]
    fn auto_update_coalesces_pending_edits() {
        let (mut scene, markups) = scene_with_points(&[p(0.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        module.set_auto_update(&mut scene, true).unwrap();

        scene.add_control_point(markups, p(4.0, 0.0, 0.0)).unwrap();
        scene.add_control_point(markups, p(9.0, 9.0, 9.0)).unwrap();
        let processed = module.handle_events(&mut scene).unwrap().unwrap();
        assert_relative_eq!(processed.sphere.radius(), 2.0);
        assert_relative_eq!(processed.center_of_mass, p(13.0 / 3.0, 3.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn modules_on_one_scene_keep_their_own_events() {
        let (mut scene, first) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let second = scene.add_markups("G");
        scene.add_control_point(second, p(0.0, 0.0, 0.0)).unwrap();
        scene.add_control_point(second, p(0.0, 6.0, 0.0)).unwrap();

        let mut module_a = entered_module(&mut scene);
        let mut module_b = entered_module(&mut scene);
        module_b.select_input(&mut scene, Some(second)).unwrap();
        assert!(module_a.set_auto_update(&mut scene, true).unwrap());
        assert!(module_b.set_auto_update(&mut scene, true).unwrap());

        scene.set_control_point(second, 1, p(0.0, 10.0, 0.0)).unwrap();
        assert!(module_a.handle_events(&mut scene).is_none());
        let processed = module_b.handle_events(&mut scene).unwrap().unwrap();
        assert_relative_eq!(processed.sphere.radius(), 5.0);

        scene.set_control_point(first, 1, p(4.0, 0.0, 0.0)).unwrap();
        assert!(module_b.handle_events(&mut scene).is_none());
        let processed = module_a.handle_events(&mut scene).unwrap().unwrap();
        assert_relative_eq!(processed.sphere.radius(), 2.0);
    }

    #[test]
    fn auto_update_off_ignores_edits() {
        let (mut scene, markups) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        module.set_auto_update(&mut scene, true).unwrap();
        assert!(!module.set_auto_update(&mut scene, false).unwrap());

        scene.add_control_point(markups, p(1.0, 1.0, 1.0)).unwrap();
        assert!(module.handle_events(&mut scene).is_none());
    }

    #[test]
    fn auto_update_edit_errors_are_surfaced() {
        let (mut scene, markups) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        module.set_auto_update(&mut scene, true).unwrap();

        scene.remove_control_point(markups, 1).unwrap();
        let outcome = module.handle_events(&mut scene).unwrap();
        assert!(outcome.is_err());
        assert!(module.error_message().is_some());
    }

    #[test]
    fn auto_update_requires_toggle_capability() {
        let (mut scene, markups) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let mut module = SphereModule::new(UiCapabilities {
            auto_update_toggle: false,
            center_of_mass_label: false,
        });
        module.enter(&mut scene);
        assert!(!module.set_auto_update(&mut scene, true).unwrap());
        assert!(!module.parameters().unwrap().auto_update());

        scene.add_control_point(markups, p(5.0, 5.0, 5.0)).unwrap();
        assert!(module.handle_events(&mut scene).is_none());

        module.apply(&mut scene).unwrap();
        assert!(module.center_of_mass_text().is_none());
    }

    #[test]
    fn changing_input_moves_observation() {
        let (mut scene, first) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let second = scene.add_markups("G");
        scene.add_control_point(second, p(0.0, 0.0, 0.0)).unwrap();
        scene.add_control_point(second, p(0.0, 0.0, 6.0)).unwrap();

        let mut module = entered_module(&mut scene);
        module.set_auto_update(&mut scene, true).unwrap();
        module.select_input(&mut scene, Some(second)).unwrap();
        assert!(module.is_observing());

        scene.add_control_point(first, p(1.0, 1.0, 1.0)).unwrap();
        assert!(module.handle_events(&mut scene).is_none());

        scene.set_control_point(second, 1, p(0.0, 0.0, 10.0)).unwrap();
        let processed = module.handle_events(&mut scene).unwrap().unwrap();
        assert_relative_eq!(processed.sphere.radius(), 5.0);
    }

    #[test]
    fn scene_close_resets_and_reinitializes() {
        let (mut scene, _) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        module.set_auto_update(&mut scene, true).unwrap();
        module.set_image_threshold(0.9).unwrap();

        module.on_scene_start_close(&mut scene);
        assert!(module.parameters().is_none());
        assert!(!module.is_observing());
        scene.clear();
        module.on_scene_end_close(&mut scene);

        let params = module.parameters().unwrap();
        assert!(params.input_markups.is_none());
        assert!(params.output_model.is_some());
        assert!((params.image_threshold() - DEFAULT_IMAGE_THRESHOLD).abs() < f64::EPSILON);
        assert!(!params.auto_update());
    }

    #[test]
    fn scene_close_while_hidden_waits_for_enter() {
        let mut scene = Scene::new();
        let mut module = entered_module(&mut scene);
        module.exit();
        module.on_scene_start_close(&mut scene);
        scene.clear();
        module.on_scene_end_close(&mut scene);
        assert!(module.parameters().is_none());
        assert!(scene.is_empty());

        module.enter(&mut scene);
        assert!(module.parameters().is_some());
    }

    #[test]
    fn reenter_restores_observation() {
        let (mut scene, markups) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        module.set_auto_update(&mut scene, true).unwrap();
        module.exit();
        module.enter(&mut scene);
        assert!(module.is_observing());

        scene.set_control_point(markups, 0, p(-2.0, 0.0, 0.0)).unwrap();
        let processed = module.handle_events(&mut scene).unwrap().unwrap();
        assert_relative_eq!(processed.sphere.radius(), 2.0);
    }

    #[test]
    fn cleanup_stops_observing() {
        let (mut scene, markups) = scene_with_points(&[p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)]);
        let mut module = entered_module(&mut scene);
        module.set_auto_update(&mut scene, true).unwrap();
        module.cleanup(&mut scene);
        scene.add_control_point(markups, p(3.0, 3.0, 3.0)).unwrap();
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn edits_before_parameters_fail() {
        let mut scene = Scene::new();
        let mut module = SphereModule::default();
        assert!(module.set_image_threshold(0.3).is_err());
        assert!(module.select_output(None).is_err());
        assert!(module.set_auto_update(&mut scene, true).is_err());
    }

    #[test]
    fn center_of_mass_label_format() {
        assert_eq!(format_center_of_mass(&p(1.0, -2.5, 10.004)), "(1.00, -2.50, 10.00)");
    }
}
