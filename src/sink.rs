//! Geometry outputs.

use tracing::warn;

use crate::error::Result;
use crate::tessellation::MeshDescriptor;

/// A destination for generated meshes.
///
/// Targets are handles owned by the sink. A handle can go stale or point at
/// something that cannot hold geometry; [`OutputSink::ensure_valid_target`]
/// replaces such a target with a freshly allocated one.
pub trait OutputSink {
    /// Handle identifying one geometry container.
    type Target: Copy + std::fmt::Debug;

    /// Returns `true` if `target` exists and can hold geometry.
    fn is_valid_target(&self, target: Self::Target) -> bool;

    /// Allocates a new, empty geometry container.
    fn allocate_target(&mut self, name: &str) -> Self::Target;

    /// Removes `target` from the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the target does not exist.
    fn discard_target(&mut self, target: Self::Target) -> Result<()>;

    /// Replaces the geometry and display style held by `target`.
    ///
    /// # Errors
    ///
    /// Returns an output error if `target` is not a valid geometry container.
    fn store(&mut self, target: Self::Target, descriptor: MeshDescriptor) -> Result<()>;

    /// Returns `current` if it is valid, otherwise discards it (when present)
    /// and returns a new target named `name`.
    fn ensure_valid_target(&mut self, current: Option<Self::Target>, name: &str) -> Self::Target {
        if let Some(target) = current {
            if self.is_valid_target(target) {
                return target;
            }
            warn!(?target, "output target cannot hold geometry, replacing it");
            // The target may already be gone
            let _ = self.discard_target(target);
        }
        self.allocate_target(name)
    }
}
