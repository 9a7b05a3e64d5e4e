mod center_of_mass;
mod fit_sphere;
mod process;

pub use center_of_mass::CenterOfMass;
pub use fit_sphere::{FitSphere, MIN_FIT_POINTS};
pub use process::{Process, Processed};
