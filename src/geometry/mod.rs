pub mod surface;

pub use surface::{Sphere, Surface, SurfaceDomain};
