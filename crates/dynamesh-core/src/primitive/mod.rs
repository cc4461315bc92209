//! Geometric primitives used for queries and intersection tests.

mod aabox;
mod plane;
mod ray;
mod sphere;
mod triangle;

pub use aabox::PrimAABox;
pub use plane::PrimPlane;
pub use ray::PrimRay;
pub use sphere::PrimSphere;
pub use triangle::PrimTriangle;
