pub mod bounds;
pub mod coordinate;
pub mod geofence;

// Foundation crate: small, well-tested geographic primitives only.
pub use bounds::*;
pub use coordinate::*;
pub use geofence::*;
