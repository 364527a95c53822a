pub mod backend;
pub mod controller;
pub mod headless;
pub mod style;

pub use backend::*;
pub use controller::*;
pub use style::*;
