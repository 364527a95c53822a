pub mod filter;
pub mod messages;
pub mod positions;

pub use filter::*;
pub use messages::*;
pub use positions::*;
