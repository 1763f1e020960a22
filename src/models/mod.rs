pub mod features;
pub mod location;
pub mod recommendation;
pub mod soil;
pub mod weather;

pub use features::*;
pub use location::*;
pub use recommendation::*;
pub use soil::*;
pub use weather::*;
