//! Block world model for the Blockyard voxel sandbox.
//!
//! - [`World`]: position-keyed block store
//! - [`picking`]: reticle raycasts and the place/remove/paint actions built on them
//! - [`exchange`]: the flat JSON document used to save and load worlds
//! - [`generation`]: the initial ground layer

pub mod exchange;
pub mod generation;
pub mod picking;
pub mod world;

pub use exchange::BlockRecord;
pub use generation::GroundConfig;
pub use picking::{BlockHit, PlaceOutcome};
pub use world::{Block, World};
