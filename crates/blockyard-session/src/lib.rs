//! Session driver for the Blockyard voxel sandbox.
//!
//! A [`Session`] owns the world, the [`FlyCamera`], the active tool and the
//! input state. Hosts feed it [`InputEvent`](blockyard_input::InputEvent)s
//! and call [`Session::tick`] once per frame.

pub mod camera;
pub mod config;
pub mod loader;
pub mod session;
pub mod tools;

pub use camera::{FlyCamera, MoveParams, PointerLock};
pub use config::{SessionConfig, SpeedTable};
pub use loader::{LoadResult, WorldLoader};
pub use session::{Session, SessionNotice, TickReport};
pub use tools::{SpeedPreset, Tool, ToolState};
