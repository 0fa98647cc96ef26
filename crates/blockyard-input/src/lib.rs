//! Input handling for the Blockyard voxel sandbox.
//!
//! Hosts never mutate sandbox state from their event callbacks. Instead they
//! translate whatever they receive (winit window events, DOM events, a test
//! script) into [`InputEvent`]s and push them onto an [`InputQueue`]. The
//! session drains the queue once per tick, in order, handling each event to
//! completion before looking at the next.
//!
//! # Core Types
//!
//! - [`InputQueue`]: FIFO of pending events
//! - [`InputManager`]: held keys and buttons plus the action map
//! - [`ActionMap`]: maps sandbox [`Action`]s to key and mouse bindings
//! - [`MoveIntent`]: the movement keys held during a tick
//!
//! # Usage
//!
//! ```ignore
//! use blockyard_input::{Action, InputEvent, InputManager, InputQueue, KeyCode};
//!
//! let mut queue = InputQueue::new();
//! let mut input = InputManager::new();
//!
//! // Host side, between ticks
//! queue.push(InputEvent::key(KeyCode::KeyW, true));
//!
//! // Session side, once per tick
//! for event in queue.drain() {
//!     if let Some(action) = input.apply(&event) {
//!         // react to the press edge of `action`
//!     }
//! }
//! let intent = input.move_intent();
//! input.end_frame();
//! ```

mod action;
mod button_state;
mod event;
mod input;
mod intent;
mod keyboard;
mod mouse;

pub use action::{Action, ActionMap, ActionMapBuilder, InputBinding};
pub use button_state::ButtonState;
pub use event::{InputEvent, InputQueue};
pub use input::InputManager;
pub use intent::MoveIntent;
pub use keyboard::KeyboardState;
pub use mouse::{MouseButton, MouseState};

// Re-export winit types commonly used with input
pub use winit::event::{DeviceEvent, WindowEvent};
pub use winit::keyboard::KeyCode;
