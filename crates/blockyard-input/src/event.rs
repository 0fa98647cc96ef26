//! Host-agnostic input events and the queue they travel through.

use std::collections::VecDeque;
use std::path::PathBuf;

use blockyard_core::Color;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::mouse::MouseButton;

/// Something the host observed or the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down or up.
    Key { code: KeyCode, pressed: bool },
    /// A mouse button went down or up.
    MouseButton { button: MouseButton, pressed: bool },
    /// Raw pointer motion, in device units.
    MouseMotion { dx: f32, dy: f32 },
    /// The host window lost focus; every held input is released.
    FocusLost,
    /// The host granted pointer lock.
    LockRequested,
    /// The host revoked pointer lock.
    LockReleased,
    /// Cycle the base movement speed.
    CycleSpeed,
    /// A color was chosen from the palette.
    PickColor(Color),
    /// Export the world to a file.
    SaveWorld(PathBuf),
    /// Import a world from a file in the background.
    LoadWorld(PathBuf),
}

impl InputEvent {
    #[must_use]
    pub const fn key(code: KeyCode, pressed: bool) -> Self {
        Self::Key { code, pressed }
    }

    #[must_use]
    pub const fn mouse(button: MouseButton, pressed: bool) -> Self {
        Self::MouseButton { button, pressed }
    }

    #[must_use]
    pub const fn motion(dx: f32, dy: f32) -> Self {
        Self::MouseMotion { dx, dy }
    }

    /// Translate a winit window event.
    ///
    /// Key auto-repeat and unsupported keys or buttons yield `None`.
    #[must_use]
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return None;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                Some(Self::key(code, event.state == ElementState::Pressed))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::try_from(*button).ok()?;
                Some(Self::mouse(button, *state == ElementState::Pressed))
            }
            WindowEvent::Focused(false) => Some(Self::FocusLost),
            _ => None,
        }
    }

    /// Translate a winit device event. Only raw motion is of interest.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_device_event(event: &DeviceEvent) -> Option<Self> {
        match event {
            DeviceEvent::MouseMotion { delta } => Some(Self::motion(delta.0 as f32, delta.1 as f32)),
            _ => None,
        }
    }
}

/// FIFO of events waiting for the next tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Extend<InputEvent> for InputQueue {
    fn extend<T: IntoIterator<Item = InputEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}
