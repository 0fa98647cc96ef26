//! Binding of sandbox actions to keys and mouse buttons.

use hashbrown::HashMap;
use winit::keyboard::KeyCode;

use crate::mouse::MouseButton;

/// Everything a key or mouse button can ask the sandbox to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Sprint,
    /// Switch to placing blocks and close the palette.
    SelectPlaceTool,
    /// Switch to painting blocks and open the palette.
    SelectPaintTool,
    /// Remove the targeted block, or paint it with the paint tool.
    Primary,
    /// Place a block against the targeted face.
    Secondary,
    /// Give the pointer back to the host.
    ReleasePointer,
}

/// An input that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// A keyboard key.
    Key(KeyCode),
    /// A mouse button.
    Mouse(MouseButton),
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for InputBinding {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Maps actions to input bindings, allowing multiple inputs per action.
#[derive(Debug, Default, Clone)]
pub struct ActionMap {
    actions: HashMap<Action, Vec<InputBinding>>,
}

impl ActionMap {
    /// Create an empty action map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new action map with a builder pattern.
    #[must_use]
    pub fn builder() -> ActionMapBuilder {
        ActionMapBuilder::new()
    }

    /// The default sandbox layout.
    ///
    /// WASD moves, Space and Shift rise and sink, Ctrl sprints, 1 and 2 pick
    /// the tool, left and right click act on the targeted block, Escape
    /// releases the pointer.
    #[must_use]
    pub fn sandbox() -> Self {
        Self::builder()
            .bind(Action::MoveForward, KeyCode::KeyW)
            .bind(Action::MoveBack, KeyCode::KeyS)
            .bind(Action::MoveLeft, KeyCode::KeyA)
            .bind(Action::MoveRight, KeyCode::KeyD)
            .bind(Action::MoveUp, KeyCode::Space)
            .bind_many(Action::MoveDown, [KeyCode::ShiftLeft, KeyCode::ShiftRight])
            .bind_many(Action::Sprint, [KeyCode::ControlLeft, KeyCode::ControlRight])
            .bind(Action::SelectPlaceTool, KeyCode::Digit1)
            .bind(Action::SelectPaintTool, KeyCode::Digit2)
            .bind(Action::Primary, MouseButton::Left)
            .bind(Action::Secondary, MouseButton::Right)
            .bind(Action::ReleasePointer, KeyCode::Escape)
            .build()
    }

    /// Add a binding to an action.
    pub fn bind(&mut self, action: Action, binding: impl Into<InputBinding>) {
        let binding = binding.into();
        let bindings = self.actions.entry(action).or_default();
        if !bindings.contains(&binding) {
            bindings.push(binding);
        }
    }

    /// Remove a binding from an action.
    pub fn unbind(&mut self, action: Action, binding: InputBinding) {
        if let Some(bindings) = self.actions.get_mut(&action) {
            bindings.retain(|b| *b != binding);
        }
    }

    /// Get the bindings for an action.
    #[must_use]
    pub fn get_bindings(&self, action: Action) -> Option<&[InputBinding]> {
        self.actions.get(&action).map(Vec::as_slice)
    }

    /// The action an input triggers, if any.
    ///
    /// A binding shared by several actions resolves to an arbitrary one of
    /// them; the sandbox layout never shares.
    #[must_use]
    pub fn action_for(&self, binding: InputBinding) -> Option<Action> {
        self.actions
            .iter()
            .find(|(_, bindings)| bindings.contains(&binding))
            .map(|(action, _)| *action)
    }
}

/// Builder for creating an action map with a fluent API.
#[derive(Debug, Default)]
pub struct ActionMapBuilder {
    actions: ActionMap,
}

impl ActionMapBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding to an action.
    #[must_use]
    pub fn bind(mut self, action: Action, binding: impl Into<InputBinding>) -> Self {
        self.actions.bind(action, binding);
        self
    }

    /// Add multiple bindings to an action.
    #[must_use]
    pub fn bind_many(
        mut self,
        action: Action,
        bindings: impl IntoIterator<Item = impl Into<InputBinding>>,
    ) -> Self {
        for binding in bindings {
            self.actions.bind(action, binding);
        }
        self
    }

    /// Build the action map.
    #[must_use]
    pub fn build(self) -> ActionMap {
        self.actions
    }
}
