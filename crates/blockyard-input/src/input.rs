//! Input manager combining keyboard, mouse, and action mapping.

use tracing::trace;

use crate::action::{Action, ActionMap, InputBinding};
use crate::event::InputEvent;
use crate::intent::MoveIntent;
use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;

/// Held inputs plus the bindings that give them meaning.
///
/// Discrete actions are reported on their press edge as events are applied,
/// so a press and release inside a single tick still triggers the action.
/// Continuous actions (movement, sprint) are read from the held state once
/// the tick's events have all been applied.
///
/// ```ignore
/// for event in queue.drain() {
///     if let Some(action) = input.apply(&event) {
///         handle(action);
///     }
/// }
/// camera.update(input.move_intent());
///
/// // MUST call at end of tick
/// input.end_frame();
/// ```
#[derive(Debug)]
pub struct InputManager {
    keyboard: KeyboardState,
    mouse: MouseState,
    actions: ActionMap,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::with_actions(ActionMap::sandbox())
    }
}

impl InputManager {
    /// Create a new input manager with the sandbox layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input manager with custom bindings.
    #[must_use]
    pub fn with_actions(actions: ActionMap) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            actions,
        }
    }

    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    #[must_use]
    pub const fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Get a mutable reference to the action map for runtime rebinding.
    pub fn actions_mut(&mut self) -> &mut ActionMap {
        &mut self.actions
    }

    /// Apply one event to the held state.
    ///
    /// Returns the bound action when the event is a press edge. Events that
    /// carry no binding (motion, speed, color, file requests) are left to the
    /// caller.
    pub fn apply(&mut self, event: &InputEvent) -> Option<Action> {
        let binding = match *event {
            InputEvent::Key { code, pressed } => {
                if !self.keyboard.apply(code, pressed) {
                    return None;
                }
                InputBinding::Key(code)
            }
            InputEvent::MouseButton { button, pressed } => {
                if !self.mouse.apply_button(button, pressed) {
                    return None;
                }
                InputBinding::Mouse(button)
            }
            InputEvent::FocusLost => {
                trace!("focus lost, releasing held inputs");
                self.clear();
                return None;
            }
            _ => return None,
        };
        self.actions.action_for(binding)
    }

    /// Returns `true` if any binding of the action is held.
    #[must_use]
    pub fn is_action_held(&self, action: Action) -> bool {
        self.actions
            .get_bindings(action)
            .is_some_and(|bindings| {
                bindings.iter().any(|binding| match *binding {
                    InputBinding::Key(key) => self.keyboard.is_pressed(key),
                    InputBinding::Mouse(button) => self.mouse.is_pressed(button),
                })
            })
    }

    /// The movement requested by the inputs held right now.
    #[must_use]
    pub fn move_intent(&self) -> MoveIntent {
        const MOVES: [(Action, MoveIntent); 7] = [
            (Action::MoveForward, MoveIntent::FORWARD),
            (Action::MoveBack, MoveIntent::BACK),
            (Action::MoveLeft, MoveIntent::LEFT),
            (Action::MoveRight, MoveIntent::RIGHT),
            (Action::MoveUp, MoveIntent::UP),
            (Action::MoveDown, MoveIntent::DOWN),
            (Action::Sprint, MoveIntent::SPRINT),
        ];
        MOVES
            .iter()
            .filter(|(action, _)| self.is_action_held(*action))
            .fold(MoveIntent::empty(), |intent, (_, flag)| intent | *flag)
    }

    /// Called at end of tick to settle edges.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }

    /// Release every held input.
    pub fn clear(&mut self) {
        self.keyboard.clear();
        self.mouse.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mouse::MouseButton;
    use winit::keyboard::KeyCode;

    #[test]
    fn press_edge_reports_action() {
        let mut input = InputManager::new();
        assert_eq!(
            input.apply(&InputEvent::key(KeyCode::Digit2, true)),
            Some(Action::SelectPaintTool)
        );
        // Held key repeating is not a new edge.
        assert_eq!(input.apply(&InputEvent::key(KeyCode::Digit2, true)), None);
        assert_eq!(input.apply(&InputEvent::key(KeyCode::Digit2, false)), None);
        assert_eq!(input.apply(&InputEvent::key(KeyCode::KeyQ, true)), None);
    }

    #[test]
    fn click_within_one_tick_is_kept() {
        let mut input = InputManager::new();
        let down = input.apply(&InputEvent::mouse(MouseButton::Left, true));
        let up = input.apply(&InputEvent::mouse(MouseButton::Left, false));
        assert_eq!(down, Some(Action::Primary));
        assert_eq!(up, None);
        assert!(!input.is_action_held(Action::Primary));
    }

    #[test]
    fn move_intent_from_held_keys() {
        let mut input = InputManager::new();
        input.apply(&InputEvent::key(KeyCode::KeyW, true));
        input.apply(&InputEvent::key(KeyCode::KeyD, true));
        input.apply(&InputEvent::key(KeyCode::ControlRight, true));
        input.end_frame();

        assert_eq!(
            input.move_intent(),
            MoveIntent::FORWARD | MoveIntent::RIGHT | MoveIntent::SPRINT
        );

        input.apply(&InputEvent::key(KeyCode::KeyD, false));
        assert_eq!(input.move_intent(), MoveIntent::FORWARD | MoveIntent::SPRINT);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = InputManager::new();
        input.apply(&InputEvent::key(KeyCode::Space, true));
        input.apply(&InputEvent::mouse(MouseButton::Right, true));
        input.apply(&InputEvent::FocusLost);
        assert_eq!(input.move_intent(), MoveIntent::empty());
        assert!(!input.is_action_held(Action::Secondary));
    }

    #[test]
    fn motion_is_not_an_action() {
        let mut input = InputManager::new();
        input.apply(&InputEvent::key(KeyCode::KeyW, true));
        assert_eq!(input.apply(&InputEvent::motion(3.0, -1.0)), None);
        assert_eq!(input.move_intent(), MoveIntent::FORWARD);
    }
}
