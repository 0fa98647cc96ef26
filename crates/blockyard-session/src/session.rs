//! The per-tick sandbox driver.

use std::path::{Path, PathBuf};

use blockyard_core::Result;
use blockyard_input::{Action, InputEvent, InputManager, InputQueue};
use blockyard_world::{exchange, picking, PlaceOutcome, World};
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::camera::{FlyCamera, MoveParams};
use crate::config::SessionConfig;
use crate::loader::{LoadResult, WorldLoader};
use crate::tools::{SpeedPreset, Tool, ToolState};

/// Something the host should show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    /// A click arrived while the pointer was free; the host should lock it.
    PointerLockRequested,
    Saved { path: PathBuf, blocks: usize },
    SaveFailed { path: PathBuf, message: String },
    /// A background load replaced the world.
    Loaded { path: PathBuf, blocks: usize },
    /// A load failed and the world was left untouched.
    ImportFailed { path: PathBuf, message: String },
}

/// What happened during one tick.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Number of the tick, starting at 1.
    pub tick: u64,
    pub notices: Vec<SessionNotice>,
}

/// A running sandbox: the world plus everything that edits it.
///
/// Hosts push [`InputEvent`]s between ticks and call [`Session::tick`] once
/// per frame. All state changes happen inside `tick`, in event order.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    world: World,
    camera: FlyCamera,
    tools: ToolState,
    speed: SpeedPreset,
    input: InputManager,
    queue: InputQueue,
    loader: WorldLoader,
    /// A load collected by [`Session::wait_for_load`], applied next tick.
    ready_load: Option<LoadResult>,
    ticks: u64,
}

impl Session {
    /// Start a session on the configured ground layer.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let world = config.ground.generate();
        Ok(Self::with_world(config, world))
    }

    /// Start a session on an existing world.
    #[must_use]
    pub fn with_world(config: SessionConfig, world: World) -> Self {
        info!(
            blocks = world.len(),
            spacing = world.spacing(),
            "session started"
        );
        Self {
            camera: FlyCamera::new(config.spawn),
            config,
            world,
            tools: ToolState::new(),
            speed: SpeedPreset::default(),
            input: InputManager::new(),
            queue: InputQueue::new(),
            loader: WorldLoader::new(),
            ready_load: None,
            ticks: 0,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub const fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }

    #[must_use]
    pub const fn tools(&self) -> &ToolState {
        &self.tools
    }

    #[must_use]
    pub const fn speed(&self) -> SpeedPreset {
        self.speed
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Events waiting for the next tick.
    pub fn queue(&mut self) -> &mut InputQueue {
        &mut self.queue
    }

    /// Queue an event for the next tick.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Returns `true` while a background load is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loader.is_loading() || self.ready_load.is_some()
    }

    /// Block until the outstanding load has finished reading.
    ///
    /// The result is applied by the next tick. Returns `false` when no load
    /// was outstanding.
    pub fn wait_for_load(&mut self) -> bool {
        match self.loader.wait() {
            Some(result) => {
                self.ready_load = Some(result);
                true
            }
            None => self.ready_load.is_some(),
        }
    }

    /// Write the world to `path` immediately.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        exchange::save_to_path(&self.world, path)
    }

    /// Run one frame.
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let mut notices = Vec::new();

        // Loads requested during this tick's drain land on a later tick.
        if let Some(result) = self.ready_load.take().or_else(|| self.loader.try_take()) {
            self.apply_load(result, &mut notices);
        }

        let mut queue = std::mem::take(&mut self.queue);
        for event in queue.drain() {
            self.handle_event(event, &mut notices);
        }
        // Keep the queue's allocation; nothing can push while we drain.
        self.queue = queue;

        let params = MoveParams {
            speed: self.config.speeds.speed(self.speed),
            sprint_multiplier: self.config.sprint_multiplier,
            damping: self.config.damping,
        };
        self.camera.update(self.input.move_intent(), params);
        self.input.end_frame();

        TickReport {
            tick: self.ticks,
            notices,
        }
    }

    fn handle_event(&mut self, event: InputEvent, notices: &mut Vec<SessionNotice>) {
        match event {
            InputEvent::LockRequested => {
                self.camera.lock();
                debug!("pointer locked");
            }
            InputEvent::LockReleased => {
                self.camera.unlock();
                debug!("pointer released");
            }
            InputEvent::CycleSpeed => {
                self.speed = self.speed.next();
                debug!(speed = ?self.speed, "speed changed");
            }
            InputEvent::PickColor(color) => {
                self.tools.pick_color(color);
                debug!(%color, "color picked");
            }
            InputEvent::SaveWorld(path) => {
                let notice = match self.save(&path) {
                    Ok(()) => SessionNotice::Saved {
                        blocks: self.world.len(),
                        path,
                    },
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "save failed");
                        SessionNotice::SaveFailed {
                            message: e.to_string(),
                            path,
                        }
                    }
                };
                notices.push(notice);
            }
            InputEvent::LoadWorld(path) => {
                if let Err(e) = self.loader.start(path.clone(), self.world.spacing()) {
                    warn!(path = %path.display(), error = %e, "could not start load");
                    notices.push(SessionNotice::ImportFailed {
                        message: e.to_string(),
                        path,
                    });
                }
            }
            // Steer per event so a later click in the same tick aims along
            // the new direction.
            InputEvent::MouseMotion { dx, dy } => {
                self.camera
                    .look(Vec2::new(dx, dy), self.config.mouse_sensitivity);
            }
            InputEvent::Key { .. } | InputEvent::MouseButton { .. } | InputEvent::FocusLost => {
                if let Some(action) = self.input.apply(&event) {
                    self.handle_action(action, notices);
                }
            }
        }
    }

    fn handle_action(&mut self, action: Action, notices: &mut Vec<SessionNotice>) {
        match action {
            Action::SelectPlaceTool => self.tools.select(Tool::PlaceRemove),
            Action::SelectPaintTool => self.tools.select(Tool::Paint),
            Action::ReleasePointer => self.camera.unlock(),
            Action::Primary => {
                if !self.camera.is_locked() {
                    notices.push(SessionNotice::PointerLockRequested);
                    return;
                }
                let ray = self.camera.center_ray();
                match self.tools.tool() {
                    Tool::PlaceRemove => {
                        if let Some(block) = picking::remove_hit(&mut self.world, &ray) {
                            debug!(position = %block.position, "removed block");
                        }
                    }
                    Tool::Paint => {
                        let color = self.tools.color();
                        if let Some(position) = picking::paint_hit(&mut self.world, &ray, color) {
                            debug!(%position, %color, "painted block");
                        }
                    }
                }
            }
            Action::Secondary => {
                if !self.camera.is_locked() || self.tools.tool() != Tool::PlaceRemove {
                    return;
                }
                let ray = self.camera.center_ray();
                match picking::place_adjacent(&mut self.world, &ray, self.tools.color()) {
                    PlaceOutcome::Placed(position) => debug!(%position, "placed block"),
                    PlaceOutcome::Occupied(position) => debug!(%position, "target occupied"),
                    PlaceOutcome::Missed => {}
                }
            }
            Action::MoveForward
            | Action::MoveBack
            | Action::MoveLeft
            | Action::MoveRight
            | Action::MoveUp
            | Action::MoveDown
            | Action::Sprint => {}
        }
    }

    fn apply_load(&mut self, result: LoadResult, notices: &mut Vec<SessionNotice>) {
        let LoadResult { path, blocks } = result;
        match blocks {
            Ok(blocks) => {
                self.world.replace_all(blocks);
                info!(path = %path.display(), blocks = self.world.len(), "world loaded");
                notices.push(SessionNotice::Loaded {
                    blocks: self.world.len(),
                    path,
                });
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "world import failed");
                notices.push(SessionNotice::ImportFailed {
                    message: e.to_string(),
                    path,
                });
            }
        }
    }
}
