//! First-person fly camera with damped velocity.

use std::f32::consts::FRAC_PI_2;

use blockyard_core::Ray;
use blockyard_input::MoveIntent;
use glam::{Vec2, Vec3};

/// Pitch stays this far away from straight up or down.
const PITCH_MARGIN: f32 = 0.01;

/// Whether the sandbox owns the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerLock {
    /// The host owns the pointer; movement and mouse actions are ignored.
    #[default]
    Unlocked,
    /// Pointer motion steers the camera and clicks act on blocks.
    Locked,
}

/// Parameters for one movement update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveParams {
    /// Velocity gained per tick along each requested direction.
    pub speed: f32,
    /// Speed factor while sprint is held.
    pub sprint_multiplier: f32,
    /// Fraction of velocity kept after the tick.
    pub damping: f32,
}

/// Fly camera driven by [`MoveIntent`]s and raw pointer motion.
///
/// Yaw 0 and pitch 0 look down -Z. Positive yaw turns left, positive pitch
/// looks up.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub velocity: Vec3,
    yaw: f32,
    pitch: f32,
    lock: PointerLock,
}

impl FlyCamera {
    /// Camera at `position`, at rest, looking down -Z.
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            lock: PointerLock::Unlocked,
        }
    }

    #[must_use]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    #[must_use]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    #[must_use]
    pub const fn pointer_lock(&self) -> PointerLock {
        self.lock
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock == PointerLock::Locked
    }

    pub fn lock(&mut self) {
        self.lock = PointerLock::Locked;
    }

    pub fn unlock(&mut self) {
        self.lock = PointerLock::Unlocked;
    }

    /// Point the camera, clamping pitch short of the poles.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-FRAC_PI_2 + PITCH_MARGIN, FRAC_PI_2 - PITCH_MARGIN);
    }

    /// Turn by raw pointer motion. Ignored while unlocked.
    pub fn look(&mut self, delta: Vec2, sensitivity: f32) {
        if !self.is_locked() || delta == Vec2::ZERO {
            return;
        }
        self.set_orientation(
            self.yaw - delta.x * sensitivity,
            self.pitch - delta.y * sensitivity,
        );
    }

    /// Unit vector the camera looks along.
    #[must_use]
    pub fn look_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// The reticle ray through the middle of the view.
    #[must_use]
    pub fn center_ray(&self) -> Ray {
        Ray::new(self.position, self.look_direction())
    }

    /// Advance one tick. Ignored while unlocked.
    ///
    /// Each requested direction adds `speed` to the velocity, the position
    /// moves by the velocity, then the velocity decays by `damping`.
    pub fn update(&mut self, intent: MoveIntent, params: MoveParams) {
        if !self.is_locked() {
            return;
        }

        let direction = self.look_direction();
        let forward = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        let left = Vec3::Y.cross(forward);

        let speed = if intent.sprint() {
            params.speed * params.sprint_multiplier
        } else {
            params.speed
        };

        self.velocity += (forward * intent.forward_axis()
            + left * intent.left_axis()
            + Vec3::Y * intent.vertical_axis())
            * speed;
        self.position += self.velocity;
        self.velocity *= params.damping;
    }
}
