//! Reticle picking: find the block under a ray and act on it.
//!
//! The resolver is a brute-force slab test over every block. Worlds are small
//! and fully resident, so no acceleration structure is kept.

use blockyard_core::{Aabb, BlockPos, Color, Ray};
use glam::{IVec3, Vec3};
use tracing::debug;

use crate::world::{Block, World};

/// The nearest block along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockHit {
    /// The block that was hit.
    pub block: Block,
    /// Distance from the ray origin to the entry point.
    pub distance: f32,
    /// Entry point on the block surface.
    pub point: Vec3,
    /// Outward unit normal of the entered face.
    pub normal: IVec3,
}

/// Result of a placement request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// The ray hit nothing.
    Missed,
    /// The neighbouring cell already holds a block.
    Occupied(BlockPos),
    /// A new block was placed at the given position.
    Placed(BlockPos),
}

impl PlaceOutcome {
    /// Position of the new block, if one was placed.
    #[must_use]
    pub const fn placed(self) -> Option<BlockPos> {
        match self {
            Self::Placed(pos) => Some(pos),
            Self::Missed | Self::Occupied(_) => None,
        }
    }
}

/// Find the closest block entered by `ray`.
///
/// Equal distances resolve to the smaller position so the answer does not
/// depend on store iteration order.
pub fn raycast(world: &World, ray: &Ray) -> Option<BlockHit> {
    let size = world.spacing();
    world
        .blocks()
        .filter_map(|block| {
            Aabb::block(block.position, size)
                .intersect_ray(ray)
                .map(|face| BlockHit {
                    block,
                    distance: face.distance,
                    point: face.point,
                    normal: face.normal,
                })
        })
        .min_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.block.position.cmp(&b.block.position))
        })
}

/// The cell adjacent to the hit face: one lattice step from the hit block
/// along the face normal.
///
/// Only the normal is used, so a hit on a face edge or corner still lands
/// in the face neighbour and never in a diagonal cell. A block imported off
/// the lattice is first snapped to its nearest cell, so targets always lie
/// on the lattice.
pub fn placement_target(hit: &BlockHit, spacing: i32) -> BlockPos {
    hit.block
        .position
        .snapped(spacing)
        .step(hit.normal, spacing)
}

/// Remove the block under the ray.
pub fn remove_hit(world: &mut World, ray: &Ray) -> Option<Block> {
    let hit = raycast(world, ray)?;
    let removed = world.remove(hit.block.position);
    debug!(position = %hit.block.position, "removed block");
    removed
}

/// Repaint the block under the ray, returning its position.
pub fn paint_hit(world: &mut World, ray: &Ray, color: Color) -> Option<BlockPos> {
    let hit = raycast(world, ray)?;
    world.paint(hit.block.position, color)?;
    debug!(position = %hit.block.position, %color, "painted block");
    Some(hit.block.position)
}

/// Place a block against the face under the ray.
pub fn place_adjacent(world: &mut World, ray: &Ray, color: Color) -> PlaceOutcome {
    let Some(hit) = raycast(world, ray) else {
        return PlaceOutcome::Missed;
    };
    let target = placement_target(&hit, world.spacing());
    if world.place(target, color) {
        debug!(position = %target, %color, "placed block");
        PlaceOutcome::Placed(target)
    } else {
        PlaceOutcome::Occupied(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GroundConfig;
    use approx::assert_relative_eq;

    fn single(pos: BlockPos) -> World {
        let mut world = World::new(2);
        assert!(world.place(pos, Color::BLUE));
        world
    }

    fn down_from(x: f32, y: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, y, z), Vec3::NEG_Y)
    }

    #[test]
    fn hits_top_face() {
        let world = single(BlockPos::new(0, -2, 0));
        let hit = raycast(&world, &down_from(0.3, 5.0, -0.2)).unwrap();
        assert_eq!(hit.block.position, BlockPos::new(0, -2, 0));
        assert_eq!(hit.normal, IVec3::Y);
        assert_relative_eq!(hit.distance, 6.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn nearest_block_wins() {
        let mut world = single(BlockPos::new(0, -2, 0));
        assert!(world.place(BlockPos::new(0, 2, 0), Color::RED));
        let hit = raycast(&world, &down_from(0.0, 10.0, 0.0)).unwrap();
        assert_eq!(hit.block.position, BlockPos::new(0, 2, 0));
    }

    #[test]
    fn equal_distance_prefers_smaller_position() {
        let mut world = World::new(2);
        assert!(world.place(BlockPos::new(2, 0, 0), Color::RED));
        assert!(world.place(BlockPos::new(0, 0, 0), Color::BLUE));
        // Straight down the shared edge at x = 1.
        let hit = raycast(&world, &down_from(1.0, 10.0, 0.0)).unwrap();
        assert_eq!(hit.block.position, BlockPos::new(0, 0, 0));
    }

    #[test]
    fn miss_is_none() {
        let world = single(BlockPos::new(0, -2, 0));
        assert!(raycast(&world, &down_from(5.0, 5.0, 5.0)).is_none());
        assert!(raycast(&World::new(2), &down_from(0.0, 5.0, 0.0)).is_none());
    }

    #[test]
    fn place_on_top_face_lands_above() {
        let mut world = single(BlockPos::new(0, -2, 0));
        let outcome = place_adjacent(&mut world, &down_from(0.0, 5.0, 0.0), Color::WHITE);
        assert_eq!(outcome, PlaceOutcome::Placed(BlockPos::ORIGIN));
        assert_eq!(world.get(BlockPos::ORIGIN).unwrap().color, Color::WHITE);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn second_placement_at_same_target_is_rejected() {
        let mut world = single(BlockPos::new(0, -2, 0));
        // Two placements resolved against the same hit.
        let hit = raycast(&world, &down_from(0.2, 5.0, 0.2)).unwrap();
        let target = placement_target(&hit, world.spacing());
        assert_eq!(target, BlockPos::ORIGIN);

        assert!(world.place(target, Color::RED));
        assert!(!world.place(target, Color::GREEN));
        assert_eq!(world.get(target).unwrap().color, Color::RED);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn placement_against_side_face() {
        let mut world = single(BlockPos::new(0, -2, 0));
        let ray = Ray::new(Vec3::new(10.0, -2.0, 0.0), Vec3::NEG_X);
        assert_eq!(
            place_adjacent(&mut world, &ray, Color::RED),
            PlaceOutcome::Placed(BlockPos::new(2, -2, 0))
        );
        // The same ray now hits the new block and builds outward.
        assert_eq!(
            place_adjacent(&mut world, &ray, Color::RED).placed(),
            Some(BlockPos::new(4, -2, 0))
        );
    }

    #[test]
    fn occupied_target_is_reported() {
        let mut world = single(BlockPos::new(0, -2, 0));
        // Looking down from inside the upper block: it is skipped, the lower
        // block's top face is hit, and its neighbour cell is the upper block.
        assert!(world.place(BlockPos::ORIGIN, Color::GREEN));
        let ray = down_from(0.2, 0.5, 0.3);
        let outcome = place_adjacent(&mut world, &ray, Color::RED);
        assert_eq!(outcome, PlaceOutcome::Occupied(BlockPos::ORIGIN));
        assert_eq!(world.get(BlockPos::ORIGIN).unwrap().color, Color::GREEN);
    }

    #[test]
    fn placement_is_one_step_along_normal() {
        let center = BlockPos::new(4, -2, 6);
        let half = 1.0;
        // The face spans -1.0..=1.0 around its center; include the edges.
        let offsets = [-1.0, -0.9, -0.5, 0.0, 0.3, 0.99, 1.0];
        let normals = [
            IVec3::X,
            IVec3::NEG_X,
            IVec3::Y,
            IVec3::NEG_Y,
            IVec3::Z,
            IVec3::NEG_Z,
        ];

        for normal in normals {
            let n = normal.as_vec3();
            // Two tangent directions spanning the face.
            let t1 = if normal.x == 0 { Vec3::X } else { Vec3::Y };
            let t2 = n.cross(t1);
            for u in offsets {
                for v in offsets {
                    let point = center.to_vec3() + n * half + t1 * u + t2 * v;
                    let hit = BlockHit {
                        block: Block::new(center, Color::WHITE),
                        distance: 1.0,
                        point,
                        normal,
                    };
                    let target = placement_target(&hit, 2);
                    assert_eq!(target, center.step(normal, 2), "normal {normal} at ({u}, {v})");
                    assert!(target.is_on_lattice(2));
                }
            }
        }
    }

    #[test]
    fn ray_down_a_shared_edge_places_straight_up() {
        let mut world = World::new(2);
        assert!(world.place(BlockPos::new(0, 0, 0), Color::BLUE));
        assert!(world.place(BlockPos::new(2, 0, 0), Color::RED));

        // x = 1 is the edge between both top faces; the hit point snaps
        // to x = 2 but the target must stay above the block that was hit.
        let ray = down_from(1.0, 10.0, 0.0);
        assert_eq!(
            place_adjacent(&mut world, &ray, Color::WHITE),
            PlaceOutcome::Placed(BlockPos::new(0, 2, 0))
        );
        assert!(!world.contains(BlockPos::new(2, 2, 0)));
    }

    #[test]
    fn placement_next_to_off_lattice_block_lands_on_lattice() {
        let off = BlockPos::from_f64(0.5, -2.0, 0.0).unwrap();
        let mut world = single(off);
        let ray = down_from(0.5, 5.0, 0.0);
        let hit = raycast(&world, &ray).unwrap();
        assert_eq!(hit.block.position, off);
        assert_eq!(hit.normal, IVec3::Y);

        let outcome = place_adjacent(&mut world, &ray, Color::RED);
        assert_eq!(outcome, PlaceOutcome::Placed(BlockPos::ORIGIN));
        assert!(BlockPos::ORIGIN.is_on_lattice(2));
    }

    #[test]
    fn remove_and_paint_through_ray() {
        let mut world = GroundConfig::default().generate();
        let ray = down_from(0.5, 5.0, 0.5);

        assert_eq!(paint_hit(&mut world, &ray, Color::RED), Some(BlockPos::new(0, -2, 0)));
        assert_eq!(world.get(BlockPos::new(0, -2, 0)).unwrap().color, Color::RED);
        assert_eq!(world.len(), 100);

        let removed = remove_hit(&mut world, &ray).unwrap();
        assert_eq!(removed.position, BlockPos::new(0, -2, 0));
        assert_eq!(world.len(), 99);

        // Nothing below the hole any more.
        assert_eq!(remove_hit(&mut world, &ray), None);
        assert_eq!(paint_hit(&mut world, &ray, Color::RED), None);
        assert_eq!(place_adjacent(&mut world, &ray, Color::RED), PlaceOutcome::Missed);
        assert_eq!(world.len(), 99);
    }
}
