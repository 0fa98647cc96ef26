//! Ray and box math used for block picking.

use glam::{IVec3, Vec3};

use crate::coords::BlockPos;

/// Ray for raycasting operations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Where a ray enters a box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceHit {
    /// Distance along the ray to the entry point.
    pub distance: f32,
    /// Entry point on the box surface.
    pub point: Vec3,
    /// Outward unit normal of the entered face.
    pub normal: IVec3,
}

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The cube occupied by a block centered at `pos` with edge `size`.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn block(pos: BlockPos, size: i32) -> Self {
        let half = Vec3::splat(size as f32 * 0.5);
        let center = pos.to_vec3();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Get the center of the AABB
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Check if a point is inside the AABB
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab test returning where the ray enters this box.
    ///
    /// Only entering faces count: a ray whose origin lies inside the box, or
    /// a box entirely behind the origin, yields `None`. Boundaries are
    /// inclusive, so a ray grazing a face or edge still hits.
    #[allow(clippy::float_cmp)]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<FaceHit> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut entry_axis = None;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir == 0.0 {
                // Parallel to this slab: either always inside it or never.
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = dir.recip();
            let t1 = (self.min[axis] - origin) * inv;
            let t2 = (self.max[axis] - origin) * inv;
            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            if lo > t_near {
                t_near = lo;
                entry_axis = Some(axis);
            }
            t_far = t_far.min(hi);
        }

        let axis = entry_axis?;
        if t_near > t_far || t_near < 0.0 {
            return None;
        }

        let mut normal = IVec3::ZERO;
        normal[axis] = if ray.direction[axis] > 0.0 { -1 } else { 1 };

        Some(FaceHit {
            distance: t_near,
            point: ray.at(t_near),
            normal,
        })
    }
}
