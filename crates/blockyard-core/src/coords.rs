//! Lattice coordinates for block positions.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use glam::{IVec3, Vec3};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Position of a block center in world units.
///
/// Blocks live on a cubic lattice: a well-formed position has every
/// component divisible by the lattice spacing. The type itself does not
/// enforce this, since imported worlds may carry off-lattice or fractional
/// positions, and those are kept exactly as read.
///
/// Components are finite. Equality, hashing and ordering treat `-0.0` and
/// `0.0` as the same coordinate, so a position is a well-behaved map key.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl BlockPos {
    /// The world origin.
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a position from integer world units.
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self {
            x: f64::from(x),
            y: f64::from(y),
            z: f64::from(z),
        }
    }

    /// Create a position from arbitrary coordinates.
    ///
    /// Returns `None` if any component is NaN or infinite.
    #[inline]
    pub fn from_f64(x: f64, y: f64, z: f64) -> Option<Self> {
        (x.is_finite() && y.is_finite() && z.is_finite()).then_some(Self {
            // Adding zero turns -0.0 into 0.0.
            x: x + 0.0,
            y: y + 0.0,
            z: z + 0.0,
        })
    }

    /// The nearest lattice cell.
    ///
    /// Each coordinate becomes `round(c / spacing) * spacing`, with ties
    /// rounded toward positive infinity. On-lattice positions are returned
    /// unchanged.
    #[inline]
    #[must_use]
    pub fn snapped(self, spacing: i32) -> Self {
        let s = f64::from(spacing);
        let snap_axis = |c: f64| (c / s + 0.5).floor() * s + 0.0;
        Self {
            x: snap_axis(self.x),
            y: snap_axis(self.y),
            z: snap_axis(self.z),
        }
    }

    /// Returns `true` if every component is a multiple of `spacing`.
    ///
    /// No position lies on a lattice with a spacing below one.
    #[inline]
    #[allow(clippy::float_cmp)]
    pub fn is_on_lattice(self, spacing: i32) -> bool {
        if spacing <= 0 {
            return false;
        }
        let s = f64::from(spacing);
        [self.x, self.y, self.z]
            .into_iter()
            .all(|c| c.rem_euclid(s) == 0.0)
    }

    /// Offset by `steps` lattice cells along each axis.
    #[inline]
    #[must_use]
    pub fn step(self, steps: IVec3, spacing: i32) -> Self {
        let s = f64::from(spacing);
        Self {
            x: self.x + f64::from(steps.x) * s,
            y: self.y + f64::from(steps.y) * s,
            z: self.z + f64::from(steps.z) * s,
        }
    }

    /// Convert to floating point Vec3
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Component-wise minimum.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// Components with the sign of zero erased.
    #[inline]
    fn key(self) -> [f64; 3] {
        [self.x + 0.0, self.y + 0.0, self.z + 0.0]
    }
}

impl PartialEq for BlockPos {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BlockPos {}

impl Hash for BlockPos {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.key() {
            c.to_bits().hash(state);
        }
    }
}

impl PartialOrd for BlockPos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic: x, then y, then z.
impl Ord for BlockPos {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.key(), other.key());
        a[0].total_cmp(&b[0])
            .then_with(|| a[1].total_cmp(&b[1]))
            .then_with(|| a[2].total_cmp(&b[2]))
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.key();
        write!(f, "({x}, {y}, {z})")
    }
}

/// Whole coordinates are written as JSON integers, everything else as
/// decimals.
impl Serialize for BlockPos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let [x, y, z] = self.key();
        let mut state = serializer.serialize_struct("BlockPos", 3)?;
        state.serialize_field("x", &Coord(x))?;
        state.serialize_field("y", &Coord(y))?;
        state.serialize_field("z", &Coord(z))?;
        state.end()
    }
}

struct Coord(f64);

impl Serialize for Coord {
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        // Below 2^53 every whole f64 converts to i64 exactly.
        if v.trunc() == v && v.abs() < 9.0e15 {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: f64, y: f64, z: f64) -> BlockPos {
        BlockPos::from_f64(x, y, z).unwrap()
    }

    #[test]
    fn snap_to_nearest_cell() {
        assert_eq!(pos(0.4, -1.9, 3.1).snapped(2), BlockPos::new(0, -2, 4));
        assert_eq!(pos(-0.9, 0.9, -3.2).snapped(2), BlockPos::new(0, 0, -4));
        assert_eq!(pos(0.5, -2.9, 3.0).snapped(2), BlockPos::new(0, -2, 4));
    }

    #[test]
    fn snap_ties_round_up() {
        // 1.0 / 2 = 0.5 and -1.0 / 2 = -0.5 are exact ties
        assert_eq!(pos(1.0, -1.0, 0.0).snapped(2), BlockPos::new(2, 0, 0));
    }

    #[test]
    fn snapped_keeps_lattice_positions() {
        let on = BlockPos::new(-4, 2, 8);
        assert_eq!(on.snapped(2), on);
    }

    #[test]
    fn lattice_membership() {
        assert!(BlockPos::new(-4, 0, 8).is_on_lattice(2));
        assert!(!BlockPos::new(-4, 3, 8).is_on_lattice(2));
        assert!(BlockPos::new(-4, 3, 8).is_on_lattice(1));

        let fractional = BlockPos::from_f64(0.5, 0.0, 0.0).unwrap();
        assert!(!fractional.is_on_lattice(1));
    }

    #[test]
    fn degenerate_spacing_has_no_lattice() {
        assert!(!BlockPos::ORIGIN.is_on_lattice(0));
        assert!(!BlockPos::new(2, 2, 2).is_on_lattice(-2));
    }

    #[test]
    fn step_along_axis() {
        let pos = BlockPos::new(0, -2, 0);
        assert_eq!(pos.step(IVec3::Y, 2), BlockPos::ORIGIN);
        assert_eq!(pos.step(IVec3::NEG_X, 2), BlockPos::new(-2, -2, 0));

        let off = BlockPos::from_f64(0.5, 0.0, 0.0).unwrap();
        assert_eq!(off.step(IVec3::X, 2), BlockPos::from_f64(2.5, 0.0, 0.0).unwrap());
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(BlockPos::new(0, 5, 5) < BlockPos::new(1, 0, 0));
        assert!(BlockPos::new(1, 0, 0) < BlockPos::new(1, 0, 1));
        assert!(BlockPos::new(0, 0, 0) < BlockPos::from_f64(0.0, 0.0, 0.25).unwrap());
    }

    #[test]
    fn negative_zero_is_zero() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |pos: BlockPos| {
            let mut hasher = DefaultHasher::new();
            pos.hash(&mut hasher);
            hasher.finish()
        };
        let signed = BlockPos {
            x: -0.0,
            y: 0.0,
            z: -0.0,
        };
        assert_eq!(signed, BlockPos::ORIGIN);
        assert_eq!(hash(signed), hash(BlockPos::ORIGIN));
        assert_eq!(signed.to_string(), "(0, 0, 0)");
        assert_eq!(BlockPos::from_f64(-0.0, 0.0, 0.0).unwrap().x.to_bits(), 0);
    }

    #[test]
    fn non_finite_coordinates_are_refused() {
        assert!(BlockPos::from_f64(f64::NAN, 0.0, 0.0).is_none());
        assert!(BlockPos::from_f64(0.0, f64::INFINITY, 0.0).is_none());
        assert!(BlockPos::from_f64(0.0, 0.0, f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn serializes_whole_coordinates_as_integers() {
        let json = serde_json::to_string(&BlockPos::new(0, -2, 4)).unwrap();
        assert_eq!(json, r#"{"x":0,"y":-2,"z":4}"#);

        let json = serde_json::to_string(&BlockPos::from_f64(0.5, -1.25, 4.0).unwrap()).unwrap();
        assert_eq!(json, r#"{"x":0.5,"y":-1.25,"z":4}"#);
    }

    #[test]
    fn display() {
        assert_eq!(BlockPos::new(0, -2, 4).to_string(), "(0, -2, 4)");
        assert_eq!(BlockPos::from_f64(0.5, 0.0, 0.0).unwrap().to_string(), "(0.5, 0, 0)");
    }
}
