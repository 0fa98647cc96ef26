//! The world exchange document.
//!
//! A world is saved as a JSON array with one entry per block:
//!
//! ```json
//! [{ "position": { "x": 0, "y": -2, "z": 0 }, "color": 2263842 }]
//! ```
//!
//! `color` is the packed `0xRRGGBB` value. Loading is all-or-nothing: the
//! whole document is validated before a world is touched.

use std::path::Path;

use blockyard_core::{BlockPos, Color, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::world::{Block, World};

/// One exported block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockRecord {
    pub position: BlockPos,
    pub color: Color,
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        Self {
            position: block.position,
            color: block.color,
        }
    }
}

/// An entry as read from disk. Any JSON number passes the structural
/// check; nothing is range-checked afterwards.
#[derive(Debug, Deserialize)]
struct RawRecord {
    position: RawPosition,
    color: f64,
}

#[derive(Debug, Deserialize)]
struct RawPosition {
    x: f64,
    y: f64,
    z: f64,
}

/// Export every block, in store order.
pub fn export(world: &World) -> Vec<BlockRecord> {
    world.blocks().map(BlockRecord::from).collect()
}

/// Export a world as a JSON document.
pub fn to_json(world: &World) -> Result<String> {
    serde_json::to_string(&export(world)).map_err(|e| Error::Document(e.to_string()))
}

/// Parse and validate a world document without touching any world.
///
/// Only the shape is validated. Positions are kept exactly as written, even
/// when fractional or off the lattice. Colors are read the way a packed
/// `0xRRGGBB` consumer reads them: rounded down and wrapped to 32 bits, so
/// `-1` becomes `0xFFFFFFFF`. Unusual values are reported, never rejected.
pub fn parse_document(json: &str, spacing: i32) -> Result<Vec<Block>> {
    if spacing <= 0 {
        return Err(Error::InvalidData(format!(
            "lattice spacing must be positive, got {spacing}"
        )));
    }
    let raw: Vec<RawRecord> =
        serde_json::from_str(json).map_err(|e| Error::Document(e.to_string()))?;

    let blocks = raw
        .iter()
        .enumerate()
        .map(|(index, record)| convert(index, record))
        .collect::<Result<Vec<_>>>()?;

    let wrapped = raw.iter().filter(|r| packed_color(r.color).is_none()).count();
    if wrapped > 0 {
        warn!(wrapped, "world document has colors that are not packed integers");
    }

    let off_lattice = blocks
        .iter()
        .filter(|b| !b.position.is_on_lattice(spacing))
        .count();
    if off_lattice > 0 {
        warn!(off_lattice, spacing, "world document has positions off the block lattice");
    }
    let out_of_range = blocks.iter().filter(|b| !b.color.is_rgb()).count();
    if out_of_range > 0 {
        warn!(out_of_range, "world document has colors outside 0xRRGGBB");
    }

    Ok(blocks)
}

/// Replace the contents of `world` with the blocks of a document.
///
/// On error the world is left as it was. Returns the number of entries read;
/// entries sharing a position collapse to the last one.
pub fn import_json(world: &mut World, json: &str) -> Result<usize> {
    let blocks = parse_document(json, world.spacing())?;
    let entries = blocks.len();
    world.replace_all(blocks);
    info!(entries, blocks = world.len(), "imported world");
    Ok(entries)
}

/// Write a world document to `path`.
pub fn save_to_path(world: &World, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json(world)?)?;
    info!(path = %path.display(), blocks = world.len(), "saved world");
    Ok(())
}

/// Read and validate a world document from `path`.
pub fn load_from_path(path: impl AsRef<Path>, spacing: i32) -> Result<Vec<Block>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
        _ => Error::Io(e),
    })?;
    parse_document(&json, spacing)
}

fn convert(index: usize, record: &RawRecord) -> Result<Block> {
    let RawPosition { x, y, z } = record.position;
    let position = BlockPos::from_f64(x, y, z).ok_or_else(|| Error::InvalidBlock {
        index,
        reason: format!("position ({x}, {y}, {z}) is not finite"),
    })?;
    if !record.color.is_finite() {
        return Err(Error::InvalidBlock {
            index,
            reason: format!("color {} is not finite", record.color),
        });
    }
    let color = packed_color(record.color).unwrap_or_else(|| wrap_color(record.color));
    Ok(Block::new(position, Color::new(color)))
}

/// The value as a `u32`, if it is a whole number in range.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn packed_color(value: f64) -> Option<u32> {
    (value.trunc() == value && (0.0..=f64::from(u32::MAX)).contains(&value))
        .then_some(value as u32)
}

/// Round down, then wrap modulo 2^32.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn wrap_color(value: f64) -> u32 {
    value.floor().rem_euclid(4_294_967_296.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GroundConfig;
    use hashbrown::HashSet;

    fn block_set(world: &World) -> HashSet<Block> {
        world.blocks().collect()
    }

    #[test]
    fn export_import_round_trip() {
        let mut source = GroundConfig::default().generate();
        assert!(source.place(BlockPos::new(0, 0, 0), Color::WHITE));
        assert!(source.place(BlockPos::new(4, 2, -6), Color::new(0x12_34_56)));

        let json = to_json(&source).unwrap();
        let mut target = World::new(2);
        assert_eq!(import_json(&mut target, &json).unwrap(), 102);
        assert_eq!(block_set(&target), block_set(&source));
    }

    #[test]
    fn empty_world_round_trip() {
        let json = to_json(&World::new(2)).unwrap();
        assert_eq!(json, "[]");
        let mut target = GroundConfig::default().generate();
        assert_eq!(import_json(&mut target, &json).unwrap(), 0);
        assert!(target.is_empty());
    }

    #[test]
    fn document_shape() {
        let mut world = World::new(2);
        assert!(world.place(BlockPos::new(0, -2, 4), Color::new(0x22_8B_22)));
        assert_eq!(
            to_json(&world).unwrap(),
            r#"[{"position":{"x":0,"y":-2,"z":4},"color":2263842}]"#
        );
    }

    #[test]
    fn missing_color_leaves_world_intact() {
        let mut world = GroundConfig::default().generate();
        let before = block_set(&world);

        let json = r#"[{"position":{"x":0,"y":0,"z":0},"color":16777215},
                       {"position":{"x":2,"y":0,"z":0}}]"#;
        let err = import_json(&mut world, json).unwrap_err();
        assert!(matches!(err, Error::Document(_)), "{err}");
        assert_eq!(world.len(), 100);
        assert_eq!(block_set(&world), before);
    }

    #[test]
    fn structural_violations() {
        let cases = [
            "not json",
            r#"{"position":{"x":0,"y":0,"z":0},"color":1}"#,
            r#"[{"position":{"x":"0","y":0,"z":0},"color":1}]"#,
            r#"[{"position":{"x":0,"z":0},"color":1}]"#,
            r#"[{"color":1}]"#,
            r#"[{"position":{"x":0,"y":0,"z":0},"color":"white"}]"#,
            "[1, 2]",
        ];
        for json in cases {
            assert!(parse_document(json, 2).is_err(), "accepted {json}");
        }
    }

    #[test]
    fn fractional_position_imports_as_written() {
        let json = r#"[{"position":{"x":0.5,"y":-2,"z":1.25},"color":1}]"#;
        let mut world = World::new(2);
        assert_eq!(import_json(&mut world, json).unwrap(), 1);

        let position = BlockPos::from_f64(0.5, -2.0, 1.25).unwrap();
        assert_eq!(world.get(position), Some(Block::new(position, Color::new(1))));
        assert_eq!(
            to_json(&world).unwrap(),
            r#"[{"position":{"x":0.5,"y":-2,"z":1.25},"color":1}]"#
        );
    }

    #[test]
    fn unusual_colors_are_wrapped_not_rejected() {
        let json = r#"[{"position":{"x":0,"y":0,"z":0},"color":-1},
                       {"position":{"x":2,"y":0,"z":0},"color":255.9},
                       {"position":{"x":4,"y":0,"z":0},"color":4294967296}]"#;
        let blocks = parse_document(json, 2).unwrap();
        let colors: Vec<u32> = blocks.iter().map(|b| b.color.packed()).collect();
        assert_eq!(colors, vec![u32::MAX, 255, 0]);
    }

    #[test]
    fn non_positive_spacing_is_an_error() {
        let json = r#"[{"position":{"x":0,"y":0,"z":0},"color":1}]"#;
        assert!(matches!(parse_document(json, 0), Err(Error::InvalidData(_))));
        assert!(matches!(parse_document(json, -2), Err(Error::InvalidData(_))));
    }

    #[test]
    fn lax_values_are_kept_verbatim() {
        let json = r#"[{"position":{"x":3,"y":1.0,"z":-7},"color":4294967295,"extra":true}]"#;
        let blocks = parse_document(json, 2).unwrap();
        assert_eq!(
            blocks,
            vec![Block::new(BlockPos::new(3, 1, -7), Color::new(u32::MAX))]
        );
    }

    #[test]
    fn duplicates_collapse_to_last() {
        let json = r#"[{"position":{"x":0,"y":0,"z":0},"color":1},
                       {"position":{"x":0,"y":0,"z":0},"color":2}]"#;
        let mut world = World::new(2);
        assert_eq!(import_json(&mut world, json).unwrap(), 2);
        assert_eq!(world.len(), 1);
        assert_eq!(world.get(BlockPos::ORIGIN).unwrap().color, Color::new(2));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("blockyard-exchange-{}.json", std::process::id()));
        let world = GroundConfig::default().generate();
        save_to_path(&world, &path).unwrap();

        let blocks = load_from_path(&path, 2).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(blocks.into_iter().collect::<HashSet<_>>(), block_set(&world));
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = std::env::temp_dir().join("blockyard-does-not-exist.json");
        assert!(matches!(load_from_path(path, 2), Err(Error::NotFound(_))));
    }
}
