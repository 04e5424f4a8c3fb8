//! Tile map model and the rewrites applied before placement.
//!
//! Maps are YAML documents with a row-major `tiles` grid. Row 0 is the
//! northern edge; world coordinates put the origin at the south-west corner:
//!
//! ```text
//!   row 0   [ curve_left/W, straight/W, curve_left/N ]   ← y = (rows - 0.5) · tile_size
//!   row 1   [ straight/S,   asphalt,    straight/N   ]
//!   row 2   [ curve_left/S, straight/E, curve_left/E ]   ← y = 0.5 · tile_size
//!             ↑ x = 0.5 · tile_size
//! ```
//!
//! Object positions are stored in tile units using the same axes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, PI};

/// Surface token replaced by [`TileMap::relabel_surface`]
pub const SURFACE_FROM: &str = "asphalt";
/// Replacement surface token
pub const SURFACE_TO: &str = "floor";
/// Tile used for the ring added by [`TileMap::pad_border`]
pub const BORDER_TILE: &str = "floor";

fn default_tile_size() -> f64 {
    0.585
}

/// A parsed tile map.
///
/// Keys other than `tiles`, `tile_size` and `objects` are carried through
/// untouched so the rewritten map stays a faithful copy of the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    /// Tile tokens, row-major, northern row first
    pub tiles: Vec<Vec<String>>,

    /// Tile edge length in meters
    #[serde(default = "default_tile_size")]
    pub tile_size: f64,

    /// Static objects placed on the map
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<MapObject>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// An object standing on the map (signs, decorations, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    /// Object type, e.g. `duckie` or `sign_stop`
    pub kind: String,

    /// Position [x, y] in tile units
    pub pos: [f64; 2],

    /// Rotation in degrees, CCW
    #[serde(default)]
    pub rotate: f64,

    /// Object height in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Compass direction encoded in a tile token suffix (`straight/N`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions, counter-clockwise from east
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    fn parse(s: &str) -> Option<Self> {
        match s {
            "N" => Some(Direction::North),
            "E" => Some(Direction::East),
            "S" => Some(Direction::South),
            "W" => Some(Direction::West),
            _ => None,
        }
    }

    /// World heading (radians) of travel in this direction
    pub fn heading(self) -> f64 {
        match self {
            Direction::East => 0.0,
            Direction::North => FRAC_PI_2,
            Direction::West => PI,
            Direction::South => -FRAC_PI_2,
        }
    }

    /// Opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Road topology of a tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileKind {
    Straight,
    CurveLeft,
    CurveRight,
    ThreeWay,
    FourWay,
    /// Non-drivable surface (floor, grass, asphalt, ...)
    Surface(String),
}

/// A tile token split into kind and orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub orientation: Option<Direction>,
}

impl Tile {
    /// Parse a token such as `straight/W`, `3way_left/N`, `4way` or `grass`
    pub fn parse(token: &str) -> Self {
        let (name, orientation) = match token.split_once('/') {
            Some((name, dir)) => (name, Direction::parse(dir)),
            None => (token, None),
        };
        let kind = match name {
            "straight" => TileKind::Straight,
            "curve_left" => TileKind::CurveLeft,
            "curve_right" => TileKind::CurveRight,
            "3way_left" | "3way_right" | "3way" => TileKind::ThreeWay,
            "4way" => TileKind::FourWay,
            other => TileKind::Surface(other.to_string()),
        };
        Self { kind, orientation }
    }

    /// Whether robots can drive on this tile
    pub fn is_drivable(&self) -> bool {
        !matches!(self.kind, TileKind::Surface(_))
    }

    /// Whether this is a straight road tile
    pub fn is_straight(&self) -> bool {
        self.kind == TileKind::Straight
    }
}

impl TileMap {
    /// Parse a tile map from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let map: TileMap = serde_yaml::from_str(text)?;
        map.check_grid()?;
        Ok(map)
    }

    /// Serialize back to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn check_grid(&self) -> Result<()> {
        let width = self.tiles.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(Error::MapFormat("empty tile grid".into()));
        }
        if let Some((i, row)) = self.tiles.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::MapFormat(format!(
                "row {} has {} tiles, expected {}",
                i,
                row.len(),
                width
            )));
        }
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(Error::MapFormat(format!(
                "tile_size must be finite and positive, got {}",
                self.tile_size
            )));
        }
        Ok(())
    }

    /// Number of tile rows
    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    /// Number of tile columns
    pub fn cols(&self) -> usize {
        self.tiles.first().map(Vec::len).unwrap_or(0)
    }

    /// Map extent (width, height) in meters
    pub fn extent(&self) -> (f64, f64) {
        (
            self.cols() as f64 * self.tile_size,
            self.rows() as f64 * self.tile_size,
        )
    }

    /// World coordinates of the centre of tile (row, col)
    pub fn tile_center(&self, row: usize, col: usize) -> [f64; 2] {
        let flipped = self.rows() - 1 - row;
        [
            (col as f64 + 0.5) * self.tile_size,
            (flipped as f64 + 0.5) * self.tile_size,
        ]
    }

    /// Iterate over (row, col, parsed tile)
    pub fn iter_tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, token)| (r, c, Tile::parse(token)))
        })
    }

    /// Replace the `asphalt` surface token with `floor` in every tile.
    ///
    /// Applying it twice gives the same map as applying it once.
    pub fn relabel_surface(&self) -> TileMap {
        let mut out = self.clone();
        for row in &mut out.tiles {
            for token in row.iter_mut() {
                if token.contains(SURFACE_FROM) {
                    *token = token.replace(SURFACE_FROM, SURFACE_TO);
                }
            }
        }
        out
    }

    /// Wrap the grid in one ring of floor tiles.
    ///
    /// Both dimensions grow by 2. Row order is kept, so tile orientations stay
    /// valid. Objects move by one tile so they sit on the same road tiles.
    pub fn pad_border(&self) -> TileMap {
        let mut out = self.clone();
        let width = self.cols() + 2;
        let border_row = vec![BORDER_TILE.to_string(); width];

        let mut tiles = Vec::with_capacity(self.rows() + 2);
        tiles.push(border_row.clone());
        for row in &self.tiles {
            let mut padded = Vec::with_capacity(width);
            padded.push(BORDER_TILE.to_string());
            padded.extend(row.iter().cloned());
            padded.push(BORDER_TILE.to_string());
            tiles.push(padded);
        }
        tiles.push(border_row);
        out.tiles = tiles;

        for obj in &mut out.objects {
            obj.pos[0] += 1.0;
            obj.pos[1] += 1.0;
        }
        out
    }
}
