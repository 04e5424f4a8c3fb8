//! Single-robot start pose sampling.
//!
//! Produces one feasible lane pose on a tile map. Separation between robots
//! is not this module's concern; see [`crate::placement`].

use super::tiles::{Direction, Tile, TileKind, TileMap};
use crate::core::Pose2D;
use crate::error::{Error, Result};
use crate::rng::ScenarioRng;

/// Lane centre offset from the tile axis, as a fraction of tile size
const LANE_OFFSET_FRACTION: f64 = 0.25;

/// Draws one candidate start pose for a single robot
pub trait PoseSampler {
    fn sample_candidate(
        &self,
        map: &TileMap,
        only_straight: bool,
        rng: &mut ScenarioRng,
    ) -> Result<Pose2D>;
}

/// Places robots in the right-hand lane of road tiles.
///
/// - Straight tiles: travel along the tile axis in either direction, at a
///   uniform longitudinal offset within the tile.
/// - Curves and intersections (only when `only_straight` is false): one of
///   the four compass headings, at the tile centre line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneSampler;

impl LaneSampler {
    fn candidate_tiles(map: &TileMap, only_straight: bool) -> Vec<(usize, usize, Tile)> {
        map.iter_tiles()
            .filter(|(_, _, tile)| {
                if only_straight {
                    tile.is_straight() && tile.orientation.is_some()
                } else {
                    tile.is_drivable()
                }
            })
            .collect()
    }
}

impl PoseSampler for LaneSampler {
    fn sample_candidate(
        &self,
        map: &TileMap,
        only_straight: bool,
        rng: &mut ScenarioRng,
    ) -> Result<Pose2D> {
        let candidates = Self::candidate_tiles(map, only_straight);
        if candidates.is_empty() {
            return Err(Error::NoCandidateTiles { only_straight });
        }

        let (row, col, tile) = &candidates[rng.index(candidates.len())];
        let half = map.tile_size / 2.0;

        let (direction, along) = match (&tile.kind, tile.orientation) {
            (TileKind::Straight, Some(axis)) => {
                let dir = if rng.coin() { axis } else { axis.opposite() };
                (dir, rng.uniform(-half, half))
            }
            _ => (Direction::ALL[rng.index(Direction::ALL.len())], 0.0),
        };

        // Right-hand lane is on the local -Y side of the heading
        let lane = Pose2D::new(along, -LANE_OFFSET_FRACTION * map.tile_size, 0.0);
        let tile_frame =
            Pose2D::from_translation_angle(map.tile_center(*row, *col), direction.heading());
        Ok(tile_frame * lane)
    }
}
