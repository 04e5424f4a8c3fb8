//! Maps: sources, the tile model with its rewrites, and single-robot sampling.

mod sampler;
mod source;
mod tiles;

pub use sampler::{LaneSampler, PoseSampler};
pub use source::{BuiltinMaps, DirectoryMapSource, MapSource};
pub use tiles::{
    BORDER_TILE, Direction, MapObject, SURFACE_FROM, SURFACE_TO, Tile, TileKind, TileMap,
};
