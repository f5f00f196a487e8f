use bevy::prelude::UVec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Compass {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Compass {
    pub const ALL_DIRECTIONS: [Compass; 4] =
        [Compass::North, Compass::East, Compass::South, Compass::West];

    /// The point one square away in this direction, or [`None`] if that
    /// would leave the first quadrant. Upper bounds are the grid's concern.
    pub fn step_from(self, pt: UVec2) -> Option<UVec2> {
        let UVec2 { x, y } = pt;
        match self {
            Compass::North => Some(UVec2 {
                x,
                y: y.checked_sub(1)?,
            }),
            Compass::East => Some(UVec2 {
                x: x.checked_add(1)?,
                y,
            }),
            Compass::South => Some(UVec2 {
                x,
                y: y.checked_add(1)?,
            }),
            Compass::West => Some(UVec2 {
                x: x.checked_sub(1)?,
                y,
            }),
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Compass::North => '^',
            Compass::East => '>',
            Compass::South => 'v',
            Compass::West => '<',
        }
    }
}
