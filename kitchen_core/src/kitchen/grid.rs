use std::fmt;

use thiserror::Error;

use super::item::Flavor;
use crate::prelude::*;

/// The built-in floor plan. Two chefs share a sink in the middle of the room.
pub const DEFAULT_LAYOUT: &str = "\
V..M..T
T.@S@.T
T.TW..T
C..M..D";

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "st{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TileKind {
    Floor,
    Wall,
    SinkTake,
    SinkWash,
    CakeBox(Flavor),
    Microwave,
    DeliveryWindow,
    Table,
}

impl TileKind {
    fn from_glyph(glyph: char) -> Option<(Self, bool)> {
        let kind = match glyph {
            '.' | ' ' => TileKind::Floor,
            '@' => return Some((TileKind::Floor, true)),
            '#' => TileKind::Wall,
            'S' => TileKind::SinkTake,
            'W' => TileKind::SinkWash,
            'V' => TileKind::CakeBox(Flavor::Vanilla),
            'C' => TileKind::CakeBox(Flavor::Chocolate),
            'M' => TileKind::Microwave,
            'D' => TileKind::DeliveryWindow,
            'T' => TileKind::Table,
            _ => return None,
        };
        Some((kind, false))
    }

    pub fn glyph(&self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::SinkTake => 'S',
            TileKind::SinkWash => 'W',
            TileKind::CakeBox(Flavor::Vanilla) => 'V',
            TileKind::CakeBox(Flavor::Chocolate) => 'C',
            TileKind::Microwave => 'M',
            TileKind::DeliveryWindow => 'D',
            TileKind::Table => 'T',
        }
    }

    pub fn is_equipment(&self) -> bool {
        !matches!(self, TileKind::Floor | TileKind::Wall)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, getset::CopyGetters)]
pub struct Tile {
    #[getset(get_copy = "pub")]
    kind: TileKind,
    #[getset(get_copy = "pub")]
    station: Option<StationId>,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MapParseError {
    #[error("map layout has no rows")]
    Empty,
    #[error("map row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown map glyph [{glyph}] at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
    #[error("map layout has no chef spawn points")]
    NoSpawns,
}

/// Static kitchen layout. Immutable once parsed; frames share it by `Arc`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>, // row-major
    spawns: Vec<UVec2>,
}

impl Grid {
    /// Parses an ASCII floor plan. Stations are numbered in row-major
    /// order, and so are chef spawn points.
    pub fn parse(layout: &str) -> Result<Self, MapParseError> {
        let rows: Vec<&str> = layout.lines().collect();
        let width = rows
            .first()
            .map(|row| row.chars().count())
            .filter(|width| *width > 0)
            .ok_or(MapParseError::Empty)?;

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut spawns = Vec::new();
        let mut next_station = 0;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let (kind, spawn) = TileKind::from_glyph(glyph)
                    .ok_or(MapParseError::UnknownGlyph { glyph, x, y })?;
                if spawn {
                    spawns.push(UVec2::new(x as u32, y as u32));
                }
                let station = kind.is_equipment().then(|| {
                    next_station += 1;
                    StationId(next_station - 1)
                });
                tiles.push(Tile { kind, station });
            }
        }
        if spawns.is_empty() {
            return Err(MapParseError::NoSpawns);
        }
        Ok(Grid {
            width: width as u32,
            height: rows.len() as u32,
            tiles,
            spawns,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains_point(&self, UVec2 { x, y }: UVec2) -> bool {
        x < self.width && y < self.height
    }

    pub fn tile(&self, pt: UVec2) -> Option<&Tile> {
        if !self.contains_point(pt) {
            return None;
        }
        self.tiles.get((pt.y * self.width + pt.x) as usize)
    }

    /// Chef spawn points, in chef id order.
    pub fn spawns(&self) -> &[UVec2] {
        &self.spawns
    }

    /// Every equipment tile with its location.
    pub fn stations(&self) -> impl Iterator<Item = (UVec2, &Tile)> + '_ {
        self.tiles.iter().enumerate().filter_map(|(i, tile)| {
            tile.station?;
            let i = i as u32;
            Some((UVec2::new(i % self.width, i / self.width), tile))
        })
    }

    pub fn stations_of_kind(&self, kind: TileKind) -> impl Iterator<Item = StationId> + '_ {
        self.stations()
            .filter(move |(_, tile)| tile.kind == kind)
            .filter_map(|(_, tile)| tile.station)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::parse(DEFAULT_LAYOUT).expect("built-in layout should parse")
    }
}
