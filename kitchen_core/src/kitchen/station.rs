use std::collections::BTreeMap;

use super::grid::{Grid, StationId, TileKind};
use super::item::CarriedItem;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SinkState {
    pub dirty_count: u32,
    pub clean_count: u32,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MicrowaveState {
    pub contents: Option<CarriedItem>,
    pub heat_progress: u32,
    /// Taken from the food inside when it goes in; not intrinsic to the microwave.
    pub heat_time: u32,
}

impl MicrowaveState {
    /// Passive progress for one turn. Stops once the food is heated.
    pub fn advance(&mut self) {
        let Some(CarriedItem::Plate {
            contents: Some(food),
        }) = self.contents.as_mut()
        else {
            return;
        };
        if food.heated {
            return;
        }
        self.heat_progress += 1;
        if self.heat_progress >= self.heat_time {
            food.heated = true;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DeliveryState {
    pub dirty_count: u32,
}

/// All mutable equipment state of one frame. Sink and delivery window are
/// global; microwaves and tables are addressed by [`StationId`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StationState {
    pub sink: SinkState,
    pub microwaves: BTreeMap<StationId, MicrowaveState>,
    pub tables: BTreeMap<StationId, Option<CarriedItem>>,
    pub delivery: DeliveryState,
}

impl StationState {
    /// Empty equipment for every station on the grid, with `clean_count`
    /// plates waiting at the sink.
    pub fn for_grid(grid: &Grid, clean_count: u32) -> Self {
        StationState {
            sink: SinkState {
                dirty_count: 0,
                clean_count,
            },
            microwaves: grid
                .stations_of_kind(TileKind::Microwave)
                .map(|id| (id, MicrowaveState::default()))
                .collect(),
            tables: grid
                .stations_of_kind(TileKind::Table)
                .map(|id| (id, None))
                .collect(),
            delivery: DeliveryState::default(),
        }
    }

    pub fn advance_microwaves(&mut self) {
        for microwave in self.microwaves.values_mut() {
            microwave.advance();
        }
    }
}
