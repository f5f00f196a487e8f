use super::grid::{Tile, TileKind};
use super::item::{CarriedItem, Flavor, Food};
use super::station::{DeliveryState, MicrowaveState, SinkState, StationState};

/// A view of one station's state, detached from the frame so interactions
/// stay pure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Equipment {
    SinkTake(SinkState),
    SinkWash(SinkState),
    CakeBox(Flavor),
    Microwave(MicrowaveState),
    Delivery(DeliveryState),
    Table(Option<CarriedItem>),
}

impl Equipment {
    /// Reads the equipment behind `tile`. [`None`] for floor and walls, or
    /// when a keyed station has no state slot.
    pub fn read(stations: &StationState, tile: &Tile) -> Option<Self> {
        let equipment = match tile.kind() {
            TileKind::Floor | TileKind::Wall => return None,
            TileKind::SinkTake => Equipment::SinkTake(stations.sink),
            TileKind::SinkWash => Equipment::SinkWash(stations.sink),
            TileKind::CakeBox(flavor) => Equipment::CakeBox(flavor),
            TileKind::Microwave => {
                Equipment::Microwave(*stations.microwaves.get(&tile.station()?)?)
            },
            TileKind::DeliveryWindow => Equipment::Delivery(stations.delivery),
            TileKind::Table => Equipment::Table(*stations.tables.get(&tile.station()?)?),
        };
        Some(equipment)
    }

    /// Writes this equipment back to the slot `tile` addresses.
    pub fn write(self, stations: &mut StationState, tile: &Tile) {
        match self {
            Equipment::SinkTake(sink) | Equipment::SinkWash(sink) => stations.sink = sink,
            Equipment::CakeBox(_) => {},
            Equipment::Microwave(microwave) => {
                if let Some(slot) = tile
                    .station()
                    .and_then(|id| stations.microwaves.get_mut(&id))
                {
                    *slot = microwave;
                }
            },
            Equipment::Delivery(delivery) => stations.delivery = delivery,
            Equipment::Table(item) => {
                if let Some(slot) = tile.station().and_then(|id| stations.tables.get_mut(&id)) {
                    *slot = item;
                }
            },
        }
    }
}

/// Resolves one interaction between what a chef holds and a station. At most
/// one pick-up or drop happens; when no rule matches both come back unchanged.
pub fn interact(carried: CarriedItem, equipment: Equipment) -> (CarriedItem, Equipment) {
    use CarriedItem::*;
    match equipment {
        Equipment::SinkTake(mut sink) if sink.clean_count > 0 => {
            if let Some(merged) = carried.merge_clean(sink.clean_count) {
                sink.clean_count = 0;
                return (merged, Equipment::SinkTake(sink));
            }
        },
        Equipment::SinkWash(mut sink) => match carried {
            DirtyPlates { count } => {
                sink.dirty_count += count;
                return (Nothing, Equipment::SinkWash(sink));
            },
            Nothing if sink.dirty_count > 0 => {
                sink.dirty_count -= 1;
                sink.clean_count += 1;
                return (Nothing, Equipment::SinkWash(sink));
            },
            _ => {},
        },
        Equipment::CakeBox(flavor) if carried.is_single_empty_plate() => {
            return (CarriedItem::plate_with(Food::slice(flavor)), equipment);
        },
        Equipment::Microwave(mut microwave) => {
            if let (Plate { contents: Some(food) }, None) = (carried, microwave.contents) {
                if !food.heated {
                    microwave.contents = Some(carried);
                    microwave.heat_time = food.heat_time;
                    microwave.heat_progress = 0;
                    return (Nothing, Equipment::Microwave(microwave));
                }
            }
            if let (Nothing, Some(plate)) = (carried, microwave.contents) {
                if plate.has_heated_food() {
                    microwave.contents = None;
                    microwave.heat_progress = 0;
                    microwave.heat_time = 0;
                    return (plate, Equipment::Microwave(microwave));
                }
            }
        },
        Equipment::Delivery(mut delivery) => {
            if carried.has_heated_food() {
                delivery.dirty_count += 1;
                return (Nothing, Equipment::Delivery(delivery));
            }
            if carried.is_nothing() && delivery.dirty_count > 0 {
                let count = std::mem::take(&mut delivery.dirty_count);
                return (DirtyPlates { count }, Equipment::Delivery(delivery));
            }
        },
        Equipment::Table(None) => match carried {
            Nothing => {},
            CleanPlates { count } => {
                let table = Equipment::Table(Some(CarriedItem::EMPTY_PLATE));
                return (CarriedItem::clean_stack(count.saturating_sub(1)), table);
            },
            item => return (Nothing, Equipment::Table(Some(item))),
        },
        Equipment::Table(Some(item)) if carried.is_nothing() => {
            return (item, Equipment::Table(None));
        },
        Equipment::SinkTake(_) | Equipment::CakeBox(_) | Equipment::Table(Some(_)) => {},
    }
    (carried, equipment)
}
