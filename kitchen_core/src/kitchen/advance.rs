use std::sync::Arc;

use super::chef::QueuedAction;
use super::equipment::{interact, Equipment};
use super::frame::Frame;
use super::grid::TileKind;

/// Produces the frame one turn after `frame`, applying at most one action per
/// chef. `actions` is indexed by chef id; missing entries mean no action.
///
/// Order within the turn: the turn counter, then passive microwave progress,
/// then each chef's action from the lowest id up. Illegal actions do nothing.
pub fn advance(frame: &Frame, actions: &[Option<QueuedAction>]) -> Frame {
    let mut next = frame.clone();
    next.current_turn += 1;
    next.stations.advance_microwaves();
    for index in 0..next.chefs.len() {
        if let Some(action) = actions.get(index).copied().flatten() {
            apply_action(&mut next, index, action);
        }
    }
    log::trace!("Advanced to turn {}", next.current_turn);
    next
}

fn apply_action(frame: &mut Frame, index: usize, action: QueuedAction) {
    let QueuedAction::Move { dir } = action;
    let grid = Arc::clone(&frame.grid);
    let chef = &mut frame.chefs[index];
    let Some(target) = dir.step_from(chef.position) else {
        return;
    };
    let Some(tile) = grid.tile(target) else {
        return;
    };
    match tile.kind() {
        TileKind::Floor => {
            chef.position = target;
            chef.facing = dir;
        },
        TileKind::Wall => {},
        _ => {
            chef.facing = dir;
            match Equipment::read(&frame.stations, tile) {
                Some(equipment) => {
                    let (carried, equipment) = interact(chef.carried, equipment);
                    chef.carried = carried;
                    equipment.write(&mut frame.stations, tile);
                },
                None => {
                    log::warn!(
                        "No station state for {:?} at {:?}, treating as no-op",
                        tile.station(),
                        target
                    );
                },
            }
        },
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;
    use crate::kitchen::grid::Grid;
    use crate::kitchen::item::{CarriedItem, Flavor, Food};
    use crate::prelude::*;

    fn moves(dirs: &[Option<Compass>]) -> Vec<Option<QueuedAction>> {
        dirs.iter()
            .map(|dir| dir.map(|dir| QueuedAction::Move { dir }))
            .collect()
    }

    fn with_chef(pt: (u32, u32), carried: CarriedItem) -> Frame {
        let mut frame = Frame::default();
        frame.chefs[0].position = UVec2::new(pt.0, pt.1);
        frame.chefs[0].carried = carried;
        frame
    }

    fn microwave_id(frame: &Frame) -> crate::kitchen::StationId {
        frame
            .grid
            .tile(UVec2::new(3, 0))
            .and_then(|tile| tile.station())
            .expect("microwave station should exist")
    }

    #[test]
    fn advance_is_pure_and_deterministic() {
        let frame = Frame::default();
        let actions = moves(&[Some(Compass::East), Some(Compass::South)]);
        let first = advance(&frame, &actions);
        let second = advance(&frame, &actions);
        assert_eq!(first, second);
        assert_eq!(Frame::default(), frame);
        assert_eq!(1, first.current_turn);
    }

    #[test]
    fn move_onto_floor() {
        let next = advance(&Frame::default(), &moves(&[Some(Compass::West)]));
        assert_eq!(UVec2::new(1, 1), next.chefs[0].position);
        assert_eq!(Compass::West, next.chefs[0].facing);
        assert_eq!(UVec2::new(4, 1), next.chefs[1].position);
    }

    #[test]
    fn move_out_of_bounds_is_discarded() {
        let frame = with_chef((1, 0), CarriedItem::Nothing);
        let next = advance(&frame, &moves(&[Some(Compass::North)]));
        assert_eq!(frame.chefs, next.chefs);
        assert_eq!(frame.current_turn + 1, next.current_turn);
    }

    #[test]
    fn move_into_wall_is_discarded() {
        let grid = Arc::new(Grid::parse("@#").unwrap());
        let frame = Frame::baseline(grid, 0, Vec::new());
        let next = advance(&frame, &moves(&[Some(Compass::East)]));
        assert_eq!(frame.chefs, next.chefs);
    }

    #[test]
    fn chef_takes_clean_plates_from_sink() {
        let next = advance(&Frame::default(), &moves(&[Some(Compass::East)]));
        assert_eq!(UVec2::new(2, 1), next.chefs[0].position);
        assert_eq!(Compass::East, next.chefs[0].facing);
        assert_eq!(CarriedItem::CleanPlates { count: 3 }, next.chefs[0].carried);
        assert_eq!(0, next.stations.sink.clean_count);
    }

    #[test]
    fn lower_chef_id_wins_contested_station() {
        let next = advance(
            &Frame::default(),
            &moves(&[Some(Compass::East), Some(Compass::West)]),
        );
        assert_eq!(CarriedItem::CleanPlates { count: 3 }, next.chefs[0].carried);
        assert_eq!(CarriedItem::Nothing, next.chefs[1].carried);
        assert_eq!(Compass::West, next.chefs[1].facing);
    }

    #[test]
    fn failed_interaction_still_turns_chef() {
        let frame = with_chef((1, 0), CarriedItem::Nothing);
        let next = advance(&frame, &moves(&[Some(Compass::West)]));
        assert_eq!(CarriedItem::Nothing, next.chefs[0].carried);
        assert_eq!(UVec2::new(1, 0), next.chefs[0].position);
        assert_eq!(Compass::West, next.chefs[0].facing);
    }

    #[test]
    fn chef_fills_plate_at_vanilla_box() {
        let frame = with_chef((1, 0), CarriedItem::EMPTY_PLATE);
        let next = advance(&frame, &moves(&[Some(Compass::West)]));
        assert_eq!(
            CarriedItem::plate_with(Food {
                flavor: Flavor::Vanilla,
                heated: false,
                heat_time: 3
            }),
            next.chefs[0].carried
        );
    }

    #[test]
    fn microwave_heats_over_turns_without_overflow() {
        let frame = with_chef((2, 0), CarriedItem::plate_with(Food::slice(Flavor::Vanilla)));
        let id = microwave_id(&frame);
        let loaded = advance(&frame, &moves(&[Some(Compass::East)]));
        assert_eq!(CarriedItem::Nothing, loaded.chefs[0].carried);
        assert_eq!(0, loaded.stations.microwaves[&id].heat_progress);
        assert_eq!(3, loaded.stations.microwaves[&id].heat_time);

        let mut frame = loaded;
        for turn in 1..=3 {
            frame = advance(&frame, &[]);
            let microwave = frame.stations.microwaves[&id];
            assert_eq!(turn, microwave.heat_progress);
            assert_eq!(turn == 3, microwave.contents.unwrap().has_heated_food());
        }
        let frame = advance(&frame, &[]);
        let microwave = frame.stations.microwaves[&id];
        assert_eq!(3, microwave.heat_progress);
        assert!(microwave.contents.unwrap().has_heated_food());
    }

    #[test]
    fn chef_delivers_heated_plate() {
        let mut hot = Food::slice(Flavor::Chocolate);
        hot.heated = true;
        let frame = with_chef((5, 3), CarriedItem::plate_with(hot));
        let next = advance(&frame, &moves(&[Some(Compass::East)]));
        assert_eq!(CarriedItem::Nothing, next.chefs[0].carried);
        assert_eq!(1, next.stations.delivery.dirty_count);
    }

    #[test]
    fn table_slot_is_per_station() {
        let frame = with_chef((1, 1), CarriedItem::CleanPlates { count: 2 });
        let next = advance(&frame, &moves(&[Some(Compass::West)]));
        let table = frame
            .grid
            .tile(UVec2::new(0, 1))
            .and_then(|tile| tile.station())
            .expect("table station should exist");
        assert_eq!(Some(CarriedItem::EMPTY_PLATE), next.stations.tables[&table]);
        assert_eq!(
            1,
            next.stations.tables.values().filter(|slot| slot.is_some()).count()
        );
        assert_eq!(CarriedItem::EMPTY_PLATE, next.chefs[0].carried);
    }

    #[test]
    fn missing_station_slot_only_turns_chef() {
        let mut frame = with_chef((1, 1), CarriedItem::EMPTY_PLATE);
        let table = frame
            .grid
            .tile(UVec2::new(0, 1))
            .and_then(|tile| tile.station())
            .expect("table station should exist");
        frame.stations.tables.remove(&table);

        let next = advance(&frame, &moves(&[Some(Compass::West)]));
        assert_eq!(UVec2::new(1, 1), next.chefs[0].position);
        assert_eq!(Compass::West, next.chefs[0].facing);
        assert_eq!(CarriedItem::EMPTY_PLATE, next.chefs[0].carried);
        assert_eq!(frame.stations, next.stations);
        assert_eq!(frame.current_turn + 1, next.current_turn);
    }
}
