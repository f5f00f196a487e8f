use kitchen_core::controller::{AnimatingKind, ControlState, GameState};
use kitchen_core::kitchen::Frame;
use kitchen_core::prelude::*;
use kitchen_core::store::display_snapshot;

/// Draws the displayed frame of `state` as plain text lines: a header, the
/// map with chefs overlaid by id, then one line per chef and station.
pub fn render_lines(state: &GameState) -> Vec<String> {
    let frame = display_snapshot(state);
    let mut lines = vec![header(state, frame)];
    lines.extend(map_lines(frame));
    lines.push(String::new());

    for chef in frame.chefs.iter() {
        let marker = if chef.id == state.focused() { '*' } else { ' ' };
        lines.push(format!(
            "{marker}chef {} {} {}",
            chef.id.0,
            chef.facing.glyph(),
            chef.carried
        ));
    }

    let sink = frame.stations.sink;
    lines.push(format!(
        "sink: {} clean {} dirty | window: {} dirty",
        sink.clean_count, sink.dirty_count, frame.stations.delivery.dirty_count
    ));
    for (id, microwave) in frame.stations.microwaves.iter() {
        match microwave.contents {
            Some(contents) => lines.push(format!(
                "{id} microwave: {contents} {}/{}",
                microwave.heat_progress, microwave.heat_time
            )),
            None => lines.push(format!("{id} microwave: empty")),
        }
    }
    for (id, item) in frame.stations.tables.iter() {
        if let Some(item) = item {
            lines.push(format!("{id} table: {item}"));
        }
    }
    for order in frame.orders.iter() {
        if order.reveal_turn <= frame.current_turn {
            lines.push(format!("order {}: {}", order.id, order.requirements));
        }
    }
    lines
}

fn header(state: &GameState, frame: &Frame) -> String {
    let mode = match state.control_state() {
        ControlState::Planning => "planning",
        ControlState::Animating(AnimatingKind::Committing) => "committing",
        ControlState::Animating(AnimatingKind::SwitchingFocus) => "switching",
    };
    format!(
        "turn {} (committed {}) {}",
        frame.current_turn,
        state.committed_tick(),
        mode
    )
}

fn map_lines(frame: &Frame) -> Vec<String> {
    let grid = &frame.grid;
    (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| {
                    let pt = UVec2::new(x, y);
                    let chef = frame.chefs.iter().find(|chef| chef.position == pt);
                    match (chef, grid.tile(pt)) {
                        (Some(chef), _) => {
                            char::from_digit(chef.id.0 as u32 % 10, 10).unwrap_or('@')
                        },
                        (None, Some(tile)) => tile.kind().glyph(),
                        (None, None) => ' ',
                    }
                })
                .collect()
        })
        .collect()
}
