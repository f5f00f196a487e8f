use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::chef::{Chef, ChefId};
use super::grid::Grid;
use super::station::StationState;

/// An order waiting to be revealed. Only its reveal turn matters here: the
/// turn it is revealed on is an intervention point for committed replays.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Order {
    pub id: String,
    pub reveal_turn: u32,
    #[serde(default)]
    pub requirements: String,
}

/// One complete world state. Chefs carry no queued actions here; those live
/// in the plan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    pub grid: Arc<Grid>,
    pub stations: StationState,
    pub chefs: Vec<Chef>,
    pub current_turn: u32,
    pub last_committed_turn: u32,
    pub orders: Arc<[Order]>,
}

impl Frame {
    /// A fresh kitchen: default equipment, every chef on its spawn tile.
    pub fn baseline(grid: Arc<Grid>, sink_clean_plates: u32, orders: Vec<Order>) -> Self {
        let stations = StationState::for_grid(&grid, sink_clean_plates);
        let chefs = grid
            .spawns()
            .iter()
            .enumerate()
            .map(|(id, pt)| Chef::spawn(ChefId(id), *pt))
            .collect();
        Frame {
            grid,
            stations,
            chefs,
            current_turn: 0,
            last_committed_turn: 0,
            orders: orders.into(),
        }
    }

    pub fn chef(&self, id: ChefId) -> Option<&Chef> {
        self.chefs.get(id.0)
    }

    /// True if an order is revealed on this frame's turn.
    pub fn reveals_order(&self) -> bool {
        self.orders
            .iter()
            .any(|order| order.reveal_turn == self.current_turn)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::baseline(Arc::new(Grid::default()), 3, Vec::new())
    }
}
