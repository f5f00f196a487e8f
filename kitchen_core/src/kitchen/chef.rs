use super::item::CarriedItem;
use crate::prelude::*;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChefId(pub usize);

/// The only action the tick transition dispatches. Walking into equipment
/// interacts with it instead of moving.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QueuedAction {
    Move { dir: Compass },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Chef {
    pub id: ChefId,
    pub position: UVec2,
    pub facing: Compass,
    pub carried: CarriedItem,
}

impl Chef {
    pub fn spawn(id: ChefId, position: UVec2) -> Self {
        Chef {
            id,
            position,
            facing: Compass::North,
            carried: CarriedItem::Nothing,
        }
    }
}
