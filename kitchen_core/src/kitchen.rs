//! World model and the one-turn transition function.

mod advance;
mod chef;
mod equipment;
mod frame;
mod grid;
mod item;
mod station;

pub use advance::advance;
pub use chef::{Chef, ChefId, QueuedAction};
pub use equipment::{interact, Equipment};
pub use frame::{Frame, Order};
pub use grid::{Grid, MapParseError, StationId, Tile, TileKind, DEFAULT_LAYOUT};
pub use item::{CarriedItem, Flavor, Food};
pub use station::{DeliveryState, MicrowaveState, SinkState, StationState};
