pub use bevy::prelude::{
    default, App, Deref, DerefMut, Event, EventReader, EventWriter, IntoSystemConfigs,
    IntoSystemSetConfigs, Plugin, PreUpdate, Res, ResMut, Resource, Startup, SystemSet, UVec2,
    Update,
};
pub use bevy::time::{Time, Timer, TimerMode};

pub use crate::common::*;
