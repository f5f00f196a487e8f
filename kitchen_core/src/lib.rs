pub mod common;
pub mod configuration;
pub mod controller;
pub mod kitchen;
pub mod plan;
pub mod prelude;
pub mod store;

use std::time::Duration;

use self::configuration::{AnimationConfiguration, KitchenConfiguration};
use self::controller::{GameState, Intent};
use self::prelude::*;
use self::store::{AnimationClock, IntentResult, KitchenChanged, KitchenStore};

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum KitchenCoreSet {
    ProcessIntents,
    Animate,
}

/// Wires the store into an app: [`Intent`] events in, [`IntentResult`] and
/// [`KitchenChanged`] events out, animations paced by [`Time`].
#[derive(Debug)]
pub struct KitchenCorePlugin {
    animation_step: Duration,
    initial_state: Option<GameState>,
}

impl Default for KitchenCorePlugin {
    fn default() -> Self {
        KitchenCorePlugin {
            animation_step: AnimationConfiguration::default().step_interval(),
            initial_state: None,
        }
    }
}

impl KitchenCorePlugin {
    pub fn from_configuration(
        configuration: &KitchenConfiguration,
    ) -> Result<Self, configuration::ConfigurationError> {
        Ok(KitchenCorePlugin {
            animation_step: configuration.animation().step_interval(),
            initial_state: Some(GameState::new(configuration.baseline_frame()?)),
        })
    }

    pub fn with_animation_step(mut self, animation_step: Duration) -> Self {
        self.animation_step = animation_step;
        self
    }
}

impl Plugin for KitchenCorePlugin {
    fn build(&self, app: &mut App) {
        let store = KitchenStore::new(self.initial_state.clone().unwrap_or_default());
        app.add_event::<Intent>()
            .add_event::<IntentResult>()
            .add_event::<KitchenChanged>()
            .insert_resource(store)
            .insert_resource(AnimationClock::new(self.animation_step))
            .configure_sets(
                Update,
                (KitchenCoreSet::ProcessIntents, KitchenCoreSet::Animate).chain(),
            )
            .add_systems(
                Update,
                (
                    store::sys_dispatch_intents.in_set(KitchenCoreSet::ProcessIntents),
                    store::sys_animation_clock.in_set(KitchenCoreSet::Animate),
                ),
            );
    }
}
