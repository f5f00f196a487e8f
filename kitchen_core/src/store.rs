use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use getset::{CopyGetters, Getters};

use crate::controller::{GameState, Intent, IntentOutcome, Transition};
use crate::kitchen::Frame;
use crate::prelude::*;

/// Callback fired after every completed state change, animation steps included.
pub type Subscriber = Box<dyn Fn(&GameState) + Send + Sync>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SubscriptionId(usize);

/// The frame a renderer should draw for `state`.
pub fn display_snapshot(state: &GameState) -> &Frame {
    state.display_frame()
}

/// Holds the current [`GameState`] and feeds it intents one at a time.
/// Each accepted transition replaces the state wholesale, so a state handed
/// out earlier is never torn by a later one.
#[derive(Resource)]
pub struct KitchenStore {
    state: Arc<GameState>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: usize,
}

impl fmt::Debug for KitchenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KitchenStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for KitchenStore {
    fn default() -> Self {
        KitchenStore::new(GameState::default())
    }
}

impl KitchenStore {
    pub fn new(state: GameState) -> Self {
        KitchenStore {
            state: Arc::new(state),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A shared handle to the current state.
    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    pub fn display_snapshot(&self) -> &Frame {
        display_snapshot(&self.state)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&GameState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != self.subscribers.len()
    }

    pub fn dispatch(&mut self, intent: Intent) -> IntentOutcome {
        let transition = self.state.apply(intent);
        let outcome = transition.outcome();
        if let Transition::Applied(next) = transition {
            self.publish(next);
        }
        log::debug!("Intent {:?}: {:?}", intent, outcome);
        outcome
    }

    /// Runs one step of the current animation, as a timer callback would.
    /// Returns false when nothing is animating.
    pub fn step_animation(&mut self) -> bool {
        match self.state.animation_step() {
            Some(next) => {
                self.publish(next);
                true
            },
            None => false,
        }
    }

    fn publish(&mut self, next: GameState) {
        self.state = Arc::new(next);
        for (_, subscriber) in self.subscribers.iter() {
            subscriber(&self.state);
        }
    }
}

/// Sent once for every intent read from the [`Intent`] event queue.
#[derive(Clone, Copy, Debug, Event, CopyGetters)]
pub struct IntentResult {
    #[getset(get_copy = "pub")]
    intent: Intent,
    #[getset(get_copy = "pub")]
    outcome: IntentOutcome,
}

/// Notification that the store holds a new state.
#[derive(Clone, Debug, Event, Getters)]
pub struct KitchenChanged {
    #[getset(get = "pub")]
    state: Arc<GameState>,
}

/// Paces animations. One step per elapsed interval.
#[derive(Debug, Deref, DerefMut, Resource)]
pub struct AnimationClock(Timer);

impl AnimationClock {
    pub fn new(step_interval: Duration) -> Self {
        AnimationClock(Timer::new(step_interval, TimerMode::Repeating))
    }
}

pub fn sys_dispatch_intents(
    mut evr_intent: EventReader<Intent>,
    mut store: ResMut<KitchenStore>,
    mut clock: ResMut<AnimationClock>,
    mut evw_result: EventWriter<IntentResult>,
    mut evw_changed: EventWriter<KitchenChanged>,
) {
    for intent in evr_intent.read() {
        let was_animating = store.state().is_animating();
        let outcome = store.dispatch(*intent);
        if outcome == IntentOutcome::Applied {
            evw_changed.send(KitchenChanged {
                state: store.snapshot(),
            });
        }
        if !was_animating && store.state().is_animating() {
            clock.reset();
        }
        evw_result.send(IntentResult {
            intent: *intent,
            outcome,
        });
    }
}

pub fn sys_animation_clock(
    time: Res<Time>,
    mut clock: ResMut<AnimationClock>,
    mut store: ResMut<KitchenStore>,
    mut evw_changed: EventWriter<KitchenChanged>,
) {
    if !store.state().is_animating() {
        return;
    }
    clock.tick(time.delta());
    for _ in 0..clock.times_finished_this_tick() {
        if !store.step_animation() {
            break;
        }
        evw_changed.send(KitchenChanged {
            state: store.snapshot(),
        });
    }
}
