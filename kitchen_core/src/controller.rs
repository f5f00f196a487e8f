use getset::{CopyGetters, Getters};

use crate::kitchen::{ChefId, Frame, QueuedAction};
use crate::plan::PlanStack;
use crate::prelude::*;

/// One user intent. Directions come mapped from keys by the caller.
#[derive(Clone, Copy, Debug, Eq, Event, Hash, PartialEq)]
pub enum Intent {
    QueueMove(Compass),
    Retract,
    SwitchFocus,
    Commit,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AnimatingKind {
    Committing,
    SwitchingFocus,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlState {
    Planning,
    Animating(AnimatingKind),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Animation {
    /// Replaying committed frames; the display override is the last frame shown.
    Committing,
    SwitchingFocus { target: u32 },
}

impl Animation {
    fn kind(&self) -> AnimatingKind {
        match self {
            Animation::Committing => AnimatingKind::Committing,
            Animation::SwitchingFocus { .. } => AnimatingKind::SwitchingFocus,
        }
    }
}

/// What became of an intent. Callers cannot otherwise tell a rejected intent
/// from a legal one that changed nothing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IntentOutcome {
    Applied,
    NoEffect,
    /// Arrived while an animation was running.
    Dropped,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    Applied(GameState),
    NoEffect,
    Dropped,
}

impl Transition {
    pub fn outcome(&self) -> IntentOutcome {
        match self {
            Transition::Applied(_) => IntentOutcome::Applied,
            Transition::NoEffect => IntentOutcome::NoEffect,
            Transition::Dropped => IntentOutcome::Dropped,
        }
    }
}

/// The whole planning session. Every transition builds a new value; frames
/// are shared with the previous state through the plan stack.
///
/// While planning, the displayed tick is the focused chef's own plan end,
/// capped at the top of the stack. The next queued move lands there.
#[derive(Clone, Debug, PartialEq, CopyGetters, Getters)]
pub struct GameState {
    #[getset(get = "pub")]
    plan: PlanStack,
    #[getset(get_copy = "pub")]
    focused: ChefId,
    #[getset(get_copy = "pub")]
    displayed_tick: u32,
    #[getset(get_copy = "pub")]
    display_override: Option<u32>,
    animation: Option<Animation>,
}

impl GameState {
    pub fn new(baseline: Frame) -> Self {
        let displayed_tick = baseline.current_turn;
        GameState {
            plan: PlanStack::new(baseline),
            focused: ChefId(0),
            displayed_tick,
            display_override: None,
            animation: None,
        }
    }

    pub fn committed_tick(&self) -> u32 {
        self.plan.base_tick()
    }

    pub fn control_state(&self) -> ControlState {
        match self.animation {
            Some(animation) => ControlState::Animating(animation.kind()),
            None => ControlState::Planning,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// The frame a renderer should draw: the animation's frame if one is
    /// running, else the displayed tick.
    pub fn display_frame(&self) -> &Frame {
        let tick = self.display_override.unwrap_or(self.displayed_tick);
        self.plan.frame_at_clamped(tick)
    }

    pub fn apply(&self, intent: Intent) -> Transition {
        if self.is_animating() {
            log::debug!("Dropping {:?} during {:?}", intent, self.control_state());
            return Transition::Dropped;
        }
        match intent {
            Intent::QueueMove(dir) => self.queue_move(dir),
            Intent::Retract => self.retract(),
            Intent::SwitchFocus => self.switch_focus(),
            Intent::Commit => self.commit(),
        }
    }

    fn queue_move(&self, dir: Compass) -> Transition {
        let mut next = self.clone();
        let action = QueuedAction::Move { dir };
        if !next.plan.push_action(self.focused, self.displayed_tick, action) {
            return Transition::NoEffect;
        }
        next.displayed_tick = self.displayed_tick + 1;
        log::debug!(
            "Queued {:?} for {:?}, now at tick {}",
            dir,
            self.focused,
            next.displayed_tick
        );
        Transition::Applied(next)
    }

    fn retract(&self) -> Transition {
        if self.displayed_tick <= self.committed_tick() {
            return Transition::NoEffect;
        }
        let mut next = self.clone();
        if next.plan.pop_action(self.focused).is_none() {
            return Transition::NoEffect;
        }
        next.displayed_tick = self.displayed_tick - 1;
        log::debug!(
            "Retracted for {:?}, back to tick {}",
            self.focused,
            next.displayed_tick
        );
        Transition::Applied(next)
    }

    fn switch_focus(&self) -> Transition {
        let chef_count = self.plan.chef_count().max(1);
        let focused = ChefId((self.focused.0 + 1) % chef_count);
        let target = self.plan.target_tick(focused);
        let mut next = self.clone();
        next.focused = focused;
        if target != self.displayed_tick {
            next.animation = Some(Animation::SwitchingFocus { target });
            next.display_override = Some(self.displayed_tick);
        }
        log::debug!(
            "Focus on {:?}, tick {} -> {}",
            focused,
            self.displayed_tick,
            target
        );
        Transition::Applied(next)
    }

    fn commit(&self) -> Transition {
        if self.plan.len() <= 1 {
            let next = self.collapse_at(self.committed_tick());
            if next == *self {
                return Transition::NoEffect;
            }
            return Transition::Applied(next);
        }
        let mut next = self.clone();
        next.animation = Some(Animation::Committing);
        next.display_override = Some(self.committed_tick());
        log::debug!(
            "Committing from tick {} through at most {}",
            self.committed_tick(),
            self.plan.top_tick()
        );
        Transition::Applied(next)
    }

    /// One timed step of the running animation. [`None`] when nothing is
    /// animating.
    pub fn animation_step(&self) -> Option<GameState> {
        match self.animation? {
            Animation::Committing => {
                let shown = self.display_override.unwrap_or(self.committed_tick());
                let tick = (shown + 1).min(self.plan.top_tick());
                let frame = self.plan.frame_at_clamped(tick);
                if frame.reveals_order() || tick >= self.plan.top_tick() {
                    log::debug!("Intervention at tick {}, committing", tick);
                    return Some(self.collapse_at(tick));
                }
                let mut next = self.clone();
                next.display_override = Some(tick);
                Some(next)
            },
            Animation::SwitchingFocus { target } => {
                let shown = self.display_override.unwrap_or(self.displayed_tick);
                let tick = if shown < target {
                    shown + 1
                } else {
                    shown.saturating_sub(1)
                };
                let mut next = self.clone();
                if tick == target || shown == target {
                    next.displayed_tick = target;
                    next.display_override = None;
                    next.animation = None;
                } else {
                    next.display_override = Some(tick);
                }
                Some(next)
            },
        }
    }

    fn collapse_at(&self, tick: u32) -> GameState {
        let plan = self.plan.committed_at(tick);
        let displayed_tick = plan.base_tick();
        GameState {
            plan,
            focused: self.focused,
            displayed_tick,
            display_override: None,
            animation: None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(Frame::default())
    }
}
