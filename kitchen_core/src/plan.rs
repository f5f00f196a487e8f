use std::sync::Arc;

use crate::kitchen::{advance, ChefId, Frame, QueuedAction};

/// Every frame from the committed baseline up to the last planned tick,
/// plus the per-chef action queues those frames were built from.
///
/// `frames[0]` is the baseline. Queuing at an earlier tick discards every
/// frame after it before appending, so only one branch is ever kept. Frames
/// are shared between stacks, never mutated.
///
/// Ticks are absolute: the baseline sits at its own `current_turn`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlanStack {
    frames: Vec<Arc<Frame>>,
    queues: Vec<Vec<QueuedAction>>,
}

impl PlanStack {
    pub fn new(baseline: Frame) -> Self {
        let queues = vec![Vec::new(); baseline.chefs.len()];
        PlanStack {
            frames: vec![Arc::new(baseline)],
            queues,
        }
    }

    pub fn baseline(&self) -> &Frame {
        &self.frames[0]
    }

    /// The tick of the committed baseline.
    pub fn base_tick(&self) -> u32 {
        self.baseline().current_turn
    }

    /// The tick of the last frame in the stack.
    pub fn top_tick(&self) -> u32 {
        self.base_tick() + self.frames.len() as u32 - 1
    }

    /// Number of frames, including the baseline. Never zero.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn chef_count(&self) -> usize {
        self.queues.len()
    }

    pub fn frame_at(&self, tick: u32) -> Option<&Arc<Frame>> {
        let index = tick.checked_sub(self.base_tick())?;
        self.frames.get(index as usize)
    }

    /// The frame at `tick`, clamped into the stack's range.
    pub fn frame_at_clamped(&self, tick: u32) -> &Arc<Frame> {
        let index = tick.saturating_sub(self.base_tick()) as usize;
        &self.frames[index.min(self.frames.len() - 1)]
    }

    pub fn frames(&self) -> &[Arc<Frame>] {
        &self.frames
    }

    pub fn queue(&self, chef: ChefId) -> &[QueuedAction] {
        self.queues.get(chef.0).map(Vec::as_slice).unwrap_or_default()
    }

    /// The tick a chef's own plan reaches, capped at the top of the stack
    /// when later frames were discarded.
    pub fn target_tick(&self, chef: ChefId) -> u32 {
        (self.base_tick() + self.queue(chef).len() as u32).min(self.top_tick())
    }

    pub fn has_queued_actions(&self) -> bool {
        self.queues.iter().any(|queue| !queue.is_empty())
    }

    /// Sets a chef's action at `tick` and replays that one tick. Frames after
    /// `tick` and the chef's later actions are dropped first.
    pub fn push_action(&mut self, chef: ChefId, tick: u32, action: QueuedAction) -> bool {
        let Some(index) = tick
            .checked_sub(self.base_tick())
            .map(|index| index as usize)
            .filter(|index| *index < self.frames.len())
        else {
            return false;
        };
        let Some(queue) = self.queues.get_mut(chef.0) else {
            return false;
        };
        if index > queue.len() {
            return false;
        }
        queue.truncate(index);
        queue.push(action);
        self.frames.truncate(index + 1);
        let next = advance(&self.frames[index], &self.actions_at(index));
        self.frames.push(Arc::new(next));
        true
    }

    /// Drops the top frame along with the chef's last action. The baseline
    /// is never dropped.
    pub fn pop_action(&mut self, chef: ChefId) -> Option<QueuedAction> {
        if self.frames.len() <= 1 {
            return None;
        }
        let action = self.queues.get_mut(chef.0)?.pop()?;
        self.frames.pop();
        Some(action)
    }

    /// A new stack whose baseline is the frame at `tick`, marked committed,
    /// with every queue cleared.
    pub fn committed_at(&self, tick: u32) -> PlanStack {
        let mut baseline = Frame::clone(self.frame_at_clamped(tick));
        baseline.last_committed_turn = baseline.current_turn;
        PlanStack::new(baseline)
    }

    fn actions_at(&self, index: usize) -> Vec<Option<QueuedAction>> {
        self.queues
            .iter()
            .map(|queue| queue.get(index).copied())
            .collect()
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;
    use crate::kitchen::CarriedItem;
    use crate::prelude::*;

    fn mv(dir: Compass) -> QueuedAction {
        QueuedAction::Move { dir }
    }

    fn planned(dirs: &[Compass]) -> PlanStack {
        let mut stack = PlanStack::new(Frame::default());
        for (tick, dir) in dirs.iter().enumerate() {
            assert!(stack.push_action(ChefId(0), tick as u32, mv(*dir)));
        }
        stack
    }

    #[test]
    fn new_stack_is_only_baseline() {
        let stack = PlanStack::new(Frame::default());
        assert_eq!(1, stack.len());
        assert_eq!(0, stack.base_tick());
        assert_eq!(0, stack.top_tick());
        assert_eq!(0, stack.target_tick(ChefId(1)));
        assert!(!stack.has_queued_actions());
    }

    #[test]
    fn push_appends_replayed_frame() {
        let mut stack = PlanStack::new(Frame::default());
        assert!(stack.push_action(ChefId(0), 0, mv(Compass::East)));
        assert_eq!(2, stack.len());
        let top = stack.frame_at(1).unwrap();
        assert_eq!(1, top.current_turn);
        assert_eq!(CarriedItem::CleanPlates { count: 3 }, top.chefs[0].carried);
        assert_eq!(1, stack.target_tick(ChefId(0)));
        assert_eq!(0, stack.target_tick(ChefId(1)));
    }

    #[test]
    fn push_outside_stack_or_for_unknown_chef_is_rejected() {
        let mut stack = PlanStack::new(Frame::default());
        assert!(!stack.push_action(ChefId(9), 0, mv(Compass::East)));
        assert!(!stack.push_action(ChefId(0), 1, mv(Compass::East)));
        assert_eq!(None, stack.pop_action(ChefId(9)));
        assert_eq!(1, stack.len());

        let mut stack = planned(&[Compass::West, Compass::West]);
        assert!(!stack.push_action(ChefId(1), 1, mv(Compass::West)));
        assert_eq!(3, stack.len());
    }

    #[test]
    fn push_at_earlier_tick_discards_later_frames() {
        let mut stack = planned(&[Compass::West, Compass::West]);
        assert_eq!(3, stack.len());

        assert!(stack.push_action(ChefId(1), 0, mv(Compass::West)));
        assert_eq!(2, stack.len());
        let frame = stack.frame_at(1).unwrap();
        assert_eq!(UVec2::new(1, 1), frame.chefs[0].position);
        assert_eq!(CarriedItem::CleanPlates { count: 3 }, frame.chefs[1].carried);
        assert_eq!(None, stack.frame_at(2));
        assert_eq!(1, stack.target_tick(ChefId(0)));
        assert_eq!(1, stack.target_tick(ChefId(1)));
    }

    #[test]
    fn push_at_earlier_tick_replaces_own_later_actions() {
        let mut stack = planned(&[Compass::West, Compass::South, Compass::South]);
        assert!(stack.push_action(ChefId(0), 1, mv(Compass::North)));
        assert_eq!(&[mv(Compass::West), mv(Compass::North)], stack.queue(ChefId(0)));
        assert_eq!(3, stack.len());
        assert_eq!(UVec2::new(1, 0), stack.frame_at(2).unwrap().chefs[0].position);
    }

    #[test]
    fn pop_restores_previous_frames() {
        let before = planned(&[Compass::West, Compass::South]);
        for dir in Compass::ALL_DIRECTIONS {
            let mut stack = before.clone();
            stack.push_action(ChefId(0), 2, mv(dir));
            assert_eq!(Some(mv(dir)), stack.pop_action(ChefId(0)));
            assert_eq!(before, stack);
        }
    }

    #[test]
    fn pop_drops_top_frame() {
        let mut stack = planned(&[Compass::West, Compass::West]);
        assert_eq!(Some(mv(Compass::West)), stack.pop_action(ChefId(0)));
        assert_eq!(2, stack.len());
        assert_eq!(None, stack.pop_action(ChefId(1)));
        assert_eq!(2, stack.len());
        stack.pop_action(ChefId(0));
        assert_eq!(1, stack.len());
        assert_eq!(None, stack.pop_action(ChefId(0)));
    }

    #[test]
    fn commit_rebases_on_chosen_frame() {
        let stack = planned(&[Compass::West, Compass::West]);
        let committed = stack.committed_at(1);
        assert_eq!(1, committed.len());
        assert_eq!(1, committed.base_tick());
        assert_eq!(1, committed.baseline().last_committed_turn);
        assert!(!committed.has_queued_actions());
        assert_eq!(None, committed.frame_at(0));
        assert_eq!(1, committed.target_tick(ChefId(0)));
    }

    #[test]
    fn frame_lookup_clamps() {
        let stack = planned(&[Compass::West]);
        assert_eq!(1, stack.frame_at_clamped(40).current_turn);
        assert_eq!(None, stack.frame_at(2));
    }
}
