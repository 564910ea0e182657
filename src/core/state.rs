use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use super::queue::ProcQueue;
use crate::{
    error::{Error, Result},
    scheduler::{ByArrival, ByPriority, ByUnblock, PriorityOrder},
    sim::ProcessDescriptor,
};

pub type Ticks = u64;
pub type Priority = i64;

new_key_type! {
    pub struct ProcId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Unarrived,
    Ready,
    Running,
    Blocked,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    Arrival,
    Ready,
    Blocked,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub name: String,
    pub arrival_time: Ticks,
    pub priority: Priority,
    pub total_time: Ticks,
    pub time_left: Ticks,
    pub time_to_next_block: Ticks,
    pub block_interval: Ticks,
    pub unblock_time: Option<Ticks>,
    // None sorts before any dispatch time, so never-run processes go first
    pub time_last_run: Option<Ticks>,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub times_blocked: u64,
    pub state: ProcState,
    // Position in the input file; breaks arrival ties
    pub input_index: usize,
}

impl Process {
    pub fn from_descriptor(desc: &ProcessDescriptor, input_index: usize) -> Self {
        Self {
            name: desc.name.clone(),
            arrival_time: desc.arrival_time,
            priority: desc.priority,
            total_time: desc.total_time,
            time_left: desc.total_time,
            time_to_next_block: desc.block_interval,
            block_interval: desc.block_interval,
            unblock_time: None,
            time_last_run: None,
            first_run: None,
            completion_time: None,
            times_blocked: 0,
            state: ProcState::Unarrived,
            input_index,
        }
    }

    /// Charge `elapsed` ticks of CPU time against both countdowns.
    ///
    /// The block countdown may run out past zero when the burst ends first;
    /// it saturates since the process terminates in that case.
    pub fn run_for(&mut self, elapsed: Ticks) {
        debug_assert!(
            elapsed <= self.time_left,
            "Process {} ran {elapsed} ticks with only {} left",
            self.name,
            self.time_left
        );
        self.time_left = self.time_left.saturating_sub(elapsed);
        self.time_to_next_block = self.time_to_next_block.saturating_sub(elapsed);
    }

    pub fn reset_block_countdown(&mut self) {
        self.time_to_next_block = self.block_interval;
    }

    pub fn cpu_time(&self) -> Ticks {
        self.total_time - self.time_left
    }

    pub fn turnaround(&self) -> Option<Ticks> {
        self.completion_time.map(|done| done - self.arrival_time)
    }
}

#[derive(Debug)]
pub struct KernelCtx {
    pub now: Ticks,
    pub procs: SlotMap<ProcId, Process>,
    pub arrivals: ProcQueue<ByArrival>,
    pub ready: ProcQueue<ByPriority>,
    pub blocked: ProcQueue<ByUnblock>,
    pub proc_to_queue: FxHashMap<ProcId, QueueKind>,
}

impl KernelCtx {
    pub fn new(priority_order: PriorityOrder) -> Self {
        Self {
            now: 0,
            procs: SlotMap::with_key(),
            arrivals: ProcQueue::new(ByArrival),
            ready: ProcQueue::new(ByPriority::new(priority_order)),
            blocked: ProcQueue::new(ByUnblock),
            proc_to_queue: FxHashMap::default(),
        }
    }

    pub fn create_process(&mut self, desc: &ProcessDescriptor) -> ProcId {
        let input_index = self.procs.len();
        let id = self
            .procs
            .insert(Process::from_descriptor(desc, input_index));
        self.enqueue(QueueKind::Arrival, id);
        id
    }

    pub fn advance_time(&mut self, delta: Ticks) -> Result<()> {
        self.now = self.later(delta)?;
        Ok(())
    }

    /// `now + delta`, or `TimeOverflow` if that is past the end of the clock.
    pub fn later(&self, delta: Ticks) -> Result<Ticks> {
        self.now.checked_add(delta).ok_or(Error::TimeOverflow {
            now: self.now,
            delta,
        })
    }

    pub fn proc(&self, id: ProcId) -> &Process {
        &self.procs[id]
    }

    pub fn proc_mut(&mut self, id: ProcId) -> &mut Process {
        &mut self.procs[id]
    }

    fn enqueue(&mut self, kind: QueueKind, id: ProcId) {
        assert!(
            !self.proc_to_queue.contains_key(&id),
            "Process {id:?} already present in some queue"
        );

        let proc = &self.procs[id];
        match kind {
            QueueKind::Arrival => self.arrivals.push(id, proc),
            QueueKind::Ready => self.ready.push(id, proc),
            QueueKind::Blocked => self.blocked.push(id, proc),
        }

        self.proc_to_queue.insert(id, kind);
    }

    pub fn dequeue(&mut self, kind: QueueKind) -> Option<ProcId> {
        let id = match kind {
            QueueKind::Arrival => self.arrivals.pop(),
            QueueKind::Ready => self.ready.pop(),
            QueueKind::Blocked => self.blocked.pop(),
        }?;

        let removed = self.proc_to_queue.remove(&id);
        debug_assert_eq!(removed, Some(kind), "Process {id:?} missing queue membership");

        Some(id)
    }

    // Pop the head of the arrival queue if it has arrived by now
    pub fn pop_arrived(&mut self) -> Option<ProcId> {
        let head = self.arrivals.peek()?;
        if self.procs[head].arrival_time > self.now {
            return None;
        }
        self.dequeue(QueueKind::Arrival)
    }

    pub fn pop_unblocked(&mut self) -> Option<ProcId> {
        let head = self.blocked.peek()?;
        if self.unblock_time_of(head) > self.now {
            return None;
        }
        self.dequeue(QueueKind::Blocked)
    }

    /// Earliest instant at which an unarrived or blocked process becomes
    /// ready, if any is pending.
    pub fn next_wakeup(&self) -> Option<Ticks> {
        let arrival = self.arrivals.peek().map(|id| self.procs[id].arrival_time);
        let unblock = self.blocked.peek().map(|id| self.unblock_time_of(id));
        match (arrival, unblock) {
            (Some(a), Some(u)) => Some(a.min(u)),
            (a, u) => a.or(u),
        }
    }

    fn unblock_time_of(&self, id: ProcId) -> Ticks {
        self.procs[id]
            .unblock_time
            .expect("Blocked process must have an unblock time")
    }

    pub fn all_queues_empty(&self) -> bool {
        self.arrivals.is_empty() && self.ready.is_empty() && self.blocked.is_empty()
    }

    pub fn mark_ready(&mut self, id: ProcId) {
        let proc = self.proc_mut(id);
        debug_assert!(
            proc.state != ProcState::Terminated,
            "Terminated process {} cannot be ready",
            proc.name
        );
        proc.state = ProcState::Ready;
        proc.unblock_time = None;
        self.enqueue(QueueKind::Ready, id);
    }

    pub fn set_running(&mut self, id: ProcId) {
        debug_assert!(
            !self.proc_to_queue.contains_key(&id),
            "Running process {id:?} must not be enqueued"
        );
        let now = self.now;
        let proc = self.proc_mut(id);
        debug_assert_eq!(proc.state, ProcState::Ready, "Only ready processes are dispatched");
        proc.state = ProcState::Running;
        proc.time_last_run = Some(now);
        proc.first_run.get_or_insert(now);
    }

    pub fn mark_blocked(&mut self, id: ProcId, unblock_time: Ticks) {
        let proc = self.proc_mut(id);
        debug_assert_eq!(proc.state, ProcState::Running);
        proc.state = ProcState::Blocked;
        proc.unblock_time = Some(unblock_time);
        proc.times_blocked += 1;
        self.enqueue(QueueKind::Blocked, id);
    }

    pub fn mark_terminated(&mut self, id: ProcId) {
        debug_assert!(
            !self.proc_to_queue.contains_key(&id),
            "Terminating process {id:?} that is still enqueued"
        );
        let now = self.now;
        let proc = self.proc_mut(id);
        debug_assert!(
            proc.state == ProcState::Running,
            "Process {} must have been running before termination",
            proc.name
        );
        debug_assert_eq!(proc.time_left, 0, "Process {} terminated early", proc.name);
        proc.state = ProcState::Terminated;
        proc.completion_time = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(name: &str, priority: Priority, arrival: Ticks, total: Ticks, block: Ticks) -> ProcessDescriptor {
        ProcessDescriptor {
            name: name.to_owned(),
            priority,
            arrival_time: arrival,
            total_time: total,
            block_interval: block,
        }
    }

    #[test]
    fn run_for_decrements_both_countdowns() {
        let mut proc = Process::from_descriptor(&desc("A", 0, 0, 10, 4), 0);
        proc.run_for(3);
        assert_eq!(proc.time_left, 7);
        assert_eq!(proc.time_to_next_block, 1);
        assert_eq!(proc.cpu_time(), 3);

        proc.run_for(1);
        proc.reset_block_countdown();
        assert_eq!(proc.time_to_next_block, 4);
    }

    #[test]
    fn block_countdown_saturates_on_final_burst() {
        let mut proc = Process::from_descriptor(&desc("A", 0, 0, 3, 1), 0);
        proc.run_for(3);
        assert_eq!(proc.time_left, 0);
        assert_eq!(proc.time_to_next_block, 0);
    }

    #[test]
    fn arrivals_pop_only_once_due() {
        let mut ctx = KernelCtx::new(PriorityOrder::HigherFirst);
        let late = ctx.create_process(&desc("late", 0, 5, 1, 1));
        let early = ctx.create_process(&desc("early", 0, 2, 1, 1));

        assert_eq!(ctx.pop_arrived(), None);
        assert_eq!(ctx.next_wakeup(), Some(2));

        ctx.advance_time(5).unwrap();
        assert_eq!(ctx.pop_arrived(), Some(early));
        assert_eq!(ctx.pop_arrived(), Some(late));
        assert_eq!(ctx.pop_arrived(), None);
        assert!(ctx.proc_to_queue.is_empty());
    }

    #[test]
    fn next_wakeup_considers_blocked_queue() {
        let mut ctx = KernelCtx::new(PriorityOrder::HigherFirst);
        let a = ctx.create_process(&desc("A", 0, 0, 5, 2));
        ctx.create_process(&desc("B", 0, 20, 5, 2));

        assert_eq!(ctx.pop_arrived(), Some(a));
        ctx.mark_ready(a);
        assert_eq!(ctx.dequeue(QueueKind::Ready), Some(a));
        ctx.set_running(a);
        ctx.advance_time(2).unwrap();
        ctx.mark_blocked(a, 7);

        assert_eq!(ctx.next_wakeup(), Some(7));
        assert_eq!(ctx.pop_unblocked(), None);
        ctx.advance_time(5).unwrap();
        assert_eq!(ctx.pop_unblocked(), Some(a));
    }

    #[test]
    fn clock_refuses_to_wrap() {
        let mut ctx = KernelCtx::new(PriorityOrder::HigherFirst);
        ctx.advance_time(u64::MAX - 1).unwrap();

        let err = ctx.advance_time(2).unwrap_err();
        assert!(matches!(
            err,
            Error::TimeOverflow {
                now,
                delta: 2
            } if now == u64::MAX - 1
        ));
        assert_eq!(ctx.now, u64::MAX - 1);
        assert_eq!(ctx.later(1).unwrap(), u64::MAX);
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn double_enqueue_panics() {
        let mut ctx = KernelCtx::new(PriorityOrder::HigherFirst);
        let a = ctx.create_process(&desc("A", 0, 0, 5, 2));
        ctx.enqueue(QueueKind::Ready, a);
    }
}
