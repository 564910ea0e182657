use log::{debug, trace};

use super::{
    event::{Outcome, SchedEvent},
    observer::Observer,
    state::{KernelCtx, ProcId, QueueKind, Ticks},
};
use crate::{config::SimConfig, error::Result, sim::ProcessDescriptor};

pub struct SchedCore {
    pub ctx: KernelCtx,
    time_slice: Ticks,
    block_duration: Ticks,
    observer: Observer,
}

impl SchedCore {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            ctx: KernelCtx::new(config.priority_order),
            time_slice: config.time_slice.get(),
            block_duration: config.block_duration,
            observer: Observer::new(),
        }
    }

    pub fn spawn(&mut self, desc: &ProcessDescriptor) -> ProcId {
        self.ctx.create_process(desc)
    }

    /// Runs one scheduling decision and returns the interval it produced.
    ///
    /// Returns `None` once the arrival, ready and blocked queues are all
    /// empty, i.e. every process has terminated. Fails if simulated time
    /// would run past `Ticks::MAX`.
    pub fn step(&mut self) -> Result<Option<SchedEvent>> {
        if self.ctx.all_queues_empty() {
            return Ok(None);
        }

        self.admit_arrivals();
        self.wake_unblocked();

        let event = match self.ctx.dequeue(QueueKind::Ready) {
            Some(id) => self.dispatch(id)?,
            None => match self.idle()? {
                Some(event) => event,
                None => return Ok(None),
            },
        };

        self.observer.observe(&self.ctx);
        Ok(Some(event))
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn is_finished(&self) -> bool {
        self.ctx.all_queues_empty()
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    fn admit_arrivals(&mut self) {
        while let Some(id) = self.ctx.pop_arrived() {
            trace!("t={} admit {}", self.ctx.now, self.ctx.proc(id).name);
            self.ctx.mark_ready(id);
        }
    }

    fn wake_unblocked(&mut self) {
        while let Some(id) = self.ctx.pop_unblocked() {
            trace!("t={} unblock {}", self.ctx.now, self.ctx.proc(id).name);
            self.ctx.mark_ready(id);
        }
    }

    // Nothing is ready: jump to the next arrival or unblock
    fn idle(&mut self) -> Result<Option<SchedEvent>> {
        let start = self.ctx.now;
        let Some(wakeup) = self.ctx.next_wakeup() else {
            return Ok(None);
        };
        debug_assert!(wakeup > start, "Pending wakeup at {wakeup} was not admitted at {start}");

        let duration = wakeup - start;
        self.ctx.advance_time(duration)?;
        debug!("t={start} idle for {duration}");

        Ok(Some(SchedEvent {
            start,
            proc: None,
            duration,
            outcome: Outcome::Idle,
        }))
    }

    fn dispatch(&mut self, id: ProcId) -> Result<SchedEvent> {
        let start = self.ctx.now;
        self.ctx.set_running(id);

        let slice = self.time_slice;
        let proc = self.ctx.proc(id);
        let (duration, outcome) = if proc.time_left <= slice {
            (proc.time_left, Outcome::Terminate)
        } else if proc.time_to_next_block <= slice {
            (proc.time_to_next_block, Outcome::Block)
        } else {
            (slice, Outcome::Preempt)
        };

        self.ctx.advance_time(duration)?;
        self.ctx.proc_mut(id).run_for(duration);

        match outcome {
            Outcome::Terminate => self.ctx.mark_terminated(id),
            Outcome::Block => {
                self.ctx.proc_mut(id).reset_block_countdown();
                let unblock_time = self.ctx.later(self.block_duration)?;
                self.ctx.mark_blocked(id, unblock_time);
            }
            Outcome::Preempt => self.ctx.mark_ready(id),
            Outcome::Idle => unreachable!("dispatch never idles"),
        }

        let proc = self.ctx.proc(id);
        debug!(
            "t={start} {} ran {duration} -> {outcome:?} (left {})",
            proc.name, proc.time_left
        );

        Ok(SchedEvent {
            start,
            proc: Some(id),
            duration,
            outcome,
        })
    }
}
