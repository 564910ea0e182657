use rustc_hash::FxHashMap;

use super::state::{KernelCtx, ProcId, ProcState, QueueKind, Ticks};

/// Checks queue membership and process bookkeeping after every step.
/// All checks are debug assertions.
#[derive(Debug)]
pub struct Observer {
    step: u64,
    last_time_left: FxHashMap<ProcId, Ticks>,
}

impl Observer {
    pub fn new() -> Self {
        Self {
            step: 0,
            last_time_left: FxHashMap::default(),
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &KernelCtx) {
        self.step += 1;

        debug_assert_eq!(
            ctx.proc_to_queue.len(),
            ctx.arrivals.len() + ctx.ready.len() + ctx.blocked.len(),
            "Queue membership map out of sync with queues"
        );

        for (id, proc) in &ctx.procs {
            let name = &proc.name;
            let queue = ctx.proc_to_queue.get(&id).copied();
            match proc.state {
                ProcState::Unarrived => {
                    debug_assert_eq!(queue, Some(QueueKind::Arrival), "Unarrived {name} not in arrival queue");
                    debug_assert!(ctx.arrivals.contains(id));
                }
                ProcState::Ready => {
                    debug_assert_eq!(queue, Some(QueueKind::Ready), "Ready {name} not in ready queue");
                    debug_assert!(ctx.ready.contains(id));
                }
                ProcState::Blocked => {
                    debug_assert_eq!(queue, Some(QueueKind::Blocked), "Blocked {name} not in blocked queue");
                    debug_assert!(ctx.blocked.contains(id));
                    debug_assert!(
                        proc.unblock_time.is_some(),
                        "Blocked {name} has no unblock time"
                    );
                }
                ProcState::Running => {
                    debug_assert!(false, "{name} still Running between steps");
                }
                ProcState::Terminated => {
                    debug_assert_eq!(queue, None, "Terminated {name} still present in {queue:?}");
                    debug_assert_eq!(proc.time_left, 0, "Terminated {name} has time left");
                    debug_assert!(proc.completion_time.is_some());
                }
            }

            debug_assert!(
                proc.state == ProcState::Blocked || proc.unblock_time.is_none(),
                "{name} carries an unblock time outside the blocked queue"
            );

            let previous = self.last_time_left.insert(id, proc.time_left);
            debug_assert!(
                previous.is_none_or(|previous| proc.time_left <= previous),
                "time_left of {name} increased"
            );
        }
    }
}
