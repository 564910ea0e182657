use std::collections::HashMap;

use proptest::prelude::*;
use rr_sched::{
    Outcome, ProcessDescriptor, Report, SimConfig,
    output::render,
    sim::{WorkloadShape, bernoulli_workload},
    simulate,
};

fn check_invariants(descs: &[ProcessDescriptor], config: &SimConfig, report: &Report) {
    // Intervals tile the timeline without gaps
    let mut clock = 0;
    for event in report.events() {
        assert_eq!(event.start, clock, "gap before {event:?}");
        clock = event.end();
    }
    assert_eq!(clock, report.end_time());

    let total_burst: u64 = descs.iter().map(|d| d.total_time).sum();
    assert_eq!(report.busy_time(), total_burst);

    let idle: u64 = report
        .events()
        .iter()
        .filter(|e| e.outcome == Outcome::Idle)
        .map(|e| e.duration)
        .sum();
    assert_eq!(report.end_time(), total_burst + idle);

    let mut terminations: HashMap<&str, usize> = HashMap::new();
    for event in report.events() {
        if event.outcome == Outcome::Terminate {
            let name = event.proc.and_then(|id| report.name(id)).unwrap();
            *terminations.entry(name).or_default() += 1;
        }
        if event.outcome == Outcome::Preempt {
            assert_eq!(event.duration, config.time_slice.get());
        }
        if event.outcome != Outcome::Idle {
            assert!(event.duration <= config.time_slice.get());
        }
    }
    assert_eq!(terminations.len(), descs.len());
    assert!(terminations.values().all(|&n| n == 1));

    for proc in report.processes() {
        assert_eq!(proc.time_left, 0, "{} did not finish", proc.name);
        assert!(proc.unblock_time.is_none());
    }

    for stats in report.process_stats() {
        assert_eq!(stats.turnaround, stats.cpu_time + stats.blocked_time + stats.waiting_time);
    }
}

#[test]
fn generated_workloads_hold_invariants() {
    let shape = WorkloadShape::default();
    for seed in 0..20 {
        let descs = bernoulli_workload(&shape, seed);
        for (time_slice, block_duration) in [(1, 0), (2, 3), (5, 1), (8, 10)] {
            let config = SimConfig::new(time_slice, block_duration).unwrap();
            let report = simulate(&descs, &config).unwrap();
            check_invariants(&descs, &config, &report);
        }
    }
}

fn descriptor() -> impl Strategy<Value = (i64, u64, u64, u64)> {
    (-3i64..=3, 0u64..40, 0u64..25, 1u64..12)
}

proptest! {
    #[test]
    fn arbitrary_workloads_hold_invariants(
        specs in prop::collection::vec(descriptor(), 0..12),
        time_slice in 1u64..8,
        block_duration in 0u64..8,
    ) {
        let descs: Vec<_> = specs
            .into_iter()
            .enumerate()
            .map(|(i, (priority, arrival_time, total_time, block_interval))| ProcessDescriptor {
                name: format!("P{i}"),
                priority,
                arrival_time,
                total_time,
                block_interval,
            })
            .collect();
        let config = SimConfig::new(time_slice, block_duration).unwrap();

        let report = simulate(&descs, &config).unwrap();
        check_invariants(&descs, &config, &report);
        prop_assert_eq!(render(&report), render(&simulate(&descs, &config).unwrap()));
    }

    #[test]
    fn one_slice_job_terminates_at_once(
        total_time in 0u64..20,
        extra in 0u64..5,
        arrival_time in 0u64..10,
    ) {
        let descs = vec![ProcessDescriptor {
            name: "solo".to_owned(),
            priority: 0,
            arrival_time,
            total_time,
            block_interval: total_time + 1,
        }];
        let report = simulate(&descs, &SimConfig::new(total_time + extra + 1, 3).unwrap()).unwrap();

        let runs: Vec<_> = report
            .events()
            .iter()
            .filter(|e| e.outcome != Outcome::Idle)
            .collect();
        prop_assert_eq!(runs.len(), 1);
        prop_assert_eq!(runs[0].outcome, Outcome::Terminate);
        prop_assert_eq!(runs[0].duration, total_time);
    }
}
