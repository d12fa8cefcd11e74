//! Roster materialisation: expands each surviving template's solved
//! headcount into that many worker records, and accumulates the coverage
//! witness grid for auditing.

use selen::prelude::*;

use crate::domain::{zero_grid, Grid, Worker, WorkerKind, DAYS};
use crate::model::TemplateVars;

/// Calendar hours (`0..23`, wrapped) the worker is physically present for,
/// in shift order. A wrapped hour's value is always `< shift_start`,
/// which is how the witness below tells same-day presence from spill into
/// the next calendar day.
fn presence_hours(shift_start: u8, length: u8) -> Vec<u8> {
    (0..length).map(|i| (shift_start + i) % 24).collect()
}

/// The subset of `presence_hours` reported on the public `Worker` record:
/// same-day hours only. Spill hours are counted in coverage but not listed
/// here.
fn same_day_hours(shift_start: u8, length: u8) -> Vec<u8> {
    presence_hours(shift_start, length)
        .into_iter()
        .filter(|&h| h >= shift_start)
        .collect()
}

fn working_days_for(kind: WorkerKind, day_off: Option<u8>) -> Vec<usize> {
    match kind {
        WorkerKind::FT | WorkerKind::PT => (0..DAYS)
            .filter(|&d| Some(d as u8) != day_off)
            .collect(),
        WorkerKind::WFT | WorkerKind::WPT => vec![5, 6],
    }
}

/// Expands solved variable values into worker records and the coverage
/// witness grid. Returns `(workers, coverage, ft, pt, wft, wpt)` counts.
pub fn materialise(
    vars: &TemplateVars,
    solution: &Solution,
) -> (Vec<Worker>, Grid, u32, u32, u32, u32) {
    let mut workers = Vec::new();
    let mut coverage = zero_grid();
    let mut next_id = 1u32;
    let (mut ft_count, mut pt_count, mut wft_count, mut wpt_count) = (0u32, 0u32, 0u32, 0u32);

    for &(key, var) in &vars.ft {
        let count = solution.get::<i32>(var).max(0) as u32;
        ft_count += count;
        for _ in 0..count {
            let worker = Worker {
                id: next_id,
                kind: WorkerKind::FT,
                shift_start: key.start,
                shift_end: key.start + 9,
                day_off: Some(key.day_off),
                productive_hours: same_day_hours(key.start, 9),
                break_half_slots: Some([key.bs1, key.bs2]),
            };
            next_id += 1;
            accumulate_coverage(&mut coverage, &worker);
            workers.push(worker);
        }
    }

    for &(key, var) in &vars.pt {
        let count = solution.get::<i32>(var).max(0) as u32;
        pt_count += count;
        for _ in 0..count {
            let worker = Worker {
                id: next_id,
                kind: WorkerKind::PT,
                shift_start: key.start,
                shift_end: key.start + 4,
                day_off: Some(key.day_off),
                productive_hours: same_day_hours(key.start, 4),
                break_half_slots: None,
            };
            next_id += 1;
            accumulate_coverage(&mut coverage, &worker);
            workers.push(worker);
        }
    }

    for &(key, var) in &vars.wft {
        let count = solution.get::<i32>(var).max(0) as u32;
        wft_count += count;
        for _ in 0..count {
            let worker = Worker {
                id: next_id,
                kind: WorkerKind::WFT,
                shift_start: key.start,
                shift_end: key.start + 9,
                day_off: None,
                productive_hours: same_day_hours(key.start, 9),
                break_half_slots: Some([key.bs1, key.bs2]),
            };
            next_id += 1;
            accumulate_coverage(&mut coverage, &worker);
            workers.push(worker);
        }
    }

    for &(key, var) in &vars.wpt {
        let count = solution.get::<i32>(var).max(0) as u32;
        wpt_count += count;
        for _ in 0..count {
            let worker = Worker {
                id: next_id,
                kind: WorkerKind::WPT,
                shift_start: key.start,
                shift_end: key.start + 4,
                day_off: None,
                productive_hours: same_day_hours(key.start, 4),
                break_half_slots: None,
            };
            next_id += 1;
            accumulate_coverage(&mut coverage, &worker);
            workers.push(worker);
        }
    }

    (workers, coverage, ft_count, pt_count, wft_count, wpt_count)
}

fn accumulate_coverage(coverage: &mut Grid, worker: &Worker) {
    let length = worker.kind.shift_length();
    let presence = presence_hours(worker.shift_start, length);
    for d_work in working_days_for(worker.kind, worker.day_off) {
        for &h in &presence {
            let target_day = if h < worker.shift_start {
                (d_work + 1) % DAYS
            } else {
                d_work
            };
            coverage[target_day][h as usize] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_day_hours_excludes_overnight_spill() {
        // FT starting at 21 (length 9) spills to hours 0,1,2,3,4,5 next day.
        let hours = same_day_hours(21, 9);
        assert_eq!(hours, vec![21, 22, 23]);
    }

    #[test]
    fn presence_hours_includes_wrapped_values() {
        let hours = presence_hours(21, 9);
        assert_eq!(hours, vec![21, 22, 23, 0, 1, 2, 3, 4, 5]);
    }
}
