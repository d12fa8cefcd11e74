//! Normalisation and solve dispatch: the orchestration that ties template
//! enumeration, model construction, and the constraint solver into the
//! single `solve(input) -> result` contract.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use selen::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::{zero_grid, Config, Grid, SolverInput, SolverResult, Status, DAYS, HOURS};
use crate::error::RosterError;
use crate::model;
use crate::roster;
use crate::templates;

/// Wall-clock budget for the solver dispatch.
const SOLVE_BUDGET: Duration = Duration::from_secs(120);

/// The sole entry point: a pure function from demand + policy to a roster.
/// Never panics and never returns `Result`. Every failure is folded into
/// `SolverResult::status` and `errorMessage`.
pub fn solve(input: SolverInput) -> SolverResult {
    let start = Instant::now();

    let (oph, config) = match normalise(&input) {
        Ok(pair) => pair,
        Err(e) => {
            warn!(error = %e, "rejecting malformed solver input");
            return SolverResult::empty_shell(
                Status::Error,
                &zero_grid(),
                elapsed_ms(start),
                Some(e.to_string()),
            );
        }
    };

    let required = required_grid(&oph, config.productivity_rate);

    let use_pt = config.part_timer_cap_pct > 0;
    let use_wft = config.weekender_cap_pct > 0;
    let use_wpt = use_pt && use_wft;
    let permitted_days_off: Vec<u8> = if config.allow_weekend_day_off {
        (0..7).collect()
    } else {
        (0..5).collect()
    };

    let keys = templates::enumerate(&oph, &permitted_days_off, use_pt, use_wft, use_wpt);
    debug!(
        ft = keys.ft.len(),
        pt = keys.pt.len(),
        wft = keys.wft.len(),
        wpt = keys.wpt.len(),
        "template enumeration complete"
    );

    if keys.ft.is_empty() && keys.pt.is_empty() && keys.wft.is_empty() && keys.wpt.is_empty() {
        info!("no active templates; demand is all-zero, returning empty optimal roster");
        return SolverResult::empty_shell(Status::Optimal, &required, elapsed_ms(start), None);
    }

    let mut m = Model::default();
    let vars = model::declare_variables(&mut m, &keys);
    model::add_coverage_constraints(&mut m, &vars, &required);
    model::add_cap_constraints(&mut m, &vars, &config);
    let objective_terms = model::objective_terms(&vars);

    match dispatch(m, &objective_terms) {
        SolveOutcome::Optimal(solution) => {
            let (workers, coverage, ft, pt, wft, wpt) = roster::materialise(&vars, &solution);
            info!(total = workers.len(), "roster solved to optimality");
            SolverResult {
                status: Status::Optimal,
                total_workers: workers.len() as u32,
                ft_count: ft,
                pt_count: pt,
                wft_count: wft,
                wpt_count: wpt,
                coverage: crate::domain::grid_to_rows(&coverage),
                required: crate::domain::grid_to_rows(&required),
                workers,
                solve_time_ms: elapsed_ms(start),
                error_message: None,
            }
        }
        SolveOutcome::Infeasible => {
            warn!("no feasible schedule exists for this input");
            SolverResult::empty_shell(
                Status::Infeasible,
                &required,
                elapsed_ms(start),
                Some("No feasible schedule exists with these constraints.".to_string()),
            )
        }
        SolveOutcome::Error(message) => {
            warn!(error = %message, "solver did not return a usable solution");
            SolverResult::empty_shell(Status::Error, &required, elapsed_ms(start), Some(message))
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Validates the demand grid's shape and the policy dials' ranges, and
/// returns the validated grid plus config.
fn normalise(input: &SolverInput) -> Result<(Grid, Config), RosterError> {
    if input.oph.len() != DAYS {
        return Err(RosterError::WrongRowCount { rows: input.oph.len() });
    }
    let mut grid = zero_grid();
    for (day, row) in input.oph.iter().enumerate() {
        if row.len() != HOURS {
            return Err(RosterError::WrongColumnCount { day, cols: row.len() });
        }
        for (hour, &value) in row.iter().enumerate() {
            if value < 0 {
                return Err(RosterError::NegativeDemand { day, hour, value });
            }
            grid[day][hour] = value as u32;
        }
    }

    if input.config.productivity_rate < 1 {
        return Err(RosterError::NonPositiveRate(input.config.productivity_rate));
    }
    for (field, value) in [
        ("partTimerCapPct", input.config.part_timer_cap_pct),
        ("weekenderCapPct", input.config.weekender_cap_pct),
    ] {
        if !(0..=100).contains(&value) {
            return Err(RosterError::CapOutOfRange { field, value });
        }
    }

    Ok((grid, input.config))
}

fn required_grid(oph: &Grid, rate: i64) -> Grid {
    let mut required = zero_grid();
    for d in 0..DAYS {
        for h in 0..HOURS {
            let demand = oph[d][h];
            if demand > 0 {
                required[d][h] = ((demand as i64 + rate - 1) / rate) as u32;
            }
        }
    }
    required
}

enum SolveOutcome {
    Optimal(Solution),
    Infeasible,
    Error(String),
}

/// Runs the solve on a worker thread and enforces the wall-clock budget
/// from the caller's side, since the solver exposes no mid-solve
/// cancellation hook. A timeout abandons waiting but cannot recall the
/// thread.
fn dispatch(mut m: Model, objective_terms: &[VarId]) -> SolveOutcome {
    if objective_terms.is_empty() {
        // No decision variables at all (shouldn't happen once we've
        // already short-circuited the all-zero-demand case, but keep this
        // branch defensive): trivially optimal with zero cost.
        return match m.solve() {
            Ok(solution) => SolveOutcome::Optimal(solution),
            Err(e) => classify_error(&e),
        };
    }

    let objective = m.sum(objective_terms);
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = m.minimize(objective);
        let _ = tx.send(result);
    });

    match rx.recv_timeout(SOLVE_BUDGET) {
        Ok(Ok(solution)) => SolveOutcome::Optimal(solution),
        Ok(Err(e)) => classify_error(&e),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            SolveOutcome::Error("solver exceeded the 120s wall-clock budget without a solution".to_string())
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            SolveOutcome::Error("solver thread terminated without reporting a result".to_string())
        }
    }
}

fn classify_error<E: std::fmt::Debug>(error: &E) -> SolveOutcome {
    let text = format!("{:?}", error).to_lowercase();
    if text.contains("infeasible") || text.contains("unsat") || text.contains("no solution") {
        SolveOutcome::Infeasible
    } else {
        SolveOutcome::Error(format!("{:?}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SolverInput, Status};

    fn config(rate: i64, pt_cap: i64, wk_cap: i64, allow_weekend: bool) -> Config {
        Config {
            productivity_rate: rate,
            part_timer_cap_pct: pt_cap,
            weekender_cap_pct: wk_cap,
            allow_weekend_day_off: allow_weekend,
        }
    }

    #[test]
    fn zero_demand_is_trivially_optimal() {
        let input = SolverInput { oph: vec![vec![0; 24]; 7], config: config(20, 0, 0, false) };
        let result = solve(input);
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.total_workers, 0);
        assert!(result.coverage.iter().all(|row| row.iter().all(|&c| c == 0)));
    }

    #[test]
    fn rejects_malformed_grid_shape() {
        let input = SolverInput { oph: vec![vec![0; 24]; 6], config: config(20, 0, 0, false) };
        let result = solve(input);
        assert_eq!(result.status, Status::Error);
        assert!(result.error_message.is_some());
    }

    #[test]
    fn rejects_non_positive_rate() {
        let input = SolverInput { oph: vec![vec![0; 24]; 7], config: config(0, 0, 0, false) };
        let result = solve(input);
        assert_eq!(result.status, Status::Error);
    }

    #[test]
    fn rejects_cap_out_of_range() {
        let input = SolverInput { oph: vec![vec![0; 24]; 7], config: config(20, 150, 0, false) };
        let result = solve(input);
        assert_eq!(result.status, Status::Error);
    }

    #[test]
    fn single_hour_weekday_demand_solves_to_one_ft() {
        let mut oph = vec![vec![0; 24]; 7];
        oph[0][9] = 20;
        let input = SolverInput { oph, config: config(20, 0, 0, false) };
        let result = solve(input);
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.required[0][9], 1);
        assert_eq!(result.total_workers, 1);
        assert_eq!(result.ft_count, 1);
        let worker = &result.workers[0];
        assert!(worker.day_off.unwrap() <= 4);
        assert!(result.coverage[0][9] >= 1);
    }
}
