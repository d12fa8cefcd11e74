//! Black-box scenario tests exercising `solve` end to end, the way the
//! teacher's scenario grids exercise the planning problem end to end.

use roster_core::domain::{Config, SolverInput, Status};
use roster_core::solve;

fn zero_grid() -> Vec<Vec<i64>> {
    vec![vec![0; 24]; 7]
}

fn config(rate: i64, pt_cap: i64, wk_cap: i64, allow_weekend: bool) -> Config {
    Config {
        productivity_rate: rate,
        part_timer_cap_pct: pt_cap,
        weekender_cap_pct: wk_cap,
        allow_weekend_day_off: allow_weekend,
    }
}

#[test]
fn weekend_demand_with_weekenders_disabled_uses_no_weekend_only_workers() {
    let mut oph = zero_grid();
    oph[5][10] = 20;
    oph[6][10] = 20;
    let input = SolverInput { oph, config: config(20, 0, 0, true) };

    let result = solve(input);

    assert_eq!(result.status, Status::Optimal);
    assert_eq!(result.wft_count, 0);
    assert_eq!(result.wpt_count, 0);
    assert!(result.ft_count > 0 || result.pt_count > 0);
}

#[test]
fn part_timer_cap_of_100_is_a_no_op() {
    let mut oph = zero_grid();
    for d in 0..5 {
        oph[d][10] = 20;
        oph[d][11] = 20;
        oph[d][12] = 20;
    }
    let input = SolverInput { oph, config: config(20, 100, 0, false) };

    let result = solve(input);

    assert_eq!(result.status, Status::Optimal);
    // With no FT/WFT required to carry a remainder, an unconstrained cap
    // leaves the solver free to pick an all-PT roster.
    assert!(result.total_workers > 0);
}

#[test]
fn infeasible_or_optimal_peak_never_regresses_to_plain_error() {
    let mut oph = zero_grid();
    oph[0][9] = 10_000;
    let input = SolverInput { oph, config: config(20, 0, 0, false) };

    let result = solve(input);

    assert!(matches!(result.status, Status::Optimal | Status::Infeasible));
}

#[test]
fn overnight_demand_is_covered_by_wrap_capable_templates() {
    let mut oph = zero_grid();
    oph[1][1] = 40;
    let input = SolverInput { oph, config: config(20, 0, 0, true) };

    let result = solve(input);

    assert_eq!(result.status, Status::Optimal);
    assert!(result.coverage[1][1] >= 2);
    assert!(result.workers.iter().any(|w| w.shift_start >= 20));
}

#[test]
fn malformed_negative_demand_is_reported_as_error_not_panic() {
    let mut oph = zero_grid();
    oph[0][9] = -5;
    let input = SolverInput { oph, config: config(20, 0, 0, false) };

    let result = solve(input);

    assert_eq!(result.status, Status::Error);
    assert!(result.error_message.unwrap().contains("non-negative"));
}
