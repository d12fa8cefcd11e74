//! Data model for the weekly workforce rostering core.
//!
//! These types are the wire format directly: `SolverInput` and
//! `SolverResult` (de)serialise to exactly the JSON shapes the solve
//! contract promises callers, so there is no separate DTO layer.

use serde::{Deserialize, Serialize};

/// Number of days modelled per week. Row 0..4 = Mon..Fri, 5 = Sat, 6 = Sun.
pub const DAYS: usize = 7;
/// Number of calendar-hour columns per day.
pub const HOURS: usize = 24;

/// A validated 7x24 grid of non-negative integers.
pub type Grid = [[u32; HOURS]; DAYS];

/// Policy dials controlling how demand is translated into a roster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub productivity_rate: i64,
    pub part_timer_cap_pct: i64,
    pub weekender_cap_pct: i64,
    pub allow_weekend_day_off: bool,
}

/// Raw solver input: a weekly demand matrix plus the policy dials.
///
/// `oph` is kept as `Vec<Vec<i64>>` rather than a fixed grid so that
/// malformed shapes (wrong row/column counts, negative values) can be
/// caught as input-shape errors in `solve::normalise` instead of panicking
/// during deserialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverInput {
    pub oph: Vec<Vec<i64>>,
    pub config: Config,
}

/// The four worker templates the roster is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerKind {
    FT,
    PT,
    WFT,
    WPT,
}

impl WorkerKind {
    /// Relative paid-hour weight used by the objective (FT/WFT cost twice
    /// what PT/WPT cost, per their 8h vs 4h net productive day).
    pub fn objective_weight(self) -> i64 {
        match self {
            WorkerKind::FT | WorkerKind::WFT => 2,
            WorkerKind::PT | WorkerKind::WPT => 1,
        }
    }

    pub fn has_breaks(self) -> bool {
        matches!(self, WorkerKind::FT | WorkerKind::WFT)
    }

    pub fn shift_length(self) -> u8 {
        match self {
            WorkerKind::FT | WorkerKind::WFT => 9,
            WorkerKind::PT | WorkerKind::WPT => 4,
        }
    }
}

/// A single roster line: one worker bound to one template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: WorkerKind,
    pub shift_start: u8,
    pub shift_end: u8,
    pub day_off: Option<u8>,
    pub productive_hours: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_half_slots: Option<[u8; 2]>,
}

/// Terminal outcome of a `solve` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Optimal,
    Infeasible,
    Error,
}

/// The roster plus audit matrices returned by `solve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverResult {
    pub status: Status,
    pub workers: Vec<Worker>,
    pub total_workers: u32,
    pub ft_count: u32,
    pub pt_count: u32,
    pub wft_count: u32,
    pub wpt_count: u32,
    pub coverage: Vec<Vec<u32>>,
    pub required: Vec<Vec<u32>>,
    pub solve_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SolverResult {
    /// The all-zero result shell every non-optimal branch returns,
    /// preserving `required` and `solveTimeMs` per the error-handling design.
    pub fn empty_shell(
        status: Status,
        required: &Grid,
        solve_time_ms: u64,
        message: Option<String>,
    ) -> Self {
        Self {
            status,
            workers: Vec::new(),
            total_workers: 0,
            ft_count: 0,
            pt_count: 0,
            wft_count: 0,
            wpt_count: 0,
            coverage: grid_to_rows(&zero_grid()),
            required: grid_to_rows(required),
            solve_time_ms,
            error_message: message,
        }
    }
}

pub fn grid_to_rows(grid: &Grid) -> Vec<Vec<u32>> {
    grid.iter().map(|row| row.to_vec()).collect()
}

pub fn zero_grid() -> Grid {
    [[0u32; HOURS]; DAYS]
}
