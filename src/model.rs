//! Builds the integer program: one count variable per surviving template,
//! coverage constraints scaled by 2 for half-hour granularity, the
//! part-timer/weekender composition caps, and the paid-hour objective.

use selen::prelude::*;

use crate::domain::{Config, Grid, DAYS, HOURS};
use crate::templates::TemplateKeys;

/// Upper bound on any single template's headcount; generous enough to
/// never bind in practice, just to keep the solver's search space finite.
const MAX_HEADCOUNT: i32 = 500;

/// A surviving template paired with its decision variable.
pub struct TemplateVars {
    pub ft: Vec<(crate::templates::FtKey, VarId)>,
    pub pt: Vec<(crate::templates::PtKey, VarId)>,
    pub wft: Vec<(crate::templates::WftKey, VarId)>,
    pub wpt: Vec<(crate::templates::WptKey, VarId)>,
}

/// Contribution (in half-hour units: 0, 1 or 2) of an FT/WFT shift hour
/// `h` (same-day, `h` in `[s, s+8]`) given its break pair.
fn shift_hour_contribution(s: u8, bs1: u8, bs2: u8, h: u8) -> i64 {
    let i = h - s;
    let slot_a = 2 * i;
    let slot_b = 2 * i + 1;
    if bs1 == slot_a || bs1 == slot_b || bs2 == slot_a || bs2 == slot_b {
        1
    } else {
        2
    }
}

/// Pushes `var` into `terms` `weight` times (weight is always 1 or 2 for
/// coverage contributions, so plain replication stands in for a weighted
/// sum without needing a multiply operator on `VarId`).
fn push_weighted(terms: &mut Vec<VarId>, var: VarId, weight: i64) {
    for _ in 0..weight {
        terms.push(var);
    }
}

/// Builds one non-negative integer variable per surviving template.
pub fn declare_variables(m: &mut Model, keys: &TemplateKeys) -> TemplateVars {
    TemplateVars {
        ft: keys.ft.iter().map(|&k| (k, m.int(0, MAX_HEADCOUNT))).collect(),
        pt: keys.pt.iter().map(|&k| (k, m.int(0, MAX_HEADCOUNT))).collect(),
        wft: keys.wft.iter().map(|&k| (k, m.int(0, MAX_HEADCOUNT))).collect(),
        wpt: keys.wpt.iter().map(|&k| (k, m.int(0, MAX_HEADCOUNT))).collect(),
    }
}

/// Adds `sum(contributions) >= 2 * required[d][h]` for every positive
/// demand cell.
pub fn add_coverage_constraints(m: &mut Model, vars: &TemplateVars, required: &Grid) {
    for d in 0..DAYS {
        for h in 0..HOURS {
            let need = required[d][h];
            if need == 0 {
                continue;
            }

            let mut terms: Vec<VarId> = Vec::new();

            for &(key, var) in &vars.ft {
                if key.day_off != d as u8 {
                    // Same-day: hour h is within [s, s+8] on day d.
                    if h as u8 >= key.start && (h as u8 - key.start) < 9 {
                        let weight = shift_hour_contribution(key.start, key.bs1, key.bs2, h as u8);
                        push_weighted(&mut terms, var, weight);
                    }
                }
                // Overnight wrap: shift started on day (d-1) mod 7, and
                // spills into raw hour h+24 of that shift's window.
                if key.start >= 20 {
                    let prior_day = (d + DAYS - 1) % DAYS;
                    if key.day_off != prior_day as u8 {
                        let raw = h as u32 + HOURS as u32;
                        if raw >= key.start as u32 && raw - (key.start as u32) < 9 {
                            let weight = shift_hour_contribution_raw(key.start, key.bs1, key.bs2, raw);
                            push_weighted(&mut terms, var, weight);
                        }
                    }
                }
            }

            for &(key, var) in &vars.pt {
                if key.day_off != d as u8
                    && h as u8 >= key.start
                    && (h as u8 - key.start) < 4
                {
                    push_weighted(&mut terms, var, 2);
                }
            }

            if d == 5 || d == 6 {
                for &(key, var) in &vars.wft {
                    if h as u8 >= key.start && (h as u8 - key.start) < 9 {
                        let weight = shift_hour_contribution(key.start, key.bs1, key.bs2, h as u8);
                        push_weighted(&mut terms, var, weight);
                    }
                }
                for &(key, var) in &vars.wpt {
                    if h as u8 >= key.start && (h as u8 - key.start) < 4 {
                        push_weighted(&mut terms, var, 2);
                    }
                }
            }

            if terms.is_empty() {
                // No surviving template can ever cover this cell; the
                // model is infeasible by construction, but we still emit
                // the constraint so the solver reports it cleanly rather
                // than silently under-covering.
                terms.push(m.int(0, 0));
            }

            let sum = m.sum(&terms);
            m.c(sum).ge(int(2 * need as i32));
        }
    }
}

/// Raw-hour variant of `shift_hour_contribution`, for overnight wrap hours
/// where the shift-relative index is computed from the unwrapped hour.
fn shift_hour_contribution_raw(s: u8, bs1: u8, bs2: u8, raw_h: u32) -> i64 {
    let i = raw_h - s as u32;
    let slot_a = 2 * i;
    let slot_b = 2 * i + 1;
    if bs1 as u32 == slot_a || bs1 as u32 == slot_b || bs2 as u32 == slot_a || bs2 as u32 == slot_b {
        1
    } else {
        2
    }
}

/// Adds the part-timer and weekender composition caps, skipped when a cap
/// is 100% (no-op) or its variable set is empty (vacuous).
pub fn add_cap_constraints(m: &mut Model, vars: &TemplateVars, config: &Config) {
    let pt_wpt: Vec<VarId> = vars.pt.iter().map(|&(_, v)| v).chain(vars.wpt.iter().map(|&(_, v)| v)).collect();
    let ft_wft: Vec<VarId> = vars.ft.iter().map(|&(_, v)| v).chain(vars.wft.iter().map(|&(_, v)| v)).collect();
    let wft_wpt: Vec<VarId> = vars.wft.iter().map(|&(_, v)| v).chain(vars.wpt.iter().map(|&(_, v)| v)).collect();
    let ft_pt: Vec<VarId> = vars.ft.iter().map(|&(_, v)| v).chain(vars.pt.iter().map(|&(_, v)| v)).collect();

    let cap_pt = config.part_timer_cap_pct;
    if cap_pt < 100 && !pt_wpt.is_empty() {
        // (100 - cap_pt) * (PT+WPT) <= cap_pt * (FT+WFT)
        let mut lhs = Vec::new();
        for &v in &pt_wpt {
            push_weighted(&mut lhs, v, 100 - cap_pt);
        }
        let mut rhs = Vec::new();
        for &v in &ft_wft {
            push_weighted(&mut rhs, v, cap_pt);
        }
        if !rhs.is_empty() {
            let lhs_sum = m.sum(&lhs);
            let rhs_sum = m.sum(&rhs);
            m.c(lhs_sum).le(rhs_sum);
        } else {
            // No FT/WFT to carry the remainder: PT/WPT must be zero.
            let lhs_sum = m.sum(&lhs);
            m.c(lhs_sum).eq(int(0));
        }
    }

    let cap_wk = config.weekender_cap_pct;
    if cap_wk < 100 && !wft_wpt.is_empty() {
        // (100 - cap_wk) * (WFT+WPT) <= cap_wk * (FT+PT)
        let mut lhs = Vec::new();
        for &v in &wft_wpt {
            push_weighted(&mut lhs, v, 100 - cap_wk);
        }
        let mut rhs = Vec::new();
        for &v in &ft_pt {
            push_weighted(&mut rhs, v, cap_wk);
        }
        if !rhs.is_empty() {
            let lhs_sum = m.sum(&lhs);
            let rhs_sum = m.sum(&rhs);
            m.c(lhs_sum).le(rhs_sum);
        } else {
            let lhs_sum = m.sum(&lhs);
            m.c(lhs_sum).eq(int(0));
        }
    }
}

/// Builds the paid-hour objective: `2*FT + 2*WFT + PT + WPT`.
pub fn objective_terms(vars: &TemplateVars) -> Vec<VarId> {
    let mut terms = Vec::new();
    for &(_, v) in &vars.ft {
        push_weighted(&mut terms, v, 2);
    }
    for &(_, v) in &vars.wft {
        push_weighted(&mut terms, v, 2);
    }
    for &(_, v) in &vars.pt {
        push_weighted(&mut terms, v, 1);
    }
    for &(_, v) in &vars.wpt {
        push_weighted(&mut terms, v, 1);
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contribution_is_one_on_break_slots_else_two() {
        // Shift starting at 9, break half-slots at (4, 10): hour 9+2=11 is
        // shift-relative slot pair (4,5); bs1=4 lands on it -> 1.
        assert_eq!(shift_hour_contribution(9, 4, 10, 11), 1);
        // hour 9+0=9 is slot pair (0,1), no break there -> 2.
        assert_eq!(shift_hour_contribution(9, 4, 10, 9), 2);
    }
}
