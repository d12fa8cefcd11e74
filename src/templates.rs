//! Template enumeration and pruning.
//!
//! Generates every candidate shift/day-off/break configuration permitted by
//! the shift catalogues, then drops tuples that can never help (no
//! productive hour ever intersects positive demand) or that place a break
//! on top of the demand peak.

use crate::domain::{Grid, DAYS, HOURS};

pub const FT_STARTS: &[u8] = &[5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 20, 21, 22, 23];
pub const WFT_STARTS: &[u8] = &[5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// PT and WPT share the same start-hour catalogue: 5..=20.
pub fn pt_starts() -> Vec<u8> {
    (5..=20).collect()
}

/// The weekend days, used as WFT/WPT's fixed working days.
pub const WEEKEND: [usize; 2] = [5, 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FtKey {
    pub start: u8,
    pub day_off: u8,
    pub bs1: u8,
    pub bs2: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PtKey {
    pub start: u8,
    pub day_off: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WftKey {
    pub start: u8,
    pub bs1: u8,
    pub bs2: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WptKey {
    pub start: u8,
}

#[derive(Debug, Default)]
pub struct TemplateKeys {
    pub ft: Vec<FtKey>,
    pub pt: Vec<PtKey>,
    pub wft: Vec<WftKey>,
    pub wpt: Vec<WptKey>,
}

/// All 21 valid `(bs1, bs2)` half-slot break pairs: `4 <= bs1`, `bs2 <= 13`,
/// `bs2 >= bs1 + 4`.
pub fn break_pairs() -> Vec<(u8, u8)> {
    let mut pairs = Vec::new();
    for bs1 in 4..=9u8 {
        for bs2 in (bs1 + 4)..=13u8 {
            pairs.push((bs1, bs2));
        }
    }
    pairs
}

/// Demand at raw hour `h` (may be `>= 24`, meaning "hour `h - 24` of the
/// next calendar day from `d`").
fn demand_at(oph: &Grid, d: usize, h: u32) -> u32 {
    if h < HOURS as u32 {
        oph[d][h as usize]
    } else {
        let wrap_day = (d + 1) % DAYS;
        oph[wrap_day][(h - HOURS as u32) as usize]
    }
}

/// Raw peak hours (may be `>= 24`) of the 9-hour window `[s, s+8]` for a
/// shift starting at `s` on working day `d`. Empty if all demand in the
/// window is zero.
fn peak_hours(oph: &Grid, s: u8, d: usize) -> Vec<u32> {
    let window: Vec<u32> = (0..9u32).map(|i| s as u32 + i).collect();
    let max = window.iter().map(|&h| demand_at(oph, d, h)).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }
    window.into_iter().filter(|&h| demand_at(oph, d, h) == max).collect()
}

/// Whether half-slot `b` of a shift starting at `s` is far enough from the
/// demand peak on every one of `working_days`.
fn break_half_slot_ok(oph: &Grid, s: u8, working_days: &[usize], b: u8) -> bool {
    for &d in working_days {
        for p in peak_hours(oph, s, d) {
            let lhs = 2 * s as i64 + b as i64;
            let rhs = 2 * p as i64;
            if (lhs - rhs).abs() <= 2 {
                return false;
            }
        }
    }
    true
}

fn break_pair_ok(oph: &Grid, s: u8, working_days: &[usize], bs1: u8, bs2: u8) -> bool {
    break_half_slot_ok(oph, s, working_days, bs1) && break_half_slot_ok(oph, s, working_days, bs2)
}

fn ft_working_days(day_off: u8) -> Vec<usize> {
    (0..DAYS).filter(|&d| d as u8 != day_off).collect()
}

/// True iff an FT shift starting at `s` with day off `day_off` covers at
/// least one positive-demand cell, counting overnight wrap.
fn ft_active(oph: &Grid, s: u8, day_off: u8) -> bool {
    for d in ft_working_days(day_off) {
        for i in 0..9u32 {
            let h = s as u32 + i;
            if h < HOURS as u32 {
                if oph[d][h as usize] > 0 {
                    return true;
                }
            } else {
                let wrap_day = (d + 1) % DAYS;
                if wrap_day as u8 != day_off && oph[wrap_day][(h - HOURS as u32) as usize] > 0 {
                    return true;
                }
            }
        }
    }
    false
}

fn pt_active(oph: &Grid, s: u8, day_off: u8) -> bool {
    for d in (0..DAYS).filter(|&d| d as u8 != day_off) {
        for i in 0..4u32 {
            if oph[d][(s as u32 + i) as usize] > 0 {
                return true;
            }
        }
    }
    false
}

fn wft_active(oph: &Grid, s: u8) -> bool {
    for d in WEEKEND {
        for i in 0..9u32 {
            if oph[d][(s as u32 + i) as usize] > 0 {
                return true;
            }
        }
    }
    false
}

fn wpt_active(oph: &Grid, s: u8) -> bool {
    for d in WEEKEND {
        for i in 0..4u32 {
            if oph[d][(s as u32 + i) as usize] > 0 {
                return true;
            }
        }
    }
    false
}

/// Enumerates and prunes every candidate template, gated by which worker
/// types the policy caps permit.
pub fn enumerate(
    oph: &Grid,
    permitted_days_off: &[u8],
    use_pt: bool,
    use_wft: bool,
    use_wpt: bool,
) -> TemplateKeys {
    let pairs = break_pairs();
    let mut keys = TemplateKeys::default();

    for &s in FT_STARTS {
        for &off in permitted_days_off {
            if !ft_active(oph, s, off) {
                continue;
            }
            let working_days = ft_working_days(off);
            for &(bs1, bs2) in &pairs {
                if break_pair_ok(oph, s, &working_days, bs1, bs2) {
                    keys.ft.push(FtKey { start: s, day_off: off, bs1, bs2 });
                }
            }
        }
    }

    if use_pt {
        for s in pt_starts() {
            for &off in permitted_days_off {
                if pt_active(oph, s, off) {
                    keys.pt.push(PtKey { start: s, day_off: off });
                }
            }
        }
    }

    if use_wft {
        for &s in WFT_STARTS {
            if !wft_active(oph, s) {
                continue;
            }
            for &(bs1, bs2) in &pairs {
                if break_pair_ok(oph, s, &WEEKEND, bs1, bs2) {
                    keys.wft.push(WftKey { start: s, bs1, bs2 });
                }
            }
        }
    }

    if use_wpt {
        for s in pt_starts() {
            if wpt_active(oph, s) {
                keys.wpt.push(WptKey { start: s });
            }
        }
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_pairs_count_is_21() {
        assert_eq!(break_pairs().len(), 21);
        for &(a, b) in &break_pairs() {
            assert!(a >= 4);
            assert!(b <= 13);
            assert!(b >= a + 4);
        }
    }

    #[test]
    fn zero_demand_yields_no_active_templates() {
        let oph = crate::domain::zero_grid();
        let keys = enumerate(&oph, &[0, 1, 2, 3, 4, 5, 6], true, true, true);
        assert!(keys.ft.is_empty());
        assert!(keys.pt.is_empty());
        assert!(keys.wft.is_empty());
        assert!(keys.wpt.is_empty());
    }

    #[test]
    fn disabling_part_timers_drops_pt_and_wpt() {
        let mut oph = crate::domain::zero_grid();
        oph[0][9] = 20;
        oph[5][9] = 20;
        let keys = enumerate(&oph, &[0, 1, 2, 3, 4], false, true, false);
        assert!(keys.pt.is_empty());
        assert!(keys.wpt.is_empty());
    }

    #[test]
    fn single_hour_weekday_demand_admits_a_covering_ft_template() {
        let mut oph = crate::domain::zero_grid();
        oph[0][9] = 20;
        let keys = enumerate(&oph, &[0, 1, 2, 3, 4], false, false, false);
        assert!(keys
            .ft
            .iter()
            .any(|k| k.day_off != 0 && k.start <= 9 && 9 < k.start as u32 + 9));
    }

    #[test]
    fn overnight_shift_reaches_next_day_hour() {
        let mut oph = crate::domain::zero_grid();
        // Tue (day 1) hour 1 has demand; only an FT starting at s>=20 on Mon
        // (day 0) can reach it via wrap.
        oph[1][1] = 40;
        let keys = enumerate(&oph, &[0, 1, 2, 3, 4, 5, 6], false, false, false);
        assert!(keys.ft.iter().any(|k| k.start >= 20 && k.day_off != 0));
    }
}
