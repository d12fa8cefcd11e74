//! Deterministic synthetic demand generators, for `/demo-data` and for
//! exercising the solver beyond the literal scenario grids in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Config, SolverInput, DAYS, HOURS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSize {
    Small,
    Large,
}

impl std::str::FromStr for DemoSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoSize::Small),
            "LARGE" => Ok(DemoSize::Large),
            _ => Err(()),
        }
    }
}

pub fn list() -> Vec<&'static str> {
    vec!["SMALL", "LARGE"]
}

/// A bell-ish curve peaking at `peak_hour`, scaled by `amplitude`, with a
/// small seeded jitter so the grid isn't perfectly smooth.
fn daily_curve(rng: &mut StdRng, peak_hour: i32, amplitude: u32, floor: u32) -> [u32; HOURS] {
    let mut row = [0u32; HOURS];
    for (h, cell) in row.iter_mut().enumerate() {
        let distance = (h as i32 - peak_hour).abs().min(12);
        let base = amplitude.saturating_sub((distance as u32) * (amplitude / 12).max(1));
        let jitter = rng.gen_range(0..=(amplitude / 10).max(1));
        *cell = floor + base + jitter;
    }
    row
}

/// Generates a demo `SolverInput` for the given size.
pub fn generate(size: DemoSize) -> SolverInput {
    let mut rng = StdRng::seed_from_u64(0);

    let (amplitude, floor, rate, pt_cap, wk_cap, allow_weekend) = match size {
        DemoSize::Small => (60u32, 5u32, 20i64, 30i64, 20i64, false),
        DemoSize::Large => (220u32, 20u32, 20i64, 40i64, 30i64, true),
    };

    let mut oph = vec![vec![0i64; HOURS]; DAYS];
    for d in 0..DAYS {
        // Weekends (5, 6) run a later, broader peak than weekdays.
        let peak_hour = if d < 5 { 12 } else { 15 };
        let day_amplitude = if d < 5 { amplitude } else { amplitude * 12 / 10 };
        let row = daily_curve(&mut rng, peak_hour, day_amplitude, floor);
        for h in 0..HOURS {
            // Quiet overnight hours (0-4) stay at zero demand regardless
            // of the curve's floor, so overnight FT templates only get
            // enumerated when a scenario explicitly wants them.
            oph[d][h] = if (0..5).contains(&h) { 0 } else { row[h] as i64 };
        }
    }

    SolverInput {
        oph,
        config: Config {
            productivity_rate: rate,
            part_timer_cap_pct: pt_cap,
            weekender_cap_pct: wk_cap,
            allow_weekend_day_off: allow_weekend,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_and_large_have_the_right_shape() {
        for size in [DemoSize::Small, DemoSize::Large] {
            let input = generate(size);
            assert_eq!(input.oph.len(), DAYS);
            assert!(input.oph.iter().all(|row| row.len() == HOURS));
            assert!(input.oph.iter().all(|row| row.iter().all(|&v| v >= 0)));
        }
    }

    #[test]
    fn overnight_hours_are_quiet() {
        let input = generate(DemoSize::Large);
        for row in &input.oph {
            for h in 0..5 {
                assert_eq!(row[h], 0);
            }
        }
    }

    #[test]
    fn demo_size_from_str_is_case_insensitive() {
        assert_eq!("small".parse::<DemoSize>(), Ok(DemoSize::Small));
        assert_eq!("LARGE".parse::<DemoSize>(), Ok(DemoSize::Large));
        assert!("bogus".parse::<DemoSize>().is_err());
    }
}
