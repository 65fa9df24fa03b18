//! Grid quantizer
//!
//! Snaps every position to the nearest multiple of 1/d quarter note for a
//! set of divisors d (default 4 and 3: sixteenths and eighth triplets). The
//! divisor with the smallest error wins; ties go to the earlier divisor.

use super::traits::Quantizer;
use crate::model::lcm;
use anyhow::{bail, Result};

/// Default grid: sixteenth notes and eighth-note triplets
const DEFAULT_DIVISORS: [u32; 2] = [4, 3];
/// LCM of the default divisors
const DEFAULT_DIVISIONS: u32 = 12;

/// Quantizer snapping to a grid of quarter-note subdivisions
#[derive(Debug, Clone)]
pub struct GridQuantizer {
    divisors: Vec<u32>,
    divisions: u32,
}

impl GridQuantizer {
    /// Create a quantizer for the given quarter-note divisors, in preference order
    pub fn new(divisors: Vec<u32>) -> Result<Self> {
        if divisors.is_empty() {
            bail!("Quantization grid needs at least one divisor");
        }
        if let Some(bad) = divisors.iter().find(|&&d| d == 0 || d > 64) {
            bail!("Quantization divisor {} out of range (1-64)", bad);
        }
        let divisions = grid_divisions(&divisors)?;
        Ok(Self {
            divisors,
            divisions,
        })
    }

    pub fn divisors(&self) -> &[u32] {
        &self.divisors
    }

    /// Best grid point for `ticks`: (position in divisions, divisor used)
    fn snap(&self, ticks: u64, ticks_per_quarter: u16) -> (u64, u32) {
        let tpq = ticks_per_quarter.max(1) as u128;
        let ticks = ticks as u128;

        let mut best: Option<(u64, u32, u128, u128)> = None;
        for &divisor in &self.divisors {
            let d = divisor as u128;
            // Round half up: steps = round(ticks * d / tpq)
            let steps = (2 * ticks * d + tpq) / (2 * tpq);
            // Error as a fraction: |steps * tpq - ticks * d| / (d * tpq)
            let error_num = (steps * tpq).abs_diff(ticks * d);
            let error_den = d * tpq;

            let better = match best {
                None => true,
                Some((_, _, best_num, best_den)) => error_num * best_den < best_num * error_den,
            };
            if better {
                let units = steps as u64 * (self.divisions / divisor) as u64;
                best = Some((units, divisor, error_num, error_den));
            }
        }

        best.map(|(units, divisor, ..)| (units, divisor))
            .unwrap_or((0, 1))
    }
}

/// Divisions per quarter needed to hold every divisor's grid
fn grid_divisions(divisors: &[u32]) -> Result<u32> {
    let divisions = divisors.iter().fold(1u64, |acc, &d| lcm(acc, d as u64));
    match u32::try_from(divisions) {
        Ok(divisions) => Ok(divisions),
        Err(_) => bail!(
            "Quantization grid {:?} needs {} divisions per quarter, more than MusicXML output can hold",
            divisors,
            divisions
        ),
    }
}

impl Default for GridQuantizer {
    fn default() -> Self {
        Self {
            divisors: DEFAULT_DIVISORS.to_vec(),
            divisions: DEFAULT_DIVISIONS,
        }
    }
}

impl Quantizer for GridQuantizer {
    fn divisions(&self, _ticks_per_quarter: u16) -> u32 {
        self.divisions
    }

    fn offset(&self, ticks: u64, ticks_per_quarter: u16) -> u64 {
        self.snap(ticks, ticks_per_quarter).0
    }

    fn duration(&self, ticks: u64, ticks_per_quarter: u16) -> u64 {
        let (units, divisor) = self.snap(ticks, ticks_per_quarter);
        if units == 0 && ticks > 0 {
            // Too short for the grid: keep one step of the winning divisor
            (self.divisions / divisor) as u64
        } else {
            units
        }
    }
}
