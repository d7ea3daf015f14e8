use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;
use crate::julia::Julia;
use crate::mandelbrot::Mandelbrot;

/// Squared escape threshold: an orbit has escaped once `|z|² >= 4`, i.e. `|z| >= 2`.
///
/// Every evaluator in the workspace uses this value.
pub const ESCAPE_THRESHOLD_SQ: f64 = 4.0;

/// Which member of the quadratic family is being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalMode {
    /// The scanned point is the iterated constant; `z₀ = 0`.
    #[default]
    Mandelbrot,
    /// The scanned point is `z₀`; the constant is fixed.
    Julia,
}

impl FractalMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Mandelbrot => Self::Julia,
            Self::Julia => Self::Mandelbrot,
        }
    }
}

/// Outcome of running the recurrence for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationResult {
    /// The orbit reached the escape threshold at iteration `iterations`
    /// (zero-based, so always `< max_iterations`).
    Escaped { iterations: u32 },

    /// The orbit stayed bounded for the whole iteration budget.
    Interior,
}

impl IterationResult {
    #[inline]
    pub fn is_interior(self) -> bool {
        matches!(self, Self::Interior)
    }

    /// The escape iteration, or `None` for interior points.
    #[inline]
    pub fn iterations(self) -> Option<u32> {
        match self {
            Self::Escaped { iterations } => Some(iterations),
            Self::Interior => None,
        }
    }
}

/// Iteration budget shared by every sample of a frame. It does not scale
/// with zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FractalParams {
    /// Steps a bounded orbit must survive to count as interior; at least 1.
    pub max_iterations: u32,
}

/// Validates on load so a hand-edited preferences file cannot smuggle in a
/// zero budget.
impl<'de> Deserialize<'de> for FractalParams {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            max_iterations: u32,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.max_iterations).map_err(serde::de::Error::custom)
    }
}

impl FractalParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 500;

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        match max_iterations {
            0 => Err(CoreError::InvalidMaxIterations(0)),
            max_iterations => Ok(Self { max_iterations }),
        }
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A member of the quadratic family with its budget baked in.
///
/// Callers take `F: Fractal` generically, so each family gets its own
/// monomorphised pixel loop.
pub trait Fractal {
    /// Classify one point of the complex plane.
    fn iterate(&self, point: Complex) -> IterationResult;
}

/// Iterate `z ← z² + constant` from `z` for at most `max_iterations` steps.
///
/// NaN compares false against the threshold, so the test is written as
/// `!(norm_sq < threshold)` to count non-finite orbits as escaped.
#[inline]
pub(crate) fn escape_time(mut z: Complex, constant: Complex, max_iterations: u32) -> IterationResult {
    for n in 0..max_iterations {
        z = z.square() + constant;
        if !(z.norm_sq() < ESCAPE_THRESHOLD_SQ) {
            return IterationResult::Escaped { iterations: n };
        }
    }
    IterationResult::Interior
}

/// Evaluate one sample point in the given mode.
///
/// In Mandelbrot mode `point` drives the recurrence and `julia_constant` is
/// ignored; in Julia mode `point` is the starting value and `julia_constant`
/// is iterated.
pub fn evaluate(
    point: Complex,
    mode: FractalMode,
    julia_constant: Complex,
    params: FractalParams,
) -> IterationResult {
    match mode {
        FractalMode::Mandelbrot => Mandelbrot::new(params).iterate(point),
        FractalMode::Julia => Julia::new(julia_constant, params).iterate(point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let p = FractalParams::default();
        assert_eq!(p.max_iterations, 500);
    }

    #[test]
    fn invalid_max_iterations() {
        assert_eq!(
            FractalParams::new(0),
            Err(CoreError::InvalidMaxIterations(0))
        );
        assert!(FractalParams::new(1).is_ok());
    }

    #[test]
    fn params_deserialize_rejects_zero_budget() {
        let ok: FractalParams = serde_json::from_str(r#"{"max_iterations": 64}"#).unwrap();
        assert_eq!(ok.max_iterations, 64);
        assert!(serde_json::from_str::<FractalParams>(r#"{"max_iterations": 0}"#).is_err());
    }

    #[test]
    fn mode_toggles_back_and_forth() {
        let m = FractalMode::Mandelbrot;
        assert_eq!(m.toggled(), FractalMode::Julia);
        assert_eq!(m.toggled().toggled(), m);
    }

    #[test]
    fn threshold_is_inclusive() {
        // z₁ = 2 exactly: |z|² = 4 must count as escaped.
        let r = escape_time(Complex::ZERO, Complex::new(2.0, 0.0), 10);
        assert_eq!(r, IterationResult::Escaped { iterations: 0 });
    }

    #[test]
    fn nan_counts_as_escaped() {
        let r = escape_time(Complex::ZERO, Complex::new(f64::NAN, 0.0), 10);
        assert_eq!(r, IterationResult::Escaped { iterations: 0 });
    }

    #[test]
    fn infinite_constant_escapes_immediately() {
        let r = escape_time(Complex::ZERO, Complex::new(f64::INFINITY, 0.0), 10);
        assert_eq!(r, IterationResult::Escaped { iterations: 0 });
    }

    #[test]
    fn evaluate_dispatches_on_mode() {
        let params = FractalParams::default();
        let k = Complex::new(-0.7, 0.27015);
        let p = Complex::new(-1.9, 0.0);
        assert!(evaluate(p, FractalMode::Mandelbrot, k, params).is_interior());
        assert_eq!(
            evaluate(p, FractalMode::Julia, k, params),
            IterationResult::Escaped { iterations: 0 }
        );
    }

    #[test]
    fn iterations_accessor() {
        assert_eq!(IterationResult::Escaped { iterations: 7 }.iterations(), Some(7));
        assert_eq!(IterationResult::Interior.iterations(), None);
    }
}
