use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal, FractalParams, IterationResult};

/// The Mandelbrot set: orbits of `z ↦ z² + c` from `z₀ = 0`, with the
/// scanned plane point as `c`.
#[derive(Debug, Clone, Default)]
pub struct Mandelbrot {
    params: FractalParams,
}

impl Mandelbrot {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

/// Closed-form membership test for the main cardioid and the period-2 disk.
/// Both lie entirely inside the set, so their orbits need not be iterated.
#[inline]
fn in_known_interior(c: Complex) -> bool {
    let x = c.re - 0.25;
    let y2 = c.im * c.im;
    let q = x * x + y2;
    let cardioid = q * (q + x) <= 0.25 * y2;
    let bulb = (c + Complex::from(1.0)).norm_sq() <= 1.0 / 16.0;
    cardioid || bulb
}

impl Fractal for Mandelbrot {
    fn iterate(&self, c: Complex) -> IterationResult {
        if in_known_interior(c) {
            return IterationResult::Interior;
        }
        escape_time(Complex::ZERO, c, self.params.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_and_minus_one_are_interior() {
        let m = Mandelbrot::default();
        assert!(m.iterate(Complex::ZERO).is_interior());
        assert!(m.iterate(Complex::new(-1.0, 0.0)).is_interior());
    }

    #[test]
    fn escape_index_is_zero_based() {
        let m = Mandelbrot::default();
        assert_eq!(
            m.iterate(Complex::new(10.0, 0.0)),
            IterationResult::Escaped { iterations: 0 }
        );
        // c = 1: z₁ = 1 (|z|² = 1), z₂ = 2 (|z|² = 4, escaped at index 1).
        assert_eq!(
            m.iterate(Complex::new(1.0, 0.0)),
            IterationResult::Escaped { iterations: 1 }
        );
    }

    #[test]
    fn shortcut_matches_full_iteration() {
        let m = Mandelbrot::default();
        let max = FractalParams::DEFAULT_MAX_ITERATIONS;
        for &c in &[
            Complex::new(0.24, 0.0),
            Complex::new(-0.5, 0.3),
            Complex::new(-1.1, 0.1),
            Complex::new(0.1, -0.55),
            Complex::new(0.5, 0.0),
            Complex::new(-0.8, 0.2),
        ] {
            assert_eq!(m.iterate(c), escape_time(Complex::ZERO, c, max), "{c}");
        }
    }

    #[test]
    fn right_of_cusp_escapes() {
        assert!(!Mandelbrot::default()
            .iterate(Complex::new(0.5, 0.0))
            .is_interior());
    }

    #[test]
    fn circle_of_radius_two_escapes_within_budget() {
        let m = Mandelbrot::new(FractalParams::new(50).unwrap());
        for k in 0..64 {
            let angle = k as f64 * std::f64::consts::TAU / 64.0;
            let c = Complex::new(2.001 * angle.cos(), 2.001 * angle.sin());
            match m.iterate(c) {
                IterationResult::Escaped { iterations } => assert!(iterations < 50),
                IterationResult::Interior => panic!("{c} should escape"),
            }
        }
    }
}
