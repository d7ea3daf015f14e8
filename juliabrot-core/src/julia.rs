use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal, FractalParams, IterationResult};

/// Filled Julia set of `z ↦ z² + k` for one fixed `k`.
///
/// Each scanned plane point is used as the orbit's starting value.
#[derive(Debug, Clone)]
pub struct Julia {
    constant: Complex,
    params: FractalParams,
}

impl Julia {
    /// `k = -0.7 + 0.27015i`, a connected set with plenty of spiral detail.
    pub const SHOWCASE_CONSTANT: Complex = Complex::new(-0.7, 0.27015);

    pub fn new(constant: Complex, params: FractalParams) -> Self {
        Self { constant, params }
    }
}

impl Fractal for Julia {
    fn iterate(&self, z0: Complex) -> IterationResult {
        escape_time(z0, self.constant, self.params.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squaring_map() -> Julia {
        Julia::new(Complex::ZERO, FractalParams::default())
    }

    #[test]
    fn distant_start_escapes_on_first_step() {
        let j = Julia::new(Julia::SHOWCASE_CONSTANT, FractalParams::default());
        assert_eq!(
            j.iterate(Complex::new(10.0, 0.0)),
            IterationResult::Escaped { iterations: 0 }
        );
    }

    #[test]
    fn squaring_map_keeps_unit_disk() {
        // z ↦ z²: the origin is fixed and anything inside |z| < 1 shrinks.
        let j = squaring_map();
        assert!(j.iterate(Complex::ZERO).is_interior());
        assert!(j.iterate(Complex::new(0.5, 0.5)).is_interior());
        // 1.2² = 1.44, 1.44² ≈ 2.07 → |z|² ≈ 4.3, escapes at index 1.
        assert_eq!(
            j.iterate(Complex::new(1.2, 0.0)),
            IterationResult::Escaped { iterations: 1 }
        );
    }

    #[test]
    fn scanned_point_is_the_starting_value() {
        // z₀ = 2i lands on -4 after one squaring.
        assert_eq!(
            squaring_map().iterate(Complex::new(0.0, 2.0)),
            IterationResult::Escaped { iterations: 0 }
        );
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let j = Julia::new(Julia::SHOWCASE_CONSTANT, FractalParams::new(200).unwrap());
        for &p in &[
            Complex::ZERO,
            Complex::new(0.5, 0.5),
            Complex::new(-1.0, 0.3),
            Complex::I,
        ] {
            assert_eq!(j.iterate(p), j.iterate(p), "{p}");
        }
    }
}
