use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Double-precision complex value.
///
/// Passed by value everywhere; only the operations the evaluator and the
/// view arithmetic need are provided.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const I: Self = Self::new(0.0, 1.0);

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// `|z|²`; the escape test compares this against the threshold directly.
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// `|z|`.
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// `z²` with one multiplication fewer than `z * z`.
    #[inline]
    pub fn square(self) -> Self {
        let Self { re, im } = self;
        Self::new(re * re - im * im, 2.0 * re * im)
    }
}

/// `Add`/`Sub` and their assigning forms act on each component separately.
macro_rules! componentwise_op {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $sym:tt, $sym_assign:tt) => {
        impl $op for Complex {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self::new(self.re $sym rhs.re, self.im $sym rhs.im)
            }
        }

        impl $op_assign for Complex {
            #[inline]
            fn $method_assign(&mut self, rhs: Self) {
                self.re $sym_assign rhs.re;
                self.im $sym_assign rhs.im;
            }
        }
    };
}

componentwise_op!(Add, add, AddAssign, add_assign, +, +=);
componentwise_op!(Sub, sub, SubAssign, sub_assign, -, -=);

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// Division by a zero complex number yields non-finite components, like `f64`.
impl Div for Complex {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        let d = rhs.norm_sq();
        Self::new(
            (self.re * rhs.re + self.im * rhs.im) / d,
            (self.im * rhs.re - self.re * rhs.im) / d,
        )
    }
}

impl Neg for Complex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, k: f64) -> Self {
        Self::new(self.re * k, self.im * k)
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}

/// `a + bi` / `a - bi`; a precision such as `{:.6}` applies to both parts.
impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (sign, im) = if self.im < 0.0 { ('-', -self.im) } else { ('+', self.im) };
        match f.precision() {
            Some(p) => write!(f, "{:.*} {sign} {:.*}i", p, self.re, p, im),
            None => write!(f, "{} {sign} {}i", self.re, im),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex, b: Complex) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn componentwise_ops() {
        let mut z = Complex::new(1.0, 2.0);
        z += Complex::new(3.0, 4.0);
        assert_eq!(z, Complex::new(4.0, 6.0));
        z -= Complex::new(1.0, 1.0);
        assert_eq!(z, Complex::new(3.0, 5.0));
        assert_eq!(z - z, Complex::ZERO);
    }

    #[test]
    fn product_and_quotient() {
        let p = Complex::new(1.0, 2.0) * Complex::new(3.0, 4.0);
        assert!(close(p, Complex::new(-5.0, 10.0)));
        assert!(close(p / Complex::new(3.0, 4.0), Complex::new(1.0, 2.0)));
        assert!(close(Complex::I * Complex::I, Complex::from(-1.0)));
    }

    #[test]
    fn quotient_by_zero_is_not_finite() {
        let q = Complex::new(1.0, 1.0) / Complex::ZERO;
        assert!(!q.re.is_finite() && !q.im.is_finite());
        assert!(!(q.norm_sq() < 4.0));
    }

    #[test]
    fn square_agrees_with_product() {
        for z in [Complex::new(0.3, -1.7), Complex::new(1.0, 1.0), Complex::I] {
            assert_eq!(z.square(), z * z);
        }
    }

    #[test]
    fn negation_and_scaling() {
        assert_eq!(-Complex::new(1.0, -2.0) * 3.0, Complex::new(-3.0, 6.0));
    }

    #[test]
    fn magnitude() {
        let z = Complex::new(3.0, 4.0);
        assert_eq!(z.norm_sq(), 25.0);
        assert_eq!(z.norm(), 5.0);
    }

    #[test]
    fn formatting() {
        assert_eq!(Complex::new(1.0, 2.0).to_string(), "1 + 2i");
        assert_eq!(Complex::new(1.0, -2.0).to_string(), "1 - 2i");
        assert_eq!(format!("{:.2}", Complex::new(-0.7, 0.27015)), "-0.70 + 0.27i");
    }
}
