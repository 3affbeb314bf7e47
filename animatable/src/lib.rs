#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use core::ops::{Add, AddAssign, Sub, SubAssign};

pub use animatable_macros::*;

/// A value that can be added, subtracted and scaled, which is all interpolation
/// needs.
///
/// Implemented for `f32` and `f64`, and for every companion type generated by
/// `#[animatable]`.
pub trait VectorArithmetic:
    Copy + PartialEq + Add<Output = Self> + Sub<Output = Self> + AddAssign + SubAssign
{
    /// The additive identity.
    fn zero() -> Self;

    /// Multiplies every component by `rhs`, in place.
    fn scale(&mut self, rhs: f64);

    /// Sum of the squares of every component.
    fn magnitude_squared(&self) -> f64;

    /// Like [`VectorArithmetic::scale`], by value.
    fn scaled(mut self, rhs: f64) -> Self {
        self.scale(rhs);
        self
    }

    /// Linear interpolation: `self` at `t == 0.0`, `to` at `t == 1.0`.
    fn interpolated(self, to: Self, t: f64) -> Self {
        self + (to - self).scaled(t)
    }
}

impl VectorArithmetic for f64 {
    fn zero() -> Self {
        0.0
    }

    fn scale(&mut self, rhs: f64) {
        *self *= rhs;
    }

    fn magnitude_squared(&self) -> f64 {
        self * self
    }
}

impl VectorArithmetic for f32 {
    fn zero() -> Self {
        0.0
    }

    fn scale(&mut self, rhs: f64) {
        *self *= rhs as f32;
    }

    fn magnitude_squared(&self) -> f64 {
        (*self as f64) * (*self as f64)
    }
}

/// A type whose animatable state can be read and written as one vector.
///
/// Usually generated by `#[animatable]`.
pub trait Animatable {
    /// The vector holding every animatable field.
    type AnimatableData: VectorArithmetic;

    /// Reads the animatable fields.
    fn animatable_data(&self) -> Self::AnimatableData;

    /// Overwrites the animatable fields. Other fields are left alone.
    fn set_animatable_data(&mut self, new_value: Self::AnimatableData);

    /// Moves the animatable fields a fraction `t` of the way towards `target`.
    fn animate_towards(&mut self, target: &Self, t: f64) {
        let from = self.animatable_data();
        self.set_animatable_data(from.interpolated(target.animatable_data(), t));
    }
}

/// Marker for types `#[animatable]` may be applied to.
///
/// Implement it with `#[derive(Shape)]`.
pub trait Shape {}

/// A copy of `from` whose animatable fields are interpolated towards `to`.
///
/// Fields that are not animatable keep the values of `from`.
pub fn interpolate<A: Animatable + Clone>(from: &A, to: &A, t: f64) -> A {
    let mut out = from.clone();
    out.animate_towards(to, t);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_vectors() {
        assert_eq!(f64::zero(), 0.0);
        assert_eq!(2.0f64.scaled(1.5), 3.0);
        assert_eq!((-3.0f64).magnitude_squared(), 9.0);
        assert_eq!(0.5f32.scaled(4.0), 2.0);
        assert_eq!((-2.0f32).magnitude_squared(), 4.0);
    }

    #[test]
    fn interpolation_hits_both_ends() {
        assert_eq!(1.0f64.interpolated(5.0, 0.0), 1.0);
        assert_eq!(1.0f64.interpolated(5.0, 1.0), 5.0);
        assert_eq!(1.0f64.interpolated(5.0, 0.25), 2.0);
    }
}
