/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! A 3-vector of `f64` for separations and forces.
//!
//! Only the handful of operations needed by pairwise force loops are provided.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use eamkit_assert_close::{CheckClose, CheckCloseError, Tolerances};

/// A 3-dimensional vector with operations for linear algebra.
#[derive(Copy, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct V3(pub [f64; 3]);

impl V3 {
    #[inline(always)]
    pub fn zero() -> Self { V3([0.0; 3]) }

    #[inline(always)]
    pub fn from_fn(mut f: impl FnMut(usize) -> f64) -> Self { V3([f(0), f(1), f(2)]) }

    #[inline(always)]
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        let V3([x, y, z]) = self;
        V3([f(x), f(y), f(z)])
    }

    #[inline(always)]
    pub fn sqnorm(&self) -> f64 { dot(self, self) }

    #[inline(always)]
    pub fn norm(&self) -> f64 { self.sqnorm().sqrt() }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> { self.0.iter() }
}

#[inline(always)]
pub fn dot(a: &V3, b: &V3) -> f64 {
    a.0[0] * b.0[0] + a.0[1] * b.0[1] + a.0[2] * b.0[2]
}

impl fmt::Debug for V3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(&self.0, f) }
}

impl Index<usize> for V3 {
    type Output = f64;

    #[inline(always)]
    fn index(&self, i: usize) -> &f64 { &self.0[i] }
}

impl IndexMut<usize> for V3 {
    #[inline(always)]
    fn index_mut(&mut self, i: usize) -> &mut f64 { &mut self.0[i] }
}

impl Add for V3 {
    type Output = V3;

    #[inline(always)]
    fn add(self, other: V3) -> V3 { V3::from_fn(|k| self.0[k] + other.0[k]) }
}

impl Sub for V3 {
    type Output = V3;

    #[inline(always)]
    fn sub(self, other: V3) -> V3 { V3::from_fn(|k| self.0[k] - other.0[k]) }
}

impl Neg for V3 {
    type Output = V3;

    #[inline(always)]
    fn neg(self) -> V3 { self.map(|x| -x) }
}

impl Mul<f64> for V3 {
    type Output = V3;

    #[inline(always)]
    fn mul(self, scale: f64) -> V3 { self.map(|x| x * scale) }
}

impl Mul<V3> for f64 {
    type Output = V3;

    #[inline(always)]
    fn mul(self, v: V3) -> V3 { v * self }
}

impl Div<f64> for V3 {
    type Output = V3;

    #[inline(always)]
    fn div(self, scale: f64) -> V3 { self.map(|x| x / scale) }
}

impl AddAssign for V3 {
    #[inline(always)]
    fn add_assign(&mut self, other: V3) { *self = *self + other; }
}

impl SubAssign for V3 {
    #[inline(always)]
    fn sub_assign(&mut self, other: V3) { *self = *self - other; }
}

impl CheckClose for V3 {
    fn check_close(&self, other: &V3, tol: Tolerances) -> Result<(), CheckCloseError> {
        self.0.check_close(&other.0, tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eamkit_assert_close::assert_close;

    #[test]
    fn arithmetic() {
        let a = V3([1.0, 2.0, 2.0]);
        let b = V3([0.5, -1.0, 4.0]);
        assert_eq!(a.norm(), 3.0);
        assert_eq!(a + b, V3([1.5, 1.0, 6.0]));
        assert_eq!(a - b, V3([0.5, 3.0, -2.0]));
        assert_eq!(2.0 * a, a * 2.0);
        assert_close!(dot(&a, &b), 0.5 - 2.0 + 8.0);

        let mut acc = V3::zero();
        acc += a / 3.0;
        acc -= -b;
        assert_close!(acc, V3([1.0 / 3.0 + 0.5, 2.0 / 3.0 - 1.0, 2.0 / 3.0 + 4.0]));
    }
}
