/* ************************************************************************ **
** This file is part of eamkit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[cfg(test)]
pub(crate) fn uniform(a: f64, b: f64) -> f64 { ::rand::random::<f64>() * (b - a) + a }

/// Central difference approximation to `f'(x)`.
#[cfg(test)]
pub(crate) fn num_derivative(interval: f64, x: f64, mut f: impl FnMut(f64) -> f64) -> f64 {
    (f(x + interval / 2.0) - f(x - interval / 2.0)) / interval
}

#[inline(always)]
pub(crate) fn max_of(values: &[f64]) -> f64 {
    values.iter().cloned().fold(0.0, f64::max)
}
