// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time engine: how many applications of z = z² + c a
//! point survives before its magnitude exceeds the escape radius
//! of 2.
//!
//! Convention: the orbit's state is checked BEFORE each step, and the
//! result is the number of checks that passed, i.e. the number of
//! iterations completed before divergence was detected.  A point that
//! never diverges within the budget saturates at `max_iterations - 1`,
//! the palette slot reserved for the set's interior.
//!
//! There are two formulations.  `escape_time` runs one point to
//! completion with an early exit; `escape_row` advances all the
//! still-live pixels of a row in lockstep, one iteration of the
//! whole row at a time.  They must produce identical counts, a
//! property the tests pin down.

use num::Complex;

/// Escape time for a single point `c`, starting the orbit at `z0`
/// (conventionally zero for the Mandelbrot set).
///
/// Each step squares z and adds c using the decomposition
/// a² − b² + c.re / 2ab + c.im, with a² and b² computed once and
/// reused for the divergence test: four real multiplications per
/// step instead of the naive six.
///
/// `max_iterations` must be at least 1.
pub fn escape_time(z0: Complex<f64>, c: Complex<f64>, max_iterations: usize) -> usize {
    debug_assert!(max_iterations >= 1);
    let mut a = z0.re;
    let mut b = z0.im;
    let mut a2 = a * a;
    let mut b2 = b * b;
    for i in 0..max_iterations {
        if a2 + b2 > 4.0 {
            return i;
        }
        let a_next = a2 - b2 + c.re;
        b = 2.0 * a * b + c.im;
        a = a_next;
        a2 = a * a;
        b2 = b * b;
    }
    max_iterations - 1
}

/// Escape times for a whole row of points sharing one imaginary
/// coordinate, with real coordinates given by `reals`.  All pixels
/// advance in lockstep; a per-pixel accumulator counts the checks
/// passed, and is clamped to `max_iterations - 1` at the end.
///
/// A pixel is frozen at its first failing check: the orbit is no
/// longer advanced, so the check keeps failing and the count stays
/// put.  Stepping escaped pixels anyway would miscount orbits that
/// wander back inside the escape radius, which can happen for
/// nonzero starting values.  The loop stops early once every pixel
/// in the row is frozen.
///
/// `max_iterations` must be at least 1.
pub fn escape_row(
    z0: Complex<f64>,
    reals: &[f64],
    imag: f64,
    max_iterations: usize,
) -> Vec<usize> {
    debug_assert!(max_iterations >= 1);
    let width = reals.len();
    let mut a = vec![z0.re; width];
    let mut b = vec![z0.im; width];
    let mut a2 = vec![z0.re * z0.re; width];
    let mut b2 = vec![z0.im * z0.im; width];
    let mut counts = vec![0 as usize; width];

    for _ in 0..max_iterations {
        let mut alive = false;
        for x in 0..width {
            if a2[x] + b2[x] > 4.0 {
                continue;
            }
            counts[x] += 1;
            alive = true;
            let a_next = a2[x] - b2[x] + reals[x];
            b[x] = 2.0 * a[x] * b[x] + imag;
            a[x] = a_next;
            a2[x] = a[x] * a[x];
            b2[x] = b[x] * b[x];
        }
        if !alive {
            break;
        }
    }

    for count in counts.iter_mut() {
        if *count >= max_iterations {
            *count = max_iterations - 1;
        }
    }
    counts
}
