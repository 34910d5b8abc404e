// File: crates/chart-core/src/grid.rs
// Summary: Tick step selection, nice domain rounding and tick value generation.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Step between ticks for roughly `count` ticks over [start, stop].
/// Positive values are the step itself; negative values are the reciprocal of
/// the step (used for sub-unit steps to avoid float error, e.g. -10 means 0.1).
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !(step > 0.0) || !step.is_finite() {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power < 0.0 {
        -10f64.powf(-power) / factor
    } else {
        factor * 10f64.powf(power)
    }
}

/// Round [start, stop] outward to multiples of the tick step, repeating while
/// the step keeps changing.
pub fn nice(mut start: f64, mut stop: f64, count: usize) -> (f64, f64) {
    let reversed = stop < start;
    if reversed {
        std::mem::swap(&mut start, &mut stop);
    }
    let mut prestep = f64::NAN;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if step == prestep || step == 0.0 || !step.is_finite() {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        }
        prestep = step;
    }
    if reversed { (stop, start) } else { (start, stop) }
}

/// Evenly spaced tick values inside [start, stop], inclusive.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let inc = tick_increment(lo, hi, count);
    if inc == 0.0 || !inc.is_finite() {
        return Vec::new();
    }
    let mut out = if inc > 0.0 {
        let i1 = (lo / inc).ceil() as i64;
        let i2 = (hi / inc).floor() as i64;
        (i1..=i2).map(|i| i as f64 * inc).collect::<Vec<_>>()
    } else {
        let inv = -inc;
        let i1 = (lo * inv).ceil() as i64;
        let i2 = (hi * inv).floor() as i64;
        (i1..=i2).map(|i| i as f64 / inv).collect::<Vec<_>>()
    };
    if start > stop {
        out.reverse();
    }
    out
}
