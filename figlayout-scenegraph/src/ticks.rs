//! Nice-number tick locator.
//!
//! The number of ticks follows the physical length of an axis, so resizing a
//! panel changes its tick labels and therefore its decoration footprint.

/// Physical spacing the locator aims for between neighbouring ticks
pub const TICK_SPACING_INCHES: f64 = 0.6;

const MIN_TICK_COUNT: f64 = 2.0;
const MAX_TICK_COUNT: f64 = 10.0;

/// Generate about `count` nicely rounded values between `start` and `stop`
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if count <= 0.0 || count.is_nan() {
        return vec![];
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if i2 < i1 || i1.is_nan() || i2.is_nan() {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    if reverse {
        (0..n).map(|i| value(i2 - i as f64)).collect()
    } else {
        (0..n).map(|i| value(i1 + i as f64)).collect()
    }
}

/// Tick index range and increment. A negative increment stands for the
/// reciprocal of a power-of-ten step, which keeps the ticks exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10.0_f64.powf(power);
    let factor = nice_factor(error);

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let temp_inc = 10.0_f64.powf(-power) / factor;
        i1 = (start * temp_inc).round();
        i2 = (stop * temp_inc).round();
        if i1 / temp_inc < start {
            i1 += 1.0;
        }
        if i2 / temp_inc > stop {
            i2 -= 1.0;
        }
        inc = -temp_inc;
    } else {
        inc = 10.0_f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn nice_factor(error: f64) -> f64 {
    if error >= 50.0_f64.sqrt() {
        10.0
    } else if error >= 10.0_f64.sqrt() {
        5.0
    } else if error >= 2.0_f64.sqrt() {
        2.0
    } else {
        1.0
    }
}

/// Step between ticks generated by [`ticks`] for the same arguments
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    if !(count > 0.0) {
        return f64::NAN;
    }
    if start == stop {
        return f64::NEG_INFINITY;
    }
    let step = (stop - start).abs() / count;
    if step == 0.0 {
        return f64::NAN;
    }
    let power = step.log10().floor();
    let error = step / 10.0_f64.powf(power);
    10.0_f64.powf(power) * nice_factor(error)
}

/// Number of ticks requested for an axis of the given physical length
pub fn tick_count(length_inches: f64) -> f64 {
    (length_inches / TICK_SPACING_INCHES)
        .round()
        .clamp(MIN_TICK_COUNT, MAX_TICK_COUNT)
}

/// Format a tick value with just enough decimals for the tick increment
pub fn format_tick(value: f64, increment: f64) -> String {
    let decimals = if increment.is_finite() && increment > 0.0 {
        (-increment.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let text = format!("{value:.decimals$}");
    // avoid "-0" and "-0.0"
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

/// Tick values and labels for an axis with data limits `lim` and the
/// given physical length. Inverted limits are supported.
pub fn locate_ticks(lim: [f64; 2], length_inches: f64) -> Vec<(f64, String)> {
    let count = tick_count(length_inches);
    let increment = tick_increment(lim[0], lim[1], count);
    ticks(lim[0], lim[1], count)
        .into_iter()
        .map(|v| (v, format_tick(v, increment)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_ticks_unit_interval() {
        let t = ticks(0.0, 1.0, 5.0);
        let expected = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
        assert_eq!(t.len(), expected.len());
        for (a, b) in t.iter().zip(expected) {
            assert_approx_eq!(f64, *a, b);
        }
    }

    #[test]
    fn test_ticks_reverse_and_degenerate() {
        assert_eq!(ticks(10.0, 0.0, 2.0), vec![10.0, 5.0, 0.0]);
        assert_eq!(ticks(3.0, 3.0, 5.0), vec![3.0]);
        assert!(ticks(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn test_tick_increment() {
        assert_approx_eq!(f64, tick_increment(0.0, 1.0, 5.0), 0.2);
        assert_approx_eq!(f64, tick_increment(0.0, 100.0, 10.0), 10.0);
    }

    #[test]
    fn test_tick_count_follows_length() {
        assert_eq!(tick_count(0.5), 2.0);
        assert_eq!(tick_count(3.0), 5.0);
        assert_eq!(tick_count(30.0), 10.0);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.2, 0.2), "0.2");
        assert_eq!(format_tick(1000.0, 500.0), "1000");
        assert_eq!(format_tick(-0.0, 0.5), "0.0");
        assert_eq!(format_tick(0.05, 0.05), "0.05");
    }

    #[test]
    fn test_longer_axis_gets_more_labels() {
        let short = locate_ticks([0.0, 1.0], 1.2);
        let long = locate_ticks([0.0, 1.0], 6.0);
        assert!(long.len() > short.len());
        assert_eq!(short.first().map(|t| t.1.as_str()), Some("0.0"));
    }
}
