// Scale primitives - domain values to pixel coordinates
use chrono::NaiveDate;

/// Continuous scale over `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if (d1 - d0).abs() < f64::EPSILON {
            0.5
        } else {
            (value - d0) / (d1 - d0)
        };
        r0 + t * (r1 - r0)
    }

    /// Extend the domain outward to multiples of a round tick step.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut d0, mut d1) = self.domain;
        let reversed = d1 < d0;
        if reversed {
            std::mem::swap(&mut d0, &mut d1);
        }

        let mut previous = 0.0;
        for _ in 0..10 {
            let step = tick_increment(d0, d1, count);
            if step == previous || !step.is_finite() || step <= 0.0 {
                break;
            }
            d0 = (d0 / step + 1e-9).floor() * step;
            d1 = (d1 / step - 1e-9).ceil() * step;
            previous = step;
        }

        self.domain = if reversed { (d1, d0) } else { (d0, d1) };
        self
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        if (hi - lo).abs() < f64::EPSILON {
            return vec![lo];
        }
        let step = tick_increment(lo, hi, count);
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }
        let start = (lo / step - 1e-9).ceil() as i64;
        let stop = (hi / step + 1e-9).floor() as i64;
        (start..=stop).map(|i| round_to_step(i as f64 * step, step)).collect()
    }

    /// Label formatter matched to the tick step (`10`, `2.5`, `0.25`, ...).
    pub fn tick_format(&self, count: usize) -> impl Fn(f64) -> String {
        let (lo, hi) = ordered(self.domain);
        let step = tick_increment(lo, hi, count);
        let decimals = if step.is_finite() && step > 0.0 && step < 1.0 {
            step_decimals(step)
        } else {
            0
        };
        move |value: f64| format!("{:.*}", decimals, value)
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn round_to_step(value: f64, step: f64) -> f64 {
    if step >= 1.0 {
        value.round()
    } else {
        let factor = 10f64.powi(step_decimals(step) as i32 + 1);
        (value * factor).round() / factor
    }
}

fn step_decimals(step: f64) -> usize {
    (-step.log10() - 1e-9).ceil().max(0.0) as usize
}

/// Step of 1, 2 or 5 times a power of ten giving about `count` ticks.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start) / count.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return f64::NAN;
    }
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        factor / 10f64.powf(-power)
    }
}

/// Continuous scale over calendar dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        let inner = LinearScale::new((0.0, (domain.1 - domain.0).num_days() as f64), range);
        Self { domain, inner }
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn map(&self, date: NaiveDate) -> f64 {
        self.inner.map((date - self.domain.0).num_days() as f64)
    }
}

/// Ordinal scale dividing a range into uniform bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<K> {
    domain: Vec<K>,
    range: (f64, f64),
    step: f64,
    bandwidth: f64,
    start: f64,
}

impl<K: PartialEq + Clone> BandScale<K> {
    /// Bands with equal inner and outer `padding` (a fraction of the step).
    pub fn new(domain: Vec<K>, range: (f64, f64), padding: f64) -> Self {
        let n = domain.len() as f64;
        let (r0, r1) = range;
        let span = r1 - r0;
        let step = span / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (span - step * (n - padding)) * 0.5;
        let bandwidth = step * (1.0 - padding);
        Self {
            domain,
            range,
            step,
            bandwidth,
            start,
        }
    }

    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Start of the band for `key`, `None` for keys outside the domain.
    pub fn position(&self, key: &K) -> Option<f64> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Centre of the band for `key`.
    pub fn center(&self, key: &K) -> Option<f64> {
        self.position(key).map(|p| p + self.bandwidth / 2.0)
    }
}
