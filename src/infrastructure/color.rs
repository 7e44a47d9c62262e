// Colour scales: categorical schemes and sequential interpolation

/// ColorBrewer Set2, used for categorical series.
pub const SET2: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

/// ColorBrewer YlGnBu (9 classes), light to dark.
const YL_GN_BU: [(u8, u8, u8); 9] = [
    (0xff, 0xff, 0xd9),
    (0xed, 0xf8, 0xb1),
    (0xc7, 0xe9, 0xb4),
    (0x7f, 0xcd, 0xbb),
    (0x41, 0xb6, 0xc4),
    (0x1d, 0x91, 0xc0),
    (0x22, 0x5e, 0xa8),
    (0x25, 0x34, 0x94),
    (0x08, 0x1d, 0x58),
];

/// Colour at `t` in `[0, 1]` along the YlGnBu ramp, as `rgb(r, g, b)`.
pub fn interpolate_yl_gn_bu(t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (YL_GN_BU.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(YL_GN_BU.len() - 2);
    let frac = scaled - i as f64;
    let (a, b) = (YL_GN_BU[i], YL_GN_BU[i + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    format!("rgb({}, {}, {})", lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Maps a value in `[lo, hi]` onto the YlGnBu ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct SequentialColor {
    domain: (f64, f64),
}

impl SequentialColor {
    pub fn new(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn color(&self, value: f64) -> String {
        let (lo, hi) = self.domain;
        let t = if (hi - lo).abs() < f64::EPSILON {
            0.0
        } else {
            (value - lo) / (hi - lo)
        };
        interpolate_yl_gn_bu(t)
    }
}

/// Assigns scheme colours to keys by position in a declared domain.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalColor {
    domain: Vec<String>,
    scheme: &'static [&'static str],
}

impl OrdinalColor {
    pub fn new(domain: Vec<String>, scheme: &'static [&'static str]) -> Self {
        Self { domain, scheme }
    }

    pub fn color(&self, key: &str) -> &'static str {
        let index = self.domain.iter().position(|k| k == key).unwrap_or(0);
        self.scheme[index % self.scheme.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(interpolate_yl_gn_bu(0.0), "rgb(255, 255, 217)");
        assert_eq!(interpolate_yl_gn_bu(1.0), "rgb(8, 29, 88)");
        assert_eq!(interpolate_yl_gn_bu(7.5), interpolate_yl_gn_bu(1.0));
    }

    #[test]
    fn test_sequential_color_uses_domain() {
        let color = SequentialColor::new((0.0, 10.0));
        assert_eq!(color.color(0.0), interpolate_yl_gn_bu(0.0));
        assert_eq!(color.color(10.0), interpolate_yl_gn_bu(1.0));
        assert_eq!(color.color(5.0), interpolate_yl_gn_bu(0.5));
    }

    #[test]
    fn test_ordinal_color_keeps_positions() {
        let color = OrdinalColor::new(vec!["house".into(), "condo".into()], &SET2);
        assert_eq!(color.color("house"), "#66c2a5");
        assert_eq!(color.color("condo"), "#fc8d62");
    }
}
