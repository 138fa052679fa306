//! Stop interpolator.
//!
//! Resolves a gradient parameter `t` to a color by locating the pair of stops
//! that brackets `t` and blending between them.

use crate::error::GradientError;
use crate::paint::Rgba8;

/// A single gradient stop.
///
/// `location` is expected in `[0, 1]`, but is not strictly enforced.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub location: f32,
    pub color: Rgba8,
}

impl ColorStop {
    #[inline]
    pub const fn new(location: f32, color: Rgba8) -> Self {
        Self { location, color }
    }
}

/// Uniformly spaced stop locations: stop `i` of `n` sits at `i / (n − 1)`.
///
/// A single stop sits at `0.0`.
pub fn uniform_locations(n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f32;
            (0..n).map(|i| i as f32 / last).collect()
        }
    }
}

/// Ordered, non-empty sequence of color stops for one gradient axis.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRamp {
    stops: Vec<ColorStop>,
}

impl StopRamp {
    /// Pairs `colors` with `locations`, or with uniform locations when absent.
    pub fn new(colors: &[Rgba8], locations: Option<&[f32]>) -> Result<Self, GradientError> {
        if colors.is_empty() {
            return Err(GradientError::invalid("a stop ramp needs at least one color"));
        }
        let locations = match locations {
            Some(l) if l.len() != colors.len() => {
                return Err(GradientError::invalid(format!(
                    "{} locations supplied for {} colors",
                    l.len(),
                    colors.len()
                )));
            }
            Some(l) => l.to_vec(),
            None => uniform_locations(colors.len()),
        };

        let stops = colors
            .iter()
            .zip(locations)
            .map(|(&color, location)| ColorStop::new(location, color))
            .collect();
        Ok(Self { stops })
    }

    /// Single-stop ramp; samples to `color` everywhere.
    pub fn constant(color: Rgba8) -> Self {
        Self { stops: vec![ColorStop::new(0.0, color)] }
    }

    /// Two stops at `0.0` and `1.0`.
    pub fn two(c0: Rgba8, c1: Rgba8) -> Self {
        Self {
            stops: vec![ColorStop::new(0.0, c0), ColorStop::new(1.0, c1)],
        }
    }

    #[inline]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Resolves `t` to a color.
    ///
    /// The bracket search is a linear scan seeded with `(0, first)` and
    /// `(1, last)`, so unsorted locations still produce a color and values at
    /// exactly `0` or `1` match their stops. Among equal locations the lower
    /// bracket takes the later stop and the upper bracket the earlier one,
    /// which turns duplicate locations into a hard edge.
    pub fn sample(&self, t: f32) -> Rgba8 {
        let (first, last) = match self.stops.as_slice() {
            [only] => return only.color,
            [first, .., last] => (first, last),
            [] => return Rgba8::transparent(),
        };

        let (mut p0, mut c0) = (0.0f32, first.color);
        let (mut p1, mut c1) = (1.0f32, last.color);

        for stop in &self.stops {
            let v = stop.location;
            if v >= p0 && t >= v {
                p0 = v;
                c0 = stop.color;
            }
            if v < p1 && t <= v {
                p1 = v;
                c1 = stop.color;
            }
        }

        let local = if p0 == p1 { 0.0 } else { (t - p0) / (p1 - p0) };
        c0.lerp(c1, local)
    }
}
