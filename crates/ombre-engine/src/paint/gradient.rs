use std::str::FromStr;

use crate::coords::Vec2;
use crate::error::GradientError;

use super::Rgba8;

/// The geometric mapping used to turn a pixel position into a gradient parameter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum GradientKind {
    /// Projection onto the `start → end` axis.
    #[default]
    Linear,
    /// Distance from `start`, normalized by `|end − start|`.
    Radial,
    /// Counter-clockwise sweep around `start`, starting at the `end` direction.
    Conical,
    /// Two independent linear axes; X colors blended towards Y colors along Y.
    Bilinear,
}

impl GradientKind {
    pub const ALL: [GradientKind; 4] = [
        GradientKind::Linear,
        GradientKind::Radial,
        GradientKind::Conical,
        GradientKind::Bilinear,
    ];

    /// Default unit-space `(start, end)` for this kind.
    ///
    /// For [`GradientKind::Bilinear`] this is the X axis; see [`Self::default_y_axis`].
    pub const fn default_axis(self) -> (Vec2, Vec2) {
        match self {
            GradientKind::Linear => (Vec2::new(0.5, 0.0), Vec2::new(0.5, 1.0)),
            GradientKind::Radial | GradientKind::Conical => (Vec2::new(0.5, 0.5), Vec2::new(1.0, 0.5)),
            GradientKind::Bilinear => (Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5)),
        }
    }

    /// Default unit-space `(start, end)` of the bilinear Y axis.
    pub const fn default_y_axis() -> (Vec2, Vec2) {
        (Vec2::new(0.5, 0.0), Vec2::new(0.5, 1.0))
    }

    pub const fn name(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
            GradientKind::Conical => "conical",
            GradientKind::Bilinear => "bilinear",
        }
    }

    /// Integer tag as exposed to inspector-style property panels (`0..=3`).
    pub fn from_tag(tag: i64) -> Option<Self> {
        usize::try_from(tag).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

impl FromStr for GradientKind {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(kind) = Self::ALL.iter().copied().find(|k| k.name().eq_ignore_ascii_case(s)) {
            return Ok(kind);
        }
        s.parse::<i64>()
            .ok()
            .and_then(Self::from_tag)
            .ok_or_else(|| GradientError::invalid(format!("unknown gradient kind `{s}`")))
    }
}

/// Fully-resolved input for one render pass.
///
/// Semantics:
/// - `colors` is the primary stop sequence (the X axis for bilinear).
/// - `colors2` is the bilinear Y sequence and is ignored by the other kinds.
/// - `locations` / `locations2` are optional; absent means uniformly spaced.
/// - Points are in unit space of the target; absent points take the
///   per-kind defaults from [`GradientKind::default_axis`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradientDescriptor {
    pub kind: GradientKind,
    pub colors: Vec<Rgba8>,
    pub colors2: Vec<Rgba8>,
    pub locations: Option<Vec<f32>>,
    pub locations2: Option<Vec<f32>>,
    pub start: Option<Vec2>,
    pub end: Option<Vec2>,
    pub start2: Option<Vec2>,
    pub end2: Option<Vec2>,
}

impl GradientDescriptor {
    pub fn new(kind: GradientKind, colors: Vec<Rgba8>) -> Self {
        Self {
            kind,
            colors,
            ..Self::default()
        }
    }

    pub fn linear(colors: Vec<Rgba8>) -> Self {
        Self::new(GradientKind::Linear, colors)
    }

    pub fn radial(colors: Vec<Rgba8>) -> Self {
        Self::new(GradientKind::Radial, colors)
    }

    pub fn conical(colors: Vec<Rgba8>) -> Self {
        Self::new(GradientKind::Conical, colors)
    }

    pub fn bilinear(colors_x: Vec<Rgba8>, colors_y: Vec<Rgba8>) -> Self {
        Self {
            colors2: colors_y,
            ..Self::new(GradientKind::Bilinear, colors_x)
        }
    }

    pub fn with_locations(mut self, locations: Vec<f32>) -> Self {
        self.locations = Some(locations);
        self
    }

    pub fn with_locations2(mut self, locations: Vec<f32>) -> Self {
        self.locations2 = Some(locations);
        self
    }

    pub fn with_points(mut self, start: Vec2, end: Vec2) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_points2(mut self, start: Vec2, end: Vec2) -> Self {
        self.start2 = Some(start);
        self.end2 = Some(end);
        self
    }

    /// Primary axis with defaults applied.
    pub fn axis(&self) -> (Vec2, Vec2) {
        let (s, e) = self.kind.default_axis();
        (self.start.unwrap_or(s), self.end.unwrap_or(e))
    }

    /// Bilinear Y axis with defaults applied.
    pub fn axis2(&self) -> (Vec2, Vec2) {
        let (s, e) = GradientKind::default_y_axis();
        (self.start2.unwrap_or(s), self.end2.unwrap_or(e))
    }

    /// Checks the structural preconditions of a render.
    ///
    /// Absent locations are fine. Unsorted locations are accepted because the
    /// stop interpolator tolerates them.
    pub fn validate(&self) -> Result<(), GradientError> {
        if self.colors.is_empty() {
            return Err(GradientError::invalid("colors must not be empty"));
        }
        check_locations("locations", &self.colors, self.locations.as_deref())?;
        if self.kind == GradientKind::Bilinear {
            check_locations("locations2", &self.colors2, self.locations2.as_deref())?;
        }

        let points = [
            ("start", self.start),
            ("end", self.end),
            ("start2", self.start2),
            ("end2", self.end2),
        ];
        for (name, p) in points {
            if let Some(p) = p {
                if !p.is_finite() {
                    return Err(GradientError::invalid(format!("{name} point is not finite: {p:?}")));
                }
            }
        }
        Ok(())
    }
}

fn check_locations(name: &str, colors: &[Rgba8], locations: Option<&[f32]>) -> Result<(), GradientError> {
    let Some(locations) = locations else {
        return Ok(());
    };
    if locations.len() != colors.len() {
        return Err(GradientError::invalid(format!(
            "{name} has {} entries but its color sequence has {}",
            locations.len(),
            colors.len()
        )));
    }
    if let Some(bad) = locations.iter().find(|l| !l.is_finite()) {
        return Err(GradientError::invalid(format!("{name} contains a non-finite value ({bad})")));
    }
    if locations.windows(2).any(|w| w[1] < w[0]) {
        log::debug!("{name} is not monotonically non-decreasing: {locations:?}");
    }
    Ok(())
}
