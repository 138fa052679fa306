//! Gradient field evaluator.
//!
//! Maps a pixel position to the scalar gradient parameter `t` (or a pair
//! `(tx, ty)` for bilinear gradients). Nothing here clamps: `t` may fall
//! outside `[0, 1]` and resolving that is the stop ramp's job.
//!
//! Unit-space points are mapped onto pixel centers: unit `0` is the first
//! pixel and unit `1` the last one along each axis.

use std::f32::consts::TAU;

use crate::coords::{PixelSize, Vec2};
use crate::paint::{GradientDescriptor, GradientKind};

/// Geometry vectors shorter than this are treated as zero-length.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// A `start → end` pair in pixel space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Axis {
    pub start: Vec2,
    pub end: Vec2,
}

impl Axis {
    #[inline]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Maps unit-space points onto a raster of `size`.
    pub fn from_unit(start: Vec2, end: Vec2, size: PixelSize) -> Self {
        let span = Vec2::new(
            size.width.saturating_sub(1) as f32,
            size.height.saturating_sub(1) as f32,
        );
        let to_px = |u: Vec2| Vec2::new(u.x * span.x, u.y * span.y);
        Self::new(to_px(start), to_px(end))
    }

    #[inline]
    pub fn direction(self) -> Vec2 {
        self.end - self.start
    }
}

/// Projection of `p` onto the axis, normalized so `start` is 0 and `end` is 1.
///
/// A zero-length axis yields `0.0`.
#[inline]
pub fn linear_t(p: Vec2, axis: Axis) -> f32 {
    let d = axis.direction();
    let len2 = d.length_squared();
    if len2 <= DEGENERATE_EPSILON {
        return 0.0;
    }
    (p - axis.start).dot(d) / len2
}

/// Distance from `axis.start`, in units of `|end − start|`.
///
/// A zero radius yields `0.0`.
#[inline]
pub fn radial_t(p: Vec2, axis: Axis) -> f32 {
    let radius = axis.direction().length();
    if radius <= DEGENERATE_EPSILON {
        return 0.0;
    }
    (p - axis.start).length() / radius
}

/// Counter-clockwise angle of `p` around `axis.start`, measured from the
/// `start → end` direction, as a fraction of a full turn in `[0, 1)`.
///
/// A zero-length reference direction measures from the +X axis.
#[inline]
pub fn conical_t(p: Vec2, axis: Axis) -> f32 {
    let angle = (p - axis.start).angle() - axis.direction().angle();
    let t = angle.rem_euclid(TAU) / TAU;
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if t >= 1.0 { 0.0 } else { t }
}

/// Result of evaluating a [`Field`] at one position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FieldSample {
    Scalar(f32),
    Pair { tx: f32, ty: f32 },
}

/// A gradient mapping resolved against a concrete raster size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Field {
    Linear(Axis),
    Radial(Axis),
    Conical(Axis),
    Bilinear { x: Axis, y: Axis },
}

impl Field {
    /// Applies per-kind defaults to the descriptor's points and maps them to pixel space.
    pub fn resolve(descriptor: &GradientDescriptor, size: PixelSize) -> Self {
        let (start, end) = descriptor.axis();
        let axis = Axis::from_unit(start, end, size);
        match descriptor.kind {
            GradientKind::Linear => Field::Linear(axis),
            GradientKind::Radial => Field::Radial(axis),
            GradientKind::Conical => Field::Conical(axis),
            GradientKind::Bilinear => {
                let (start2, end2) = descriptor.axis2();
                Field::Bilinear {
                    x: axis,
                    y: Axis::from_unit(start2, end2, size),
                }
            }
        }
    }

    #[inline]
    pub fn sample(&self, p: Vec2) -> FieldSample {
        match *self {
            Field::Linear(axis) => FieldSample::Scalar(linear_t(p, axis)),
            Field::Radial(axis) => FieldSample::Scalar(radial_t(p, axis)),
            Field::Conical(axis) => FieldSample::Scalar(conical_t(p, axis)),
            Field::Bilinear { x, y } => FieldSample::Pair {
                tx: linear_t(p, x),
                ty: linear_t(p, y),
            },
        }
    }
}
