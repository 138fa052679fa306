use bytemuck::{Pod, Zeroable};

/// 8-bit premultiplied RGBA color.
///
/// Invariant:
/// - `r`, `g`, `b` are expected to be multiplied by `a` (premultiplied alpha).
///
/// The layout is `#[repr(C)]` in `r, g, b, a` order so a pixel slice can be
/// handed to consumers as raw RGBA bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8, // premultiplied
    pub g: u8, // premultiplied
    pub b: u8, // premultiplied
    pub a: u8,
}

impl Rgba8 {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Creates a color from already premultiplied components.
    #[inline]
    pub const fn from_premul(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color; premultiplication is a no-op at full alpha.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a premultiplied color from straight-alpha bytes.
    #[inline]
    pub fn from_straight(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Creates a premultiplied color from straight `f32` components.
    ///
    /// Components are clamped to `[0, 1]`, scaled by 255 and truncated.
    pub fn from_unit_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::from_straight(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a))
    }

    /// Grayscale color from a white level and alpha, both straight.
    #[inline]
    pub fn gray(white: u8, alpha: u8) -> Self {
        Self::from_straight(white, white, white, alpha)
    }

    /// Returns the straight-alpha representation as `[r, g, b, a]`.
    ///
    /// For `a == 0`, RGB is returned as 0.
    pub fn to_straight(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let a = self.a as u32;
        let un = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
        [un(self.r), un(self.g), un(self.b), self.a]
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    /// Per-channel linear blend towards `other`.
    ///
    /// `t` is clamped to `[0, 1]`; each channel is `a + t·(b − a)` truncated
    /// towards zero.
    #[inline]
    pub fn lerp(self, other: Rgba8, t: f32) -> Rgba8 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Rgba8 {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
            a: lerp_channel(self.a, other.a, t),
        }
    }

    /// Premultiplied source-over: `self` composited on top of `dst`.
    pub fn over(self, dst: Rgba8) -> Rgba8 {
        let inv = 255 - self.a as u32;
        let ch = |s: u8, d: u8| (s as u32 + (d as u32 * inv + 127) / 255).min(255) as u8;
        Rgba8 {
            r: ch(self.r, dst.r),
            g: ch(self.g, dst.g),
            b: ch(self.b, dst.b),
            a: ch(self.a, dst.a),
        }
    }
}

#[inline]
fn premul(c: u8, a: u8) -> u8 {
    ((c as u32 * a as u32 + 127) / 255) as u8
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
    (v * 255.0) as u8
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + t * (b - a)) as u8
}
