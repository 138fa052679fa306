//! Built-in demo set: the four gradient kinds over a hue wheel.

use ombre_engine::coords::{Vec2, Viewport};
use ombre_engine::paint::{GradientDescriptor, Rgba8};

use crate::scene::Job;

const HUES: usize = 9;
const SIZE: f32 = 160.0;

/// Fully saturated, full-brightness color at `hue` in `[0, 1)`.
pub fn hue_color(hue: f32) -> Rgba8 {
    let h = hue.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let (r, g, b) = match sector as u8 {
        0 => (1.0, f, 0.0),
        1 => (1.0 - f, 1.0, 0.0),
        2 => (0.0, 1.0, f),
        3 => (0.0, 1.0 - f, 1.0),
        4 => (f, 0.0, 1.0),
        _ => (1.0, 0.0, 1.0 - f),
    };
    Rgba8::from_unit_straight(r, g, b, 1.0)
}

fn hue_wheel(n: usize) -> Vec<Rgba8> {
    (0..n).map(|i| hue_color(i as f32 / n as f32)).collect()
}

pub fn jobs(scale: Option<f32>) -> Vec<Job> {
    let mut colors = hue_wheel(HUES);
    let viewport = Viewport::new(SIZE, SIZE);
    let job = |name: &str, descriptor: GradientDescriptor| Job {
        name: name.to_string(),
        descriptor,
        viewport,
        scale,
        background: None,
    };

    let linear = GradientDescriptor::linear(colors.clone())
        .with_points(Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5));
    let radial = GradientDescriptor::radial(colors.clone());

    // Repeating the first color closes the seam where the sweep wraps around.
    colors.push(colors[0]);
    let conical = GradientDescriptor::conical(colors.clone());

    let half = colors.len() / 2;
    let x_colors = colors[..half].to_vec();
    let y_colors = colors[colors.len() - half..].iter().rev().copied().collect();
    let bilinear = GradientDescriptor::bilinear(x_colors, y_colors);

    vec![
        job("linear", linear),
        job("radial", radial),
        job("conical", conical),
        job("bilinear", bilinear),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_primaries() {
        assert_eq!(hue_color(0.0), Rgba8::opaque(255, 0, 0));
        assert_eq!(hue_color(1.0 / 3.0), Rgba8::opaque(0, 255, 0));
        assert_eq!(hue_color(2.0 / 3.0), Rgba8::opaque(0, 0, 255));
        assert_eq!(hue_color(1.0), hue_color(0.0));
    }

    #[test]
    fn demo_descriptors_are_valid() {
        let jobs = jobs(Some(1.0));
        assert_eq!(jobs.len(), 4);
        for job in &jobs {
            job.descriptor.validate().unwrap();
        }
        let conical = &jobs[2].descriptor;
        assert_eq!(conical.colors.first(), conical.colors.last());
        assert_eq!(jobs[3].descriptor.colors.len(), 5);
        assert_eq!(jobs[3].descriptor.colors2.len(), 5);
    }
}
