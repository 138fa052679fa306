//! JSON scene files: a list of named gradients to render.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use ombre_engine::coords::{Vec2, Viewport};
use ombre_engine::paint::{GradientDescriptor, GradientKind, Rgba8};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Pixel density applied to every item without its own `scale`.
    #[serde(default)]
    pub scale: Option<f32>,
    pub items: Vec<SceneItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneItem {
    pub name: String,
    pub kind: String,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub scale: Option<f32>,
    pub colors: Vec<String>,
    #[serde(default)]
    pub colors2: Vec<String>,
    #[serde(default)]
    pub locations: Option<Vec<f32>>,
    #[serde(default)]
    pub locations2: Option<Vec<f32>>,
    #[serde(default)]
    pub start: Option<[f32; 2]>,
    #[serde(default)]
    pub end: Option<[f32; 2]>,
    #[serde(default)]
    pub start2: Option<[f32; 2]>,
    #[serde(default)]
    pub end2: Option<[f32; 2]>,
    /// Solid color composited beneath the gradient.
    #[serde(default)]
    pub background: Option<String>,
}

/// One render job resolved from a scene item.
#[derive(Debug, Clone)]
pub struct Job {
    pub name: String,
    pub descriptor: GradientDescriptor,
    pub viewport: Viewport,
    pub scale: Option<f32>,
    pub background: Option<Rgba8>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scene file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse scene JSON")
    }

    pub fn jobs(&self) -> Result<Vec<Job>> {
        self.items
            .iter()
            .map(|item| item.to_job(self.scale).with_context(|| format!("scene item `{}`", item.name)))
            .collect()
    }
}

impl SceneItem {
    fn to_job(&self, scene_scale: Option<f32>) -> Result<Job> {
        if self.name.is_empty() || self.name.contains(['/', '\\']) {
            bail!("item name must be a non-empty file stem, got `{}`", self.name);
        }
        let kind: GradientKind = self.kind.parse()?;

        let descriptor = GradientDescriptor {
            kind,
            colors: parse_colors(&self.colors)?,
            colors2: parse_colors(&self.colors2)?,
            locations: self.locations.clone(),
            locations2: self.locations2.clone(),
            start: self.start.map(point),
            end: self.end.map(point),
            start2: self.start2.map(point),
            end2: self.end2.map(point),
        };
        descriptor.validate()?;

        Ok(Job {
            name: self.name.clone(),
            descriptor,
            viewport: Viewport::new(self.width, self.height),
            scale: self.scale.or(scene_scale),
            background: self.background.as_deref().map(parse_hex_color).transpose()?,
        })
    }
}

fn point([x, y]: [f32; 2]) -> Vec2 {
    Vec2::new(x, y)
}

fn parse_colors(colors: &[String]) -> Result<Vec<Rgba8>> {
    colors.iter().map(|c| parse_hex_color(c)).collect()
}

/// Parses `#rrggbb` or `#rrggbbaa` (straight alpha) into a premultiplied color.
pub fn parse_hex_color(s: &str) -> Result<Rgba8> {
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        bail!("expected #rrggbb or #rrggbbaa, got `{s}`");
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid hex color `{s}`"))
    };
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Ok(Rgba8::from_straight(byte(0)?, byte(2)?, byte(4)?, a))
}
