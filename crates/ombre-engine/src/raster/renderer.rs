use std::sync::{Arc, OnceLock};

use rayon::prelude::*;

use crate::config::{ProcessingMode, RenderConfig};
use crate::coords::{PixelSize, Vec2, Viewport};
use crate::error::GradientError;
use crate::field::{Field, FieldSample};
use crate::paint::{GradientDescriptor, GradientKind, Rgba8};
use crate::ramp::StopRamp;

use super::Pixmap;

/// A descriptor compiled against one raster size: field geometry resolved to
/// pixel space and stop ramps built once for the whole pass.
#[derive(Debug, Clone)]
pub struct CompiledGradient {
    field: Field,
    primary: StopRamp,
    /// Bilinear Y colors; `None` for the other kinds.
    secondary: Option<StopRamp>,
}

impl CompiledGradient {
    pub fn new(descriptor: &GradientDescriptor, size: PixelSize) -> Result<Self, GradientError> {
        descriptor.validate()?;
        Self::from_validated(descriptor, size)
    }

    /// Compiles a descriptor that already passed [`GradientDescriptor::validate`].
    fn from_validated(descriptor: &GradientDescriptor, size: PixelSize) -> Result<Self, GradientError> {
        let primary = StopRamp::new(&descriptor.colors, descriptor.locations.as_deref())?;
        let secondary = match descriptor.kind {
            GradientKind::Bilinear if descriptor.colors2.len() > 1 => Some(StopRamp::new(
                &descriptor.colors2,
                descriptor.locations2.as_deref(),
            )?),
            // Missing or single Y color: fade to transparent along Y.
            GradientKind::Bilinear => Some(StopRamp::constant(Rgba8::transparent())),
            _ => None,
        };

        let field = Field::resolve(descriptor, size);
        log::debug!("compiled {} gradient for {}x{}: {:?}", descriptor.kind.name(), size.width, size.height, field);

        Ok(Self { field, primary, secondary })
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Color at pixel-space position `p`.
    ///
    /// Bilinear: both intermediate colors are resolved at `tx`, then blended
    /// with synthetic stops at `0` and `1` using `ty`.
    #[inline]
    pub fn shade(&self, p: Vec2) -> Rgba8 {
        match self.field.sample(p) {
            FieldSample::Scalar(t) => self.primary.sample(t),
            FieldSample::Pair { tx, ty } => {
                let c1 = self.primary.sample(tx);
                let c2 = match &self.secondary {
                    Some(ramp) => ramp.sample(tx),
                    None => Rgba8::transparent(),
                };
                // Equivalent to `StopRamp::two(c1, c2).sample(ty)` without the allocation.
                c1.lerp(c2, ty)
            }
        }
    }

    fn shade_row(&self, y: usize, row: &mut [Rgba8]) {
        let fy = y as f32;
        for (x, px) in row.iter_mut().enumerate() {
            *px = self.shade(Vec2::new(x as f32, fy));
        }
    }

    /// Shades every pixel of `pixmap` on the calling thread.
    pub fn fill(&self, pixmap: &mut Pixmap) {
        let width = (pixmap.width() as usize).max(1);
        pixmap
            .pixels_mut()
            .chunks_exact_mut(width)
            .enumerate()
            .for_each(|(y, row)| self.shade_row(y, row));
    }

    /// Shades every pixel of `pixmap`, rows split across the current rayon pool.
    ///
    /// Run inside [`rayon::ThreadPool::install`] to use a dedicated pool.
    pub fn fill_parallel(&self, pixmap: &mut Pixmap) {
        let width = (pixmap.width() as usize).max(1);
        pixmap
            .pixels_mut()
            .par_chunks_exact_mut(width)
            .enumerate()
            .for_each(|(y, row)| self.shade_row(y, row));
    }
}

/// Stateless gradient rasterizer.
///
/// Holds only configuration (and, for [`ProcessingMode::ParallelWith`], a
/// worker pool built on first use and reused by every later render and by
/// clones of this renderer). Each call produces an independent, owned
/// [`Pixmap`]. The caller decides when to re-render (for example on a size or
/// descriptor change).
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
    pool: Arc<OnceLock<Result<Arc<rayon::ThreadPool>, GradientError>>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            pool: Arc::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn pool(&self, threads: usize) -> Result<Arc<rayon::ThreadPool>, GradientError> {
        self.pool
            .get_or_init(|| {
                log::debug!("building render pool with {threads} thread(s)");
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map(Arc::new)
                    .map_err(|e| GradientError::ThreadPool(e.to_string()))
            })
            .clone()
    }

    /// Renders `descriptor` into a raster of `round(viewport × scale)` pixels.
    ///
    /// `scale` falls back to [`RenderConfig::default_scale`]. Returns
    /// `Ok(None)` when the raster would be empty. An invalid descriptor is
    /// reported even when the raster would be empty.
    pub fn render(
        &self,
        descriptor: &GradientDescriptor,
        viewport: Viewport,
        scale: Option<f32>,
    ) -> Result<Option<Pixmap>, GradientError> {
        descriptor.validate()?;

        let scale = scale.unwrap_or(self.config.default_scale);
        let Some(size) = viewport.to_pixels(scale) else {
            log::debug!("no image: {}x{} at scale {scale} is empty", viewport.width, viewport.height);
            return Ok(None);
        };

        self.render_validated(descriptor, size).map(Some)
    }

    /// Renders directly at a physical pixel size.
    pub fn render_pixels(&self, descriptor: &GradientDescriptor, size: PixelSize) -> Result<Pixmap, GradientError> {
        descriptor.validate()?;
        self.render_validated(descriptor, size)
    }

    fn render_validated(&self, descriptor: &GradientDescriptor, size: PixelSize) -> Result<Pixmap, GradientError> {
        let gradient = CompiledGradient::from_validated(descriptor, size)?;
        let mut pixmap = Pixmap::try_new(size)?;
        let mode = self.config.mode_for(size.area());
        match mode {
            ProcessingMode::Sequential => gradient.fill(&mut pixmap),
            ProcessingMode::Parallel => gradient.fill_parallel(&mut pixmap),
            ProcessingMode::ParallelWith(threads) => {
                let pool = self.pool(threads)?;
                pool.install(|| gradient.fill_parallel(&mut pixmap));
            }
        }
        log::debug!("rendered {}x{} {} gradient ({mode:?})", size.width, size.height, descriptor.kind.name());
        Ok(pixmap)
    }
}

/// Renders with the default [`RenderConfig`].
pub fn render(
    descriptor: &GradientDescriptor,
    viewport: Viewport,
    scale: Option<f32>,
) -> Result<Option<Pixmap>, GradientError> {
    Renderer::new().render(descriptor, viewport, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Rgba8 { Rgba8::opaque(255, 0, 0) }
    fn green() -> Rgba8 { Rgba8::opaque(0, 255, 0) }
    fn blue() -> Rgba8 { Rgba8::opaque(0, 0, 255) }

    fn rainbow() -> Vec<Rgba8> {
        vec![red(), Rgba8::opaque(255, 255, 0), green(), Rgba8::opaque(0, 255, 255), blue(), red()]
    }

    fn near(a: Rgba8, b: Rgba8, tol: u8) -> bool {
        a.to_array().iter().zip(b.to_array()).all(|(x, y)| x.abs_diff(y) <= tol)
    }

    // ── render entry point ────────────────────────────────────────────────

    #[test]
    fn empty_raster_is_no_image() {
        let d = GradientDescriptor::linear(vec![red(), blue()]);
        assert_eq!(render(&d, Viewport::new(0.0, 10.0), Some(2.0)).unwrap(), None);
        assert_eq!(render(&d, Viewport::new(10.0, 10.0), Some(0.0)).unwrap(), None);
    }

    #[test]
    fn invalid_descriptor_reported_before_size_check() {
        let d = GradientDescriptor::linear(vec![]);
        assert!(render(&d, Viewport::new(0.0, 0.0), Some(1.0)).is_err());
        assert!(Renderer::new().render_pixels(&d, PixelSize::new(2, 2)).is_err());
        assert!(CompiledGradient::new(&d, PixelSize::new(2, 2)).is_err());
    }

    #[test]
    fn oversized_raster_is_an_error() {
        let d = GradientDescriptor::linear(vec![red(), blue()]);
        let err = render(&d, Viewport::new(1e9, 1e9), Some(1.0)).unwrap_err();
        assert!(matches!(err, GradientError::Allocation { .. }), "{err:?}");
    }

    #[test]
    fn invalid_descriptor_fails_fast() {
        let d = GradientDescriptor::linear(vec![red(), blue()]).with_locations(vec![0.0]);
        let err = render(&d, Viewport::new(4.0, 4.0), Some(1.0)).unwrap_err();
        assert!(matches!(err, GradientError::InvalidDescriptor { .. }));
    }

    #[test]
    fn scale_multiplies_logical_size() {
        let d = GradientDescriptor::radial(vec![red(), blue()]);
        let pm = render(&d, Viewport::new(3.0, 2.0), Some(2.0)).unwrap().unwrap();
        assert_eq!(pm.size(), PixelSize::new(6, 4));

        let renderer = Renderer::with_config(RenderConfig::default().with_default_scale(3.0));
        let pm = renderer.render(&d, Viewport::new(3.0, 2.0), None).unwrap().unwrap();
        assert_eq!(pm.size(), PixelSize::new(9, 6));
    }

    // ── shading ───────────────────────────────────────────────────────────

    #[test]
    fn linear_red_to_blue_two_by_one() {
        let d = GradientDescriptor::linear(vec![red(), blue()])
            .with_points(Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5));
        let pm = render(&d, Viewport::new(2.0, 1.0), Some(1.0)).unwrap().unwrap();
        assert!(near(pm.pixel(0, 0).unwrap(), red(), 1));
        assert!(near(pm.pixel(1, 0).unwrap(), blue(), 1));
    }

    #[test]
    fn single_color_fills_constant() {
        let c = Rgba8::from_straight(12, 200, 99, 180);
        for kind in GradientKind::ALL {
            let mut d = GradientDescriptor::new(kind, vec![c]);
            if kind == GradientKind::Bilinear {
                d.colors2 = vec![c, c];
            }
            let pm = render(&d, Viewport::new(7.0, 5.0), Some(1.0)).unwrap().unwrap();
            assert!(pm.pixels().iter().all(|p| *p == c), "{kind:?}");
        }
    }

    #[test]
    fn radial_is_symmetric_about_center() {
        let d = GradientDescriptor::radial(vec![red(), green(), blue()]);
        let pm = render(&d, Viewport::new(9.0, 9.0), Some(1.0)).unwrap().unwrap();
        assert_eq!(pm.pixel(4, 4), Some(red()));
        assert_eq!(pm.pixel(8, 4), Some(blue()));
        for (a, b) in [((0, 4), (8, 4)), ((4, 0), (4, 8)), ((1, 2), (6, 7)), ((2, 1), (7, 6))] {
            assert_eq!(pm.pixel(a.0, a.1), pm.pixel(b.0, b.1));
        }
    }

    #[test]
    fn conical_starts_at_reference_direction() {
        let d = GradientDescriptor::conical(vec![red(), blue()]);
        let pm = render(&d, Viewport::new(9.0, 9.0), Some(1.0)).unwrap().unwrap();
        // Directly right of center is angle 0, directly left is half a turn.
        assert_eq!(pm.pixel(8, 4), Some(red()));
        assert_eq!(pm.pixel(0, 4), Some(Rgba8::opaque(127, 0, 127)));
    }

    #[test]
    fn linear_default_axis_runs_bottom_to_top() {
        let d = GradientDescriptor::linear(vec![red(), blue()]);
        let pm = render(&d, Viewport::new(3.0, 5.0), Some(1.0)).unwrap().unwrap();
        for x in 0..3 {
            assert_eq!(pm.pixel(x, 0), Some(red()));
            assert_eq!(pm.pixel(x, 4), Some(blue()));
        }
    }

    #[test]
    fn degenerate_geometry_stays_finite() {
        let p = Vec2::new(0.5, 0.5);
        for kind in GradientKind::ALL {
            let d = GradientDescriptor::bilinear(vec![red(), blue()], vec![green(), blue()])
                .with_points(p, p)
                .with_points2(p, p);
            let d = GradientDescriptor { kind, ..d };
            let pm = render(&d, Viewport::new(4.0, 4.0), Some(1.0)).unwrap().unwrap();
            // t collapses to 0 for linear and radial; conical sweeps from +X.
            if kind != GradientKind::Conical {
                assert!(pm.pixels().iter().all(|c| *c == pm.pixels()[0]), "{kind:?}");
            }
        }
    }

    // ── bilinear ──────────────────────────────────────────────────────────

    #[test]
    fn bilinear_single_y_color_fades_to_transparent() {
        let d = GradientDescriptor::bilinear(vec![red(), green()], vec![blue()]);
        let pm = render(&d, Viewport::new(4.0, 4.0), Some(1.0)).unwrap().unwrap();

        assert!(near(pm.pixel(0, 0).unwrap(), red(), 1));

        // ty = 2/3: red scaled by 1/3 in every channel, alpha included.
        let mid = pm.pixel(0, 2).unwrap();
        assert!(near(mid, Rgba8::from_premul(85, 0, 0, 85), 1), "{mid:?}");
        assert_eq!(mid.r, mid.a);

        let top = pm.pixel(0, 3).unwrap();
        assert!(top.a <= 1, "{top:?}");
        assert_eq!(top.g, 0);
    }

    #[test]
    fn bilinear_absent_y_colors_fade_to_transparent() {
        let d = GradientDescriptor::bilinear(vec![red(), green()], vec![]);
        let pm = render(&d, Viewport::new(4.0, 4.0), Some(1.0)).unwrap().unwrap();
        assert_eq!(pm.pixel(3, 0), Some(green()));
        assert!(pm.pixel(3, 3).unwrap().a <= 1);
    }

    #[test]
    fn bilinear_y_blend_matches_two_stop_ramp() {
        let c1 = Rgba8::from_premul(200, 30, 7, 220);
        let c2 = Rgba8::from_premul(10, 90, 60, 90);
        let ramp = StopRamp::two(c1, c2);
        for t in [-1.0, 0.0, 0.1, 0.5, 0.93, 1.0, 2.0] {
            assert_eq!(c1.lerp(c2, t), ramp.sample(t), "t = {t}");
        }
    }

    #[test]
    fn bilinear_honors_y_locations() {
        // tx = 0.25 and 0.75 sit exactly on the Y stops; uniform spacing would blend.
        let d = GradientDescriptor::bilinear(vec![red(), green()], vec![blue(), Rgba8::opaque(255, 255, 255)])
            .with_locations2(vec![0.25, 0.75]);
        let pm = render(&d, Viewport::new(5.0, 2.0), Some(1.0)).unwrap().unwrap();
        assert_eq!(pm.pixel(1, 1), Some(blue()));
        assert_eq!(pm.pixel(3, 1), Some(Rgba8::opaque(255, 255, 255)));

        let uniform = GradientDescriptor { locations2: None, ..d };
        let pm = render(&uniform, Viewport::new(5.0, 2.0), Some(1.0)).unwrap().unwrap();
        assert_eq!(pm.pixel(1, 1), Some(Rgba8::opaque(63, 63, 255)));
        assert_eq!(pm.pixel(3, 1), Some(Rgba8::opaque(191, 191, 255)));
    }

    #[test]
    fn bilinear_reversed_y_axis_flips_fade() {
        let d = GradientDescriptor::bilinear(vec![red(), green()], vec![blue()])
            .with_points2(Vec2::new(0.5, 1.0), Vec2::new(0.5, 0.0));
        let pm = render(&d, Viewport::new(4.0, 4.0), Some(1.0)).unwrap().unwrap();
        assert_eq!(pm.pixel(0, 3), Some(red()));
        assert_eq!(pm.pixel(3, 3), Some(green()));
        assert_eq!(pm.pixel(0, 0), Some(Rgba8::transparent()));

        let mid = pm.pixel(0, 1).unwrap();
        assert!(near(mid, Rgba8::from_premul(85, 0, 0, 85), 1), "{mid:?}");
    }

    #[test]
    fn bilinear_resolves_both_sequences_at_tx() {
        let d = GradientDescriptor::bilinear(vec![red(), green()], vec![blue(), Rgba8::opaque(255, 255, 255)]);
        let pm = render(&d, Viewport::new(2.0, 2.0), Some(1.0)).unwrap().unwrap();
        assert_eq!(pm.pixel(0, 0), Some(red()));
        assert_eq!(pm.pixel(1, 0), Some(green()));
        assert_eq!(pm.pixel(0, 1), Some(blue()));
        assert_eq!(pm.pixel(1, 1), Some(Rgba8::opaque(255, 255, 255)));
    }

    // ── scheduling ────────────────────────────────────────────────────────

    #[test]
    fn parallel_matches_sequential() {
        let d = GradientDescriptor::conical(rainbow()).with_points(Vec2::new(0.3, 0.6), Vec2::new(0.9, 0.1));
        let size = PixelSize::new(37, 23);

        let seq = Renderer::new().render_pixels(&d, size).unwrap();
        for mode in [ProcessingMode::Parallel, ProcessingMode::ParallelWith(3)] {
            let config = RenderConfig::default().with_mode(mode).with_parallel_min_pixels(0);
            let par = Renderer::with_config(config).render_pixels(&d, size).unwrap();
            assert_eq!(seq, par, "{mode:?}");
        }
    }

    #[test]
    fn dedicated_pool_is_built_once() {
        let config = RenderConfig::default()
            .with_mode(ProcessingMode::ParallelWith(2))
            .with_parallel_min_pixels(0);
        let renderer = Renderer::with_config(config);
        let d = GradientDescriptor::radial(rainbow());
        let size = PixelSize::new(16, 16);

        let first = renderer.render_pixels(&d, size).unwrap();
        let pool = renderer.pool(2).unwrap();
        let clone = renderer.clone();
        assert_eq!(clone.render_pixels(&d, size).unwrap(), first);
        assert!(Arc::ptr_eq(&pool, &renderer.pool(2).unwrap()));
        assert!(Arc::ptr_eq(&pool, &clone.pool(2).unwrap()));
        assert_eq!(pool.current_num_threads(), 2);
    }

    #[test]
    fn repeated_renders_are_independent() {
        let renderer = Renderer::new();
        let a = GradientDescriptor::linear(vec![red(), blue()]);
        let b = GradientDescriptor::radial(vec![green(), red()]);
        let size = PixelSize::new(8, 8);
        let first = renderer.render_pixels(&a, size).unwrap();
        let _ = renderer.render_pixels(&b, size).unwrap();
        assert_eq!(renderer.render_pixels(&a, size).unwrap(), first);
    }
}
