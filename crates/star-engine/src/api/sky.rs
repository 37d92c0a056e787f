//! Sky renderer facade: owns every piece of per-view state and turns one
//! host animation frame into one [`DrawList`].

use glam::Vec2;

use crate::api::config::SkyConfig;
use crate::api::types::Viewport;
use crate::assets::{assign_constellation_colors, CatalogDocument, CatalogError, CatalogLoader};
use crate::components::{ConstellationLine, Star};
use crate::core::time::FrameClock;
use crate::input::{InputEvent, InputQueue, PointerState};
use crate::renderer::{DrawList, Projected, Projector};
use crate::systems::constellations::{draw_glow_lines, draw_idle_lines, draw_nodes};
use crate::systems::labels::draw_labels;
use crate::systems::stars::{draw_ignition, draw_stars};
use crate::systems::{advance_hover, find_hovered, GridOverlay, RotationState};

pub struct SkyRenderer {
    config: SkyConfig,
    clock: FrameClock,
    viewport: Viewport,
    input: InputQueue,
    pointer: PointerState,
    rotation: RotationState,
    projection_scale: f32,
    loader: CatalogLoader,
    stars: Vec<Star>,
    constellations: Vec<ConstellationLine>,
    hovered: Option<usize>,
    // Projection caches, rebuilt every frame
    projected_stars: Vec<Projected>,
    projected_constellations: Vec<Vec<Vec<Projected>>>,
    projected_anchors: Vec<Option<Projected>>,
    grid: GridOverlay,
    draw_list: DrawList,
    errors: Vec<(CatalogDocument, CatalogError)>,
}

impl SkyRenderer {
    pub fn new(config: SkyConfig, viewport: Viewport) -> Self {
        log::info!(
            "sky renderer: {:?} projection, hover glow {}, grid {}",
            config.projection,
            config.hover_glow,
            config.grid_overlay
        );
        Self {
            clock: FrameClock::new(config.fixed_dt, config.max_steps_per_frame),
            viewport,
            input: InputQueue::new(),
            pointer: PointerState::new(),
            rotation: RotationState::new(&config),
            projection_scale: config.initial_scale,
            loader: CatalogLoader::new(&config),
            stars: Vec::new(),
            constellations: Vec::new(),
            hovered: None,
            projected_stars: Vec::new(),
            projected_constellations: Vec::new(),
            projected_anchors: Vec::new(),
            grid: GridOverlay::new(),
            draw_list: DrawList::new(),
            errors: Vec::new(),
            config,
        }
    }

    // -- Host inputs --

    /// Queue an input event; applied at the start of the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Resize the drawing surface. Rotation and hover state are kept.
    fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn set_projection_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.projection_scale = scale.max(0.0);
        }
    }

    /// Hand over a fetched catalog document (or its failure).
    /// The data shows up on the next frame.
    pub fn deliver(&mut self, doc: CatalogDocument, body: Result<String, CatalogError>) {
        self.loader.deliver(doc, body);
    }

    // -- Accessors --

    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn projection_scale(&self) -> f32 {
        self.projection_scale
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn constellations(&self) -> &[ConstellationLine] {
        &self.constellations
    }

    /// Constellation hovered on the last frame.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Every catalog failure seen so far.
    pub fn errors(&self) -> &[(CatalogDocument, CatalogError)] {
        &self.errors
    }

    pub fn has_catalog_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True once every catalog document has arrived or failed.
    pub fn catalog_finished(&self) -> bool {
        self.loader.is_finished()
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    // -- Frame --

    /// Run one frame of `dt` seconds and return the commands to replay.
    pub fn frame(&mut self, dt: f32) -> &DrawList {
        self.install_catalog();
        self.apply_input();

        let steps = self.clock.tick(dt);
        for _ in 0..steps {
            self.rotation.step(self.pointer.offset_from_center(), &self.config);
            for star in &mut self.stars {
                star.advance_twinkle();
            }
            self.grid.step(self.pointer.normalized(), self.config.grid.lag);
        }

        let projector = Projector::new(
            self.config.projection,
            self.rotation.angle,
            self.viewport,
            self.projection_scale,
            self.config.visibility_cutoff,
        );
        self.project(&projector);

        let pointer_px = self.pointer.to_pixels(self.viewport);
        self.hovered = find_hovered(&self.projected_constellations, pointer_px, self.config.hover_radius);
        advance_hover(&mut self.constellations, self.hovered, steps, &self.config);

        self.draw(&projector, pointer_px);
        &self.draw_list
    }

    fn install_catalog(&mut self) {
        let update = self.loader.take_update();
        if update.is_empty() {
            return;
        }

        let mut recolor = false;
        if let Some(stars) = update.stars {
            self.stars = stars;
            recolor = true;
        }
        if let Some(constellations) = update.constellations {
            self.constellations = constellations;
            recolor = true;
        }
        if recolor && !self.constellations.is_empty() {
            assign_constellation_colors(
                &mut self.constellations,
                &self.stars,
                self.config.color_match_distance_sq,
                self.config.ignition_distance_sq,
            );
        }
        self.errors.extend(update.errors);
    }

    fn apply_input(&mut self) {
        for event in self.input.drain() {
            match event {
                InputEvent::PointerMove { x, y } => self.pointer.set(x, y),
                InputEvent::Resize { width, height } => self.resize(width, height),
            }
        }
    }

    fn project(&mut self, projector: &Projector) {
        self.projected_stars.clear();
        self.projected_stars
            .extend(self.stars.iter().map(|s| projector.project(&s.position)));

        self.projected_constellations = self
            .constellations
            .iter()
            .map(|c| {
                c.segments
                    .iter()
                    .map(|seg| seg.iter().map(|p| projector.project(p)).collect())
                    .collect()
            })
            .collect();

        self.projected_anchors = self
            .constellations
            .iter()
            .map(|c| c.label_anchor.as_ref().map(|p| projector.project(p)))
            .collect();
    }

    fn draw(&mut self, projector: &Projector, pointer_px: Vec2) {
        let glow = self.config.hover_glow;
        let list = &mut self.draw_list;
        list.clear();

        draw_idle_lines(&self.projected_constellations, projector, list);
        if glow {
            draw_glow_lines(&self.constellations, &self.projected_constellations, projector, list);
        }
        draw_stars(&self.stars, &self.projected_stars, list);
        if glow {
            draw_ignition(&self.constellations, &self.stars, &self.projected_stars, list);
        }
        draw_nodes(
            &self.constellations,
            &self.projected_constellations,
            pointer_px,
            self.config.node_pop_radius,
            glow,
            list,
        );
        draw_labels(
            &self.constellations,
            &self.projected_anchors,
            &self.projected_constellations,
            self.projection_scale,
            self.config.label_text,
            &self.config,
            list,
        );
        if self.config.grid_overlay {
            self.grid.draw(self.viewport, &self.config.grid, list);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ProjectionMode;
    use crate::api::types::Rgb;
    use crate::renderer::DrawCommand;
    use crate::systems::bv_to_rgb;

    const LINES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","id":"Ori","geometry":{"type":"MultiLineString","coordinates":[[[-90,0],[-95,5]]]}},
        {"type":"Feature","id":"Far","geometry":{"type":"MultiLineString","coordinates":[[[0,0],[2,3]]]}}
    ]}"#;
    const NAMES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","id":"Ori","geometry":{"type":"Point","coordinates":[-92,2]},"properties":{"name":"Orion"}}
    ]}"#;
    const SIRIUS: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","geometry":{"type":"Point","coordinates":[-90,0]},"properties":{"mag":-1.46,"bv":"0.0"}}
    ]}"#;
    const FAINT: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","geometry":{"type":"Point","coordinates":[-90,0]},"properties":{"mag":6.0,"bv":"0.6"}}
    ]}"#;

    const DT: f32 = 1.0 / 60.0;

    /// Still sky: no initial tilt and no idle drift.
    fn still() -> SkyConfig {
        SkyConfig {
            initial_rotation: [0.0, 0.0],
            idle_drift: [0.0, 0.0],
            grid_overlay: false,
            ..SkyConfig::default()
        }
    }

    fn sky(config: SkyConfig) -> SkyRenderer {
        SkyRenderer::new(config, Viewport::new(800.0, 600.0))
    }

    fn loaded(config: SkyConfig) -> SkyRenderer {
        let mut s = sky(config);
        s.deliver(CatalogDocument::Lines, Ok(LINES.to_string()));
        s.deliver(CatalogDocument::Names, Ok(NAMES.to_string()));
        s.deliver(CatalogDocument::Stars, Ok(SIRIUS.to_string()));
        s
    }

    fn run(s: &mut SkyRenderer, frames: usize) {
        for _ in 0..frames {
            s.frame(DT);
        }
    }

    fn label_texts(list: &DrawList) -> Vec<String> {
        list.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_sky_draws_nothing() {
        let mut s = sky(still());
        assert!(s.frame(DT).is_empty());
        assert!(!s.has_catalog_error());
    }

    #[test]
    fn default_sky_draws_grid_before_data() {
        let mut s = sky(SkyConfig::default());
        let list = s.frame(DT);
        assert!(!list.is_empty());
        assert!(list.iter().all(|c| matches!(c, DrawCommand::Polyline { .. })));
    }

    #[test]
    fn sirius_at_centre() {
        let mut s = sky(still());
        s.deliver(CatalogDocument::Stars, Ok(SIRIUS.to_string()));
        let list = s.frame(DT).clone();

        // disc, glow halo, two spikes
        assert_eq!(list.len(), 4);
        match &list.commands()[0] {
            DrawCommand::FillCircle { center, radius, color } => {
                assert!(center.distance(Vec2::new(400.0, 300.0)) < 1e-3);
                let full = 4.2 + 1.46 * 0.55;
                assert!(*radius >= full * 0.76 - 1e-4 && *radius <= full + 1e-4);
                assert_eq!(color.rgb, bv_to_rgb(0.0));
                assert_eq!(color.a, 1.0);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(list.commands()[1], DrawCommand::RadialGradient { .. }));
    }

    #[test]
    fn limiting_magnitude_star_is_a_plain_dot() {
        let mut s = sky(still());
        s.deliver(CatalogDocument::Stars, Ok(FAINT.to_string()));
        let list = s.frame(DT);
        assert_eq!(list.len(), 1);
        match &list.commands()[0] {
            DrawCommand::FillCircle { radius, color, .. } => {
                assert!(*radius >= 0.9 * 0.76 - 1e-4 && *radius <= 0.9 + 1e-4);
                assert!((color.a - 0.2).abs() < 1e-5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn centre_pointer_hovers_front_constellation() {
        let mut s = loaded(still());
        run(&mut s, 120);

        assert_eq!(s.hovered(), Some(0));
        let ori = &s.constellations()[0];
        let far = &s.constellations()[1];
        assert_eq!(ori.hover, 1.0);
        assert!(ori.pulse_phase > 0.0);
        assert_eq!(far.hover, 0.0);
        assert_eq!(far.pulse_phase, 0.0);
        assert_eq!(ori.colors.node, bv_to_rgb(0.0));
        assert_eq!(ori.ignited_stars, vec![0]);
        assert_eq!(far.colors, crate::components::ConstellationColors::FALLBACK);

        let list = s.draw_list();
        let glowing = list
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline { glow: Some(_), .. }))
            .count();
        assert_eq!(glowing, 1);
        // Hovered label drawn last, in the constellation's label color
        let last_text = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, fill: Some(fill), .. } => Some((text.clone(), fill.rgb)),
                _ => None,
            })
            .last();
        assert_eq!(last_text, Some(("Ori".to_string(), ori.colors.label)));
    }

    #[test]
    fn hover_fades_when_pointer_leaves() {
        let mut s = loaded(still());
        run(&mut s, 30);
        assert_eq!(s.constellations()[0].hover, 1.0);

        // Top-left corner: far from every vertex
        s.push_input(InputEvent::PointerMove { x: 0.0, y: 0.0 });
        s.frame(DT);
        assert_eq!(s.hovered(), None);
        assert!(s.constellations()[0].hover < 1.0);
        run(&mut s, 60);
        assert_eq!(s.constellations()[0].hover, 0.0);
    }

    #[test]
    fn star_failure_keeps_constellations() {
        let mut s = sky(still());
        s.deliver(CatalogDocument::Lines, Ok(LINES.to_string()));
        s.deliver(CatalogDocument::Names, Ok(NAMES.to_string()));
        s.deliver(CatalogDocument::Stars, Err(CatalogError::Network("offline".into())));
        let list = s.frame(DT).clone();

        assert!(s.has_catalog_error());
        assert_eq!(s.errors()[0].0, CatalogDocument::Stars);
        assert!(s.stars().is_empty());
        assert_eq!(s.constellations().len(), 2);
        assert!(s.catalog_finished());
        assert!(list.iter().any(|c| matches!(c, DrawCommand::Polyline { .. })));
        assert!(!list.iter().any(|c| matches!(c, DrawCommand::Line { .. })));
    }

    #[test]
    fn labels_respect_zoom_threshold() {
        let mut s = loaded(still());
        s.set_projection_scale(0.4);
        run(&mut s, 2);
        assert!(label_texts(s.draw_list()).is_empty());

        s.set_projection_scale(0.95);
        s.frame(DT);
        assert!(label_texts(s.draw_list()).contains(&"Ori".to_string()));
    }

    #[test]
    fn names_can_replace_ids() {
        let mut cfg = still();
        cfg.label_text = crate::api::config::LabelText::Name;
        let mut s = loaded(cfg);
        s.frame(DT);
        // "Far" sits on the limb and gets no label
        assert_eq!(label_texts(s.draw_list()), vec!["Orion".to_string()]);
    }

    #[test]
    fn resize_keeps_state() {
        let mut s = loaded(SkyConfig::default());
        run(&mut s, 20);
        let rotation = *s.rotation();
        let hover = s.constellations()[0].hover;

        s.push_input(InputEvent::Resize { width: 1920.0, height: 1080.0 });
        s.frame(0.0);
        assert_eq!(s.viewport(), Viewport::new(1920.0, 1080.0));
        // A zero delta runs no steps, so nothing else moved
        assert_eq!(*s.rotation(), rotation);
        assert_eq!(s.constellations()[0].hover, hover);
    }

    #[test]
    fn pointer_offset_steers_rotation() {
        let mut s = sky(still());
        s.push_input(InputEvent::PointerMove { x: 1.0, y: 0.5 });
        run(&mut s, 10);
        let r = s.rotation();
        assert!(r.velocity.y > 0.0);
        assert!(r.velocity.x.abs() < 1e-9);
        assert!(r.angle.y > 0.0);
    }

    #[test]
    fn hover_glow_off_keeps_plain_lines() {
        let cfg = SkyConfig { hover_glow: false, ..still() };
        let mut s = loaded(cfg);
        run(&mut s, 30);
        assert_eq!(s.hovered(), Some(0));
        let list = s.draw_list();
        assert!(!list.iter().any(|c| matches!(c, DrawCommand::Polyline { glow: Some(_), .. })));
        assert!(!list.iter().any(|c| matches!(c, DrawCommand::StrokeCircle { .. })));
    }

    #[test]
    fn flat_projection_shows_whole_sky() {
        let cfg = SkyConfig { projection: ProjectionMode::Flat, ..still() };
        let mut s = sky(cfg);
        // ra 210: behind the globe, a quarter bright on the flat map
        let back = r#"{"features":[{"geometry":{"coordinates":[150,0]},"properties":{"mag":1.0}}]}"#;
        s.deliver(CatalogDocument::Stars, Ok(back.to_string()));
        let list = s.frame(DT);
        // The star behind the globe is still drawn on the flat map
        assert!(list.iter().any(|c| matches!(c, DrawCommand::FillCircle { .. })));
    }

    #[test]
    fn grid_is_drawn_last() {
        let cfg = SkyConfig { grid_overlay: true, ..still() };
        let mut s = loaded(cfg);
        let list = s.frame(DT);
        match list.commands().last() {
            Some(DrawCommand::Polyline { stroke, .. }) => {
                assert_eq!(stroke.color.rgb, Rgb::new(90, 130, 255));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
