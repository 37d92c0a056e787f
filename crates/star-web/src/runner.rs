use std::cell::RefCell;
use std::rc::Rc;

use star_engine::{
    draw_splash, CatalogDocument, DrawList, InputEvent, IntroChoreographer, IntroEvent, IntroMode,
    Renderer, SkyRenderer, Viewport,
};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::canvas::Canvas2dRenderer;
use crate::config::HeroConfig;
use crate::dom::{CanvasTextMetrics, DomLayoutProbe, Page};
use crate::fetch::{CatalogFetcher, CatalogInbox};
use crate::frame_loop::AnimationLoop;
use crate::listeners::{normalize_pointer, pointer_client_pos, viewport_size, EventListener};

/// Drives the sky and the intro once per animation frame and applies the
/// intro's page effects.
pub struct HeroRunner {
    config: HeroConfig,
    sky: SkyRenderer,
    sky_canvas: Canvas2dRenderer,
    inbox: CatalogInbox,
    /// None when the intro is skipped.
    intro: Option<Intro>,
    page: Page,
}

struct Intro {
    timeline: IntroChoreographer,
    canvas: Canvas2dRenderer,
    probe: DomLayoutProbe,
    list: DrawList,
}

impl HeroRunner {
    pub fn new(config: HeroConfig, window: &Window, document: &Document) -> Result<Self, JsValue> {
        let (width, height) = viewport_size(window);
        let viewport = Viewport::new(width, height);

        let mut sky_canvas = Canvas2dRenderer::from_id(document, &config.sky_canvas_id)?;
        sky_canvas.resize(width as u32, height as u32);
        let mut sky = SkyRenderer::new(config.sky.clone(), viewport);
        let page = Page::new(document.clone());

        let intro = if config.skip_intro {
            sky.set_projection_scale(config.intro.zoom_to);
            None
        } else {
            let mut canvas = Canvas2dRenderer::from_id(document, &config.splash_canvas_id)?;
            canvas.resize(width as u32, height as u32);
            let timeline = IntroChoreographer::new(
                config.intro.clone(),
                viewport,
                &CanvasTextMetrics::new(canvas.context()),
            );
            sky.set_projection_scale(timeline.projection_scale());
            Some(Intro {
                timeline,
                canvas,
                probe: DomLayoutProbe::new(window.clone(), document.clone(), config.logo_id.clone()),
                list: DrawList::new(),
            })
        };

        let runner = Self {
            config,
            sky,
            sky_canvas,
            inbox: CatalogInbox::new(),
            intro,
            page,
        };
        if runner.intro.is_none() {
            for event in [IntroEvent::HeroSettled, IntroEvent::OverlayHidden, IntroEvent::Handoff] {
                runner.apply(event);
            }
        }
        Ok(runner)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.sky.push_input(event);
    }

    /// Resize both canvases now. The sky picks the new size up from its
    /// input queue on the next frame and keeps its rotation and hover state.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.sky.push_input(InputEvent::Resize { width, height });
        self.sky_canvas.resize(width as u32, height as u32);
        if let Some(intro) = self.intro.as_mut() {
            intro.canvas.resize(width as u32, height as u32);
            intro.timeline.set_viewport(Viewport::new(width, height));
        }
    }

    /// Where fetched catalog documents wait for the next tick.
    pub fn inbox(&self) -> &CatalogInbox {
        &self.inbox
    }

    /// Run one frame tick: intro first (its zoom drives the globe), then the sky.
    pub fn tick(&mut self, dt: f32) {
        self.inbox.drain_into(&mut self.sky);

        let mut events = Vec::new();
        if let Some(intro) = self.intro.as_mut() {
            let was_running = intro.timeline.mode() != IntroMode::Done;
            events = intro.timeline.advance(dt, &mut intro.probe);
            self.sky.set_projection_scale(intro.timeline.projection_scale());

            // Keep drawing until the frame that finishes the intro
            if was_running {
                intro.list.clear();
                draw_splash(&intro.timeline, intro.timeline.viewport(), &mut intro.list);
                intro.canvas.draw(&intro.list);
            }
        }
        for event in events {
            self.apply(event);
        }

        let list = self.sky.frame(dt);
        self.sky_canvas.draw(list);
    }

    fn apply(&self, event: IntroEvent) {
        let cfg = &self.config;
        match event {
            IntroEvent::HeroSettled => self.page.add_class(&cfg.content_id, &cfg.settled_class),
            IntroEvent::OverlayOpacity(opacity) => {
                self.page.set_style(&cfg.overlay_id, "opacity", &format!("{opacity:.3}"));
            }
            IntroEvent::OverlayHidden => self.page.set_style(&cfg.overlay_id, "display", "none"),
            IntroEvent::Handoff => {
                let color = cfg.intro.travel_color.with_alpha(cfg.intro.travel_opacity_end);
                self.page.set_style(&cfg.logo_id, "color", &color.to_css());
                self.page.set_style(&cfg.splash_canvas_id, "display", "none");
                self.page.set_style(&cfg.nav_id, "opacity", "1");
                log::info!("intro handed off to #{}", cfg.logo_id);
            }
        }
    }
}

/// Everything a mounted hero owns. Dropping it cancels the pending frame,
/// removes every listener and aborts in-flight fetches.
pub struct Mounted {
    _frames: AnimationLoop,
    _listeners: Vec<EventListener>,
    _fetcher: CatalogFetcher,
    _runner: Rc<RefCell<HeroRunner>>,
}

/// Bind the hero to the page and start it.
pub fn mount(config: HeroConfig) -> Result<Mounted, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let requests = vec![
        (CatalogDocument::Lines, config.lines_url.clone()),
        (CatalogDocument::Names, config.names_url.clone()),
        (CatalogDocument::Stars, config.stars_url.clone()),
    ];
    let runner = Rc::new(RefCell::new(HeroRunner::new(config, &window, &document)?));

    let mut listeners = Vec::new();
    for kind in ["mousemove", "touchmove"] {
        let weak = Rc::downgrade(&runner);
        let win = window.clone();
        listeners.push(EventListener::new(&window, kind, move |event| {
            let (Some(runner), Some((x, y))) = (weak.upgrade(), pointer_client_pos(&event)) else {
                return;
            };
            let (w, h) = viewport_size(&win);
            if let Some((x, y)) = normalize_pointer(x, y, w, h) {
                runner.borrow_mut().push_input(InputEvent::PointerMove { x, y });
            }
        })?);
    }
    {
        let weak = Rc::downgrade(&runner);
        let win = window.clone();
        listeners.push(EventListener::new(&window, "resize", move |_| {
            if let Some(runner) = weak.upgrade() {
                let (w, h) = viewport_size(&win);
                runner.borrow_mut().resize(w, h);
            }
        })?);
    }

    let mut fetcher = CatalogFetcher::new();
    let inbox = runner.borrow().inbox().clone();
    fetcher.start(requests, &inbox)?;

    let weak = Rc::downgrade(&runner);
    let frames = AnimationLoop::start(move |dt| {
        if let Some(runner) = weak.upgrade() {
            runner.borrow_mut().tick(dt);
        }
    })?;

    Ok(Mounted {
        _frames: frames,
        _listeners: listeners,
        _fetcher: fetcher,
        _runner: runner,
    })
}
