//! Rover 404 entry point
//!
//! Wires the page components to the DOM on wasm. The native build runs a
//! headless autopilot session of the runner.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Vec2;
    use rand_pcg::Pcg32;
    use wasm_bindgen::JsCast;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
        KeyboardEvent, MouseEvent, Window,
    };

    use rover_404::input::{PageAction, RunnerCommand, page_action, runner_command};
    use rover_404::parallax;
    use rover_404::platform::web::{self, AnimationLoop, LocalStore, share};
    use rover_404::platform::{FrameDriven, FrameLoop, LoopControl};
    use rover_404::preferences::{MemoryStore, Preference, PreferenceStore, Preferences};
    use rover_404::renderer;
    use rover_404::rng;
    use rover_404::scan::{RETURN_LABEL, ScanAction, ScanFrame, ScanStatus, Scanner};
    use rover_404::sim::{GameEvent, GameState, TickInput, tick};
    use rover_404::starfield::{Starfield, apply_motion_preference};
    use rover_404::tuning::{ParallaxTuning, RunnerTuning, ScanTuning, StarfieldTuning, Tuning};

    const HOME: &str = "/";
    const LIGHTS_OFF_CLASS: &str = "rover--lights-off";

    // === Starfield ===

    struct StarfieldView {
        field: Starfield,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        rng: Pcg32,
    }

    impl StarfieldView {
        fn acquire(document: &Document, tuning: StarfieldTuning, seed: u64) -> Option<Self> {
            let canvas: HtmlCanvasElement = web::by_id(document, "stars")?;
            let ctx = renderer::context_2d(&canvas)?;
            Some(Self {
                field: Starfield::new(tuning),
                canvas,
                ctx,
                rng: rng::seeded(seed),
            })
        }

        /// Match the viewport and regenerate the point set
        fn resize(&mut self, window: &Window) {
            let size = web::viewport_size(window);
            let dpr = web::device_pixel_ratio(window);
            if let Err(e) = renderer::fit_canvas(&self.canvas, &self.ctx, size.x, size.y, dpr) {
                log::warn!("Failed to size star canvas: {:?}", e);
            }
            self.field.regenerate(size.x, size.y, &mut self.rng);
        }

        fn draw(&self) {
            if let Err(e) = renderer::stars::draw(&self.ctx, &self.field) {
                log::warn!("Star render error: {:?}", e);
            }
        }
    }

    impl FrameDriven for StarfieldView {
        fn frame(&mut self, dt: f32) -> LoopControl {
            self.field.frame(dt);
            self.draw();
            LoopControl::Continue
        }
    }

    // === Page-level state (preferences, lights, starfield loop) ===

    struct Page {
        window: Window,
        document: Document,
        root: Option<Element>,
        store: RefCell<Box<dyn PreferenceStore>>,
        prefs: Cell<Preferences>,
        lights_on: Rc<Cell<bool>>,
        stars: Option<AnimationLoop<StarfieldView>>,
    }

    impl Page {
        fn new(window: Window, document: Document, tuning: &Tuning, seed: u64) -> Self {
            let store: Box<dyn PreferenceStore> = match LocalStore::open() {
                Some(store) => Box::new(store),
                None => {
                    log::info!("LocalStorage unavailable, preferences last for this visit only");
                    Box::new(MemoryStore::new())
                }
            };
            let prefs = Preferences::load(&*store);
            log::info!("Loaded preferences: {:?}", prefs);

            let lights_on = web::query::<Element>(&document, ".rover")
                .map(|rover| !rover.class_list().contains(LIGHTS_OFF_CLASS))
                .unwrap_or(true);

            let stars = StarfieldView::acquire(&document, tuning.starfield.clone(), seed)
                .map(AnimationLoop::new);

            Self {
                root: document.document_element(),
                window,
                document,
                store: RefCell::new(store),
                prefs: Cell::new(prefs),
                lights_on: Rc::new(Cell::new(lights_on)),
                stars,
            }
        }

        fn reduced_motion(&self) -> bool {
            self.prefs
                .get()
                .effective_reduce_motion(web::prefers_reduced_motion(&self.window))
        }

        fn show_preference(&self, pref: Preference, on: bool) {
            if let Some(root) = &self.root {
                web::set_class(root, pref.marker_class(), on);
            }
            if let Some(control) = self.document.get_element_by_id(pref.control_id()) {
                web::set_pressed(&control, on);
            }
        }

        /// Apply stored flags and start the sky
        fn start(&self) {
            let prefs = self.prefs.get();
            for pref in Preference::ALL {
                self.show_preference(pref, prefs.get(pref));
            }
            if let Some(control) = self.document.get_element_by_id("toggle-lights") {
                web::set_pressed(&control, self.lights_on.get());
            }

            let Some(stars) = &self.stars else {
                return;
            };
            stars.target().borrow_mut().resize(&self.window);
            if self.reduced_motion() {
                stars.target().borrow().draw();
            } else {
                let mut frames = stars.clone();
                frames.resume();
            }
        }

        fn toggle(&self, pref: Preference) -> bool {
            let mut prefs = self.prefs.get();
            let on = prefs.toggle(pref, &mut **self.store.borrow_mut());
            self.prefs.set(prefs);
            self.show_preference(pref, on);
            on
        }

        fn toggle_motion(&self) {
            self.toggle(Preference::ReduceMotion);
            let reduced = self.reduced_motion();
            let Some(stars) = &self.stars else {
                return;
            };
            let mut frames = stars.clone();
            let mut view = stars.target().borrow_mut();
            let StarfieldView { field, rng, .. } = &mut *view;
            let running = apply_motion_preference(field, &mut frames, reduced, rng);
            log::info!("Starfield animation {}", if running { "resumed" } else { "stopped" });
        }

        fn toggle_lights(&self) {
            let on = !self.lights_on.get();
            self.lights_on.set(on);
            if let Some(rover) = web::query::<Element>(&self.document, ".rover") {
                web::set_class(&rover, LIGHTS_OFF_CLASS, !on);
            }
            if let Some(control) = self.document.get_element_by_id("toggle-lights") {
                web::set_pressed(&control, on);
            }
        }

        fn perform(&self, action: PageAction) {
            match action {
                PageAction::GoHome => web::navigate(HOME),
                PageAction::ToggleLights => self.toggle_lights(),
                PageAction::ToggleContrast => {
                    self.toggle(Preference::HighContrast);
                }
                PageAction::ToggleMotion => self.toggle_motion(),
            }
        }

        fn resize(&self) {
            let Some(stars) = &self.stars else {
                return;
            };
            stars.target().borrow_mut().resize(&self.window);
            if !stars.is_running() {
                stars.target().borrow().draw();
            }
        }
    }

    fn on_click<F>(document: &Document, id: &str, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        if let Some(el) = document.get_element_by_id(id) {
            web::listen(&el, "click", move |_event| handler());
        }
    }

    fn setup_page_controls(page: &Rc<Page>) {
        for (id, action) in [
            ("toggle-lights", PageAction::ToggleLights),
            ("toggle-contrast", PageAction::ToggleContrast),
            ("toggle-motion", PageAction::ToggleMotion),
        ] {
            let handler_page = page.clone();
            on_click(&page.document, id, move || handler_page.perform(action));
        }

        let handler_page = page.clone();
        web::listen(&page.window, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(action) = page_action(&event.key()) {
                handler_page.perform(action);
            }
        });

        if let Some(el) = page.document.get_element_by_id("share") {
            web::listen(&el, "click", |event| {
                event.prevent_default();
                share::share_current_page();
            });
        }
    }

    // === Parallax ===

    fn setup_parallax(window: &Window, document: &Document, tuning: ParallaxTuning) {
        let layers: Vec<(HtmlElement, f32)> = web::query_all::<HtmlElement>(document, ".parallax")
            .into_iter()
            .map(|el| {
                let depth = parallax::parse_depth(
                    el.get_attribute("data-depth").as_deref(),
                    tuning.default_depth,
                );
                (el, depth)
            })
            .collect();
        if layers.is_empty() {
            return;
        }
        log::info!("Parallax on {} layers", layers.len());

        let win = window.clone();
        web::listen(window, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            let offset = parallax::pointer_offset(pointer, web::viewport_size(&win));
            for (el, depth) in &layers {
                let shift = parallax::layer_translation(offset, *depth, &tuning);
                let _ = el
                    .style()
                    .set_property("transform", &parallax::transform_css(shift));
            }
        });
    }

    // === Route scanner ===

    struct ScanView {
        scanner: Scanner,
        rng: Pcg32,
        button: HtmlElement,
        panel: Option<HtmlElement>,
        percent: Option<Element>,
        status: Option<Element>,
        bar: Option<HtmlElement>,
    }

    impl ScanView {
        fn acquire(document: &Document, tuning: ScanTuning, seed: u64) -> Option<Self> {
            Some(Self {
                scanner: Scanner::new(tuning),
                rng: rng::seeded(seed),
                button: web::by_id(document, "scan")?,
                panel: web::by_id(document, "scanner"),
                percent: document.get_element_by_id("scan-pct"),
                status: document.get_element_by_id("scan-status"),
                bar: web::query(document, ".scanner__bar"),
            })
        }

        /// Returns false if a scan is already running or finished
        fn begin(&mut self) -> bool {
            if !self.scanner.start() {
                return false;
            }
            if let Some(panel) = &self.panel {
                web::set_hidden(panel, false);
                web::set_class(panel, "done", false);
            }
            let _ = self.button.set_attribute("aria-expanded", "true");
            true
        }

        fn show(&self, frame: &ScanFrame) {
            if let Some(percent) = &self.percent {
                web::set_text(percent, &frame.percent_label());
            }
            if let Some(bar) = &self.bar {
                let style = bar.style();
                let _ = style.set_property("--w", &frame.bar_width());
                let _ = style.set_property("background", &frame.bar_gradient());
                let _ = bar.set_attribute("aria-valuenow", &frame.value_now());
            }
            if let Some(status) = &self.status {
                web::set_text(status, frame.status.message());
            }
        }

        fn finish(&self) {
            if let Some(status) = &self.status {
                web::set_text(status, ScanStatus::RouteFound.message());
            }
            if let Some(panel) = &self.panel {
                web::set_class(panel, "done", true);
            }
            web::set_text(&self.button, RETURN_LABEL);
            web::set_class(&self.button, "accent", false);
            web::set_class(&self.button, "primary", true);
        }
    }

    fn scan_tick(view: Rc<RefCell<ScanView>>) {
        let (frame, delay) = {
            let mut v = view.borrow_mut();
            let ScanView { scanner, rng, .. } = &mut *v;
            (scanner.tick(rng), scanner.tick_ms())
        };
        let Some(frame) = frame else {
            return;
        };
        view.borrow().show(&frame);
        if frame.finished {
            view.borrow().finish();
        } else {
            web::set_timeout(delay, move || scan_tick(view));
        }
    }

    fn setup_scanner(document: &Document, tuning: ScanTuning, seed: u64) {
        let Some(view) = ScanView::acquire(document, tuning, seed) else {
            return;
        };
        if let Some(bar) = &view.bar {
            let _ = bar.style().set_property("--w", "0%");
        }
        let button = view.button.clone();
        let view = Rc::new(RefCell::new(view));
        web::listen(&button, "click", move |_event| {
            let action = view.borrow().scanner.button_action();
            match action {
                ScanAction::NavigateHome => web::navigate(HOME),
                ScanAction::StartScan => {
                    let started = view.borrow_mut().begin();
                    if started {
                        scan_tick(view.clone());
                    }
                }
            }
        });
    }

    // === Rover runner ===

    struct RunnerView {
        state: GameState,
        rng: Pcg32,
        input: TickInput,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        score_label: Option<Element>,
        restart_button: Option<HtmlElement>,
        lights_on: Rc<Cell<bool>>,
        view: Vec2,
    }

    impl RunnerView {
        /// `None` without the canvas and its 2D context
        fn acquire(
            document: &Document,
            tuning: RunnerTuning,
            seed: u64,
            lights_on: Rc<Cell<bool>>,
        ) -> Option<Self> {
            let canvas: HtmlCanvasElement = web::by_id(document, "runner")?;
            let ctx = renderer::context_2d(&canvas)?;
            Some(Self {
                state: GameState::new(tuning),
                rng: rng::seeded(seed),
                input: TickInput::default(),
                canvas,
                ctx,
                score_label: document.get_element_by_id("runner-score"),
                restart_button: web::by_id(document, "runner-restart"),
                lights_on,
                view: Vec2::ZERO,
            })
        }

        /// Size to the container width, keeping the aspect ratio
        fn fit(&mut self, window: &Window) {
            let css_w = self.state.fit_width(self.canvas.client_width() as f32);
            let css_h = css_w * self.state.tuning.aspect;
            let dpr = web::device_pixel_ratio(window);
            if let Err(e) = renderer::fit_canvas(&self.canvas, &self.ctx, css_w, css_h, dpr) {
                log::warn!("Failed to size runner canvas: {:?}", e);
            }
            self.view = Vec2::new(css_w, css_h);
            self.state.set_view_width(css_w);
        }

        fn restart(&mut self) {
            self.state.restart(&mut self.rng);
            self.input = TickInput::default();
            self.show_score();
            if let Some(button) = &self.restart_button {
                web::set_hidden(button, true);
            }
        }

        fn show_score(&self) {
            if let Some(label) = &self.score_label {
                web::set_text(label, &self.state.score.to_string());
            }
        }

        fn render(&self) {
            if let Err(e) =
                renderer::runner::draw(&self.ctx, &self.state, self.view, self.lights_on.get())
            {
                log::warn!("Runner render error: {:?}", e);
            }
        }
    }

    impl FrameDriven for RunnerView {
        fn frame(&mut self, dt: f32) -> LoopControl {
            let input = std::mem::take(&mut self.input);
            for event in tick(&mut self.state, &input, dt, &mut self.rng) {
                match event {
                    GameEvent::Scored { .. } => self.show_score(),
                    GameEvent::Crashed { .. } => {
                        if let Some(button) = &self.restart_button {
                            web::set_hidden(button, false);
                        }
                    }
                    other => log::debug!("{:?}", other),
                }
            }
            self.render();
            if self.state.is_over() {
                LoopControl::Stop
            } else {
                LoopControl::Continue
            }
        }
    }

    fn restart_runner(runner: &AnimationLoop<RunnerView>) {
        runner.target().borrow_mut().restart();
        let mut frames = runner.clone();
        frames.resume();
    }

    fn setup_runner(
        window: &Window,
        document: &Document,
        tuning: RunnerTuning,
        seed: u64,
        lights_on: Rc<Cell<bool>>,
    ) -> Option<AnimationLoop<RunnerView>> {
        let Some(mut view) = RunnerView::acquire(document, tuning, seed, lights_on) else {
            log::info!("No runner canvas, mini-game disabled");
            return None;
        };
        view.fit(window);
        let canvas = view.canvas.clone();
        let runner = AnimationLoop::new(view);

        {
            let runner = runner.clone();
            web::listen(&canvas, "pointerdown", move |_event| {
                runner.target().borrow_mut().input.jump = true;
            });
        }

        {
            let runner = runner.clone();
            web::listen(window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let phase = runner.target().borrow().state.phase;
                match runner_command(&event.key(), &event.code(), phase) {
                    Some(RunnerCommand::Jump) => {
                        event.prevent_default();
                        runner.target().borrow_mut().input.jump = true;
                    }
                    Some(RunnerCommand::Restart) => {
                        log::info!("Runner restart (keyboard)");
                        restart_runner(&runner);
                    }
                    None => {}
                }
            });
        }

        let restart_button = runner.target().borrow().restart_button.clone();
        if let Some(button) = restart_button {
            let runner = runner.clone();
            web::listen(&button, "click", move |_event| {
                log::info!("Runner restart (button)");
                restart_runner(&runner);
            });
        }

        restart_runner(&runner);
        Some(runner)
    }

    fn setup_resize(window: &Window, page: Rc<Page>, runner: Option<AnimationLoop<RunnerView>>) {
        let win = window.clone();
        web::listen(window, "resize", move |_event| {
            page.resize();
            if let Some(runner) = &runner {
                let mut view = runner.target().borrow_mut();
                view.fit(&win);
                // Stopped loops would otherwise leave the cleared canvas blank
                if !runner.is_running() {
                    view.render();
                }
            }
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Rover 404 starting...");

        let Some(window) = web::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let tuning = Tuning::load(&document);
        let seed = js_sys::Date::now() as u64;
        log::info!("Page seed: {}", seed);

        let page = Rc::new(Page::new(window.clone(), document.clone(), &tuning, seed));
        page.start();
        setup_page_controls(&page);
        setup_parallax(&window, &document, tuning.parallax.clone());
        setup_scanner(&document, tuning.scan.clone(), seed.wrapping_add(1));
        let runner = setup_runner(
            &window,
            &document,
            tuning.runner.clone(),
            seed.wrapping_add(2),
            page.lights_on.clone(),
        );
        setup_resize(&window, page, runner);

        log::info!("Rover 404 running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand_pcg::Pcg32;
    use rover_404::platform::{FrameDriven, FrameLoop, LoopControl, ManualLoop};
    use rover_404::rng;
    use rover_404::sim::{GameEvent, GameState, TickInput, tick};
    use rover_404::tuning::RunnerTuning;

    /// Runner driven by a simple jump-when-close autopilot
    struct Autopilot {
        state: GameState,
        rng: Pcg32,
    }

    impl Autopilot {
        /// Jump once the gap to the rock ahead is short enough to clear it
        fn wants_jump(&self) -> bool {
            let rover = &self.state.rover;
            let front = rover.pos.x + rover.size.x;
            self.state.rock.as_ref().is_some_and(|rock| {
                let gap = rock.pos.x - front;
                rover.on_ground && gap > 0.0 && gap < 35.0
            })
        }
    }

    impl FrameDriven for Autopilot {
        fn frame(&mut self, dt: f32) -> LoopControl {
            let input = TickInput {
                jump: self.wants_jump(),
            };
            for event in tick(&mut self.state, &input, dt, &mut self.rng) {
                if let GameEvent::Scored { score } = event {
                    log::debug!("Score {}", score);
                }
            }
            if self.state.is_over() {
                LoopControl::Stop
            } else {
                LoopControl::Continue
            }
        }
    }

    /// Simulate up to `seconds` at 60 fps. Returns (score, crashed).
    pub fn run(seed: u64, seconds: f32) -> (u32, bool) {
        let mut pilot = Autopilot {
            state: GameState::new(RunnerTuning::default()),
            rng: rng::seeded(seed),
        };
        pilot.state.restart(&mut pilot.rng);

        let dt = 1.0 / 60.0;
        let mut frames = ManualLoop::new();
        frames.resume();
        let limit = (seconds / dt) as u64;
        while frames.frames() < limit && frames.pump(&mut pilot, dt) {}

        (pilot.state.score, !frames.is_running())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rover 404 (native) starting...");
    log::info!("The page runs in the browser - use `trunk serve` for the web build");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let (score, crashed) = headless::run(seed, 60.0);
    println!(
        "Headless autopilot run: {} rocks cleared{}",
        score,
        if crashed { " before crashing" } else { " in 60s" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
