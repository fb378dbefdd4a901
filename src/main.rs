//! Slitviz entry point
//!
//! Handles platform-specific initialization: DOM control wiring, the
//! sampling interval timer, and the render loops.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent, WheelEvent};

    use slitviz::consts::*;
    use slitviz::renderer::{PlotRenderState, SceneRenderState, plot, scene};
    use slitviz::sim::{Command, Mode, SimState, apply_command, sample_tick, theoretical_curve};
    use slitviz::Settings;

    /// Application instance holding all state
    struct App {
        state: SimState,
        scene: Option<SceneRenderState>,
        plot: Option<PlotRenderState>,
        settings: Settings,
        /// Full plot redraw pending (set by every command and sample tick)
        plot_dirty: bool,
        /// Interval handle; present iff playing in particle mode
        timer_id: Option<i32>,
        // Orbit drag state
        dragging: bool,
        last_mouse: (f32, f32),
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(seed: u64) -> Self {
            Self {
                state: SimState::new(seed),
                scene: None,
                plot: None,
                settings: Settings::load(),
                plot_dirty: true,
                timer_id: None,
                dragging: false,
                last_mouse: (0.0, 0.0),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn update_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the 3D scene for the current frame
        fn render_scene(&mut self) {
            let mut vertices = scene::barrier(self.state.params.slit_separation);
            vertices.extend(scene::detection_screen());
            vertices.extend(scene::hit_markers(
                &self.state.hits,
                self.settings.max_markers,
            ));

            if let Some(ref mut scene_state) = self.scene {
                match scene_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        scene_state.resize(scene_state.size.0, scene_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Scene render error: {:?}", e),
                }
            }
        }

        /// Rebuild and redraw the plot if anything changed
        fn redraw_plot(&mut self) {
            if !self.plot_dirty {
                return;
            }

            let mut vertices = plot::axis_baseline();
            match self.state.mode {
                Mode::Wave => {
                    vertices.extend(plot::curve_polyline(&theoretical_curve(&self.state.params)));
                }
                Mode::Particle => {
                    vertices.extend(plot::histogram_bars(
                        self.state.histogram.counts(),
                        self.state.histogram.centers(),
                    ));
                    if self.settings.overlay_curve {
                        vertices
                            .extend(plot::curve_polyline(&theoretical_curve(&self.state.params)));
                    }
                }
            }

            if let Some(ref mut plot_state) = self.plot {
                match plot_state.render(&vertices) {
                    Ok(_) => self.plot_dirty = false,
                    Err(wgpu::SurfaceError::Lost) => {
                        plot_state.resize(plot_state.size.0, plot_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Plot render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-count") {
                el.set_text_content(Some(&self.state.histogram.total().to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    el.set_text_content(Some(""));
                }
            }

            if let Some(el) = document.get_element_by_id("play-btn") {
                el.set_text_content(Some(if self.state.playing { "Pause" } else { "Play" }));
            }
        }
    }

    /// Apply a command and re-sync the timer and plot
    fn dispatch(app: &Rc<RefCell<App>>, cmd: Command) {
        {
            let mut a = app.borrow_mut();
            apply_command(&mut a.state, cmd);
            a.plot_dirty = true;
        }
        sync_timer(app);
        app.borrow().update_hud();
    }

    /// Start or stop the sampling interval so that a handle exists iff
    /// the state machine says sampling should run
    fn sync_timer(app: &Rc<RefCell<App>>) {
        let should_run = app.borrow().state.timer_should_run();
        let running = app.borrow().timer_id.is_some();

        if should_run == running {
            return;
        }

        let window = web_sys::window().expect("no window");
        if should_run {
            let tick_app = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let mut a = tick_app.borrow_mut();
                sample_tick(&mut a.state);
                a.plot_dirty = true;
                a.update_hud();
            });
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                SAMPLE_INTERVAL_MS,
            ) {
                Ok(id) => {
                    app.borrow_mut().timer_id = Some(id);
                    log::info!("Sampling timer started ({SAMPLE_INTERVAL_MS}ms)");
                }
                Err(e) => log::error!("Failed to start sampling timer: {:?}", e),
            }
            closure.forget();
        } else if let Some(id) = app.borrow_mut().timer_id.take() {
            window.clear_interval_with_handle(id);
            log::info!("Sampling timer stopped");
        }
    }

    /// Size a canvas's backing store to its CSS size
    fn backing_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width.max(1));
        canvas.set_height(height.max(1));
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Slitviz starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Simulation seeded: {}", seed);

        // Dropdown navigation for the surrounding site shell; independent
        // of the simulator
        slitviz::nav::init();

        let scene_canvas: HtmlCanvasElement = document
            .get_element_by_id("scene-canvas")
            .expect("no scene canvas")
            .dyn_into()
            .expect("not a canvas");
        let plot_canvas: HtmlCanvasElement = document
            .get_element_by_id("plot-canvas")
            .expect("no plot canvas")
            .dyn_into()
            .expect("not a canvas");

        let (scene_w, scene_h) = backing_size(&scene_canvas);
        let (plot_w, plot_h) = backing_size(&plot_canvas);

        // Initialize WebGPU: one instance, one surface per canvas
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let scene_surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(scene_canvas.clone()))
            .expect("Failed to create scene surface");
        let scene_adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&scene_surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");
        log::info!("Using adapter: {:?}", scene_adapter.get_info().name);

        let scene_state =
            SceneRenderState::new(scene_surface, &scene_adapter, scene_w, scene_h).await;

        let plot_surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(plot_canvas.clone()))
            .expect("Failed to create plot surface");
        let plot_adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&plot_surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        let plot_state = PlotRenderState::new(plot_surface, &plot_adapter, plot_w, plot_h).await;

        {
            let mut a = app.borrow_mut();
            a.scene = Some(scene_state);
            a.plot = Some(plot_state);
        }

        // Parameters start from whatever the sliders show
        setup_sliders(&document, app.clone());
        setup_buttons(&document, app.clone());
        setup_keyboard(app.clone());
        setup_orbit_controls(&scene_canvas, app.clone());
        setup_resize(scene_canvas.clone(), plot_canvas.clone(), app.clone());
        setup_auto_pause(app.clone());

        app.borrow().update_hud();

        request_animation_frame(app);

        log::info!("Slitviz running!");
    }

    /// Read a slider's current value
    fn slider_value(input: &HtmlInputElement) -> Option<f32> {
        input.value().parse::<f32>().ok()
    }

    fn set_label(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn setup_sliders(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        // Slit separation, one decimal displayed
        if let Some(slider) = document
            .get_element_by_id("slit-sep-slider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            if let Some(d) = slider_value(&slider) {
                dispatch(&app, Command::SetSlitSeparation(d));
                set_label(document, "slit-sep-value", &format!("{:.1}", d));
            }

            let app = app.clone();
            let slider_clone = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(d) = slider_value(&slider_clone) {
                    dispatch(&app, Command::SetSlitSeparation(d));
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        set_label(&document, "slit-sep-value", &format!("{:.1}", d));
                    }
                }
            });
            let _ = slider
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::error!("Missing #slit-sep-slider, slit separation control disabled");
        }

        // Wavelength, two decimals displayed
        if let Some(slider) = document
            .get_element_by_id("wavelength-slider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            if let Some(lambda) = slider_value(&slider) {
                dispatch(&app, Command::SetWavelength(lambda));
                set_label(document, "wavelength-value", &format!("{:.2}", lambda));
            }

            let app = app.clone();
            let slider_clone = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(lambda) = slider_value(&slider_clone) {
                    dispatch(&app, Command::SetWavelength(lambda));
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        set_label(&document, "wavelength-value", &format!("{:.2}", lambda));
                    }
                }
            });
            let _ = slider
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::error!("Missing #wavelength-slider, wavelength control disabled");
        }
    }

    fn setup_buttons(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        // Mode toggle checkbox: checked = particle mode
        if let Some(toggle) = document
            .get_element_by_id("mode-toggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let app_clone = app.clone();
            let toggle_clone = toggle.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mode = if toggle_clone.checked() {
                    Mode::Particle
                } else {
                    Mode::Wave
                };
                log::info!("Mode switched to {}", mode.as_str());
                dispatch(&app_clone, Command::SwitchMode(mode));
            });
            let _ = toggle
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("play-btn") {
            let app_clone = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&app_clone, Command::TogglePlay);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&app, Command::Reset);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                " " => {
                    event.prevent_default();
                    dispatch(&app, Command::TogglePlay);
                }
                "r" | "R" => dispatch(&app, Command::Reset),
                "c" | "C" => {
                    let mut a = app.borrow_mut();
                    a.settings.overlay_curve = !a.settings.overlay_curve;
                    a.settings.save();
                    a.plot_dirty = true;
                }
                "f" | "F" => {
                    {
                        let mut a = app.borrow_mut();
                        a.settings.show_fps = !a.settings.show_fps;
                        a.settings.save();
                    }
                    app.borrow().update_hud();
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_orbit_controls(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.dragging = true;
                a.last_mouse = (event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                if !a.dragging {
                    return;
                }
                let pos = (event.offset_x() as f32, event.offset_y() as f32);
                let dx = pos.0 - a.last_mouse.0;
                let dy = pos.1 - a.last_mouse.1;
                a.last_mouse = pos;
                if let Some(ref mut scene_state) = a.scene {
                    scene_state.camera.orbit(dx, dy);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event_name in ["mouseup", "mouseleave"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().dragging = false;
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                if let Some(ref mut scene_state) = a.scene {
                    scene_state.camera.zoom(event.delta_y() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(
        scene_canvas: HtmlCanvasElement,
        plot_canvas: HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (sw, sh) = backing_size(&scene_canvas);
            let (pw, ph) = backing_size(&plot_canvas);
            let mut a = app.borrow_mut();
            // camera aspect and surface configuration update together
            if let Some(ref mut scene_state) = a.scene {
                scene_state.resize(sw, sh);
            }
            if let Some(ref mut plot_state) = a.plot {
                plot_state.resize(pw, ph);
            }
            a.plot_dirty = true;
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let document = web_sys::window().and_then(|w| w.document()).expect("no document");
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                && app.borrow().state.playing
            {
                dispatch(&app, Command::TogglePlay);
                log::info!("Auto-paused (tab hidden)");
            }
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update_fps(time);
            a.render_scene();
            a.redraw_plot();
            if a.settings.show_fps {
                a.update_hud();
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Slitviz (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning sampler convergence check...");
    convergence_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn convergence_check() {
    use slitviz::sim::{Command, Mode, SimState, apply_command, intensity, sample_tick};

    let mut state = SimState::new(42);
    apply_command(&mut state, Command::SwitchMode(Mode::Particle));
    apply_command(&mut state, Command::TogglePlay);

    for _ in 0..20_000 {
        sample_tick(&mut state);
    }

    let total = state.histogram.total();
    let peak = state.histogram.max_count();
    let center = state.histogram.counts()[state.histogram.bins() / 2];
    println!(
        "  {total} samples recorded, peak bin {peak}, center bin {center}"
    );
    assert!(total > 19_000, "rejection cap skipped too many draws");

    // The central fringe is a maximum of the intensity law
    let params = state.params;
    assert!((intensity(0.0, &params) - 1.0).abs() < 1e-6);
    println!("✓ Sampler convergence check passed!");
}
