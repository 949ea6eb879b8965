//! Slope Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, TouchEvent};

    use glam::Vec2;
    use slope_runner::assets::AssetCatalog;
    use slope_runner::platform::{InputState, is_game_key};
    use slope_runner::renderer::{RenderState, VertexCanvas, draw_session};
    use slope_runner::sim::{GameMode, PlaySession, PopupTone};
    use slope_runner::{AppPhase, Game, GameConfig, format_score, format_time};

    const PLAYER_NAME_KEY: &str = "slope_runner_player_name";

    /// Browser-side state around the core game
    struct Driver {
        game: Game,
        input: InputState,
        render_state: Option<RenderState>,
        canvas: VertexCanvas,
        assets: AssetCatalog,
        last_phase: AppPhase,
    }

    impl Driver {
        fn new(game: Game, assets: AssetCatalog) -> Self {
            Self {
                game,
                input: InputState::new(),
                render_state: None,
                canvas: VertexCanvas::new(),
                assets,
                last_phase: AppPhase::Menu,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(session) = self.game.session.as_ref() else {
                return;
            };
            self.canvas.clear();
            draw_session(session, &mut self.canvas, &self.assets);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.canvas.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD and overlay elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let phase = self.game.phase;
            if phase != self.last_phase {
                set_visible(document, "menu", phase == AppPhase::Menu);
                set_visible(document, "hud", matches!(phase, AppPhase::Playing | AppPhase::Paused));
                set_visible(document, "pause-menu", phase == AppPhase::Paused);
                set_visible(document, "game-over", phase == AppPhase::GameOver);
                if phase == AppPhase::GameOver {
                    self.show_report(document);
                }
                self.last_phase = phase;
            }

            if phase == AppPhase::Menu {
                let mode = self.game.selected_mode;
                set_class(document, "mode-freerun", mode == GameMode::Freerun, "mode selected", "mode");
                set_class(document, "mode-slalom", mode == GameMode::Slalom, "mode selected", "mode");
                return;
            }

            if let Some(session) = self.game.session.as_ref() {
                update_session_hud(document, session);
            }
        }

        fn show_report(&self, document: &Document) {
            let Some(report) = self.game.report.as_ref() else {
                return;
            };
            let summary = &report.summary;
            let headline = match summary.mode {
                GameMode::Freerun => format_score(summary.score),
                GameMode::Slalom => format_time(summary.time),
            };
            set_text(document, "#final-score", &headline);
            set_text(document, "#final-distance", &format!("{:.0}m", summary.distance_m.floor()));
            set_text(document, "#final-tokens", &summary.tokens.to_string());
            set_text(document, "#final-combo", &format!("x{}", summary.best_combo));
            set_visible(document, "new-best", report.new_best);
            let rank = report
                .global_rank
                .map(|r| format!("Global rank #{}", r))
                .unwrap_or_default();
            set_text(document, "#final-rank", &rank);
        }
    }

    fn update_session_hud(document: &Document, session: &PlaySession) {
        match session.mode {
            GameMode::Freerun => {
                set_text(document, "#hud-score .hud-value", &format_score(session.score.total()));
                set_text(
                    document,
                    "#hud-distance .hud-value",
                    &format!("{}m", session.player.distance_meters().floor() as u64),
                );
            }
            GameMode::Slalom => {
                set_text(document, "#hud-score .hud-value", &format_time(session.slalom_time));
                set_text(
                    document,
                    "#hud-distance .hud-value",
                    &format!(
                        "{}/{}",
                        session.gates_passed + session.gates_missed,
                        session.terrain.total_gates
                    ),
                );
            }
        }

        let combo = session.score.combo;
        set_visible(document, "hud-combo", combo > 1);
        if combo > 1 {
            set_text(document, "#hud-combo .hud-value", &format!("x{}", combo));
        }
        set_visible(document, "boss-warning", session.boss_warning_active());

        for (id, popup) in [
            ("event-popup", session.event_popup.as_ref()),
            ("trick-popup", session.trick_popup.as_ref()),
        ] {
            let Some(el) = document.get_element_by_id(id) else {
                continue;
            };
            match popup {
                Some(p) => {
                    let tone = match p.tone {
                        PopupTone::Reward => "popup reward",
                        PopupTone::Penalty => "popup penalty",
                        PopupTone::Warning => "popup warning",
                    };
                    el.set_text_content(Some(&p.text));
                    let _ = el.set_attribute("class", tone);
                    let _ = el.set_attribute("style", &format!("opacity: {:.2}", p.alpha()));
                }
                None => {
                    let _ = el.set_attribute("class", "popup hidden");
                }
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_class(document: &Document, id: &str, on: bool, on_class: &str, off_class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if on { on_class } else { off_class });
        }
    }

    /// Inline `<script type="application/json">` contents, if present
    fn inline_json(document: &Document, id: &str) -> Option<String> {
        document.get_element_by_id(id)?.text_content()
    }

    fn stored_player_name() -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(PLAYER_NAME_KEY).ok()?
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Slope Runner starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Tuning overrides and sprites are optional; defaults and placeholders otherwise
        let config = inline_json(&document, "game-config")
            .map(|json| {
                GameConfig::from_json(&json).unwrap_or_else(|e| {
                    log::warn!("Ignoring bad game config: {}", e);
                    GameConfig::default()
                })
            })
            .unwrap_or_default();
        let assets = inline_json(&document, "asset-manifest")
            .map(|json| AssetCatalog::from_manifest_or_empty(&json))
            .unwrap_or_default();
        if !assets.is_empty() {
            log::info!(
                "{} sprites listed; the vertex renderer keeps drawing placeholders",
                assets.len()
            );
        }

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(config, seed);
        game.player_name = stored_player_name().unwrap_or_default();
        let driver = Rc::new(RefCell::new(Driver::new(game, assets)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(state) => driver.borrow_mut().render_state = Some(state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(&canvas, driver.clone());
        setup_buttons(&document, driver.clone());
        setup_auto_pause(driver.clone());

        set_visible(&document, "menu", true);

        // Start game loop
        request_animation_frame(driver);

        log::info!("Slope Runner running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, driver: Rc<RefCell<Driver>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let code = event.code();
                if is_game_key(&code) {
                    event.prevent_default();
                }
                driver.borrow_mut().input.key_down(&code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                driver.borrow_mut().input.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch swipes
        let touch_point = |event: &TouchEvent| {
            event
                .touches()
                .get(0)
                .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
        };
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(at) = touch_point(&event) {
                    driver.borrow_mut().input.touch_start(at);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(at) = touch_point(&event) {
                    driver.borrow_mut().input.touch_move(at);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                driver.borrow_mut().input.touch_end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(driver: Rc<RefCell<Driver>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(driver, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(driver: Rc<RefCell<Driver>>, time: f64) {
        let running = {
            let mut d = driver.borrow_mut();
            let input = d.input.snapshot();
            let running = d.game.frame(time, &input);
            d.input.end_frame();
            d.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                d.update_hud(&document);
            }
            running
        };

        if running {
            request_animation_frame(driver);
        }
    }

    fn setup_buttons(document: &Document, driver: Rc<RefCell<Driver>>) {
        for (id, mode) in [
            ("freerun-btn", GameMode::Freerun),
            ("slalom-btn", GameMode::Slalom),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let driver = driver.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    driver.borrow_mut().game.start_game(mode);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Resume button
        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                driver.borrow_mut().game.resume();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back to menu from pause or game over
        for id in ["quit-btn", "menu-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let driver = driver.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    driver.borrow_mut().game.return_to_menu();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(driver: Rc<RefCell<Driver>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let driver = driver.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    driver.borrow_mut().game.request_pause();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside); held keys never see their keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut d = driver.borrow_mut();
                d.input.reset();
                d.game.request_pause();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use slope_runner::sim::{GameMode, TickInput};
    use slope_runner::{AppPhase, Game, GameConfig, format_score, format_time};

    env_logger::init();
    log::info!("Slope Runner (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Headless demo: one slalom run straight down the hill at 60 fps
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let mut game = Game::new(GameConfig::default(), seed);
    game.start_game(GameMode::Slalom);

    let input = TickInput::default();
    let mut t = 0.0;
    for _ in 0..60 * 120 {
        t += 1000.0 / 60.0;
        game.frame(t, &input);
        if game.phase == AppPhase::GameOver {
            break;
        }
    }

    match game.report.as_ref() {
        Some(report) => {
            let s = &report.summary;
            println!(
                "Slalom finished in {} ({} passed, {} missed), {} points, {:.0} m",
                format_time(s.time),
                s.gates_passed,
                s.gates_missed,
                format_score(s.score),
                s.distance_m
            );
        }
        None => println!("Run still going after two minutes"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
