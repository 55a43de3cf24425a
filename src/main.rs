//! District Driver entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use district_driver::audio::AudioManager;
    use district_driver::consts::*;
    use district_driver::input::{apply_key, apply_touches};
    use district_driver::persistence::{KeyValueStore, LocalStore, MemoryStore, load_json};
    use district_driver::renderer::palette;
    use district_driver::renderer::{CanvasBackend, RenderBackend, TextAlign, TextStyle, draw_scene};
    use district_driver::sim::{
        FrameClock, GameEvent, GameListener, GamePhase, GameState, TickInput, Vehicle,
        dispatch_events, tick,
    };
    use district_driver::{HighScores, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        input: TickInput,
        backend: Option<CanvasBackend>,
        audio: AudioManager,
        store: Box<dyn KeyValueStore>,
        highscores: HighScores,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store: Box<dyn KeyValueStore> = match LocalStore::open() {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!("{e}; scores will not persist");
                    Box::new(MemoryStore::new())
                }
            };

            let settings = Settings::load(store.as_ref());
            let highscores = HighScores::load(store.as_ref());
            let tuning = match load_json::<Tuning>(store.as_ref(), Tuning::STORAGE_KEY) {
                Ok(Some(tuning)) => {
                    log::info!("Using tuning override from storage");
                    tuning
                }
                Ok(None) => Tuning::default(),
                Err(e) => {
                    log::warn!("Ignoring tuning override: {e}");
                    Tuning::default()
                }
            };

            let best = highscores.top_score().unwrap_or(0);
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);

            Self {
                state: GameState::with_config(seed, tuning, settings.vehicle, best),
                clock: FrameClock::new(),
                input: TickInput::default(),
                backend: None,
                audio,
                store,
                highscores,
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, time: f64) {
            let dt = self.clock.frame_dt(time);
            let steps = self.clock.advance(dt);

            for _ in 0..steps {
                tick(&mut self.state, &self.input, SIM_DT);
                // Clear one-shot inputs after processing
                self.input.clear_actions();
            }

            self.drain_events();

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Forward events to collaborators; record the score at game over
        fn drain_events(&mut self) {
            let finished = self.state.events.iter().find_map(|e| match e {
                GameEvent::GameOver { score, .. } => Some(*score),
                _ => None,
            });

            let mut listeners: [&mut dyn GameListener; 1] = [&mut self.audio];
            dispatch_events(&mut self.state, &mut listeners);

            if let Some(score) = finished {
                self.record_score(score);
            }
        }

        /// Offer a leaderboard spot; the player may decline
        fn record_score(&mut self, score: u64) {
            let Some(rank) = self.highscores.potential_rank(score) else {
                return;
            };
            let Some(window) = web_sys::window() else {
                return;
            };
            let message = format!("Score {score} ranks #{rank}! Enter your name:");
            let name = window
                .prompt_with_message_and_default(&message, &self.settings.player_name)
                .ok()
                .flatten();
            let Some(name) = name else {
                log::info!("Score not saved");
                return;
            };

            let vehicle = self.state.player.vehicle;
            self.highscores
                .add_score(&name, vehicle, score, js_sys::Date::now());
            if let Err(e) = self.highscores.save(self.store.as_mut()) {
                log::warn!("Could not save high scores: {e}");
            }

            self.settings.player_name = name.trim().to_string();
            self.save_settings();
        }

        fn save_settings(&mut self) {
            if let Err(e) = self.settings.save(self.store.as_mut()) {
                log::warn!("Could not save settings: {e}");
            }
        }

        /// Cycle the vehicle on the title screen
        fn next_vehicle(&mut self) {
            if self.state.phase != GamePhase::Idle {
                return;
            }
            let all = Vehicle::ALL;
            let i = all
                .iter()
                .position(|v| *v == self.settings.vehicle)
                .unwrap_or(0);
            let vehicle = all[(i + 1) % all.len()];
            self.settings.vehicle = vehicle;
            self.state.set_vehicle(vehicle);
            self.save_settings();
            log::info!("Vehicle: {}", vehicle.as_str());
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(backend) = self.backend.as_mut() else {
                return;
            };
            draw_scene(&self.state, &self.settings, &mut *backend);

            if self.settings.show_fps {
                backend.draw_text(
                    &format!("{} fps", self.fps),
                    Vec2::new(FIELD_WIDTH - 16.0, FIELD_HEIGHT - 12.0),
                    TextStyle::new(14.0, palette::TEXT_DIM, TextAlign::Right),
                );
            }
            if self.state.phase == GamePhase::Idle {
                backend.draw_text(
                    &format!("Vehicle: {} (V to change)", self.settings.vehicle.as_str()),
                    Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - 60.0),
                    TextStyle::new(18.0, palette::TEXT_DIM, TextAlign::Center),
                );
            }
        }

        fn request_pause(&mut self) {
            if self.settings.pause_on_blur && self.state.phase == GamePhase::Playing {
                self.input.pause = true;
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {e}").into());
        }

        log::info!("District Driver starting...");

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

        // Backing store at device resolution, logical coordinates stay 800x600
        let dpr = window.device_pixel_ratio();
        canvas.set_width((FIELD_WIDTH as f64 * dpr) as u32);
        canvas.set_height((FIELD_HEIGHT as f64 * dpr) as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        match CanvasBackend::new(&canvas) {
            Some(mut backend) => {
                backend.set_scale(dpr);
                game.borrow_mut().backend = Some(backend);
            }
            None => log::error!("Canvas 2D context unavailable"),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("District Driver running!");
    }

    /// Touch points in play-field coordinates
    fn touch_points(event: &TouchEvent, canvas: &HtmlCanvasElement) -> Vec<Vec2> {
        let rect = canvas.get_bounding_client_rect();
        let sx = if rect.width() > 0.0 {
            FIELD_WIDTH as f64 / rect.width()
        } else {
            1.0
        };
        let sy = if rect.height() > 0.0 {
            FIELD_HEIGHT as f64 / rect.height()
        } else {
            1.0
        };
        let touches = event.touches();
        (0..touches.length())
            .filter_map(|i| touches.get(i))
            .map(|t| {
                Vec2::new(
                    ((t.client_x() as f64 - rect.left()) * sx) as f32,
                    ((t.client_y() as f64 - rect.top()) * sy) as f32,
                )
            })
            .collect()
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let field = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let key = event.key();
                let repeat = event.repeat();
                if key == "v" || key == "V" {
                    if !repeat {
                        g.next_vehicle();
                    }
                    return;
                }
                if apply_key(&mut g.input, &key, true, repeat) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                apply_key(&mut g.input, &event.key(), false, false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start/move/end all rebuild intent from the live touch list
        for name in ["touchstart", "touchmove", "touchend", "touchcancel"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let is_start = name == "touchstart";
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let points = touch_points(&event, &canvas_clone);
                let mut g = game.borrow_mut();
                if is_start {
                    g.audio.resume();
                    if matches!(g.state.phase, GamePhase::Idle | GamePhase::Ended) {
                        g.input.start = true;
                        g.input.restart = true;
                    }
                }
                apply_touches(&mut g.input, &points, field);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().request_pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.request_pause();
                // Keys released while unfocused never arrive
                let pause = g.input.pause;
                g.input = TickInput {
                    pause,
                    ..Default::default()
                };
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: the demo driver plays one session and the final frame is
/// recorded instead of drawn.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use district_driver::consts::SIM_DT;
    use district_driver::persistence::MemoryStore;
    use district_driver::renderer::{RecordingBackend, draw_scene};
    use district_driver::sim::{
        GameListener, GamePhase, GameState, TickInput, autopilot, dispatch_events, tick,
    };
    use district_driver::{HighScores, Settings};

    /// Logs what a real host would turn into sound and HUD updates
    #[derive(Default)]
    struct LogListener {
        collected: u32,
        hits: u32,
    }

    impl GameListener for LogListener {
        fn on_collect(&mut self) {
            self.collected += 1;
        }
        fn on_hit(&mut self) {
            self.hits += 1;
            log::info!("Hit! ({} so far)", self.hits);
        }
        fn on_score_change(&mut self, score: u64) {
            log::debug!("Score: {score}");
        }
        fn on_game_over(&mut self, score: u64, new_best: bool) {
            log::info!("Game over with {score}{}", if new_best { " (new best)" } else { "" });
        }
    }

    env_logger::init();
    log::info!("District Driver (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let mut store = MemoryStore::new();
    let settings = Settings::load(&store);
    let mut highscores = HighScores::load(&store);

    let mut state = GameState::with_config(
        seed,
        Default::default(),
        settings.vehicle,
        highscores.top_score().unwrap_or(0),
    );
    let mut listener = LogListener::default();

    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start, SIM_DT);

    // Five simulated minutes at most
    for _ in 0..(60 * 60 * 5) {
        let input = autopilot::steer(&state);
        tick(&mut state, &input, SIM_DT);
        let mut listeners: [&mut dyn GameListener; 1] = [&mut listener];
        dispatch_events(&mut state, &mut listeners);
        if state.phase == GamePhase::Ended {
            break;
        }
    }

    println!(
        "Seed {seed}: score {} after {:.1}s, {} collected, {} hits",
        state.score,
        state.time_ticks as f32 * SIM_DT,
        listener.collected,
        listener.hits
    );

    if let Some(rank) = highscores.add_score("Demo", settings.vehicle, state.score, 0.0) {
        println!("Leaderboard rank #{rank}");
        if let Err(e) = highscores.save(&mut store) {
            log::warn!("Could not save high scores: {e}");
        }
    }

    let mut backend = RecordingBackend::new();
    draw_scene(&state, &settings, &mut backend);
    println!("Final frame: {} draw calls", backend.commands.len());
}
