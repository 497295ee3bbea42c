//! Lane Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use lane_dodger::consts::MAX_FRAME_MS;
    use lane_dodger::renderer::{DomRenderer, project};
    use lane_dodger::sim::{Direction, Session};
    use lane_dodger::tuning::Tuning;

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: DomRenderer,
        last_time: f64,
        /// Sub-millisecond remainder carried into the next frame
        carry_ms: f64,
    }

    impl Game {
        /// Feed wall-clock time into the session's timers
        fn update(&mut self, time: f64) {
            let elapsed = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            let total = elapsed + self.carry_ms;
            let whole = total.floor();
            self.carry_ms = total - whole;
            self.session.advance(whole as u64);
        }

        /// Push pending events and current positions to the DOM
        fn render(&mut self) {
            let events = self.session.drain_events();
            if let Err(e) = self.renderer.apply_events(&events) {
                log::error!("DOM update failed: {:?}", e);
            }
            let frame = project(&self.session.state, self.session.layout());
            self.renderer.draw(&frame);
        }

        fn restart(&mut self) {
            self.session.start();
            self.carry_ms = 0.0;
            self.render();
        }
    }

    /// Optional `<script type="application/json" id="tuning">` overrides
    fn load_tuning(document: &Document) -> Tuning {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Tuning::from_json_or_default(&json),
            _ => {
                log::info!("Using default tuning");
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Lane Dodger starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let renderer = DomRenderer::attach(document.clone())?;
        let layout = renderer.measure_layout();
        log::info!("Play area {}x{}", layout.width, layout.height);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(load_tuning(&document), layout, seed);
        log::info!("Session created with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            last_time: 0.0,
            carry_ms: 0.0,
        }));

        setup_input_handlers(&document, game.clone());
        setup_restart_button(&document, game.clone());

        game.borrow_mut().restart();
        request_animation_frame(game);
        log::info!("Lane Dodger running!");
        Ok(())
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(direction) = Direction::from_key(&event.key()) {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.session.steer(direction) {
                    // Reflect the lane change without waiting for the next frame
                    g.render();
                }
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("restart-button") else {
            log::warn!("No #restart-button element; restart disabled");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().restart();
            log::info!("Game restarted");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
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
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Dodger (native) starting...");
    log::info!("The browser build is the real game - run with `trunk serve`");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5eed);
    let (score, seconds) = demo::autoplay(seed);
    println!("Headless run (seed {}): score {} in {:.1}s", seed, score, seconds);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session with a naive dodging policy
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use lane_dodger::sim::{Direction, Lane, Session};
    use lane_dodger::{Layout, Tuning};

    /// Simulated wall-clock cap for a demo run (ms)
    const MAX_RUN_MS: u64 = 5 * 60 * 1000;
    /// Frame length the demo pretends the browser renders at (ms)
    const FRAME_MS: u64 = 16;

    /// Steer away from the lowest obstacle in the player's lane and play
    /// until the first collision. Returns the score and simulated seconds.
    pub fn autoplay(seed: u64) -> (u32, f64) {
        let mut session = Session::new(Tuning::default(), Layout::default(), seed);
        session.start();
        let start_ms = session.now_ms();

        while session.is_running() && session.now_ms() - start_ms < MAX_RUN_MS {
            let layout = *session.layout();
            let danger_line = layout.player_top() - layout.obstacle_height * 3.0;
            let threatened: Vec<Lane> = session
                .state
                .obstacles
                .iter()
                .filter(|o| o.top > danger_line && o.top < layout.height)
                .map(|o| o.lane)
                .collect();

            if threatened.contains(&session.state.player.lane) {
                let current = session.state.player.lane;
                let target = Lane::ALL
                    .into_iter()
                    .filter(|lane| !threatened.contains(lane))
                    .min_by_key(|lane| lane.index().abs_diff(current.index()));
                if let Some(target) = target {
                    while session.state.player.lane != target {
                        let dir = if target < session.state.player.lane {
                            Direction::Left
                        } else {
                            Direction::Right
                        };
                        session.steer(dir);
                    }
                }
            }

            session.advance(FRAME_MS);
            session.drain_events();
        }

        let seconds = (session.now_ms() - start_ms) as f64 / 1000.0;
        log::info!("Demo finished: score {} after {:.1}s", session.state.score, seconds);
        (session.state.score, seconds)
    }
}
