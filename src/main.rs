//! Orb Shooter entry point
//!
//! In the browser this wires the canvas, DOM score label and input listeners
//! to the simulation and drives it with requestAnimationFrame. Natively it
//! runs a scripted headless session and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use orb_shooter::Settings;
    use orb_shooter::input::{InputEvent, InputState, Key};
    use orb_shooter::renderer::{Canvas2d, DomScore, ScoreSink, publish_score, render};
    use orb_shooter::sim::{GamePhase, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        canvas: Canvas2d,
        canvas_el: HtmlCanvasElement,
        score: Option<DomScore>,
        /// Scheduled animation frame, if any
        frame_id: Option<i32>,
    }

    impl Game {
        /// One simulation tick plus its render
        fn frame(&mut self) {
            let input = self.input.take_tick_input();
            let was_over = self.state.phase == GamePhase::Over;
            let events = tick(&mut self.state, &input);
            render(&self.state, &mut self.canvas);
            if let Some(score) = self.score.as_mut() {
                publish_score(&events, score);
            }
            if !was_over && self.state.phase == GamePhase::Over && !self.state.settings.auto_restart {
                log::info!("Press Enter to play again");
            }
        }

        /// Mouse position relative to the canvas
        fn canvas_point(&self, e: &MouseEvent) -> Vec2 {
            let rect = self.canvas_el.get_bounding_client_rect();
            Vec2::new(
                (e.client_x() as f64 - rect.left()) as f32,
                (e.client_y() as f64 - rect.top()) as f32,
            )
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Orb Shooter starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")?
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::load(&canvas);
        canvas.set_width(settings.width as u32);
        canvas.set_height(settings.height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let mut score = document.query_selector(".score")?.map(DomScore::new);
        if score.is_none() {
            log::warn!("No .score element, score display disabled");
        }
        if let Some(score) = score.as_mut() {
            score.set_score(0);
        }

        let seed = settings
            .seed
            .unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
        let canvas2d = Canvas2d::new(ctx, settings.width, settings.height);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::with_settings(settings, seed),
            input: InputState::default(),
            canvas: canvas2d,
            canvas_el: canvas.clone(),
            score,
            frame_id: None,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Orb Shooter running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Aim
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.canvas_point(&e);
                g.input.handle(InputEvent::PointerMove(pos));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.canvas_point(&e);
                g.input.handle(InputEvent::Click(pos));
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(window) = web_sys::window() else {
            log::error!("no window for key listeners");
            return;
        };

        // Key down: movement, pause, restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: KeyboardEvent| {
                let Some(key) = Key::from_code(&e.code()) else {
                    return;
                };
                e.prevent_default();
                if key == Key::Pause && e.repeat() {
                    return;
                }

                let toggled = game.borrow_mut().input.handle(InputEvent::KeyDown(key));
                if toggled {
                    toggle_pause(game.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |e: KeyboardEvent| {
                if let Some(key) = Key::from_code(&e.code()) {
                    game.borrow_mut().input.handle(InputEvent::KeyUp(key));
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pausing cancels the scheduled frame; resuming schedules a new one
    fn toggle_pause(game: Rc<RefCell<Game>>) {
        let phase = game.borrow_mut().state.toggle_pause();
        match phase {
            GamePhase::Paused => {
                let pending = game.borrow_mut().frame_id.take();
                if let (Some(id), Some(window)) = (pending, web_sys::window()) {
                    if let Err(e) = window.cancel_animation_frame(id) {
                        log::warn!("cancel_animation_frame failed: {e:?}");
                    }
                }
            }
            GamePhase::Active => {
                game.borrow_mut().input.discard_pending();
                if game.borrow().frame_id.is_none() {
                    request_animation_frame(game);
                }
            }
            GamePhase::Over => {}
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(handle);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().frame_id = Some(id),
            Err(e) => log::error!("request_animation_frame failed: {e:?}"),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let paused = {
            let mut g = game.borrow_mut();
            g.frame_id = None;
            g.frame();
            g.state.phase == GamePhase::Paused
        };

        if !paused {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use serde::Serialize;

    use orb_shooter::Settings;
    use orb_shooter::input::{InputEvent, InputState, Key};
    use orb_shooter::renderer::{CommandBuffer, publish_score, render};
    use orb_shooter::sim::{Direction, GamePhase, GameState, tick};

    /// Frames between scripted shots
    const FIRE_EVERY: u64 = 15;
    /// Frames between scripted direction changes
    const TURN_EVERY: u64 = 120;

    /// What a headless run produced
    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub seed: u64,
        pub frames: u64,
        pub sessions: u32,
        pub best_score: u64,
        pub final_score: u64,
        pub phase: GamePhase,
        pub enemies: usize,
        pub projectiles: usize,
        pub particles: usize,
        pub last_frame_draw_calls: usize,
    }

    /// Play `frames` ticks with a simple scripted player
    pub fn run(settings: Settings, frames: u64) -> RunSummary {
        let seed = settings.seed.unwrap_or(0x5eed);
        let mut state = GameState::with_settings(settings, seed);
        let mut input = InputState::default();
        let mut canvas = CommandBuffer::default();
        let mut scores: Vec<u64> = vec![0];
        let mut sessions = 1;
        let mut best_score = 0;

        for frame in 0..frames {
            if frame % TURN_EVERY == 0 {
                let (press, release) = if (frame / TURN_EVERY) % 2 == 0 {
                    (Direction::Left, Direction::Right)
                } else {
                    (Direction::Right, Direction::Left)
                };
                input.handle(InputEvent::KeyUp(Key::Move(release)));
                input.handle(InputEvent::KeyDown(Key::Move(press)));
            }

            // Shoot at the newest enemy, or straight up if there is none
            let target = state
                .enemies
                .last()
                .map(|e| e.pos)
                .unwrap_or_else(|| state.player.center() - Vec2::new(0.0, 100.0));
            input.handle(InputEvent::PointerMove(target));
            if frame % FIRE_EVERY == 0 {
                input.handle(InputEvent::Click(target));
            }
            if state.phase == GamePhase::Over {
                input.handle(InputEvent::KeyDown(Key::Restart));
                sessions += 1;
            }

            let events = tick(&mut state, &input.take_tick_input());
            publish_score(&events, &mut scores);
            best_score = best_score.max(state.score);

            canvas.clear();
            render(&state, &mut canvas);
        }

        log::info!("Played {} frames over {} session(s)", frames, sessions);
        log::debug!("Score updates: {:?}", scores);

        RunSummary {
            seed,
            frames,
            sessions,
            best_score,
            final_score: state.score,
            phase: state.phase,
            enemies: state.enemies.len(),
            projectiles: state.projectiles.len(),
            particles: state.particles.len(),
            last_frame_draw_calls: canvas.commands.len(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Orb Shooter (native) starting...");
    log::info!("Native mode runs a scripted headless session - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => orb_shooter::Settings::from_file(std::path::Path::new(&path))?,
        None => orb_shooter::Settings::default(),
    };
    let frames = match args.next() {
        Some(n) => n.parse()?,
        None => 600,
    };

    let summary = headless::run(settings, frames);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
