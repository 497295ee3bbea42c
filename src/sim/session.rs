//! Game lifecycle: start, stop, and timer dispatch
//!
//! The session owns the game state together with the two timers that drive
//! it (the fixed-cadence tick loop and the self-rescheduling spawner). Game
//! over cancels both, so nothing mutates the state until the next `start()`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::input::{Direction, move_player};
use super::layout::Layout;
use super::schedule::{Scheduler, TimerHandle};
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{spawn_obstacle, tick};
use crate::tuning::Tuning;

/// Work a timer performs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Tick,
    Spawn,
}

/// Lifecycle controller for one player's games
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    tuning: Tuning,
    layout: Layout,
    scheduler: Scheduler<Task>,
    tick_timer: Option<TimerHandle>,
    spawn_timer: Option<TimerHandle>,
    rng: Pcg32,
}

impl Session {
    /// A stopped session; call [`Session::start`] to play.
    /// Tuning that fails validation is replaced by the defaults.
    pub fn new(tuning: Tuning, layout: Layout, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Tuning::default()
            }
        };
        Self {
            state: GameState::new(&tuning),
            tuning,
            layout,
            scheduler: Scheduler::new(),
            tick_timer: None,
            spawn_timer: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Virtual time elapsed since the session was created (ms)
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Armed timers (2 while running, 0 after game over)
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Begin a fresh run, discarding whatever was in progress
    pub fn start(&mut self) {
        self.cancel_timers();

        self.state.reset(&self.tuning);
        self.state.phase = GamePhase::Running;
        self.state.events.push(GameEvent::Started);
        self.state.events.push(GameEvent::ScoreChanged { score: 0 });

        self.tick_timer = Some(self.scheduler.set_interval(self.tuning.tick_ms, Task::Tick));
        self.spawn_timer = Some(
            self.scheduler
                .set_timeout(self.state.spawn_interval_ms, Task::Spawn),
        );
        log::info!("Game started");
    }

    /// End the run. Idempotent.
    pub fn stop(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.state.phase = GamePhase::Stopped;
        self.cancel_timers();
        self.state.events.push(GameEvent::GameOver {
            score: self.state.score,
        });
        log::info!(
            "Game over: score {} after {} ticks",
            self.state.score,
            self.state.time_ticks
        );
    }

    fn cancel_timers(&mut self) {
        if let Some(handle) = self.tick_timer.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.spawn_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Move virtual time forward, firing every timer that comes due
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some((_, task)) = self.scheduler.pop_due(target) {
            self.dispatch(task);
        }
        self.scheduler.advance_to(target);
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::Tick => {
                if tick(&mut self.state, &self.tuning, &self.layout).is_some() {
                    self.stop();
                }
            }
            Task::Spawn => {
                self.spawn_timer = None;
                if !self.state.is_running() {
                    return;
                }
                spawn_obstacle(&mut self.state, &self.layout, &mut self.rng);
                // Interval read now, so difficulty changes apply from the next cycle
                self.spawn_timer = Some(
                    self.scheduler
                        .set_timeout(self.state.spawn_interval_ms, Task::Spawn),
                );
            }
        }
    }

    /// Apply a lane change request. Returns true if the player moved.
    pub fn steer(&mut self, direction: Direction) -> bool {
        move_player(&mut self.state, direction)
    }

    /// Take the renderer's pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
