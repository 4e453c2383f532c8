//! Simulation engine: the headless core of the game.
//!
//! `SimulationEngine` owns the field, the session, the resolution machine and
//! the seeded RNG. It processes player commands at tick boundaries, runs the
//! systems, and produces a `GameStateSnapshot` per tick. Same seed and same
//! command stream give the same snapshots.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use frogbox_core::commands::PlayerCommand;
use frogbox_core::config::LevelConfig;
use frogbox_core::constants::MAX_TIME_SCALE;
use frogbox_core::enums::{FailureCause, GamePhase, ResolutionPhase, SessionOutcome};
use frogbox_core::events::{PresentationCue, SessionEvent};
use frogbox_core::state::GameStateSnapshot;
use frogbox_core::types::{FrogId, ScreenPoint, SimTime, WorldRect};

use crate::camera::{OrthoCamera, Projection};
use crate::field::Field;
use crate::resolution::{ResolutionMachine, ResolutionRules, ResolveContext};
use crate::selection::SelectionTracker;
use crate::session::Session;
use crate::systems;
use crate::systems::freeze::FreezeBuff;
use crate::world_setup::{self, FrogSpawn};

/// Default viewport the camera is fitted to, in pixels.
const DEFAULT_VIEWPORT: (f64, f64) = (900.0, 1600.0);

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub level: LevelConfig,
    /// Maps gesture screen points onto the field.
    pub camera: OrthoCamera,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::with_level(LevelConfig::default())
    }
}

impl SimConfig {
    /// Defaults around a specific level, with the camera fitted to its field.
    pub fn with_level(level: LevelConfig) -> Self {
        let camera = OrthoCamera::fit_field(
            level.field_half_width,
            level.field_half_height,
            DEFAULT_VIEWPORT.0,
            DEFAULT_VIEWPORT.1,
        );
        Self {
            seed: 42,
            time_scale: 1.0,
            level,
            camera,
        }
    }
}

/// The simulation engine. Owns the field and all session state.
pub struct SimulationEngine {
    field: Field,
    session: Session,
    resolution: ResolutionMachine,
    selection: SelectionTracker,
    freeze: FreezeBuff,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    level: LevelConfig,
    rules: ResolutionRules,
    projection: Box<dyn Projection + Send>,
    command_queue: VecDeque<PlayerCommand>,
    cues: Vec<PresentationCue>,
    session_events: Vec<SessionEvent>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let level = config.level;
        Self {
            field: Field::new(),
            session: Session::new(level.initial_health, level.time_limit_secs),
            resolution: ResolutionMachine::new(),
            selection: SelectionTracker::default(),
            freeze: FreezeBuff::default(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            rules: ResolutionRules::from_level(&level),
            level,
            projection: Box::new(config.camera),
            command_queue: VecDeque::new(),
            cues: Vec::new(),
            session_events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
            self.update_phase();
        }

        systems::snapshot::build_snapshot(
            &self.field,
            &self.time,
            self.phase,
            self.resolution.phase(),
            &self.session,
            self.selection.world_rect(&*self.projection),
            std::mem::take(&mut self.cues),
            std::mem::take(&mut self.session_events),
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn resolution_phase(&self) -> ResolutionPhase {
        self.resolution.phase()
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Mutable field access for external collaborators. Frogs they remove are
    /// counted once by the next tick's reconciliation.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// Spawn a frog and register it with the session.
    pub fn spawn_frog(&mut self, spawn: FrogSpawn) -> FrogId {
        let (_, id) = world_setup::spawn_frog(&mut self.field, &mut self.rng, &self.level, spawn);
        self.session.add_frogs(1, &mut self.session_events);
        id
    }

    /// Resolve a world-space selection rectangle directly.
    /// Returns false when the selection was rejected or matched nothing.
    pub fn resolve_selection(&mut self, rect: WorldRect) -> bool {
        if self.phase != GamePhase::Active {
            warn!(phase = ?self.phase, "selection outside an active level");
            return false;
        }
        let mut ctx = ResolveContext {
            field: &mut self.field,
            session: &mut self.session,
            rng: &mut self.rng,
            rules: &self.rules,
            cues: &mut self.cues,
            events: &mut self.session_events,
        };
        self.resolution.begin(&mut ctx, &rect)
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartLevel => self.start_level(),
            PlayerCommand::Revive => self.revive(),
            PlayerCommand::ReturnToMenu => {
                self.teardown();
                self.phase = GamePhase::MainMenu;
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
            PlayerCommand::BeginSelection { x, y } => {
                if self.phase == GamePhase::Active {
                    self.selection.begin(ScreenPoint::new(x, y));
                }
            }
            PlayerCommand::UpdateSelection { x, y } => {
                if self.phase == GamePhase::Active && self.selection.update(ScreenPoint::new(x, y)) {
                    self.emit_selecting_indicator();
                }
            }
            PlayerCommand::EndSelection { x, y } => {
                let Some(gesture) = self.selection.finish(ScreenPoint::new(x, y)) else {
                    return;
                };
                if self.session.is_settling() {
                    warn!("selection released while a resolution is running; ignored");
                    return;
                }
                let rect = gesture.world_rect(&*self.projection);
                self.resolve_selection(rect);
            }
            PlayerCommand::CancelSelection => self.selection.cancel(),
            PlayerCommand::FreezeAll { duration_secs } => {
                if self.phase == GamePhase::Active {
                    self.freeze.apply(&mut self.field, duration_secs, &mut self.cues);
                }
            }
            PlayerCommand::SetIsolated { frog, isolated } => self.set_isolated(frog, isolated),
        }
    }

    /// Spawn the configured level from scratch.
    fn start_level(&mut self) {
        self.teardown();
        self.session = Session::new(self.level.initial_health, self.level.time_limit_secs);
        self.time = SimTime::default();
        let spawned = world_setup::spawn_level(&mut self.field, &mut self.rng, &self.level);
        self.session.add_frogs(spawned, &mut self.session_events);
        self.phase = GamePhase::Active;
        info!(frogs = spawned, "level started");
    }

    /// Full-health restore after a failure, limited per level.
    fn revive(&mut self) {
        if self.phase != GamePhase::LevelFailed {
            warn!(phase = ?self.phase, "revive outside a failed level");
            return;
        }
        if self.session.revives_used() >= self.level.max_revives {
            warn!(used = self.session.revives_used(), "no revives left");
            return;
        }
        self.teardown();
        let spawned = world_setup::spawn_level(&mut self.field, &mut self.rng, &self.level);
        self.session.restore(spawned, &mut self.session_events);
        self.phase = GamePhase::Active;
        info!(
            frogs = spawned,
            revives_used = self.session.revives_used(),
            "level revived"
        );
    }

    /// Drop any in-flight resolution, gesture and buff, and empty the field.
    fn teardown(&mut self) {
        self.abort_resolution();
        self.selection.cancel();
        self.freeze.clear();
        self.field.clear();
    }

    fn abort_resolution(&mut self) {
        let mut ctx = ResolveContext {
            field: &mut self.field,
            session: &mut self.session,
            rng: &mut self.rng,
            rules: &self.rules,
            cues: &mut self.cues,
            events: &mut self.session_events,
        };
        self.resolution.abort(&mut ctx);
    }

    fn set_isolated(&mut self, frog: FrogId, isolated: bool) {
        let Some(entity) = self.field.entity_of(frog) else {
            warn!(?frog, "isolation for an unknown frog");
            return;
        };
        let mut frozen = false;
        self.field.update_status(entity, |s| {
            s.isolated = isolated;
            frozen = s.frozen;
        });
        self.cues.push(PresentationCue::StatusVisual {
            frog,
            frozen,
            isolated,
        });
    }

    fn emit_selecting_indicator(&mut self) {
        let Some(rect) = self.selection.world_rect(&*self.projection) else {
            return;
        };
        let frogs = systems::spatial::query(&self.field, &rect)
            .into_iter()
            .filter_map(|e| self.field.frog(e).map(|f| f.id))
            .collect();
        self.cues.push(PresentationCue::SelectingIndicator { rect, frogs });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt() * self.time_scale;

        // 1. Resolution pacing
        {
            let mut ctx = ResolveContext {
                field: &mut self.field,
                session: &mut self.session,
                rng: &mut self.rng,
                rules: &self.rules,
                cues: &mut self.cues,
                events: &mut self.session_events,
            };
            self.resolution.advance(&mut ctx, dt);
        }
        // 2. Freeze buff expiry
        self.freeze.tick(&mut self.field, dt, &mut self.cues);
        // 3. Color cycling
        systems::color_cycle::run(&mut self.field, &mut self.rng, &self.level.cycle, dt);
        // 4. Countdown
        systems::countdown::run(&mut self.session, dt, &mut self.session_events);
        // 5. Removal reconciliation and notifications
        systems::cleanup::run(&mut self.field, &mut self.session, &mut self.session_events);

        // A session that ended outside the resolution takes the lock down with it.
        if self.session.is_ended() && self.resolution.is_active() {
            debug!("session ended, dropping in-flight resolution");
            self.abort_resolution();
        }
        // Health lost with no resolution left to report it.
        if self.session.is_health_depleted() && !self.session.is_settling() {
            self.session
                .check_failure(FailureCause::HealthDepleted, &mut self.session_events);
        }
    }

    fn update_phase(&mut self) {
        let next = match self.session.outcome() {
            Some(SessionOutcome::Victory) => GamePhase::LevelComplete,
            Some(SessionOutcome::Failure(_)) => GamePhase::LevelFailed,
            None => return,
        };
        if self.phase != next {
            self.selection.cancel();
            self.phase = next;
        }
    }
}
