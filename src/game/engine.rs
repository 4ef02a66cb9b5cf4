use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::{
    action::{Direction, DirectionChange},
    clock::{ClockEvent, TickClock},
    config::GameConfig,
    error::GameError,
    grid::Grid,
    state::{GameState, Outcome, PendingPosition, Position},
};

/// Spawn band for the starting head, as fractions of each axis
const SPAWN_MIN: f64 = 0.5;
const SPAWN_MAX: f64 = 0.9;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the game ended, if it ended this frame
    pub outcome: Option<Outcome>,
}

/// Result of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether a tick committed a new body this frame
    pub ticked: bool,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn quiet(terminated: bool) -> Self {
        Self {
            ticked: false,
            terminated,
            info: StepInfo {
                ate_food: false,
                outcome: None,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    clock: TickClock,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let grid = Grid::new(config.grid_width as i32, config.grid_height as i32);
        let clock = TickClock::new(config.ticks_per_second, config.speed_multiplier);
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            grid,
            clock,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    /// Drop any partial tick and boost carried over from an earlier state
    pub fn restart_clock(&mut self) {
        self.clock.restart();
        self.clock.set_boosted(false);
    }

    /// Lay out a fresh snake, heading and food.
    ///
    /// With `start_immediately` unset the board is populated but the game stays
    /// idle until the next reset.
    pub fn reset(&mut self, start_immediately: bool) -> GameState {
        self.restart_clock();

        let body = self.generate_snake();
        let direction = self.initial_direction(&body);

        let mut state = GameState {
            alive: start_immediately,
            body,
            direction: Some(direction),
            ..GameState::default()
        };

        match self.place_food(&state.body) {
            Ok(food) => state.food = Some(food),
            Err(err) => {
                debug!(%err, "no room for food on a fresh board");
                self.end_game(&mut state, Outcome::GridFull);
            }
        }

        debug!(
            head = ?state.head(),
            ?direction,
            food = ?state.food,
            started = state.alive,
            "game reset"
        );

        state
    }

    /// Feed one frame's elapsed time into the simulation.
    ///
    /// At most one tick commits per call. Non-positive or non-finite elapsed
    /// times leave everything untouched.
    pub fn advance(&mut self, state: &mut GameState, elapsed_ms: f64) -> StepResult {
        if !state.alive {
            return StepResult::quiet(state.is_over());
        }

        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return StepResult::quiet(false);
        }

        let (Some(head), Some(direction)) = (state.head(), state.direction) else {
            return StepResult::quiet(false);
        };

        match self.clock.accumulate(elapsed_ms) {
            ClockEvent::Partial { progress } => {
                if self.config.smooth_interpolation {
                    self.interpolate(state, head, direction, progress)
                } else {
                    StepResult::quiet(false)
                }
            }
            ClockEvent::Tick => self.commit_tick(state, head, direction),
        }
    }

    /// Request a new heading for the next tick
    pub fn set_direction(&mut self, state: &mut GameState, requested: Direction) -> DirectionChange {
        if state.is_over() {
            return DirectionChange::Ignored;
        }

        match state.direction {
            Some(current) if current == requested => {
                self.clock.set_boosted(true);
                DirectionChange::Boosted
            }
            // Reversing would run straight back through the neck
            Some(current) if current.shares_axis(requested) => DirectionChange::Ignored,
            _ => {
                state.direction = Some(requested);
                DirectionChange::Turned
            }
        }
    }

    /// Key released: drop back to base speed
    pub fn release_key(&mut self) {
        self.clock.set_boosted(false);
    }

    /// Pick a heading for a freshly spawned snake.
    ///
    /// Keeps the head-to-tail forward vector unless it runs straight into a
    /// wall, in which case a random non-reversing, non-walled turn is taken.
    pub fn initial_direction(&mut self, body: &[Position]) -> Direction {
        let Some(&head) = body.first() else {
            return Direction::Up;
        };

        let forward = match body.get(1) {
            Some(next) => Direction::from_delta(head.x - next.x, head.y - next.y)
                .unwrap_or(Direction::Up),
            None => Direction::Up,
        };

        if !self.grid.would_collide_with_wall(head, forward) {
            return forward;
        }

        let survivors: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| *dir != forward.opposite())
            .filter(|dir| !self.grid.would_collide_with_wall(head, *dir))
            .collect();

        survivors.choose(&mut self.rng).copied().unwrap_or(forward)
    }

    /// Two-cell snake placed toward the far quadrant of the grid
    fn generate_snake(&mut self) -> Vec<Position> {
        let head = Position::new(
            self.spawn_coordinate(self.grid.width),
            self.spawn_coordinate(self.grid.height),
        );

        let neighbours: Vec<Position> = Direction::ALL
            .into_iter()
            .filter(|dir| !self.grid.would_collide_with_wall(head, *dir))
            .map(|dir| head.moved_in_direction(dir))
            .collect();

        // Validated grids hold at least three cells, so a neighbour always exists
        let tail = neighbours.choose(&mut self.rng).copied().unwrap_or(head);

        vec![head, tail]
    }

    fn spawn_coordinate(&mut self, extent: i32) -> i32 {
        let max = f64::from((extent - 1).max(0));
        let low = (max * SPAWN_MIN).floor() as i32;
        let high = ((max * SPAWN_MAX).floor() as i32).max(low);
        self.rng.gen_range(low..=high)
    }

    /// Spawn food at a random empty position
    fn place_food(&mut self, body: &[Position]) -> Result<Position, GameError> {
        let occupied: HashSet<Position> = body.iter().copied().collect();
        let food = self.grid.random_free_cell(&occupied, &mut self.rng)?;
        trace!(?food, "food placed");
        Ok(food)
    }

    fn interpolate(
        &mut self,
        state: &mut GameState,
        head: Position,
        direction: Direction,
        progress: f64,
    ) -> StepResult {
        // Past the halfway mark the drawn head would already overlap the wall
        if progress > 0.5 && self.grid.would_collide_with_wall(head, direction) {
            return self.end_game(state, Outcome::Wall);
        }

        let t = progress as f32;
        let mut pending = Vec::with_capacity(state.body.len());
        pending.push(PendingPosition::lerp(
            head,
            head.moved_in_direction(direction),
            t,
        ));
        pending.extend(
            state
                .body
                .windows(2)
                .map(|pair| PendingPosition::lerp(pair[1], pair[0], t)),
        );
        state.pending_body = Some(pending);

        StepResult::quiet(false)
    }

    fn commit_tick(
        &mut self,
        state: &mut GameState,
        head: Position,
        direction: Direction,
    ) -> StepResult {
        let new_head = head.moved_in_direction(direction);

        if !self.grid.contains(new_head) {
            return self.end_game(state, Outcome::Wall);
        }

        // The tail has not moved out yet, so entering its cell is a collision
        if state.is_occupied_by_snake(new_head) {
            return self.end_game(state, Outcome::SelfCollision);
        }

        let ate_food = state.food == Some(new_head);

        let mut body = Vec::with_capacity(state.body.len() + 1);
        body.push(new_head);
        body.extend_from_slice(&state.body);
        if !ate_food {
            body.pop();
        }

        state.body = body;
        state.pending_body = None;
        state.steps += 1;

        if ate_food {
            match self.place_food(&state.body) {
                Ok(food) => state.food = Some(food),
                Err(err) => {
                    debug!(%err, length = state.len(), "snake filled the grid");
                    state.food = None;
                    let mut result = self.end_game(state, Outcome::GridFull);
                    result.ticked = true;
                    result.info.ate_food = true;
                    return result;
                }
            }
        }

        StepResult {
            ticked: true,
            terminated: false,
            info: StepInfo {
                ate_food,
                outcome: None,
            },
        }
    }

    fn end_game(&mut self, state: &mut GameState, outcome: Outcome) -> StepResult {
        state.alive = false;
        state.outcome = Some(outcome);
        state.pending_body = None;

        debug!(?outcome, length = state.len(), steps = state.steps, "game over");

        StepResult {
            ticked: false,
            terminated: true,
            info: StepInfo {
                ate_food: false,
                outcome: Some(outcome),
            },
        }
    }
}
