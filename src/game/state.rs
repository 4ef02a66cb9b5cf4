use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// A fractional position used only for drawing a body mid-tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPosition {
    pub x: f32,
    pub y: f32,
}

impl PendingPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear blend from `from` toward `to` by `t`
    pub fn lerp(from: Position, to: Position, t: f32) -> Self {
        Self {
            x: from.x as f32 + (to.x - from.x) as f32 * t,
            y: from.y as f32 + (to.y - from.y) as f32 * t,
        }
    }

    /// Nearest grid cell
    pub fn rounded(&self) -> Position {
        Position::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<Position> for PendingPosition {
    fn from(pos: Position) -> Self {
        Self::new(pos.x as f32, pos.y as f32)
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake covers every cell; no food can be placed
    GridFull,
}

/// Coarse lifecycle phase derived from the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started (possibly with a snake already laid out)
    Idle,
    Running,
    /// Wall or self collision; waiting for a reset
    Crashed,
    /// The grid filled up
    Won,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameState {
    pub alive: bool,
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// In-between body for the current frame, render only
    pub pending_body: Option<Vec<PendingPosition>>,
    pub food: Option<Position>,
    pub direction: Option<Direction>,
    pub outcome: Option<Outcome>,
    /// Committed ticks since the last reset
    pub steps: u32,
}

impl GameState {
    /// State before the first reset: nothing on the board
    pub fn idle() -> Self {
        Self::default()
    }

    /// Create a running game state
    pub fn new(body: Vec<Position>, direction: Direction, food: Position) -> Self {
        Self {
            alive: true,
            body,
            pending_body: None,
            food: Some(food),
            direction: Some(direction),
            outcome: None,
            steps: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.alive, self.outcome) {
            (true, _) => Phase::Running,
            (false, None) => Phase::Idle,
            (false, Some(Outcome::GridFull)) => Phase::Won,
            (false, Some(_)) => Phase::Crashed,
        }
    }

    /// Whether the game reached a phase only a reset can leave
    pub fn is_over(&self) -> bool {
        matches!(self.phase(), Phase::Crashed | Phase::Won)
    }

    /// Get the head position
    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Option<Position> {
        self.body.last().copied()
    }

    /// Get the length of the snake, which doubles as the score
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Body to draw this frame: the interpolated one when present
    pub fn render_body(&self) -> Vec<PendingPosition> {
        match &self.pending_body {
            Some(pending) => pending.clone(),
            None => self.body.iter().copied().map(PendingPosition::from).collect(),
        }
    }
}
