//! Greedy steering for unattended games
//!
//! Picks, each tick, the safe heading that brings the head closest to the
//! food. "Safe" means the next cell is on the grid, not part of the body and
//! leads into an open area at least as large as the snake.

use std::collections::{HashSet, VecDeque};

use crate::game::{Direction, GameState, Grid, Position};

pub struct Autopilot {
    grid: Grid,
}

impl Autopilot {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Heading to request for the next tick, or `None` to keep going straight
    pub fn choose(&self, state: &GameState) -> Option<Direction> {
        let head = state.head()?;
        let current = state.direction?;
        let occupied: HashSet<Position> = state.body.iter().copied().collect();

        let mut best: Option<(Direction, (bool, i32, bool))> = None;

        for dir in Direction::ALL {
            if dir != current && dir.shares_axis(current) {
                continue;
            }

            let next = head.moved_in_direction(dir);
            if !self.grid.contains(next) || occupied.contains(&next) {
                continue;
            }

            let roomy = self.open_area(next, &occupied) >= state.len();
            let distance = state
                .food
                .map(|food| (food.x - next.x).abs() + (food.y - next.y).abs())
                .unwrap_or(0);

            // Prefer room to move, then closeness to food, then not turning
            let key = (!roomy, distance, dir != current);
            if best.is_none_or(|(_, best_key)| key < best_key) {
                best = Some((dir, key));
            }
        }

        best.map(|(dir, _)| dir).filter(|dir| *dir != current)
    }

    /// Free cells reachable from `start`
    fn open_area(&self, start: Position, occupied: &HashSet<Position>) -> usize {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(pos) = queue.pop_front() {
            for dir in Direction::ALL {
                let next = pos.moved_in_direction(dir);
                if self.grid.contains(next) && !occupied.contains(&next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(body: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        GameState::new(
            body.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction,
            Position::new(food.0, food.1),
        )
    }

    #[test]
    fn test_turns_toward_food() {
        let pilot = Autopilot::new(Grid::new(10, 10));
        let state = state(&[(5, 5), (5, 6)], Direction::Up, (8, 5));

        assert_eq!(pilot.choose(&state), Some(Direction::Right));
    }

    #[test]
    fn test_keeps_heading_when_food_ahead() {
        let pilot = Autopilot::new(Grid::new(10, 10));
        let state = state(&[(5, 5), (5, 6)], Direction::Up, (5, 1));

        assert_eq!(pilot.choose(&state), None);
    }

    #[test]
    fn test_avoids_wall() {
        let pilot = Autopilot::new(Grid::new(10, 10));
        // Food is behind; straight on is the wall
        let state = state(&[(5, 0), (5, 1)], Direction::Up, (5, 9));

        let choice = pilot.choose(&state);
        assert!(matches!(choice, Some(Direction::Left | Direction::Right)));
    }

    #[test]
    fn test_avoids_own_body() {
        let pilot = Autopilot::new(Grid::new(10, 10));
        // Food to the left, but the body blocks that side
        let state = state(
            &[(5, 5), (5, 6), (4, 6), (4, 5), (4, 4)],
            Direction::Up,
            (0, 5),
        );

        assert_ne!(pilot.choose(&state), Some(Direction::Left));
    }

    #[test]
    fn test_never_requests_reverse() {
        let pilot = Autopilot::new(Grid::new(10, 10));
        let state = state(&[(5, 5), (4, 5)], Direction::Right, (0, 5));

        assert_ne!(pilot.choose(&state), Some(Direction::Left));
    }
}
