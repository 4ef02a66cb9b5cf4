use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::action::Direction;
use super::error::GameError;
use super::state::Position;

/// Random probes before falling back to a full scan
const SAMPLE_ATTEMPTS: usize = 64;

/// Bounded playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// True when one step from `cell` toward `direction` leaves the grid
    pub fn would_collide_with_wall(&self, cell: Position, direction: Direction) -> bool {
        !self.contains(cell.moved_in_direction(direction))
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// Every cell, column by column
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
    }

    /// Pick a cell outside `occupied` uniformly at random.
    ///
    /// Sparse boards are sampled directly; once at least half the board is
    /// taken, or sampling keeps missing, the free cells are enumerated.
    pub fn random_free_cell<R: Rng + ?Sized>(
        &self,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position, GameError> {
        let cells = self.cell_count();
        if cells == 0 {
            return Err(GameError::GridFull);
        }

        if occupied.len().saturating_mul(2) < cells {
            for _ in 0..SAMPLE_ATTEMPTS {
                let pos = Position::new(
                    rng.gen_range(0..self.width),
                    rng.gen_range(0..self.height),
                );
                if !occupied.contains(&pos) {
                    return Ok(pos);
                }
            }
        }

        let free: Vec<Position> = self.cells().filter(|pos| !occupied.contains(pos)).collect();
        free.choose(rng).copied().ok_or(GameError::GridFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20);

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(19, 19)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(20, 0)));
        assert!(!grid.contains(Position::new(0, 20)));
    }

    #[test]
    fn test_wall_lookahead() {
        let grid = Grid::new(3, 3);
        let corner = Position::new(0, 0);

        assert!(grid.would_collide_with_wall(corner, Direction::Up));
        assert!(grid.would_collide_with_wall(corner, Direction::Left));
        assert!(!grid.would_collide_with_wall(corner, Direction::Down));
        assert!(!grid.would_collide_with_wall(corner, Direction::Right));

        let far = Position::new(2, 2);
        assert!(grid.would_collide_with_wall(far, Direction::Right));
        assert!(grid.would_collide_with_wall(far, Direction::Down));
    }

    #[test]
    fn test_free_cell_avoids_occupied() {
        let grid = Grid::new(7, 7);
        let mut rng = StdRng::seed_from_u64(7);
        // (2,6) and (3,4) share a coordinate product; both must stay masked
        let occupied: HashSet<Position> = grid
            .cells()
            .filter(|pos| *pos != Position::new(5, 1))
            .collect();

        for _ in 0..20 {
            assert_eq!(
                grid.random_free_cell(&occupied, &mut rng),
                Ok(Position::new(5, 1))
            );
        }
    }

    #[test]
    fn test_full_grid_reports_grid_full() {
        let grid = Grid::new(2, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let occupied: HashSet<Position> = grid.cells().collect();

        assert_eq!(grid.cell_count(), 4);
        assert_eq!(
            grid.random_free_cell(&occupied, &mut rng),
            Err(GameError::GridFull)
        );
    }

    #[test]
    fn test_sparse_large_board_samples_directly() {
        let grid = Grid::new(100_000, 100_000);
        let mut rng = StdRng::seed_from_u64(3);
        let occupied = HashSet::from([Position::new(0, 0), Position::new(0, 1)]);

        for _ in 0..100 {
            let pos = grid.random_free_cell(&occupied, &mut rng).unwrap();
            assert!(grid.contains(pos));
            assert!(!occupied.contains(&pos));
        }
    }

    #[test]
    fn test_free_cell_reaches_every_cell() {
        let grid = Grid::new(3, 2);
        let mut rng = StdRng::seed_from_u64(42);
        let occupied = HashSet::from([Position::new(0, 0)]);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            seen.insert(grid.random_free_cell(&occupied, &mut rng).unwrap());
        }

        assert_eq!(seen.len(), 5);
        assert!(!seen.contains(&Position::new(0, 0)));
    }
}
