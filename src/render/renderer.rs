use std::collections::HashMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::palette::{Palette, RenderConfig};
use crate::game::{GameState, Outcome, Phase, Position, SnakeGame};
use crate::metrics::GameMetrics;

pub struct Renderer {
    palette: Palette,
    config: RenderConfig,
    tile_size: usize,
}

impl Renderer {
    pub fn new(palette: Palette, config: &RenderConfig) -> Self {
        let config = RenderConfig {
            tile_size: config.tile_size.max(1),
            ..config.clone()
        };
        Self {
            palette,
            tile_size: usize::from(config.tile_size),
            config,
        }
    }

    /// Centre the bordered board inside `area`, clipped to fit
    fn board_area(&self, area: Rect, grid_width: usize, grid_height: usize) -> Rect {
        let (columns, rows) = self.config.canvas_size(grid_width, grid_height);
        let width = u16::try_from(columns.saturating_add(2)).unwrap_or(u16::MAX).min(area.width);
        let height = u16::try_from(rows.saturating_add(2)).unwrap_or(u16::MAX).min(area.height);

        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    pub fn render(&self, frame: &mut Frame, game: &SnakeGame, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(game, metrics);
        frame.render_widget(stats, chunks[0]);

        let state = game.snapshot();
        match state.phase() {
            Phase::Crashed | Phase::Won => {
                let game_over = self.render_game_over(state);
                frame.render_widget(game_over, chunks[1]);
            }
            Phase::Idle | Phase::Running => {
                let config = game.config();
                let board = self.board_area(chunks[1], config.grid_width, config.grid_height);
                let grid = self.render_grid(game);
                frame.render_widget(grid, board);
            }
        }

        let controls = self.render_controls(state.phase());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, game: &SnakeGame) -> Paragraph<'_> {
        let state = game.snapshot();
        let config = game.config();
        let body = state.render_body();

        // Earlier segments win, so the head is never hidden
        let mut segments: HashMap<Position, usize> = HashMap::with_capacity(body.len());
        for (index, pos) in body.iter().enumerate() {
            segments.entry(pos.rounded()).or_insert(index);
        }

        let background = Style::default().bg(self.palette.tile);
        let mut lines = Vec::with_capacity(config.grid_height);

        for y in 0..config.grid_height {
            let mut spans = Vec::with_capacity(config.grid_width);

            for x in 0..config.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if let Some(&index) = segments.get(&pos) {
                    Span::styled(
                        "█".repeat(self.tile_size),
                        background.fg(self.palette.snake_color(index, body.len())),
                    )
                } else if state.food == Some(pos) {
                    Span::styled(
                        self.padded("●"),
                        background.fg(self.palette.food).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(self.padded("·"), background.fg(self.palette.border))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match state.phase() {
            Phase::Idle => " Snake - press SPACE ",
            _ => " Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn padded(&self, glyph: &str) -> String {
        let mut tile = String::from(glyph);
        tile.push_str(&" ".repeat(self.tile_size.saturating_sub(1)));
        tile
    }

    fn render_stats(&self, game: &SnakeGame, metrics: &GameMetrics) -> Paragraph<'_> {
        let state = game.snapshot();
        let speed = game.engine().clock().current_speed();
        let speed_style = if game.engine().clock().is_boosted() {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.best_length.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Steps: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.steps.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{speed:.1}/s"), speed_style),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let (headline, colour) = match state.outcome {
            Some(Outcome::GridFull) => ("GRID FULL - YOU WIN", Color::Green),
            Some(Outcome::SelfCollision) => ("GAME OVER - BIT YOURSELF", Color::Red),
            _ => ("GAME OVER - HIT THE WALL", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(colour).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.len().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "SPACE",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colour)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("HJKL", Style::default().fg(Color::Cyan)),
            Span::raw(" to move, repeat to hurry | "),
        ];
        if phase != Phase::Running {
            spans.push(Span::styled("SPACE", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" to start | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Palette::default(), &RenderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(game: &SnakeGame) -> String {
        let renderer = Renderer::default();
        let metrics = GameMetrics::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, game, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_idle_board_shows_snake_and_food() {
        let mut game = SnakeGame::new(GameConfig::small().with_seed(1)).unwrap();
        game.reset(false);

        let text = screen_text(&game);
        assert!(text.contains("press SPACE"));
        assert!(text.contains("██"));
        assert!(text.contains("●"));
        assert!(text.contains("Length: 2"));
    }

    #[test]
    fn test_board_sized_from_canvas() {
        let renderer = Renderer::default();
        let area = Rect::new(0, 3, 80, 18);

        // 10x10 grid at 2 columns per tile plus the border
        let board = renderer.board_area(area, 10, 10);
        assert_eq!((board.width, board.height), (22, 12));
        assert_eq!((board.x, board.y), (29, 6));

        // Clipped when the terminal is smaller than the canvas
        let board = renderer.board_area(area, 60, 30);
        assert_eq!(board, area);
    }

    #[test]
    fn test_game_over_screen() {
        let mut game = SnakeGame::new(GameConfig::small().with_seed(1)).unwrap();
        game.load_state(GameState::new(
            vec![Position::new(0, 0), Position::new(1, 0)],
            Direction::Left,
            Position::new(5, 5),
        ));
        game.advance(1_000.0);

        let text = screen_text(&game);
        assert!(text.contains("HIT THE WALL"));
        assert!(text.contains("Final Length: 2"));
    }
}
