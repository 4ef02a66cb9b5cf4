use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::game::{DirectionChange, Outcome, Phase, SnakeGame};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Palette, Renderer};

/// Display refresh for the frame loop (~60 FPS)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Without release events, a boost lapses once key repeats stop arriving
const BOOST_HOLD: Duration = Duration::from_millis(150);

pub struct HumanMode {
    game: SnakeGame,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Terminal reports key releases
    release_events: bool,
    last_boost_press: Option<Instant>,
}

impl HumanMode {
    pub fn new(config: AppConfig) -> Result<Self> {
        let palette = Palette::from_config(&config.render.palette)?;
        let renderer = Renderer::new(palette, &config.render);

        let mut game = SnakeGame::new(config.game)?;
        game.reset(false);

        Ok(Self {
            game,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
            release_events: false,
            last_boost_press: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        self.release_events = supports_keyboard_enhancement().unwrap_or(false);
        if self.release_events {
            execute!(
                stderr,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("Failed to enable key release reporting")?;
        }
        info!(release_events = self.release_events, "terminal ready");

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => warn!(%err, "terminal event error"),
                        None => self.should_quit = true,
                    }
                }

                // One animation frame: advance by real elapsed time, then draw
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_frame);
                    last_frame = now;

                    self.update_game(now, elapsed);
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                let change = self.game.set_direction(direction);
                if change == DirectionChange::Boosted {
                    self.last_boost_press = Some(Instant::now());
                }
                debug!(?direction, ?change, "steer");
            }
            KeyAction::Release => {
                self.game.on_key_release();
                self.last_boost_press = None;
            }
            KeyAction::Start => {
                if self.game.phase() != Phase::Running {
                    self.start_game();
                }
            }
            KeyAction::Restart => self.start_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self, now: Instant, elapsed: Duration) {
        if !self.release_events {
            if let Some(pressed) = self.last_boost_press {
                if now.saturating_duration_since(pressed) > BOOST_HOLD {
                    self.game.on_key_release();
                    self.last_boost_press = None;
                }
            }
        }

        let result = self.game.advance(elapsed.as_secs_f64() * 1000.0);

        // Track game over
        if let Some(outcome) = result.info.outcome {
            let length = self.game.snapshot().len();
            info!(?outcome, length, "game over");
            self.metrics
                .on_game_over(length, outcome == Outcome::GridFull);
        }
    }

    fn start_game(&mut self) {
        self.game.reset(true);
        self.metrics.on_game_start();
        self.last_boost_press = None;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        if self.release_events {
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to restore keyboard mode")?;
        }
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
