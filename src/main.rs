//! Terminal runner (default binary).
//!
//! One loop iteration is one frame: drain key events until the frame budget
//! is spent, turn them into an input snapshot, move the camera, advance the
//! rules by the measured wall-clock time, then render and flush.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::info;
use simplelog::WriteLogger;

use tetris3d::config::{AppConfig, Cli};
use tetris3d::core::{GameLogic, GameSnapshot};
use tetris3d::input::{is_interrupt, key_label, InputState, KeyMap};
use tetris3d::term::{FrameBuffer, GameView, OrbitCamera, TerminalRenderer, Viewport};
use tetris3d::types::Action;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;
    init_logging(&config)?;
    info!(
        "starting: seed {} board {}x{}x{}",
        config.game.seed, config.game.board_width, config.game.board_depth, config.game.board_height
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let restored = term.exit();
    info!("shutdown");
    result.and(restored)
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("create log file {}", config.log_file.display()))?;
    WriteLogger::init(config.level_filter()?, simplelog::Config::default(), file)
        .context("install logger")?;
    Ok(())
}

fn key_hints(map: &KeyMap) -> Vec<(String, String)> {
    [
        (Action::RotateClockwise, "rotate cw"),
        (Action::RotateCounterClockwise, "rotate ccw"),
        (Action::TiltAway, "tilt away"),
        (Action::TiltTowards, "tilt towards"),
        (Action::MoveAway, "move away"),
        (Action::MoveTowards, "move towards"),
        (Action::Accelerate, "drop fast"),
        (Action::Pause, "pause"),
        (Action::CameraCenter, "center view"),
        (Action::Quit, "quit"),
    ]
    .into_iter()
    .map(|(action, text)| (key_label(map.key_for(action)), text.to_string()))
    .collect()
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let key_map = config.key_map()?;
    let mut logic = GameLogic::new(&config.game);
    let board = &logic.state().board;
    let mut camera = OrbitCamera::for_board(board.width(), board.depth(), board.height());
    let view = GameView::default().with_hints(key_hints(&key_map));
    let mut input = InputState::new(key_map);

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(config.frame_ms);
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        loop {
            let timeout = frame.saturating_sub(frame_start.elapsed());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if is_interrupt(key) {
                        return Ok(());
                    }
                    input.handle_key_event(key);
                }
                // Release events for keys held while unfocused never arrive
                Event::FocusLost => input.reset(),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        let frame_input = input.take_snapshot();
        if frame_input.is_pressed(Action::Quit) {
            info!("quit after {:.1}s of play", logic.state().total_time);
            return Ok(());
        }

        camera.apply_input(&frame_input);
        logic.update(dt, &frame_input, camera.forward());

        logic.state().snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, camera.forward(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
