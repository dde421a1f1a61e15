//! Rule engine tests - step machine, timers and view-relative input

use glam::{IVec3, Vec3};
use tetris3d::core::{
    Action, Axis, Block, BlockKind, GameConfig, GameLogic, GameState, InputSnapshot, Phase, Rgb8,
    Spin,
};

const COLOR: Rgb8 = Rgb8::new(90, 160, 220);

fn view() -> Vec3 {
    Vec3::new(-1.0, -0.5, -1.0).normalize()
}

fn small(width: u32, depth: u32, height: u32) -> GameConfig {
    GameConfig {
        board_width: width,
        board_depth: depth,
        board_height: height,
        ..GameConfig::default()
    }
}

fn idle() -> InputSnapshot {
    InputSnapshot::new()
}

#[test]
fn test_new_logic_is_uninitialized() {
    let logic = GameLogic::new(&GameConfig::default());
    assert_eq!(logic.phase(), Phase::Uninitialized);
    assert!(logic.state().falling_block.is_none());
    assert!(!logic.is_finished());
}

#[test]
fn test_phase_transitions_of_one_block() {
    let mut logic = GameLogic::new(&small(4, 4, 6));

    logic.single_step();
    assert_eq!(logic.phase(), Phase::NewBlockCreation);

    let mut seen_falling = false;
    for _ in 0..20 {
        logic.single_step();
        match logic.phase() {
            Phase::BlockFalling => seen_falling = true,
            Phase::BlockMerge => break,
            other => panic!("unexpected phase {other:?}"),
        }
    }
    assert!(seen_falling);
    assert_eq!(logic.phase(), Phase::BlockMerge);

    logic.single_step();
    assert_eq!(logic.phase(), Phase::NewBlockCreation);
}

#[test]
fn test_end_to_end_layer_erase() {
    let config = small(3, 3, 4);
    let mut state = GameState::new(&config);
    state.board.fill_layer(0, 0x0010_2030);
    state.falling_block = Some(Block::create(BlockKind::T, COLOR, &state.board));
    state.phase = Phase::NewBlockCreation;
    let mut logic = GameLogic::with_state(state, 1);

    assert_eq!(
        logic.state().falling_block.as_ref().map(|b| b.position()),
        Some(IVec3::new(1, 2, 1))
    );

    let mut steps = 0;
    while logic.phase() != Phase::BlockMerge {
        logic.single_step();
        steps += 1;
        assert!(steps < 10, "block never merged");
    }
    assert_eq!(steps, 2);

    let layer1 = logic.state().board.layer(1).to_vec();
    let mut probe = logic.state().board.clone();
    assert_eq!(probe.erase_filled_layers(), 1);

    logic.single_step();
    assert_eq!(logic.phase(), Phase::LayersErase);
    assert_eq!(logic.state().board.layer(0), layer1.as_slice());
    assert_eq!(logic.state().board, probe);
    assert_eq!(
        logic.state().board.get(IVec3::new(1, 1, 1)),
        Some(COLOR.pack())
    );

    logic.single_step();
    assert_eq!(logic.phase(), Phase::NewBlockCreation);
}

#[test]
fn test_rotation_direction_flips_with_view_from_below() {
    let place = |logic: &mut GameLogic| {
        let state = logic.state_mut();
        state.falling_block = Some(Block::new(BlockKind::T, COLOR, IVec3::new(3, 8, 3)));
        state.phase = Phase::BlockFalling;
    };
    let press = InputSnapshot::new().with_pressed(Action::RotateClockwise);

    let mut from_above = GameLogic::new(&GameConfig::default());
    place(&mut from_above);
    from_above.update(0.0, &press, Vec3::new(0.0, -1.0, 0.0));

    let mut from_below = GameLogic::new(&GameConfig::default());
    place(&mut from_below);
    from_below.update(0.0, &press, Vec3::new(0.0, 1.0, 0.0));

    let start = Block::new(BlockKind::T, COLOR, IVec3::new(3, 8, 3));
    let above = from_above.state().falling_block.clone();
    let below = from_below.state().falling_block.clone();
    assert_eq!(above, Some(start.rotated(Axis::Y, Spin::Clockwise)));
    assert_eq!(below, Some(start.rotated(Axis::Y, Spin::CounterClockwise)));
    assert_ne!(above, below);
}

#[test]
fn test_move_away_follows_camera() {
    let mut logic = GameLogic::new(&GameConfig::default());
    {
        let state = logic.state_mut();
        state.falling_block = Some(Block::new(BlockKind::T, COLOR, IVec3::new(3, 8, 3)));
        state.phase = Phase::BlockFalling;
    }
    let away = InputSnapshot::new().with_pressed(Action::MoveAway);

    logic.update(0.0, &away, Vec3::new(0.2, -0.4, -0.9).normalize());
    assert_eq!(
        logic.state().falling_block.as_ref().map(|b| b.position()),
        Some(IVec3::new(3, 8, 2))
    );

    logic.update(0.0, &away, Vec3::new(0.9, -0.4, 0.1).normalize());
    assert_eq!(
        logic.state().falling_block.as_ref().map(|b| b.position()),
        Some(IVec3::new(4, 8, 2))
    );
}

#[test]
fn test_blocked_move_is_ignored() {
    let mut logic = GameLogic::new(&small(4, 4, 6));
    {
        let state = logic.state_mut();
        state.falling_block = Some(Block::new(BlockKind::T, COLOR, IVec3::new(1, 2, 0)));
        state.phase = Phase::BlockFalling;
    }
    let before = logic.state().falling_block.clone();
    let towards = InputSnapshot::new().with_pressed(Action::MoveTowards);

    // Looking along +z, towards is -z, which leaves the board
    logic.update(0.0, &towards, Vec3::new(0.0, -0.3, 1.0).normalize());

    assert_eq!(logic.state().falling_block, before);
}

#[test]
fn test_step_chains_across_updates() {
    let mut logic = GameLogic::new(&GameConfig::default());

    logic.update(0.6, &idle(), view());
    assert_eq!(logic.phase(), Phase::NewBlockCreation);
    // Spawning does not rearm the timer
    assert!(logic.state().seconds_to_next_block_fall < 0.0);
    let spawned_at = logic.state().falling_block.as_ref().map(|b| b.position());

    logic.update(0.0, &idle(), view());
    assert_eq!(logic.phase(), Phase::BlockFalling);
    assert_eq!(logic.state().seconds_to_next_block_fall, 0.5);
    assert_eq!(
        logic.state().falling_block.as_ref().map(|b| b.position()),
        spawned_at.map(|p| p + IVec3::NEG_Y)
    );

    logic.update(0.1, &idle(), view());
    assert_eq!(logic.phase(), Phase::BlockFalling);
    assert!((logic.state().total_time - 0.7).abs() < 1e-6);
}

#[test]
fn test_accelerate_uses_max_fall_step() {
    let mut logic = GameLogic::new(&GameConfig::default());
    logic.update(0.6, &idle(), view());
    logic.update(0.0, &idle(), view());
    assert_eq!(logic.phase(), Phase::BlockFalling);

    let hold = InputSnapshot::new().with_down(Action::Accelerate);
    logic.update(0.0, &hold, view());
    let state = logic.state();
    assert_eq!(state.block_current_speed, 1.0 / 25.0);
    assert_eq!(state.seconds_to_next_block_fall, 1.0 / 25.0);
}

#[test]
fn test_speed_ramp_lengthens_fall_step() {
    let config = GameConfig {
        block_init_fall_step_seconds: 0.2,
        block_speed_inc_multiplier: 0.5,
        block_speed_inc_period_seconds: 1.0,
        ..GameConfig::default()
    };
    let mut logic = GameLogic::new(&config);

    logic.update(1.5, &idle(), view());

    let state = logic.state();
    assert!((state.block_current_normal_speed - 0.3).abs() < 1e-6);
    assert!(state.block_current_normal_speed > config.block_init_fall_step_seconds);
    assert_eq!(state.seconds_from_last_speed_inc, 1.0);
}

#[test]
fn test_spawn_over_full_stack_loses() {
    let config = small(3, 3, 4);
    let mut state = GameState::new(&config);
    for y in 0..4 {
        for x in 0..3 {
            for z in 0..3 {
                if (x, z) != (0, 0) {
                    state.board.fill(IVec3::new(x, y, z), 5);
                }
            }
        }
    }
    let mut logic = GameLogic::with_state(state, 9);

    logic.update(1.0, &idle(), view());
    assert_eq!(logic.phase(), Phase::NewBlockCreation);
    let (min, _) = logic
        .state()
        .falling_block
        .as_ref()
        .map(|b| b.world_bounds())
        .expect("spawned");
    assert_eq!(min.y, 4);

    logic.update(0.0, &idle(), view());
    assert_eq!(logic.phase(), Phase::Lost);
    assert!(logic.is_finished());
}

#[test]
fn test_lost_is_absorbing() {
    let mut logic = GameLogic::new(&small(4, 4, 6));
    logic.single_step();
    logic.state_mut().phase = Phase::Lost;
    let board = logic.state().board.clone();
    let block = logic.state().falling_block.clone();

    let busy = InputSnapshot::new()
        .with_pressed(Action::RotateClockwise)
        .with_pressed(Action::MoveAway)
        .with_down(Action::Accelerate);
    for _ in 0..10 {
        logic.update(1.0, &busy, view());
        logic.single_step();
    }

    assert_eq!(logic.phase(), Phase::Lost);
    assert_eq!(logic.state().board, board);
    assert_eq!(logic.state().falling_block, block);
    assert_eq!(logic.state().total_time, 0.0);
}

#[test]
fn test_same_seed_replays_session() {
    let run = || {
        let mut logic = GameLogic::new(&GameConfig::default());
        let mut kinds = Vec::new();
        for frame in 0..2000 {
            let input = if frame % 7 == 0 {
                InputSnapshot::new().with_pressed(Action::MoveAway)
            } else {
                idle()
            };
            logic.update(1.0 / 30.0, &input, view());
            if logic.phase() == Phase::NewBlockCreation {
                kinds.extend(logic.state().falling_block.as_ref().map(|b| b.kind()));
            }
        }
        (kinds, logic.state().board.clone())
    };

    let (kinds_a, board_a) = run();
    let (kinds_b, board_b) = run();
    assert!(!kinds_a.is_empty());
    assert_eq!(kinds_a, kinds_b);
    assert_eq!(board_a, board_b);
}
