use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{IVec3, Vec3};
use tetris3d::core::{
    Axis, Block, BlockKind, Board, GameConfig, GameLogic, GameRng, GameSnapshot, InputSnapshot,
    Rgb8, Spin,
};
use tetris3d::term::{FrameBuffer, GameView, Viewport};

fn view() -> Vec3 {
    Vec3::new(-1.0, -0.5, -1.0).normalize()
}

fn bench_update(c: &mut Criterion) {
    let mut logic = GameLogic::new(&GameConfig::default());
    let input = InputSnapshot::new();

    c.bench_function("update_16ms", |b| {
        b.iter(|| {
            if logic.is_finished() {
                logic = GameLogic::new(&GameConfig::default());
            }
            logic.update(black_box(0.016), &input, view());
        })
    });
}

fn bench_layer_erase(c: &mut Criterion) {
    c.bench_function("erase_4_layers", |b| {
        b.iter(|| {
            let mut board = Board::new(7, 7, 18);
            for layer in 0..4 {
                board.fill_layer(layer, 0x00ff_8800);
            }
            board.fill(IVec3::new(3, 5, 3), 1);
            black_box(board.erase_filled_layers());
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let board = Board::new(7, 7, 18);
    let mut rng = GameRng::new(12345);

    c.bench_function("spawn_block", |b| {
        b.iter(|| black_box(Block::create_random(&board, &mut rng)))
    });
}

fn bench_rotate_with_fix(c: &mut Criterion) {
    let board = Board::new(5, 5, 5);
    let wall = Block::new(BlockKind::I, Rgb8::new(40, 40, 200), IVec3::new(0, 0, 2))
        .rotated(Axis::Y, Spin::Clockwise);

    c.bench_function("rotate_with_kick", |b| {
        b.iter(|| {
            let mut block = wall.clone();
            black_box(block.try_rotate_with_fix(&board, Axis::Y, Spin::CounterClockwise));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut logic = GameLogic::new(&GameConfig::default());
    for _ in 0..120 {
        logic.update(1.0 / 60.0, &InputSnapshot::new(), view());
    }
    let view_model = GameView::default();
    let viewport = Viewport::new(100, 30);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            logic.state().snapshot_into(&mut snap);
            view_model.render_into(&snap, view(), viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_update,
    bench_layer_erase,
    bench_spawn,
    bench_rotate_with_fix,
    bench_render
);
criterion_main!(benches);
