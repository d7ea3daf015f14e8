use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use juliabrot_core::{Complex, FractalMode, FractalParams, Julia, ViewState, Viewport};
use juliabrot_render::{colorize, ComputeContext, DispatchStrategy, PixelBuffer, RenderSettings};

fn bench_full_frame_render(c: &mut Criterion) {
    let ctx = ComputeContext::new(RenderSettings::default()).unwrap();
    let viewport = Viewport::new(640, 480).unwrap();
    let view = ViewState::default();
    let mut buffer = PixelBuffer::new(viewport);

    c.bench_function("full_frame_640x480", |b| {
        b.iter(|| ctx.render_into(&view, viewport, &mut buffer));
    });
}

fn bench_strategies(c: &mut Criterion) {
    let viewport = Viewport::new(512, 384).unwrap();
    let view = ViewState {
        center: Complex::new(-0.745, 0.11),
        zoom: 20.0,
        ..ViewState::default()
    };
    let mut group = c.benchmark_group("strategy_512x384");
    for strategy in [
        DispatchStrategy::Rows,
        DispatchStrategy::Tiles,
        DispatchStrategy::Pixels,
    ] {
        let ctx = ComputeContext::new(RenderSettings {
            strategy,
            ..RenderSettings::default()
        })
        .unwrap();
        let mut buffer = PixelBuffer::new(viewport);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{strategy:?}")), &view, |b, view| {
            b.iter(|| ctx.render_into(view, viewport, &mut buffer));
        });
    }
    group.finish();
}

fn bench_julia_frame(c: &mut Criterion) {
    let ctx = ComputeContext::new(RenderSettings {
        params: FractalParams::new(1000).unwrap(),
        ..RenderSettings::default()
    })
    .unwrap();
    let viewport = Viewport::new(256, 256).unwrap();
    let mut view = ViewState::new(FractalMode::Julia);
    view.julia_constant = Julia::SHOWCASE_CONSTANT;

    c.bench_function("julia_256x256_1000iter", |b| {
        b.iter(|| ctx.compute_iterations(&view, viewport));
    });
}

fn bench_colorize(c: &mut Criterion) {
    let ctx = ComputeContext::new(RenderSettings::default()).unwrap();
    let iterations = ctx
        .compute_iterations(&ViewState::default(), Viewport::new(640, 480).unwrap())
        .unwrap();

    c.bench_function("colorize_640x480", |b| {
        b.iter(|| colorize(&iterations));
    });
}

criterion_group!(
    benches,
    bench_full_frame_render,
    bench_strategies,
    bench_julia_frame,
    bench_colorize
);
criterion_main!(benches);
