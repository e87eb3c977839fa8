use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scanrast::bench::{
    draw_line, Canvas, DepthBuffer, FlatShader, FrameBuffer, ScanlineRasterizer, ScreenTriangle,
};
use scanrast::math::Vec3i;
use scanrast::colors::{BLACK, RED, WHITE};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_targets() -> (Canvas, DepthBuffer) {
    (
        Canvas::new(BUFFER_WIDTH, BUFFER_HEIGHT, BLACK),
        DepthBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT),
    )
}

fn small_triangle() -> ScreenTriangle {
    ScreenTriangle::untextured([
        Vec3i::new(100, 100, 10),
        Vec3i::new(120, 100, 10),
        Vec3i::new(110, 120, 10),
    ])
}

fn medium_triangle() -> ScreenTriangle {
    ScreenTriangle::untextured([
        Vec3i::new(100, 100, 10),
        Vec3i::new(300, 100, 50),
        Vec3i::new(200, 300, 100),
    ])
}

fn large_triangle() -> ScreenTriangle {
    ScreenTriangle::untextured([
        Vec3i::new(50, 50, 0),
        Vec3i::new(750, 100, 128),
        Vec3i::new(400, 550, 255),
    ])
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let scanline = ScanlineRasterizer::new();
    let shader = FlatShader::solid(RED);

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            let (mut canvas, mut depth) = create_targets();
            b.iter(|| {
                depth.clear();
                let mut fb = FrameBuffer::new(&mut canvas, &mut depth);
                scanline.fill_triangle(black_box(tri), &mut fb, &shader)
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let scanline = ScanlineRasterizer::new();
    let shader = FlatShader::solid(RED);

    // Grid of small triangles
    let triangles: Vec<ScreenTriangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col * 40;
                let y = row * 30;
                ScreenTriangle::untextured([
                    Vec3i::new(x, y, 0),
                    Vec3i::new(x + 35, y, 0),
                    Vec3i::new(x + 17, y + 25, 0),
                ])
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let (mut canvas, mut depth) = create_targets();
        b.iter(|| {
            depth.clear();
            let mut fb = FrameBuffer::new(&mut canvas, &mut depth);
            for tri in &triangles {
                scanline.fill_triangle(black_box(tri), &mut fb, &shader);
            }
        });
    });

    group.finish();
}

fn benchmark_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("lines");

    group.bench_function("fan_360_lines", |b| {
        let (mut canvas, _) = create_targets();
        let (cx, cy) = (BUFFER_WIDTH as i32 / 2, BUFFER_HEIGHT as i32 / 2);
        b.iter(|| {
            let mut drawn = 0;
            for step in 0..360 {
                let angle = (step as f32).to_radians();
                let x1 = cx + (angle.cos() * 280.0) as i32;
                let y1 = cy + (angle.sin() * 280.0) as i32;
                drawn += draw_line(&mut canvas, cx, cy, black_box(x1), y1, WHITE);
            }
            drawn
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_lines
);
criterion_main!(benches);
