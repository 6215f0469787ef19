use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use std::hint::black_box;

use lensfx_image::Image;
use lensfx_imgproc::{
    distortion::{distort_with_border, generate_radial_distortion_map, RadialDistortion},
    interpolation::{remap, BorderMode, InterpolationMode},
};

fn random_image(width: usize, height: usize) -> Image<u8, 3> {
    let mut rng = rand::rng();
    let data = (0..width * height * 3).map(|_| rng.random::<u8>()).collect();
    Image::new([width, height].into(), data).unwrap()
}

fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("RadialDistortion");
    let params = RadialDistortion::new(0.1, 0.12);

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let image = random_image(*width, *height);

        group.bench_with_input(
            BenchmarkId::new("per_pixel_par", &parameter_string),
            &image,
            |b, src| {
                b.iter(|| {
                    distort_with_border(
                        black_box(src),
                        black_box(&params),
                        InterpolationMode::Bilinear,
                        BorderMode::Constant(0.0),
                    )
                    .unwrap()
                })
            },
        );

        // precomputed coordinate field, as when distorting many frames of one size
        let (map_x, map_y) = generate_radial_distortion_map(&params, &image.size()).unwrap();
        let mut dst = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("dense_map_remap", &parameter_string),
            &image,
            |b, src| {
                b.iter(|| {
                    remap(
                        black_box(src),
                        black_box(&mut dst),
                        black_box(&map_x),
                        black_box(&map_y),
                        InterpolationMode::Bilinear,
                        BorderMode::Constant(0.0),
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_distortion);
criterion_main!(benches);
