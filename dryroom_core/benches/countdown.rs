use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use dryroom_core::{
    Command, DryingProgram, RoomDefaults, RoomRegistry, RoomSpec, SensorKind, angle,
    color_bucket, percentage,
};

// Synthetic temperature sweep with a little jitter
fn synth_readings(n: usize, seed: u32) -> Vec<f32> {
    let mut state = seed.max(1);
    let mut next_f32 = || {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state = x;
        (x as f32) / (u32::MAX as f32 + 1.0)
    };
    (0..n)
        .map(|i| {
            let t = i as f32 / 500.0;
            25.0 + 20.0 * t.sin() + (next_f32() - 0.5)
        })
        .collect()
}

fn registry(rooms: u32, duration_s: u32) -> RoomRegistry {
    let specs = (1..=rooms).map(|id| {
        RoomSpec::new(id, format!("Room {id}"))
            .program(DryingProgram::new(30.0, 40.0, duration_s))
    });
    let mut reg = match RoomRegistry::new(RoomDefaults::default(), specs) {
        Ok(r) => r,
        Err(e) => panic!("bench registry: {e}"),
    };
    for id in 1..=rooms {
        let _ = reg.execute(id, Command::StartDrying(DryingProgram::new(30.0, 40.0, duration_s)));
    }
    reg
}

pub fn bench_countdown(c: &mut Criterion) {
    let mut g = c.benchmark_group("countdown");
    // BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p dryroom_core --bench countdown
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    for &rooms in &[3u32, 32, 256] {
        g.bench_function(format!("tick_all_{rooms}_rooms"), |b| {
            b.iter_batched(
                || registry(rooms, 7_200),
                |mut reg| {
                    for id in 1..=rooms {
                        let _ = black_box(reg.tick(id));
                    }
                    black_box(reg);
                },
                BatchSize::SmallInput,
            )
        });
    }

    let readings = synth_readings(10_000, 0xD15EA5E);
    g.bench_function("gauge_mapping", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for &v in &readings {
                let p = percentage(black_box(v), 0.0, 50.0).unwrap_or(0.0);
                acc += angle(p);
                black_box(color_bucket(v, SensorKind::Temperature));
            }
            black_box(acc)
        })
    });
    g.finish();
}

criterion_group!(countdown, bench_countdown);
criterion_main!(countdown);
