use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sw_engine::{
    Arrangement, Conductor, ConductorSettings, NoteTimeConverter, Oscillator, TempoComputer,
    ValueComputer, Waveform,
};
use sw_score::{InstrumentConfig, Note, Part, PartId, Pitch, Profile, Score, Tempo, ValueChange};

fn accelerando() -> Profile<Tempo> {
    Profile::new(Tempo::quarter(90.0))
        .with_change(ValueChange::linear(2.0, Tempo::quarter(150.0), 4.0))
        .with_change(ValueChange::immediate(8.0, Tempo::quarter(100.0)))
}

fn bench_value_at(c: &mut Criterion) {
    let mut profile = Profile::new(0.0);
    for i in 0..64 {
        profile.insert(ValueChange::linear(i as f64, (i % 7) as f64, 0.5));
    }
    let vc = ValueComputer::new(&profile).unwrap();
    c.bench_function("value_at_64_changes", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..256 {
                acc += vc.value_at(black_box(i as f64 * 0.25)).unwrap();
            }
            acc
        })
    });
}

fn bench_time_elapsed(c: &mut Criterion) {
    let tempo = TempoComputer::new(&accelerando()).unwrap();
    let conv = NoteTimeConverter::new(tempo, 1000.0).unwrap();
    c.bench_function("time_elapsed_10_notes", |b| {
        b.iter(|| conv.time_elapsed(black_box(0.0), black_box(10.0)).unwrap())
    });
}

fn bench_render(c: &mut Criterion) {
    let sample_rate = 44100.0;
    let scale: Vec<Note> = (0..16)
        .map(|i| Note::new(0.25, &[Pitch::new(4, 0).transpose(i), Pitch::new(3, 7).transpose(i)]))
        .collect();
    let mut score = Score::new(accelerando());
    let mut arrangement_parts = Vec::new();
    for name in ["alto", "bass", "soprano", "tenor"] {
        let id = PartId::new(name).unwrap();
        score = score.with_part(
            Part::new(id, InstrumentConfig::new("sine").unwrap()).with_notes(scale.clone()),
        );
        arrangement_parts.push(id);
    }

    c.bench_function("render_1s_4_parts", |b| {
        b.iter_batched(
            || {
                let mut arr = Arrangement::new(score.clone());
                for id in &arrangement_parts {
                    arr = arr.with_instrument(*id, Oscillator::new(Waveform::Sine, sample_rate, 0.2));
                }
                Conductor::new(
                    arr,
                    ConductorSettings {
                        rendering_sample_rate: sample_rate,
                        ..Default::default()
                    },
                )
                .unwrap()
            },
            |mut conductor| conductor.perform_samples(44100).unwrap(),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_value_at, bench_time_elapsed, bench_render);
criterion_main!(benches);
