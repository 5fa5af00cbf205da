// Criterion benchmarks for transnet.
//
// The path set is synthetic: every combination of a few stems and affix
// chains, which gives a wide, moderately deep network with plenty of shared
// prefixes.
//
// Run:
//   cargo bench -p transnet

use criterion::{Criterion, criterion_group, criterion_main};
use transnet::{StateId, TransitionNetwork};

const STEMS: &[&str] = &["talo", "koira", "kissa", "auto", "kirja", "katu", "puu", "maa"];
const SUFFIXES: &[&str] = &["ssa", "sta", "lla", "lta", "lle", "n", "t", "ksi", "na"];
const CLITICS: &[&str] = &["kin", "kaan", "ko", "han", "pa"];

fn synthetic_paths() -> Vec<Vec<&'static str>> {
    let mut paths = Vec::new();
    for stem in STEMS {
        for suffix in SUFFIXES {
            for clitic in CLITICS {
                paths.push(vec![*stem, *suffix, *clitic]);
            }
        }
    }
    paths
}

fn build(paths: &[Vec<&str>]) -> TransitionNetwork {
    let mut network = TransitionNetwork::new(4096, 64).expect("valid dimensions");
    for path in paths {
        network.add_path(path).expect("capacity is sufficient");
    }
    network
}

fn bench_insert(c: &mut Criterion) {
    let paths = synthetic_paths();
    c.bench_function("insert_synthetic_paths", |b| {
        b.iter(|| std::hint::black_box(build(&paths)));
    });
}

fn bench_distance(c: &mut Criterion) {
    let network = build(&synthetic_paths());
    let states: Vec<StateId> = network.states().take(64).collect();

    c.bench_function("distance_matrix_64_states", |b| {
        b.iter(|| std::hint::black_box(network.distance_matrix(&states).unwrap()));
    });

    c.bench_function("count_sub_states_root", |b| {
        b.iter(|| std::hint::black_box(network.count_sub_states(StateId::INITIAL).unwrap()));
    });
}

fn bench_dump(c: &mut Criterion) {
    let network = build(&synthetic_paths());
    c.bench_function("print_dump", |b| {
        b.iter(|| std::hint::black_box(network.print()));
    });
}

criterion_group!(benches, bench_insert, bench_distance, bench_dump);
criterion_main!(benches);
