//! Prim's algorithm and its two data structures on synthetic inputs
//!
//! Graphs are random connected graphs generated with a seeded LCG, so runs
//! are reproducible: a random spanning path guarantees connectivity, and
//! extra random edges raise the density to roughly `degree` per vertex.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prim_mst::avl::AvlTree;
use prim_mst::binomial::BinomialHeap;
use prim_mst::graph::Graph;
use prim_mst::prim::minimum_spanning_tree;

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 16
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn random_edge_text(vertices: u64, degree: u64, seed: u64) -> String {
    let mut rng = Lcg::new(seed);
    let mut text = String::new();
    for v in 2..=vertices {
        let u = 1 + rng.below(v - 1);
        text.push_str(&format!("{u} {v} {} ;\n", rng.below(1000)));
    }
    for _ in 0..vertices * degree.saturating_sub(2) / 2 {
        let u = 1 + rng.below(vertices);
        let v = 1 + rng.below(vertices);
        text.push_str(&format!("{u} {v} {} ;\n", rng.below(1000)));
    }
    text
}

fn bench_prim(c: &mut Criterion) {
    let mut group = c.benchmark_group("prim");
    for &n in &[1_000u64, 10_000, 50_000] {
        let text = random_edge_text(n, 8, 0x5eed + n);
        let records = prim_mst::scanner::parse_edges(&text).expect("generated input parses");

        group.bench_with_input(BenchmarkId::new("build_graph", n), &records, |b, records| {
            b.iter(|| Graph::from_records(black_box(records.iter().copied())))
        });

        let mut graph = Graph::from_records(records.iter().copied());
        group.bench_with_input(BenchmarkId::new("spanning_tree", n), &n, |b, _| {
            b.iter(|| black_box(minimum_spanning_tree(&mut graph)))
        });

        group.bench_with_input(BenchmarkId::new("end_to_end", n), &text, |b, text| {
            b.iter(|| {
                let mut out = Vec::with_capacity(text.len());
                prim_mst::render(black_box(text), &mut out).expect("render succeeds");
                out
            })
        });
    }
    group.finish();
}

fn bench_binomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial");
    for &n in &[1_000usize, 100_000] {
        group.bench_with_input(BenchmarkId::new("insert_pop", n), &n, |b, &n| {
            b.iter(|| {
                let mut rng = Lcg::new(7);
                let mut heap = BinomialHeap::new();
                for i in 0..n {
                    heap.insert(rng.next(), i);
                }
                while let Some(entry) = heap.delete_min() {
                    black_box(entry);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("decrease_key", n), &n, |b, &n| {
            b.iter(|| {
                let mut heap = BinomialHeap::new();
                let handles: Vec<_> = (0..n).map(|i| heap.insert(n + i, i)).collect();
                for (i, handle) in handles.iter().enumerate().rev() {
                    heap.decrease_key(handle, i).expect("priority only decreases");
                }
                black_box(heap.find_min().map(|(p, _)| *p))
            })
        });
    }
    group.finish();
}

fn bench_avl(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl");
    for &n in &[1_000u64, 100_000] {
        group.bench_with_input(BenchmarkId::new("insert_delete", n), &n, |b, &n| {
            b.iter(|| {
                let mut rng = Lcg::new(11);
                let values: Vec<u64> = (0..n).map(|_| rng.below(n)).collect();
                let mut tree = AvlTree::new();
                for &v in &values {
                    tree.insert(v);
                }
                for v in values {
                    black_box(tree.delete(v));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_prim, bench_binomial, bench_avl);
criterion_main!(benches);
