/// Model Evaluation Benchmarks
///
/// Measures evaluation cost as rank counts grow, and table loading for
/// the same sizes.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use perfmodel::counters::RankRecord;
use perfmodel::loader::load_reader;
use perfmodel::model::evaluate;
use perfmodel::params::ModelParameters;

fn make_records(ranks: usize) -> Vec<RankRecord> {
    (0..ranks)
        .map(|rank| RankRecord {
            instrs: 1e9 + (rank % 97) as f64 * 1e6,
            sends: (rank % 13) as f64 * 100.0,
            cache_hits: 1e7,
            mem_reads: 1e5 + rank as f64,
            mem_writes: 5e4,
            ..RankRecord::new(rank as u32)
        })
        .collect()
}

fn make_table(ranks: usize) -> String {
    let mut table = String::new();
    // Reverse order so the loader has to sort
    for rank in (0..ranks).rev() {
        table.push_str(&format!(
            "{},1000000000,100,{},1000,10,1,500,5,1,10000000,1000,100000,50000,0,0\n",
            rank,
            rank % 13
        ));
    }
    table
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let params = ModelParameters::default();

    for ranks in [16usize, 1024, 65536].iter() {
        let records = make_records(*ranks);
        group.throughput(Throughput::Elements(*ranks as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ranks), &records, |b, records| {
            b.iter(|| evaluate(black_box(records), black_box(&params)).unwrap());
        });
    }

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for ranks in [16usize, 1024, 65536].iter() {
        let table = make_table(*ranks);
        group.throughput(Throughput::Bytes(table.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ranks), &table, |b, table| {
            b.iter(|| load_reader(black_box(table.as_bytes())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_load);

criterion_main!(benches);
