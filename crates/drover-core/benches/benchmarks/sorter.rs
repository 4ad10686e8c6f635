use criterion::{BatchSize, BenchmarkId, Criterion};

use drover_core::sorter::{SortPolicy, SorterKind};

use crate::{agent_ids, capacity, create_sorter};

fn bench_sort(c: &mut Criterion) {
    for agent_count in [10, 1_000, 10_000] {
        for kind in SorterKind::ALL {
            c.bench_with_input(
                BenchmarkId::new(format!("sort {kind}"), agent_count),
                &agent_count,
                |b, &agent_count| {
                    let ids = agent_ids(agent_count);
                    let mut sorter = create_sorter(kind, &ids);
                    b.iter_batched_ref(
                        || ids.clone(),
                        |ids| sorter.sort(ids),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

fn bench_allocated(c: &mut Criterion) {
    for agent_count in [10, 10_000] {
        c.bench_with_input(
            BenchmarkId::new("allocate/unallocate resource-weighted", agent_count),
            &agent_count,
            |b, &agent_count| {
                let ids = agent_ids(agent_count);
                let mut sorter = create_sorter(SorterKind::ResourceWeighted, &ids);
                let usage = capacity(1, 128);
                let id = &ids[ids.len() / 2];
                b.iter(|| {
                    sorter.allocated(id, &usage);
                    sorter.unallocated(id, &usage);
                });
            },
        );
    }
}

pub fn benchmark(c: &mut Criterion) {
    bench_sort(c);
    bench_allocated(c);
}
