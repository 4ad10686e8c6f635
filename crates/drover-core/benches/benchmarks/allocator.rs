use criterion::{BatchSize, BenchmarkId, Criterion};

use drover_core::admission::TaskDeclaration;
use drover_core::allocator::{Allocator, AllocatorConfig};
use drover_core::resources::{CPU_RESOURCE_NAME, Resource};
use drover_core::sorter::SorterKind;

use crate::{agent_ids, capacity};

fn bench_cycle(c: &mut Criterion) {
    for task_count in [100, 10_000] {
        for agent_count in [8, 256] {
            c.bench_with_input(
                BenchmarkId::new(
                    "allocation cycle",
                    format!("tasks={task_count}, agents={agent_count}"),
                ),
                &(task_count, agent_count),
                |b, &(task_count, agent_count)| {
                    let tasks: Vec<TaskDeclaration> = (0..task_count)
                        .map(|i| {
                            TaskDeclaration::new(
                                format!("task-{i}"),
                                Resource::scalar(CPU_RESOURCE_NAME, 1u64).into(),
                            )
                        })
                        .collect();
                    b.iter_batched_ref(
                        || {
                            let mut allocator = Allocator::new(AllocatorConfig {
                                sorter: SorterKind::ResourceWeighted,
                                network_bandwidth_enforcement: true,
                            });
                            for id in agent_ids(agent_count) {
                                allocator.add_agent(id, capacity(32, 64 * 1024)).unwrap();
                            }
                            allocator
                        },
                        |allocator| allocator.run_cycle(&tasks),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

pub fn benchmark(c: &mut Criterion) {
    bench_cycle(c);
}
