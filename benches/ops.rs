// SPDX-FileCopyrightText: 2026 DiPeO contributors
// SPDX-License-Identifier: MIT

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use dipeo_core::model::{ArrowId, HandleId, HandleLabel, JsonMap, NodeId, Vec2};
use dipeo_core::ops::{apply_ops, ApplyResult, ArrowOp, NodeOp, Op};
use dipeo_core::registry::NodeType;

mod fixtures;

// Benchmark identity (keep stable):
// - Group name in this file: `ops.apply`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `node_add_single`, `arrow_add_batch_200`).
// - If implementations move/deduplicate, update the wiring but do not rename
//   group or case IDs.
fn checksum_apply_result(result: &ApplyResult) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(result.new_rev);
    acc = acc.wrapping_mul(131).wrapping_add(result.applied as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.added.len() as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.updated.len() as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.removed.len() as u64);
    acc
}

fn node_add_ops(count: usize) -> Vec<Op> {
    let mut ops = Vec::with_capacity(count);
    for idx in 0..count {
        let node_id = NodeId::new(format!("bench_node_{idx:06}")).expect("node id");
        let node_type = match idx % 3 {
            0 => NodeType::PersonJob,
            1 => NodeType::CodeJob,
            _ => NodeType::Db,
        };
        ops.push(Op::Node(NodeOp::Add {
            node_id,
            node_type,
            position: Vec2::new((idx as i32) * 40, 600),
            overrides: JsonMap::new(),
        }));
    }
    ops
}

fn arrow_add_ops(nodes: &[NodeId], count: usize) -> Vec<Op> {
    assert!(nodes.len() >= 2, "chain fixture must contain >= 2 person_job nodes");

    let mut ops = Vec::with_capacity(count);
    for idx in 0..count {
        let from_index = (idx.wrapping_mul(7)) % nodes.len();
        let mut to_index = (idx.wrapping_mul(7).wrapping_add(3)) % nodes.len();
        if to_index == from_index {
            to_index = (to_index + 1) % nodes.len();
        }

        let arrow_id = ArrowId::new(format!("bench_arrow_{idx:06}")).expect("arrow id");
        ops.push(Op::Arrow(ArrowOp::Add {
            arrow_id,
            source: HandleId::compose(&nodes[from_index], HandleLabel::Default),
            target: HandleId::compose(&nodes[to_index], HandleLabel::First),
            label: None,
            data: None,
        }));
    }
    ops
}

fn bench_ops_case(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    case_id: &str,
    template: &dipeo_core::graph::store::GraphStore,
    ops: Vec<Op>,
) {
    group.throughput(Throughput::Elements(ops.len() as u64));
    group.bench_function(case_id, {
        let template = template.clone();
        move |b| {
            b.iter_batched(
                || template.clone(),
                |mut store| {
                    let base_rev = store.rev();
                    let result =
                        apply_ops(&mut store, base_rev, black_box(&ops)).expect("apply_ops");
                    black_box(checksum_apply_result(&result))
                },
                BatchSize::SmallInput,
            )
        }
    });
}

fn benches_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.apply");

    let template = fixtures::chain(fixtures::Case::Medium);
    let person_jobs = fixtures::person_job_ids(&template);

    bench_ops_case(&mut group, "node_add_single", &template, node_add_ops(1));
    bench_ops_case(&mut group, "node_add_batch_10", &template, node_add_ops(10));
    bench_ops_case(&mut group, "node_add_batch_200", &template, node_add_ops(200));

    bench_ops_case(
        &mut group,
        "arrow_add_single",
        &template,
        arrow_add_ops(&person_jobs, 1),
    );
    bench_ops_case(
        &mut group,
        "arrow_add_batch_10",
        &template,
        arrow_add_ops(&person_jobs, 10),
    );
    bench_ops_case(
        &mut group,
        "arrow_add_batch_200",
        &template,
        arrow_add_ops(&person_jobs, 200),
    );

    group.finish();
}

criterion_group!(benches, benches_ops);
criterion_main!(benches);
