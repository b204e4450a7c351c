// -------------------------------------------------------------------------
// SCPN Cluster Dynamics -- Flux/Jacobian Benchmark
// Measures the per-step cost of the full flux accumulation and of the
// sparse Jacobian fill on a generated tungsten network and on a grouped
// xenon network.
// -------------------------------------------------------------------------

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use defect_core::loader::generate_network;
use defect_core::ReactionNetwork;
use defect_types::config::{
    GenerationParams, GroupingParams, MaterialParams, NetworkConfig, ReactionParams,
};
use defect_types::species::Species;
use std::hint::black_box;

/// Self-contained tungsten He/V/I network so benchmarks do not depend
/// on external JSON files.
fn tungsten_network(max_he: u32, max_v: u32) -> ReactionNetwork {
    let config = NetworkConfig {
        network_name: format!("bench-w-{max_he}-{max_v}"),
        material: MaterialParams {
            lattice_constant: 0.317,
            impurity_radius: 0.3,
            atomic_volume: None,
        },
        generation: GenerationParams { max_xe: 0, max_he, max_v, max_i: 1 },
        grouping: None,
        reactions: ReactionParams { dissociations_enabled: true },
    };
    let mut net = generate_network(config).unwrap();
    net.set_temperature(1000.0);
    net
}

fn xenon_network(max_xe: u32) -> ReactionNetwork {
    let config = NetworkConfig {
        network_name: format!("bench-xe-{max_xe}"),
        material: MaterialParams {
            lattice_constant: 0.547,
            impurity_radius: 0.3,
            atomic_volume: Some(0.0818),
        },
        generation: GenerationParams { max_xe, max_he: 0, max_v: 0, max_i: 0 },
        grouping: Some(GroupingParams {
            axis: Species::Xe,
            threshold: max_xe / 3,
            section_width: 5,
        }),
        reactions: ReactionParams { dissociations_enabled: true },
    };
    let mut net = generate_network(config).unwrap();
    net.set_temperature(1500.0);
    net
}

fn seed_state(net: &mut ReactionNetwork) -> usize {
    let dof = net.dof();
    let state: Vec<f64> = (0..dof).map(|i| 1.0e-5 * (1.0 + (i % 11) as f64)).collect();
    net.update_concentrations_from_array(&state).unwrap();
    dof
}

fn bench_fluxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_all_fluxes");
    for (label, mut net) in [
        ("tungsten-8-2", tungsten_network(8, 2)),
        ("tungsten-8-6", tungsten_network(8, 6)),
        ("xenon-90", xenon_network(90)),
    ] {
        let dof = seed_state(&mut net);
        let mut out = vec![0.0; dof];
        group.bench_with_input(BenchmarkId::from_parameter(label), &net, |b, net| {
            b.iter(|| {
                out.iter_mut().for_each(|v| *v = 0.0);
                net.compute_all_fluxes(black_box(&mut out)).unwrap();
                black_box(out[0]);
            })
        });
    }
    group.finish();
}

fn bench_partials(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_all_partials");
    for (label, mut net) in [
        ("tungsten-8-2", tungsten_network(8, 2)),
        ("tungsten-8-6", tungsten_network(8, 6)),
        ("xenon-90", xenon_network(90)),
    ] {
        let dof = seed_state(&mut net);
        let mut vals = vec![0.0; dof * dof];
        let mut indices = vec![0usize; dof * dof];
        let mut sizes = vec![0usize; dof];
        group.bench_function(BenchmarkId::from_parameter(label), |b| {
            b.iter(|| {
                net.compute_all_partials(
                    black_box(&mut vals),
                    black_box(&mut indices),
                    black_box(&mut sizes),
                )
                .unwrap();
                black_box(vals[0]);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fluxes, bench_partials);
criterion_main!(benches);
