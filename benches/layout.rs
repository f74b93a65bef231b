use compose_graph::config::LayoutOptions;
use compose_graph::ir::{Network, Project, Service, Volume, VolumeMount};
use compose_graph::layout::compute_layout;
use compose_graph::render::render_json;
use compose_graph::theme::Theme;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Synthetic stack: every service joins two networks, mounts one volume and
/// depends on its predecessor. A quarter of the volumes stay unused.
fn synthetic_project(services: usize, networks: usize, volumes: usize) -> Project {
    let mut project = Project::new(format!("bench_{}", services));
    for i in 0..networks {
        project.add_network(&format!("net{}", i), Network::default());
    }
    for i in 0..volumes {
        project.add_volume(&format!("vol{}", i), Volume::default());
    }
    let used_volumes = volumes - volumes / 4;
    for i in 0..services {
        let mut service = Service {
            image: format!("image{}:latest", i),
            ..Default::default()
        };
        if networks > 0 {
            service.networks.push(format!("net{}", i % networks));
            service.networks.push(format!("net{}", (i + 1) % networks));
        }
        if used_volumes > 0 {
            service.volumes.push(VolumeMount {
                kind: "volume".to_string(),
                source: format!("vol{}", i % used_volumes),
                target: format!("/data/{}", i),
                read_only: false,
            });
        }
        if i > 0 {
            service.depends_on.push(format!("svc{}", i - 1));
        }
        project.add_service(&format!("svc{}", i), service);
    }
    project
}

fn bench_compute_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_layout");
    let theme = Theme::default();
    let options = LayoutOptions::default();
    for (services, networks, volumes) in [(5usize, 2usize, 3usize), (50, 8, 20), (400, 24, 120)] {
        let name = format!("stack_{}_{}_{}", services, networks, volumes);
        let project = synthetic_project(services, networks, volumes);
        group.bench_with_input(BenchmarkId::from_parameter(name), &project, |b, project| {
            b.iter(|| {
                let graph = compute_layout(black_box(project), &theme, &options);
                black_box(graph.edges.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_to_json");
    let theme = Theme::default();
    let options = LayoutOptions::default();
    for services in [10usize, 100] {
        let project = synthetic_project(services, 4, services / 2);
        group.bench_with_input(BenchmarkId::from_parameter(services), &project, |b, project| {
            b.iter(|| {
                let graph = compute_layout(black_box(project), &theme, &options);
                let json = render_json(&graph, false).expect("render failed");
                black_box(json.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_layout, bench_end_to_end);
criterion_main!(benches);
