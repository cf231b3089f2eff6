use criterion::{
    criterion_group, criterion_main, black_box, BatchSize, Criterion,
};

use hedge::{
    algo::{decimate, DecimateConfig},
    hsize, measure, HalfEdgeMesh, Handle, VertexHandle,
};


/// A grid of `n * n` quads.
fn quad_grid(n: hsize) -> HalfEdgeMesh {
    let mut mesh = HalfEdgeMesh::new();
    let idx = |x: hsize, y: hsize| VertexHandle::new(y * (n + 1) + x);
    for y in 0..=n {
        for x in 0..=n {
            mesh.set_coord(idx(x, y), [x as f32, y as f32, ((x + y) % 3) as f32 * 0.1]);
        }
    }
    for y in 0..n {
        for x in 0..n {
            mesh.add_new_cell(&[idx(x, y), idx(x + 1, y), idx(x + 1, y + 1), idx(x, y + 1)])
                .expect("failed to build grid");
        }
    }

    mesh
}


// ===============================================================================================
// ===== Benchmarks
// ===============================================================================================

fn build_grid(c: &mut Criterion) {
    c.bench_function("build_grid_100", |b| {
        b.iter(|| quad_grid(black_box(100)))
    });
}

fn check_all(c: &mut Criterion) {
    let mesh = quad_grid(100);
    c.bench_function("check_all_100", |b| {
        b.iter(|| black_box(&mesh).check_all())
    });
}

fn edge_list(c: &mut Criterion) {
    let mesh = quad_grid(100);
    c.bench_function("edge_list_100", |b| {
        b.iter(|| black_box(&mesh).edge_list().len())
    });
}

fn measure_angles(c: &mut Criterion) {
    let mesh = quad_grid(100);
    c.bench_function("cos_min_max_mesh_angles_100", |b| {
        b.iter(|| measure::cos_min_max_mesh_angles(black_box(&mesh)))
    });
}

fn split_all_edges(c: &mut Criterion) {
    let mesh = quad_grid(50);
    c.bench_function("split_all_edges_50", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut mesh| {
                for he in mesh.edge_list() {
                    mesh.split_edge(he).expect("split failed");
                }
                mesh
            },
            BatchSize::LargeInput,
        )
    });
}

fn triangulate_all(c: &mut Criterion) {
    let mesh = quad_grid(100);
    let config = DecimateConfig {
        triangulate_cells: true,
        reduce_checks: true,
        ..DecimateConfig::default()
    };

    c.bench_function("decimate_triangulate_100", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut mesh| {
                decimate(&mut mesh, &config, |e| { black_box(e); }).expect("decimate failed");
                mesh
            },
            BatchSize::LargeInput,
        )
    });
}


criterion_group!(benches,
    build_grid,
    check_all,
    edge_list,
    measure_angles,
    split_all_edges,
    triangulate_all,
);
criterion_main!(benches);
