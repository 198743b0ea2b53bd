use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linfa::ParamGuard;
use linfa_competitors::benchmarks::config;
use linfa_competitors::{Algorithm, ClusteringParams};
use linfa_datasets::generate;
use ndarray::Array2;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand_xoshiro::Xoshiro256Plus;

fn fit_score_bench(c: &mut Criterion) {
    let mut rng = Xoshiro256Plus::seed_from_u64(40);
    let cluster_sizes = vec![10, 50, 200];
    let n_clusters = 3;
    let n_features = 2;

    let mut benchmark = c.benchmark_group("fit_score");
    config::set_default_benchmark_configs(&mut benchmark);

    for cluster_size in cluster_sizes {
        let centroids =
            Array2::random_using((n_clusters, n_features), Uniform::new(-30., 30.), &mut rng);
        let records = generate::blobs(cluster_size, &centroids, &mut rng);

        for algorithm in Algorithm::ALL.iter() {
            let params = ClusteringParams::new(algorithm.identifier(), n_clusters, 3)
                .check()
                .unwrap();
            benchmark.bench_with_input(
                BenchmarkId::new(algorithm.name(), cluster_size),
                &records,
                |bencher, records| {
                    bencher.iter(|| black_box(params.fit_score(records.view(), None)));
                },
            );
        }
    }
    benchmark.finish()
}

criterion_group!(benches, fit_score_bench);
criterion_main!(benches);
