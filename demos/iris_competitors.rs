use linfa::traits::Fit;
use linfa_competitors::{Algorithm, ClusteringParams};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Run every competitor on the iris dataset and compare the scores of their assignments
// with the three species.
fn main() {
    // log the instantiation and scoring of every estimator
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("logging disabled: {}", err);
    }

    let dataset = linfa_datasets::iris();

    for algorithm in Algorithm::ALL.iter() {
        let params = ClusteringParams::new(algorithm.identifier(), 3, 10);
        match params.fit(&dataset) {
            Ok(run) => println!(
                "{:<16} {} clusters, {} noise, {}",
                algorithm.name(),
                run.n_clusters_found(),
                run.n_noise(),
                run
            ),
            Err(err) => eprintln!("{:<16} failed: {}", algorithm.name(), err),
        }
    }
}
