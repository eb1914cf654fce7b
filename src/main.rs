use railgen::config::GeneratorConfig;
use railgen::synthetic::RailwayDataGenerator;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = GeneratorConfig::from_env();
    if let Err(e) = config.validate() {
        tracing::error!("invalid configuration: {e}");
        std::process::exit(1);
    }

    tracing::info!(
        output_dir = %config.output_dir,
        seed = config.seed,
        t1_rides = config.t1_rides,
        t2_rides = config.t2_rides,
        "starting railway dataset generation"
    );

    let mut generator = RailwayDataGenerator::new(&config);
    if let Err(e) = generator.generate() {
        tracing::error!("generation failed: {e}");
        std::process::exit(1);
    }

    tracing::info!("done");
}
