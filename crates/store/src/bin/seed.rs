use rand::rngs::StdRng;
use rand::SeedableRng;

/// Generate a synthetic dataset, export it to JSON, and print aggregate
/// counts for a quick sanity check.
#[tokio::main]
async fn main() {
    store::telemetry::init();
    store::config::load_config();

    let config = store::config::app_config();
    let pool = store::db::get_db().await;

    let mut rng = match config.seed.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let cases = store::generator::create_test_dataset(pool, &mut rng, config.seed.cases).await;
    println!("Generated {} of {} cases", cases.len(), config.seed.cases);

    if let Err(err) = store::export::write_json_file(&cases, &config.seed.output) {
        eprintln!("Export failed: {err}");
        std::process::exit(1);
    }
    println!("Data saved to {}", config.seed.output.display());

    match store::repo::stats::case_type_distribution(pool).await {
        Ok(distribution) => {
            println!(
                "Stored cases by type: {}",
                serde_json::to_string_pretty(&distribution.by_case_type)
                    .unwrap_or_else(|_| "<unprintable>".to_string())
            );
            println!("Total stored cases: {}", distribution.total);
        }
        Err(err) => eprintln!("Could not read case distribution: {err}"),
    }
}
