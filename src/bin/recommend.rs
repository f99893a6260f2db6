extern crate estate_recommender;

use anyhow::{bail, Context};

use estate_recommender::config::AppConfig;
use estate_recommender::dataframeutils::load_shared_handles;
use estate_recommender::similarity::recommend;

fn main() -> anyhow::Result<()> {
    // Prints the recommendations for one property, mostly to sanity check a new set of artifacts.
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        bail!("usage: {} <config> <property name> [top_n]", args[0]);
    }
    let config = AppConfig::new(&args[1]).context("reading configuration")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log.level))
        .init();

    let top_n = match args.get(3) {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("top_n must be a positive integer, got '{}'", raw))?,
        None => config.model.default_top_n,
    };

    let handles = load_shared_handles(&config).context("loading recommendation artifacts")?;
    let recommendations = recommend(&handles.composite, &handles.catalog, &args[2], top_n)?;

    println!("Property Name\tSimilarityScore\tLink");
    for reco in recommendations.iter() {
        println!("{}\t{:.4}\t{}", reco.property, reco.score, reco.link);
    }
    Ok(())
}
