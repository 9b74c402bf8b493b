use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use wordgen_core::config::{CorpusSource, ModelConfig};
use wordgen_core::dictionary::{Language, WordType};
use wordgen_core::model::generator::MarkovWordGenerator;
use wordgen_core::model::sampler::cumulative_distribution;
use wordgen_core::model::symbol::{Symbol, display_symbols};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Info level by default, so model construction and invalid configurations show up
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Load the French city names from "./dictionaries/fr/city.txt"
    // Order 3: the next character depends on the 3 previous ones
    // Accents are folded, both for training and for 'word_exists'
    let config = ModelConfig::new(3, CorpusSource::dictionary(Language::French, WordType::City))
        .with_fold_accents(true);
    let cities = MarkovWordGenerator::new(&config)?;
    info!("city model uses order {}", cities.order());

    // Asking for a dictionary that does not exist fails before anything is loaded
    let invalid = ModelConfig::new(3, CorpusSource::dictionary(Language::English, WordType::City));
    match MarkovWordGenerator::new(&invalid) {
        Ok(_) => warn!("Should not happen"),
        Err(e) => info!("Invalid configuration: {}", e),
    }

    // An order of 0 is rejected too
    let invalid = ModelConfig::new(0, CorpusSource::lines(["cat", "car", "can"]));
    if let Err(e) = MarkovWordGenerator::new(&invalid) {
        info!("Invalid configuration: {}", e);
    }

    // How the first letter of a city is distributed
    for (window, probability) in cumulative_distribution(cities.table(), &[Symbol::Start]).iter().take(5) {
        println!("{}: {:.3}", display_symbols(window), probability);
    }

    // Generate 10 cities with the thread-local random generator
    for i in 0..10 {
        println!("Generated city {}: {}", i + 1, cities.generate_word(""));
    }

    // Seeded generation: every word starts with the seed
    for _ in 0..3 {
        println!("Starting with 'mont': {}", cities.generate_word("mont"));
    }

    // Reproducible output with a seeded random generator,
    // retrying up to 20 times if the word already exists
    let mut rng = StdRng::seed_from_u64(42);
    for i in 0..5 {
        let word = cities.generate_new_word(&mut rng, "", 20);
        println!("New city {}: {} (exists: {})", i + 1, word, cities.word_exists(&word));
    }

    // Bounded generation, for callers that need a hard cap
    match cities.generate_word_capped(&mut rng, "", 6) {
        Ok(word) => println!("Short city: {}", word),
        Err(e) => warn!("Gave up: {}", e),
    }

    // Membership checks ignore case and, here, accents
    println!("'saint-etienne' exists: {}", cities.word_exists("saint-etienne"));
    println!("'atlantis' exists: {}", cities.word_exists("atlantis"));

    Ok(())
}
