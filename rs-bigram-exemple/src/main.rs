use std::sync::Arc;

use env_logger::Env;

use rs_bigram_core::similarity::LexicalEmbedder;
use rs_bigram_core::{BigramTable, FirstChoice, SeededRandom, TextService, generate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Sample corpus, one sentence per entry
    let corpus = [
        "the king is powerful",
        "the queen is wise",
        "the king rules the land",
        "the queen leads the people",
        "a cat sat on the mat",
        "a dog chased the cat",
    ];

    // The table is built once and never modified afterwards
    let table = BigramTable::build(corpus);
    println!("Indexed words: {}", table.len());
    println!("Successors of 'the': {:?}", table.successors("the").unwrap_or_default());

    // The service owns the table and the similarity delegate.
    // Swap `LexicalEmbedder` for `RemoteDelegate` to use a real NLP model.
    let service = TextService::new(table, Arc::new(LexicalEmbedder::default()));

    println!("\n--- Bigram generation ---");
    println!("Random: '{}'", service.generate_text("the", 5));

    // A seeded source gives the same text on every run
    let mut seeded = SeededRandom::new(2024);
    println!("Seeded: '{}'", service.generate_text_with("the", 5, &mut seeded));

    // Always following the first recorded successor is fully deterministic
    println!("First choice: {:?}", generate(service.table(), "the", 5, &mut FirstChoice));

    // Unknown start words are returned alone
    println!("Unknown start: '{}'", service.generate_text("unknown_word", 5));

    println!("\n--- Word embedding ---");
    let king_vector = service.embed("king")?;
    let preview: Vec<f32> = king_vector.iter().copied().filter(|v| *v != 0.0).take(5).collect();
    println!("Embedding for 'king': {} components, non-zero: {:?}", king_vector.len(), preview);

    println!("\n--- Similarity ---");
    for (text1, text2) in [("king", "queen"), ("king", "cat"), ("king", "king")] {
        println!("'{}' / '{}': {:.4}", text1, text2, service.similarity(text1, text2)?);
    }

    let query = "who governs the country?";
    for info in ["the king rules the land", "the dog chased the cat"] {
        println!("'{}' / '{}': {:.4}", query, info, service.similarity(query, info)?);
    }

    // Delegate failures are reported, never replaced by a score
    match service.similarity("king", "?!") {
        Ok(score) => println!("Should not happen: {}", score),
        Err(e) => println!("Expected failure: {}", e),
    }

    Ok(())
}
