use bayes_bow::{Corpus, FilterConfig};

fn main() -> bayes_bow::Result<()> {
    env_logger::init();

    let filter = FilterConfig::from_toml_str(
        r#"
        use_stop_words = true
        stop_words = ["the", "a", "to", "you"]
        "#,
    )?
    .build();

    // build corpus
    let mut corpus = Corpus::new("spam filter demo", ["spam", "ham"])?.with_filter(filter);
    corpus.add_document(&["buy", "cheap", "pills", "now"], &[0])?;
    corpus.add_document(&["win", "a", "free", "prize", "now"], &[0])?;
    corpus.add_document(&["lunch", "with", "the", "team", "tomorrow"], &[1])?;
    corpus.add_document(&["see", "you", "at", "the", "meeting"], &[1])?;

    for doc in [
        vec!["free", "pills", "now"],
        vec!["team", "meeting", "tomorrow"],
        vec!["something", "unrelated"],
    ] {
        let prediction = corpus.predict(&doc)?;
        println!(
            "{:?} -> {} ({:.3}) posterior {:?}",
            doc,
            prediction.label_name(&corpus).unwrap_or("?"),
            prediction.confidence(),
            prediction.posterior
        );
    }

    let path = std::env::temp_dir().join("bayes_bow_demo.json");
    corpus.save(&path)?;
    let loaded = Corpus::load(&path)?;
    println!("reloaded {} words from {}", loaded.word_count(), path.display());
    Ok(())
}
