use clap::Parser;
use featmask::{Explanation, TextExplainer, TokenizerAdapter, WhitespaceTokenizer};
use log::debug;

/// Explain a sentence under a built-in sentiment-lexicon model
///
/// Each word is masked in turn and the sentence re-scored; the output colors
/// words by how much masking them moved the score (red: the word was
/// supporting the score, blue: suppressing it).
#[derive(Parser)]
#[command(name = "explain", version)]
struct Args {
    /// Sentence to explain
    text: String,

    /// Emit the explanation as JSON instead of colored terminal output
    #[arg(long)]
    json: bool,
}

/// Toy model: sums word sentiment from a fixed lexicon
fn lexicon_score(text: &String) -> f64 {
    text.split(' ')
        .map(|word| match word.to_lowercase().as_str() {
            "great" | "excellent" => 2.0,
            "good" | "nice" => 1.0,
            "bad" | "poor" => -1.0,
            "terrible" | "awful" => -2.0,
            _ => 0.0,
        })
        .sum()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let explainer = TextExplainer::new(lexicon_score);
    debug!("Baseline score: {}", lexicon_score(&args.text));

    if args.json {
        let tokens = WhitespaceTokenizer.tokenize(&args.text)?;
        let scores = explainer.explain_instance(&args.text)?;
        let explanation = Explanation { tokens, scores };
        println!("{}", serde_json::to_string_pretty(&explanation)?);
    } else {
        explainer.visualize_explanation(&args.text)?;
        println!();
    }
    Ok(())
}
