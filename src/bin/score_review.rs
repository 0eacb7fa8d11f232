use anyhow::{Context, Result};
use review_guard_lib::services::config_store::{AppConfig, ConfigStore};
use review_guard_lib::services::detection::{ReviewDetector, ReviewScorer};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// First argument that is neither a flag nor a flag's value.
fn positional_text(args: &[String]) -> Option<String> {
    const VALUED: [&str; 2] = ["--file", "--config"];
    let mut skip_next = false;
    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUED.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if !arg.starts_with("--") {
            return Some(arg.clone());
        }
    }
    None
}

fn config_store(path: Option<String>) -> Option<ConfigStore> {
    match path {
        Some(p) => Some(ConfigStore::with_file(PathBuf::from(p))),
        None => ConfigStore::default_config_dir().map(ConfigStore::new),
    }
}

fn load_config(store: Option<&ConfigStore>) -> Result<AppConfig> {
    match store {
        Some(store) => store
            .load()
            .with_context(|| format!("load config {}", store.config_file().display())),
        None => Ok(AppConfig::default()),
    }
}

fn read_review(args: &[String]) -> Result<String> {
    if let Some(path) = parse_arg_value(args, "--file") {
        return std::fs::read_to_string(&path).with_context(|| format!("read review file {}", path));
    }
    if let Some(text) = positional_text(args) {
        return Ok(text);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read review from stdin")?;
    Ok(buf)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!(
            "Usage:\n  score_review [<text> | --file <path>] [--config <config.json>] [--no-classifier] [--json]\n  score_review --save-config [--config <config.json>]\n\nNotes:\n  - With no text or --file the review is read from stdin.\n  - --save-config writes the effective configuration (defaults filled in) and exits; the previous file is backed up.\n  - --no-classifier skips the remote sentiment/emotion classifiers and uses the fallback heuristic.\n  - Classifier API key: REVIEWGUARD_CLASSIFIER_API_KEY or HF_API_TOKEN."
        );
        return Ok(());
    }

    review_guard_lib::init_logging();

    let store = config_store(parse_arg_value(&args, "--config"));
    let config = load_config(store.as_ref())?;

    if has_flag(&args, "--save-config") {
        let store = store.context("no config directory available; pass --config <path>")?;
        store
            .save(&config)
            .with_context(|| format!("save config {}", store.config_file().display()))?;
        println!("Config written to {}", store.config_file().display());
        return Ok(());
    }

    let detector = if has_flag(&args, "--no-classifier") {
        let scorer = ReviewScorer::from_config(&config).context("build scorer")?;
        ReviewDetector::without_classifier(Arc::new(scorer))
    } else {
        ReviewDetector::from_config(&config).context("build detector")?
    };

    let text = read_review(&args)?;
    let assessment = detector.detect(&text).await;

    if has_flag(&args, "--json") {
        let json = serde_json::to_string_pretty(&assessment).context("serialize assessment")?;
        println!("{}", json);
    } else {
        println!("Score: {:.2}", assessment.score);
        println!("Potentially fake: {}", assessment.is_potentially_fake);
        println!("Path: {:?}", assessment.path);
        println!("Reasoning: {}", assessment.reasoning);
    }

    Ok(())
}
