use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use phish_verdict::components::VerdictResult;
use phish_verdict::config::{load_config, Config};
use phish_verdict::{
    DecisionTreeModel, ReputationSignals, UrlLexicalAnalyzer, UrlSignals, VerdictPipeline,
};
use std::ffi::OsString;
use std::process;
use std::str::FromStr;
use std::sync::Arc;

fn main() {
    let matches = Command::new("phish-verdict")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Website phishing detection from URL structure and site reputation")
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("Website URL to analyze")
                .value_parser(clap::value_parser!(OsString)),
        )
        .arg(
            Arg::new("google-index")
                .long("google-index")
                .value_name("0|1")
                .help("Is the site indexed by Google? (1=Yes, 0=No)")
                .value_parser(clap::value_parser!(u8).range(0..=1))
                .default_value("0"),
        )
        .arg(
            Arg::new("page-rank")
                .long("page-rank")
                .value_name("0-10")
                .help("Google Page Rank")
                .value_parser(clap::value_parser!(u8).range(0..=10))
                .default_value("5"),
        )
        .arg(
            Arg::new("web-traffic")
                .long("web-traffic")
                .value_name("0-100")
                .help("Website popularity score")
                .value_parser(clap::value_parser!(u8).range(0..=100))
                .default_value("50"),
        )
        .arg(
            Arg::new("hyperlinks")
                .long("hyperlinks")
                .value_name("N")
                .help("Total number of links on the webpage")
                .value_parser(clap::value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            Arg::new("url-length")
                .long("url-length")
                .value_name("N")
                .help("URL length to use when no URL is analyzed")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("FILE")
                .help("Decision tree model artifact (overrides the config file)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("YAML configuration file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the analysis as a single JSON object")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging of signals and feature vectors")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    };

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        config
            .as_ref()
            .ok()
            .and_then(|c| LevelFilter::from_str(&c.logging.level).ok())
            .unwrap_or(LevelFilter::Info)
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&matches, &config) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(matches: &ArgMatches, config: &Config) -> Result<()> {
    let json = matches.get_flag("json");

    let url_signals = match matches.get_one::<OsString>("url") {
        Some(url) => analyze_url(url, json),
        None => None,
    };

    // clap enforces the same ranges
    let reputation = ReputationSignals::new(
        *matches.get_one::<u8>("google-index").unwrap_or(&0),
        *matches.get_one::<u8>("page-rank").unwrap_or(&5),
        *matches.get_one::<u8>("web-traffic").unwrap_or(&50),
        *matches.get_one::<u64>("hyperlinks").unwrap_or(&0),
    )?;

    let model_path = matches
        .get_one::<String>("model")
        .cloned()
        .unwrap_or_else(|| config.model.path.clone());
    let model = DecisionTreeModel::load_from_file(&model_path, config.model.max_depth)
        .with_context(|| format!("Failed to load model: {}", model_path))?;
    let pipeline = VerdictPipeline::new(Arc::new(model));

    let result = pipeline
        .evaluate(
            &reputation,
            url_signals.as_ref(),
            matches.get_one::<u64>("url-length").copied(),
        )
        .context("An error occurred during prediction")?;

    if json {
        let output = serde_json::json!({
            "url_signals": url_signals,
            "reputation": reputation,
            "result": result,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

/// Extraction failures are reported but do not stop the run; a fallback URL
/// length can still drive the classifier.
fn analyze_url(url: &OsString, quiet: bool) -> Option<UrlSignals> {
    let analyzer = match UrlLexicalAnalyzer::new() {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Error analyzing URL: {e}");
            return None;
        }
    };

    match analyzer.extract_bytes(url.as_encoded_bytes()) {
        Ok(signals) => {
            if !quiet {
                print_signals(&signals);
            }
            Some(signals)
        }
        Err(e) => {
            eprintln!("Error analyzing URL: {e}");
            None
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn print_signals(signals: &UrlSignals) {
    println!("URL Analysis Results");
    println!("  URL Length:            {}", signals.length);
    println!("  Number of Dots:        {}", signals.dot_count);
    println!("  Number of Hyphens:     {}", signals.hyphen_count);
    println!("  HTTPS Present:         {}", yes_no(signals.has_https));
    println!("  Contains IP Address:   {}", yes_no(signals.has_ip_host));
    println!("  Ratio of Digits:       {:.2}%", signals.digit_ratio * 100.0);
    println!("  Suspicious TLD:        {}", yes_no(signals.suspicious_tld));
    println!("  Special Characters:    {}", signals.special_char_count);
    println!();
}

fn print_result(result: &VerdictResult) {
    for warning in &result.warnings {
        println!("⚠️  {}", warning);
    }
    if !result.warnings.is_empty() {
        println!();
    }

    println!("Final Analysis Result: {}", result.verdict);
    println!("  {}", result.verdict.message());
    println!();
    println!("Factors considered in this analysis:");
    for factor in VerdictResult::ANALYSIS_FACTORS {
        println!("  - {}", factor);
    }
}
