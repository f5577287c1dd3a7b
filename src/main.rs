//! Command-line front end: search MGStage for a query token and print the
//! results (or full extracted records) as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::info;

use mgscrape::domain::search_token;
use mgscrape::infrastructure::config::{Language, ProfileConfig};
use mgscrape::infrastructure::logging::init_logging;
use mgscrape::infrastructure::translation::{GoogleTranslator, NoopTranslator, Translator};
use mgscrape::{CatalogRecord, ConfigManager, HttpClient, MgstageProfile, SiteProfile};

struct CliArgs {
    query: String,
    scrape: bool,
    skip_dvd: bool,
    japanese: bool,
    config_path: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let mut query = None;
    let mut scrape = false;
    let mut skip_dvd = false;
    let mut japanese = false;
    let mut config_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scrape" => scrape = true,
            "--skip-dvd" => skip_dvd = true,
            "--japanese" => japanese = true,
            "--config" => {
                let path = args.next().context("--config requires a file path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("unknown option: {other}"),
            other => {
                if query.replace(other.to_string()).is_some() {
                    bail!("expected exactly one query argument");
                }
            }
        }
    }

    let Some(query) = query else {
        print_usage();
        bail!("missing query argument");
    };

    Ok(CliArgs {
        query,
        scrape,
        skip_dvd,
        japanese,
        config_path,
    })
}

fn print_usage() {
    eprintln!("usage: mgscrape [OPTIONS] <query-or-filename>");
    eprintln!();
    eprintln!("options:");
    eprintln!("  --scrape          fetch and extract the full record for every search hit");
    eprintln!("  --skip-dvd        drop physical-disc listings from the results");
    eprintln!("  --japanese        keep extracted text in Japanese (no translation)");
    eprintln!("  --config <path>   read configuration from an explicit file");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let args = parse_args()?;

    let manager = match args.config_path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let mut app_config = manager.load_config().await?;
    if args.japanese {
        app_config.language = Language::Japanese;
    }
    let profile_config = ProfileConfig::from(&app_config);

    let fetcher = Arc::new(HttpClient::new(app_config.http.clone())?);
    let translator: Arc<dyn Translator> = if profile_config.translate {
        Arc::new(GoogleTranslator::japanese_to_english(
            profile_config.translation_timeout,
        )?)
    } else {
        Arc::new(NoopTranslator)
    };
    let profile = MgstageProfile::new(profile_config, fetcher, translator)?;

    let token = search_token(&args.query);
    info!("searching {} for {}", profile.site_name(), token);

    let hits = if args.skip_dvd {
        profile.search_excluding_dvd(&token).await?
    } else {
        profile.search(&token).await?
    };
    info!("{} search results", hits.len());

    if !args.scrape {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    let mut records: Vec<CatalogRecord> = Vec::with_capacity(hits.len());
    for hit in &hits {
        let body = profile.fetch_document(hit).await?;
        records.push(profile.extract(&body, &hit.url).await);
    }
    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
