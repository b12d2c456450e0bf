use std::process::ExitCode;
use std::sync::Arc;

use finfacts::config::Config;
use finfacts::db::FactStore;
use finfacts::embeddings::{Embedder, FastEmbedder, HashEmbedder};
use finfacts::etl::SourceFile;
use finfacts::fetch::StatementDownloader;
use finfacts::resolver::{embed_catalog, Resolver};
use finfacts::retry::RetryPolicy;
use finfacts::{catalog, derive, etl};

const USAGE: &str = "usage: finfacts <command>

  init                   create the database and seed the catalog
  fetch                  download statement workbooks for the configured tickers
  load                   load downloaded workbooks into the fact table
  derive                 compute standard rollup facts
  embed                  embed companies and accounts for resolution
  query-company <text>   resolve free text to companies
  query-account <text>   resolve free text to accounts with their children";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    match run(command, &args[1..]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}: {}", command, e);
            eprintln!("finfacts {}: {}", command, e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: &str, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match command {
        "init" => {
            let store = FactStore::open_at(config.db_path())?;
            let summary = catalog::seed(&store, &config.periods)?;
            println!(
                "seeded {} companies, {} accounts, {} new periods",
                summary.companies, summary.accounts, summary.periods_inserted
            );
        }
        "fetch" => {
            let downloader =
                StatementDownloader::new(&config.statements_dir(), RetryPolicy::default())?;
            let runtime = tokio::runtime::Runtime::new()?;
            let summary = runtime.block_on(downloader.fetch_all(&config.tickers));
            println!(
                "downloaded {}, failed {}",
                summary.downloaded.len(),
                summary.failed.len()
            );
        }
        "load" => {
            let store = FactStore::open_at(config.db_path())?;
            let sources: Vec<SourceFile> = config
                .tickers
                .iter()
                .map(|ticker| SourceFile::in_dir(&config.statements_dir(), ticker))
                .collect();
            let summary = etl::load_sources(&store, &sources);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "derive" => {
            let store = FactStore::open_at(config.db_path())?;
            let inserted = derive::derive_standard_rollups(&store)?;
            println!("derived {} facts", inserted);
        }
        "embed" => {
            let store = FactStore::open_at(config.db_path())?;
            let embedder = open_embedder(&config);
            let summary = embed_catalog(&store, embedder.as_ref(), &RetryPolicy::default())?;
            println!(
                "embedded {} entities, skipped {}",
                summary.embedded, summary.skipped
            );
        }
        "query-company" => {
            let text = query_text(args)?;
            let store = FactStore::open_at(config.db_path())?;
            let resolver =
                Resolver::new(open_embedder(&config)).with_ef_search(config.ef_search);
            resolver.rebuild(&store)?;
            let matches = resolver.resolve_company(&store, &text, 5)?;
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        "query-account" => {
            let text = query_text(args)?;
            let store = FactStore::open_at(config.db_path())?;
            let resolver =
                Resolver::new(open_embedder(&config)).with_ef_search(config.ef_search);
            resolver.rebuild(&store)?;
            let matches = resolver.search_accounts_with_children(&store, &text, 5)?;
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        _ => {
            eprintln!("{}", USAGE);
            return Err(format!("unknown command '{}'", command).into());
        }
    }

    Ok(())
}

fn query_text(args: &[String]) -> Result<String, Box<dyn std::error::Error>> {
    if args.is_empty() {
        return Err("missing query text".into());
    }
    Ok(args.join(" "))
}

/// The ONNX model (~90MB) downloads on first use; when that's not possible
/// the deterministic hash embedder keeps the pipeline usable offline. Mixing
/// the two across `embed` and `query` runs produces incomparable vectors, so
/// stick with whichever one `embed` ran with.
fn open_embedder(config: &Config) -> Arc<dyn Embedder> {
    match FastEmbedder::new(&config.models_dir()) {
        Ok(embedder) => Arc::new(embedder),
        Err(e) => {
            log::warn!("embedding model unavailable ({}), using hash embeddings", e);
            Arc::new(HashEmbedder)
        }
    }
}
