use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use stories::api::HnSearchClient;
use stories::core::action::{Action, Effect, begin_fetch, update};
use stories::core::config::{self, ResolvedConfig};
use stories::core::coordinator::fetch_stories;
use stories::core::state::App;
use stories::core::storage::{FileStore, KeyValueStore, MemoryStore};
use stories::tui;

#[derive(Parser)]
#[command(name = "stories", about = "Search Hacker News stories from the terminal")]
struct Args {
    /// Search endpoint; the URL-encoded term is appended to it
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Search term to start with (overrides the stored one)
    #[arg(short, long)]
    term: Option<String>,

    /// Run one search, print the results and exit
    #[arg(short, long)]
    print: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to stories.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("stories.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }
    };
    let resolved = config::resolve(&file_config, args.endpoint.as_deref());
    log::info!("Stories starting up with endpoint: {}", resolved.endpoint);

    let mut storage = open_storage(&resolved);
    if let Some(term) = &args.term {
        if let Err(e) = storage.set(&resolved.search_key, term) {
            log::warn!("Failed to persist search term: {}", e);
        }
    }

    if args.print {
        return print_stories(&resolved, storage.as_ref()).await;
    }

    tui::run(resolved, storage.as_mut())
}

/// Opens the configured file store, falling back to memory so the session
/// still works without a writable home directory.
fn open_storage(config: &ResolvedConfig) -> Box<dyn KeyValueStore> {
    let Some(path) = &config.storage_path else {
        log::warn!("No storage path available, search term will not persist");
        return Box::new(MemoryStore::new());
    };
    match FileStore::open(path) {
        Ok(store) => {
            log::info!("Using store {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!("Failed to open store {}: {}", path.display(), e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Headless mode: one fetch cycle through the same controller, printed to stdout.
async fn print_stories(config: &ResolvedConfig, storage: &dyn KeyValueStore) -> std::io::Result<()> {
    let mut app = App::new(config, storage);
    let Effect::SpawnFetch(request) = begin_fetch(&mut app) else {
        eprintln!("Nothing to search for: pass --term or type a search in the TUI first");
        return Ok(());
    };

    let source = HnSearchClient::new(config.request_timeout).map_err(|e| {
        eprintln!("Failed to create HTTP client: {e}");
        std::io::Error::other(e)
    })?;
    let action = fetch_stories(&source, request).await;
    let failed = matches!(action, Action::FetchFailed { .. });
    update(&mut app, action);

    if failed {
        eprintln!("Something went wrong ...");
        return Err(std::io::Error::other("search request failed"));
    }

    for story in &app.stories.data {
        println!(
            "{}\t{}\t{} points\t{} comments\t{}",
            story.title, story.author, story.points, story.num_comments, story.url
        );
    }
    Ok(())
}
