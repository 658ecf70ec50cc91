//! CLI command implementations

use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use kundo_core::search::{
    AddressState, IDLE_PROMPT, SearchController, SearchState, SearchView, results_label,
};
use kundo_core::{KundoConfig, MovieSummary, RuntimeMode};
use kundo_search::MovieSearchService;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to (overrides KUNDO_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides KUNDO_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Search movies by title
    Search {
        /// Title text
        query: String,
        /// Result page
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// Show one movie with its ratings and Kundo verdict
    Show {
        /// IMDb id such as tt0083658
        id: String,
    },
    /// Live search session reading queries from stdin
    Interactive {
        /// Initial query
        #[arg(short, long)]
        query: Option<String>,
        /// Initial page
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the configuration, provider or I/O error of the failing command
pub async fn run_command(command: Commands, mode: RuntimeMode) -> anyhow::Result<()> {
    let mut config = KundoConfig::from_env();

    match command {
        Commands::Server { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            kundo_web::run_server(config, mode).await?;
            Ok(())
        }
        Commands::Search { query, page } => {
            let service = MovieSearchService::from_config(&config, mode)?;
            search(&service, &query, page).await
        }
        Commands::Show { id } => {
            let service = MovieSearchService::from_config(&config, mode)?;
            show(&service, &id).await
        }
        Commands::Interactive { query, page } => {
            let service = MovieSearchService::from_config(&config, mode)?;
            let address = AddressState::new(query.unwrap_or_default(), page);
            interactive(service, &config, address).await
        }
    }
}

fn movie_line(index: usize, movie: &MovieSummary) -> String {
    format!(
        "{:>3}. {} ({}) [{}]",
        index + 1,
        movie.title,
        movie.year,
        movie.imdb_id
    )
}

async fn search(service: &MovieSearchService, query: &str, page: u32) -> anyhow::Result<()> {
    let response = service
        .search_movies(query, page)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("{}", results_label(response.total_results()));
    println!("{:-<60}", "");
    for (index, movie) in response.search.iter().enumerate() {
        println!("{}", movie_line(index, movie));
    }
    Ok(())
}

async fn show(service: &MovieSearchService, id: &str) -> anyhow::Result<()> {
    let details = service
        .movie_details(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .with_context(|| format!("Looking up {id}"))?;
    let ratings = details.rating_summary();

    println!("{} ({})", details.title, details.year);
    println!("{:-<60}", "");
    println!("  {} | {} | {}", details.rated, details.runtime, details.genre);
    println!("  Director: {}", details.director);
    println!("  Actors:   {}", details.actors);
    if let Some(imdb) = &ratings.imdb {
        println!("  IMDb:     {}", imdb.value);
    }
    if let Some(rt) = &ratings.rotten_tomatoes {
        println!("  RT:       {}", rt.value);
    }
    if ratings.verdict.is_determined() {
        println!("  Kundo:    {}", ratings.verdict.label());
    }
    println!();
    println!("{}", details.plot);
    Ok(())
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Query(String),
    Next,
    Previous,
    Page(u32),
    Help,
    Quit,
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    match trimmed {
        ":q" | ":quit" => Input::Quit,
        ":n" | ":next" => Input::Next,
        ":p" | ":prev" => Input::Previous,
        ":h" | ":help" => Input::Help,
        _ => match trimmed.strip_prefix(":page ").map(|n| n.trim().parse::<u32>()) {
            Some(Ok(page)) => Input::Page(page),
            Some(Err(_)) => Input::Help,
            None => Input::Query(line.trim_end_matches(['\r', '\n']).to_string()),
        },
    }
}

fn print_help() {
    println!("Type a title to search. Commands: :next  :prev  :page N  :help  :quit");
}

fn print_view(state: &SearchState) {
    match state.view() {
        SearchView::Idle => println!("{IDLE_PROMPT}"),
        SearchView::Loading => println!("Searching..."),
        SearchView::Failed(message) => println!("Error: {message}"),
        SearchView::NoMatches { query } => println!("No movies found for \"{query}\""),
        SearchView::Results {
            movies,
            total,
            pagination,
        } => {
            println!("{}", results_label(total));
            for (index, movie) in movies.iter().enumerate() {
                println!("{}", movie_line(index, movie));
            }
            if pagination.is_needed() {
                println!(
                    "Page {} of {}",
                    pagination.current, pagination.total_pages
                );
            }
        }
    }
}

/// True once per request, when that request has settled.
fn is_unseen_settlement(state: &SearchState, last_printed: &mut Option<u64>) -> bool {
    if state.loading || *last_printed == Some(state.latest_request()) {
        return false;
    }
    *last_printed = Some(state.latest_request());
    true
}

async fn interactive(
    service: MovieSearchService,
    config: &KundoConfig,
    address: AddressState,
) -> anyhow::Result<()> {
    let controller = SearchController::restore(Arc::new(service), address, config.search.debounce);
    let mut states = controller.subscribe();
    let mut addresses = controller.address();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_printed = None;

    info!("Interactive search started");
    print_help();

    // An idle restore never changes state, so show where the session starts.
    let initial = states.borrow_and_update().clone();
    if is_unseen_settlement(&initial, &mut last_printed) {
        print_view(&initial);
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Reading stdin")? else {
                    break;
                };
                match parse_input(&line) {
                    Input::Quit => break,
                    Input::Help => print_help(),
                    Input::Next => controller.next_page(),
                    Input::Previous => controller.previous_page(),
                    Input::Page(page) => controller.request_page(page),
                    Input::Query(query) => controller.edit_query(query),
                }
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                if is_unseen_settlement(&state, &mut last_printed) {
                    print_view(&state);
                }
            }
            Ok(()) = addresses.changed() => {
                println!("Address: {}", addresses.borrow_and_update().to_href());
            }
        }
    }

    controller.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input(":quit"), Input::Quit);
        assert_eq!(parse_input(" :next "), Input::Next);
        assert_eq!(parse_input(":prev"), Input::Previous);
        assert_eq!(parse_input(":page 3"), Input::Page(3));
        assert_eq!(parse_input(":page x"), Input::Help);
        assert_eq!(
            parse_input("blade runner"),
            Input::Query("blade runner".to_string())
        );
        assert_eq!(parse_input(""), Input::Query(String::new()));
    }

    #[test]
    fn test_idle_restore_is_shown_once() {
        let (idle, _) = SearchState::restore(&AddressState::default(), Duration::ZERO);
        let mut last_printed = None;

        assert!(is_unseen_settlement(&idle, &mut last_printed));
        assert!(!is_unseen_settlement(&idle, &mut last_printed));
    }

    #[test]
    fn test_loading_state_is_not_shown() {
        let (loading, _) = SearchState::restore(&AddressState::new("alien", 1), Duration::ZERO);
        let mut last_printed = None;

        assert!(loading.loading);
        assert!(!is_unseen_settlement(&loading, &mut last_printed));
        assert_eq!(last_printed, None);
    }

    #[test]
    fn test_movie_line() {
        let movie = MovieSummary::new("Blade Runner", "1982", "tt0083658", "N/A");
        assert_eq!(movie_line(0, &movie), "  1. Blade Runner (1982) [tt0083658]");
    }
}
