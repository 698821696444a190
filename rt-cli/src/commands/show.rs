//! TV show commands.

use clap::Subcommand;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use rt_core::config::ClientConfig;
use rt_core::constants::DEFAULT_PAGE_LIMIT;
use rt_core::error::RtResult;
use rt_models::{Model, Paginated, ShowList};

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ShowAction {
    /// List shows.
    List {
        /// Page number (1-based).
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Shows per page.
        #[arg(short = 'n', long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
    /// Search shows by name.
    Search {
        /// Search query.
        query: String,
        /// Page number (1-based).
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Shows per page.
        #[arg(short = 'n', long, default_value_t = DEFAULT_PAGE_LIMIT)]
        limit: u32,
    },
}

pub fn run(config: &ClientConfig, action: ShowAction, format: OutputFormat) -> RtResult<()> {
    let client = super::create_client(config)?;

    let shows = match action {
        ShowAction::List { page, limit } => client.show().list_show(page, limit)?,
        ShowAction::Search { query, page, limit } => client.show().search_show(&query, page, limit)?,
    };

    match format {
        OutputFormat::Json => super::print_json(&shows.to_json()),
        OutputFormat::Text => print_shows(&shows),
    }
    Ok(())
}

fn print_shows(shows: &ShowList) {
    let results = shows.results();
    if results.is_empty() {
        println!("No shows found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Name", "Genres", "Active"]);

    for show in &results {
        let genres: Vec<String> = show
            .genres()
            .iter()
            .filter_map(|g| g.get_str("name").map(str::to_owned))
            .collect();
        table.add_row(vec![
            show.id().map(|id| id.to_string()).unwrap_or_default(),
            super::truncate(show.name().unwrap_or(""), 40),
            genres.join(", "),
            if show.is_active() { "yes".to_string() } else { String::new() },
        ]);
    }

    println!("{table}");
    println!(
        "  Page {}{}",
        shows.page().unwrap_or(1),
        if shows.has_next() {
            format!(" {}", style("(more available)").dim())
        } else {
            String::new()
        }
    );
}
