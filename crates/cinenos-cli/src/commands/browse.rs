use super::render::{self, LIST_LIMIT};
use super::spinner::Spinner;
use crate::context::AppContext;
use crate::output::Output;
use cine_catalog::SortOrder;
use cine_models::MediaType;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

pub const NOTHING_FOUND: &str = "Nenhum item encontrado.";

pub async fn run_search(ctx: &AppContext, query: &str, output: &Output) -> Result<()> {
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start(format!("Searching '{}'...", query));
    let results = catalog.search(query).await;
    spinner.finish();

    output.json(&json!({ "query": query, "results": render::items_json(&results, None) }));
    if results.is_empty() {
        output.warn(NOTHING_FOUND);
        return Ok(());
    }
    output.println(render::media_table(&results, None).to_string());
    if results.len() > LIST_LIMIT {
        output.println(format!("Showing {} of {} results", LIST_LIMIT, results.len()));
    }
    Ok(())
}

pub async fn run_details(ctx: &AppContext, media_type: MediaType, id: u64, output: &Output) -> Result<()> {
    let mut catalog = ctx.catalog()?;

    let spinner = Spinner::start("Loading details...");
    let details = catalog.details(media_type, id).await;
    spinner.finish();

    match details {
        Some(details) => {
            output.json(&render::details_json(media_type, &details, ctx.region()));
            output.println(render::detail_card(media_type, &details, ctx.region()));
        }
        None => output.warn(NOTHING_FOUND),
    }
    Ok(())
}

/// Popular and top-rated on the configured providers, movies then shows
pub async fn run_discover(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut catalog = ctx.catalog()?;

    let sections = [
        (MediaType::Movie, SortOrder::Popularity, "Popular movies"),
        (MediaType::Movie, SortOrder::VoteAverage, "Top-rated movies"),
        (MediaType::Tv, SortOrder::Popularity, "Popular shows"),
        (MediaType::Tv, SortOrder::VoteAverage, "Top-rated shows"),
    ];

    let spinner = Spinner::start("Loading streaming catalog...");
    let mut lists = Vec::with_capacity(sections.len());
    for (media_type, sort, title) in sections {
        let items = catalog.list_on_streaming(media_type, sort).await;
        lists.push((media_type, sort, title, items));
    }
    spinner.finish();

    let json_sections: Vec<_> = lists
        .iter()
        .map(|(media_type, sort, _, items)| {
            let top: Vec<_> = items.iter().take(LIST_LIMIT).cloned().collect();
            json!({
                "media_type": media_type.as_str(),
                "sort_by": sort.as_param(),
                "results": render::items_json(&top, Some(*media_type)),
            })
        })
        .collect();
    output.json(&json!({ "region": ctx.region(), "sections": json_sections }));

    for (media_type, _, title, items) in &lists {
        output.println(format!("\n{}", title.bold().underline()));
        if items.is_empty() {
            output.println(NOTHING_FOUND);
        } else {
            output.println(render::media_table(items, Some(*media_type)).to_string());
        }
    }
    Ok(())
}

pub async fn run_genres(ctx: &AppContext, media_type: MediaType, output: &Output) -> Result<()> {
    let mut catalog = ctx.catalog()?;
    let genres = catalog.genres(media_type).await;

    let json_genres: Vec<_> = genres.iter().map(|(id, name)| json!({"id": id, "name": name})).collect();
    output.json(&json!({ "media_type": media_type.as_str(), "genres": json_genres }));

    if genres.is_empty() {
        output.warn(NOTHING_FOUND);
        return Ok(());
    }
    for (id, name) in &genres {
        output.println(format!("{}  {}", format!("{:>6}", id).dimmed(), name));
    }
    Ok(())
}
