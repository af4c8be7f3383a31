use cine_models::{MediaDetails, MediaItem, MediaType, WatchedEntry};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

/// Rows shown per list
pub const LIST_LIMIT: usize = 10;

pub const NO_OVERVIEW: &str = "Sinopse não disponível.";

const LIST_POSTER_SIZE: &str = "w200";
const CARD_POSTER_SIZE: &str = "w500";

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn rating(item: &MediaItem) -> String {
    item.vote_average.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}

fn icon(item: &MediaItem, fallback: Option<MediaType>) -> &'static str {
    item.kind().or(fallback).map(|k| k.icon()).unwrap_or("")
}

/// The first [`LIST_LIMIT`] items as a table
pub fn media_table(items: &[MediaItem], fallback: Option<MediaType>) -> Table {
    let mut table = new_table(vec!["#", "", "Title", "Year", "Rating", "ID"]);
    for (i, item) in items.iter().take(LIST_LIMIT).enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(icon(item, fallback)),
            Cell::new(item.display_title()),
            Cell::new(item.year().unwrap_or("-")),
            Cell::new(rating(item)),
            Cell::new(item.id),
        ]);
    }
    table
}

pub fn watched_table(entries: &[&WatchedEntry]) -> Table {
    let mut table = new_table(vec!["", "Title", "Watched", "ID"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.media_type.icon()),
            Cell::new(&entry.title),
            Cell::new(entry.watched_label()),
            Cell::new(entry.id),
        ]);
    }
    table
}

/// Overview, or the placeholder when the catalog has none
pub fn overview(item: &MediaItem) -> &str {
    item.overview
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .unwrap_or(NO_OVERVIEW)
}

pub fn detail_card(media_type: MediaType, details: &MediaDetails, region: &str) -> String {
    let item = &details.item;
    let mut lines = Vec::new();

    let heading = match item.year() {
        Some(year) => format!("{} {} ({})", media_type.icon(), item.display_title(), year),
        None => format!("{} {}", media_type.icon(), item.display_title()),
    };
    lines.push(heading.bold().cyan().to_string());

    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(tagline.italic().to_string());
    }

    let mut facts = vec![format!("⭐ {}", rating(item))];
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        facts.push(names.join(", "));
    }
    if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
        facts.push(format!("{} min", runtime));
    }
    if let Some(seasons) = details.number_of_seasons {
        facts.push(format!("{} temporada(s)", seasons));
    }
    lines.push(facts.join(" · "));

    lines.push(String::new());
    lines.push(overview(item).to_string());
    lines.push(String::new());

    let providers = details.streaming_providers(region);
    if providers.is_empty() {
        lines.push(format!("{} nenhum streaming em {}", "Disponível em:".bold(), region));
    } else {
        lines.push(format!("{}", "Disponível em:".bold()));
        for provider in providers {
            match provider.logo_url() {
                Some(logo) => lines.push(format!("  {} {}", provider.provider_name, logo.dimmed())),
                None => lines.push(format!("  {}", provider.provider_name)),
            }
        }
    }

    if let Some(url) = item.poster_url(CARD_POSTER_SIZE) {
        lines.push(format!("{} {}", "Poster:".bold(), url));
    }

    lines.join("\n")
}

pub fn item_json(item: &MediaItem, fallback: Option<MediaType>) -> Value {
    json!({
        "id": item.id,
        "media_type": item.kind().or(fallback).map(|k| k.as_str()),
        "title": item.display_title(),
        "year": item.year(),
        "vote_average": item.vote_average,
        "overview": item.overview,
        "poster_url": item.poster_url(LIST_POSTER_SIZE),
    })
}

pub fn items_json(items: &[MediaItem], fallback: Option<MediaType>) -> Value {
    Value::Array(items.iter().map(|item| item_json(item, fallback)).collect())
}

pub fn details_json(media_type: MediaType, details: &MediaDetails, region: &str) -> Value {
    let item = &details.item;
    let providers: Vec<Value> = details
        .streaming_providers(region)
        .iter()
        .map(|p| json!({"name": p.provider_name, "logo_url": p.logo_url()}))
        .collect();
    json!({
        "id": item.id,
        "media_type": media_type.as_str(),
        "title": item.display_title(),
        "year": item.year(),
        "tagline": details.tagline,
        "vote_average": item.vote_average,
        "genres": details.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
        "overview": overview(item),
        "providers": providers,
        "poster_url": item.poster_url(CARD_POSTER_SIZE),
    })
}
