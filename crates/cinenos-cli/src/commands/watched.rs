use super::browse::NOTHING_FOUND;
use super::render;
use crate::context::AppContext;
use crate::output::Output;
use chrono::Local;
use cine_core::{entry_from_details, MarkOutcome, WatchedHistory};
use cine_models::{MediaDetails, MediaType};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

/// Append a title to the watched list, stamped with the local time
pub fn record_watched(ctx: &AppContext, media_type: MediaType, details: &MediaDetails) -> Result<MarkOutcome> {
    let store = ctx.store();
    let mut history = WatchedHistory::load(&store);
    let entry = entry_from_details(media_type, details, Local::now().naive_local());

    history
        .mark_watched(entry)
        .map_err(|e| eyre!("Failed to update {}: {}", store.watched_file().display(), e))
}

pub fn outcome_label(outcome: MarkOutcome) -> &'static str {
    match outcome {
        MarkOutcome::Added => "added",
        MarkOutcome::AlreadyWatched => "already_watched",
    }
}

/// Human confirmation line; JSON callers fold the outcome into their result instead
pub fn report_outcome(title: &str, outcome: MarkOutcome, output: &Output) {
    if !output.is_human() {
        return;
    }
    match outcome {
        MarkOutcome::Added => output.success(format!("'{}' added to your watched list", title)),
        MarkOutcome::AlreadyWatched => output.info(format!("'{}' is already in your watched list", title)),
    }
}

pub async fn run_add(ctx: &AppContext, media_type: MediaType, id: u64, output: &Output) -> Result<()> {
    let mut catalog = ctx.catalog()?;
    let Some(details) = catalog.details(media_type, id).await else {
        output.warn(NOTHING_FOUND);
        return Ok(());
    };

    let outcome = record_watched(ctx, media_type, &details)?;
    output.json(&json!({
        "id": details.item.id,
        "media_type": media_type.as_str(),
        "title": details.item.display_title(),
        "watched": outcome_label(outcome),
    }));
    report_outcome(details.item.display_title(), outcome, output);
    Ok(())
}

pub fn run_list(ctx: &AppContext, output: &Output) -> Result<()> {
    let history = WatchedHistory::load(&ctx.store());
    let entries: Vec<_> = history.entries_newest_first().collect();

    output.json(&json!({ "count": entries.len(), "watched": entries }));
    if entries.is_empty() {
        output.info("Your watched list is empty. Use `cinenos watched add` or `cinenos pick --mark-watched`.");
        return Ok(());
    }
    output.println(render::watched_table(&entries).to_string());
    output.println(format!("{} title(s) watched", entries.len()));
    Ok(())
}
