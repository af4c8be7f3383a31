use super::render;
use super::spinner::Spinner;
use super::watched::{outcome_label, record_watched, report_outcome};
use crate::context::AppContext;
use crate::output::Output;
use cine_core::{pick, MarkOutcome, PickError, PickMode};
use cine_models::{MediaDetails, MediaType};
use color_eyre::Result;
use serde_json::{json, Value};
use tracing::debug;

pub async fn run_pick(
    ctx: &AppContext,
    media_type: MediaType,
    mode: &PickMode,
    mark_watched: bool,
    output: &Output,
) -> Result<()> {
    let mut catalog = ctx.catalog()?;
    let mut rng = rand::rng();

    let spinner = Spinner::start(format!("Picking a {}...", media_type));
    let picked = pick(&mut catalog, media_type, mode, &mut rng).await;
    let picked = match picked {
        Ok(Some(picked)) => picked,
        Ok(None) => {
            spinner.finish();
            output.warn("Could not pick anything this time. Try other genres or another mode.");
            return Ok(());
        }
        Err(e @ PickError::NoGenresSelected) => {
            spinner.finish();
            output.warn(e.to_string());
            return Ok(());
        }
    };
    debug!("Picked {} {}", picked.media_type, picked.item.id);

    // Lists carry no providers; fall back to the list record when details fail
    let details = catalog.details(picked.media_type, picked.item.id).await;
    spinner.finish();
    let details = details.unwrap_or_else(|| MediaDetails {
        item: picked.item.clone(),
        ..Default::default()
    });

    let outcome = if mark_watched {
        Some(record_watched(ctx, picked.media_type, &details)?)
    } else {
        None
    };

    output.json(&pick_json(picked.media_type, &details, ctx.region(), outcome));
    output.println(render::detail_card(picked.media_type, &details, ctx.region()));

    if let Some(outcome) = outcome {
        report_outcome(details.item.display_title(), outcome, output);
    }
    Ok(())
}

/// The details document, plus the watched-list outcome when the pick was marked
fn pick_json(media_type: MediaType, details: &MediaDetails, region: &str, outcome: Option<MarkOutcome>) -> Value {
    let mut result = render::details_json(media_type, details, region);
    if let Some(outcome) = outcome {
        result["watched"] = json!(outcome_label(outcome));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use cine_models::MediaItem;

    fn details() -> MediaDetails {
        MediaDetails {
            item: MediaItem {
                id: 603,
                title: Some("Matrix".to_string()),
                ..MediaItem::default()
            },
            ..MediaDetails::default()
        }
    }

    #[test]
    fn test_marked_pick_is_one_document() {
        let value = pick_json(MediaType::Movie, &details(), "BR", Some(MarkOutcome::Added));
        assert_eq!(value["id"], 603);
        assert_eq!(value["title"], "Matrix");
        assert_eq!(value["watched"], "added");

        let again = pick_json(MediaType::Movie, &details(), "BR", Some(MarkOutcome::AlreadyWatched));
        assert_eq!(again["watched"], "already_watched");
    }

    #[test]
    fn test_unmarked_pick_has_no_watched_field() {
        let value = pick_json(MediaType::Movie, &details(), "BR", None);
        assert!(value.get("watched").is_none());
    }
}
