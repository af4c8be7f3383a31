use super::browse::NOTHING_FOUND;
use super::prompts;
use super::render;
use super::spinner::{is_interactive, Spinner};
use crate::context::AppContext;
use crate::output::Output;
use cine_core::{find_candidates, similar_to, Candidate};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

/// Which candidate to expand: `--pick N` (1-based), a prompt on a terminal,
/// or the first hit otherwise
fn choose_candidate(candidates: &[Candidate], pick: Option<usize>) -> Result<usize> {
    match pick {
        Some(n) if n >= 1 && n <= candidates.len() => Ok(n - 1),
        Some(n) => Err(eyre!("--pick {} is out of range (1-{})", n, candidates.len())),
        None if candidates.len() > 1 && is_interactive() => {
            let labels: Vec<String> = candidates.iter().map(Candidate::label).collect();
            prompts::prompt_select("Which title did you mean?", &labels)
        }
        None => Ok(0),
    }
}

pub async fn run_similar(ctx: &AppContext, query: &str, pick: Option<usize>, output: &Output) -> Result<()> {
    let mut catalog = ctx.catalog()?;

    let spinner = Spinner::start(format!("Searching '{}'...", query));
    let candidates = find_candidates(&catalog, query).await;
    spinner.finish();

    if candidates.is_empty() {
        output.json(&json!({ "query": query, "selected": null, "results": [] }));
        output.warn(NOTHING_FOUND);
        return Ok(());
    }

    let chosen = &candidates[choose_candidate(&candidates, pick)?];

    let spinner = Spinner::start(format!("Finding titles similar to {}...", chosen.item.display_title()));
    let similar = similar_to(&mut catalog, chosen).await;
    spinner.finish();

    output.json(&json!({
        "query": query,
        "selected": render::item_json(&chosen.item, Some(chosen.media_type)),
        "results": render::items_json(&similar, Some(chosen.media_type)),
    }));

    output.println(format!("Similar to {}", chosen.label().bold()));
    if similar.is_empty() {
        output.warn(NOTHING_FOUND);
    } else {
        output.println(render::media_table(&similar, Some(chosen.media_type)).to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cine_models::{MediaItem, MediaType};

    fn candidates(n: u64) -> Vec<Candidate> {
        (1..=n)
            .map(|id| Candidate {
                media_type: MediaType::Movie,
                item: MediaItem {
                    id,
                    ..MediaItem::default()
                },
            })
            .collect()
    }

    #[test]
    fn test_explicit_pick_is_one_based() {
        assert_eq!(choose_candidate(&candidates(3), Some(1)).unwrap(), 0);
        assert_eq!(choose_candidate(&candidates(3), Some(3)).unwrap(), 2);
    }

    #[test]
    fn test_pick_out_of_range() {
        assert!(choose_candidate(&candidates(3), Some(0)).is_err());
        assert!(choose_candidate(&candidates(3), Some(4)).is_err());
    }

    #[test]
    fn test_single_candidate_needs_no_prompt() {
        assert_eq!(choose_candidate(&candidates(1), None).unwrap(), 0);
    }
}
