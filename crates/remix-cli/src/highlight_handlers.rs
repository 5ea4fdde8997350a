//! Handler for `remix highlights`.

use std::path::Path;

use remix_content::{HighlightExtractor, HighlightSession, Sampler};
use remix_core::traits::ConfigProvider;
use remix_core::{Error, Result, load_document};

use crate::cli::{HighlightsArgs, MAX_ROUNDS};

/// Sampler for an optional seed.
pub fn sampler_for(seed: Option<u64>) -> Sampler {
    seed.map(Sampler::seeded).unwrap_or_else(Sampler::from_entropy)
}

/// Load `path` and draw a first selection of at most `count` quotes
/// (or the configured maximum).
pub async fn load_session<C: ConfigProvider>(
    config: &C,
    path: &Path,
    count: Option<usize>,
    sampler: &mut Sampler,
) -> Result<HighlightSession> {
    let max_selection = count.unwrap_or_else(|| config.max_selection());
    if max_selection == 0 {
        return Err(Error::validation("Selection size must be at least 1"));
    }

    let document = load_document(path).await?;
    let extractor = HighlightExtractor::with_marker(config.section_marker());
    let mut session = HighlightSession::new(max_selection);
    session.load(&extractor, &document, sampler)?;

    tracing::info!(
        "Extracted {} quotes from {}",
        session.quotes().len(),
        path.display()
    );
    Ok(session)
}

/// Run `remix highlights`.
pub async fn handle_highlights<C: ConfigProvider>(config: &C, args: HighlightsArgs) -> Result<()> {
    let output = render_highlights(config, &args).await?;
    println!("{output}");
    Ok(())
}

async fn render_highlights<C: ConfigProvider>(config: &C, args: &HighlightsArgs) -> Result<String> {
    if !(1..=MAX_ROUNDS).contains(&args.rounds) {
        return Err(Error::validation(format!(
            "--rounds must be between 1 and {MAX_ROUNDS}"
        )));
    }

    let mut sampler = sampler_for(args.seed);
    let mut session = load_session(config, &args.file, args.count, &mut sampler).await?;

    if args.all {
        return Ok(session.quotes().as_slice().join("\n\n"));
    }

    if args.rounds == 1 {
        return Ok(session.selection_text());
    }

    let mut rounds = vec![format!("--- Round 1 ---\n{}", session.selection_text())];
    for round in 2..=args.rounds {
        session.resample(&mut sampler);
        rounds.push(format!("--- Round {round} ---\n{}", session.selection_text()));
    }
    Ok(rounds.join("\n\n"))
}
