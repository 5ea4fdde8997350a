//! Handler for `remix remix`.

use std::fmt::Write as _;
use std::path::Path;

use remix_core::traits::ConfigProvider;
use remix_core::{Error, Result};
use remix_llm::{Remix, RemixRequest, Remixer};

use crate::cli::RemixArgs;
use crate::highlight_handlers::{load_session, sampler_for};

/// Run `remix remix`.
pub async fn handle_remix<C: ConfigProvider>(
    config: &C,
    remixer: &Remixer,
    args: RemixArgs,
) -> Result<()> {
    let remix = run_remix(config, remixer, &args).await?;
    println!("{}", format_remix(&remix, args.tweet_links)?);

    if let Some(path) = &args.output {
        save_remix(&remix, path).await?;
        tracing::info!("Saved remix to {}", path.display());
    }
    Ok(())
}

async fn run_remix<C: ConfigProvider>(
    config: &C,
    remixer: &Remixer,
    args: &RemixArgs,
) -> Result<Remix> {
    let text = source_text(config, args).await?;
    let mut request = RemixRequest::new(text, args.platform);
    if let Some(prompt) = &args.prompt {
        request = request.with_prompt(prompt.clone());
    }
    remixer.remix(request).await
}

/// The text to remix: inline, from a file, or a highlights selection.
async fn source_text<C: ConfigProvider>(config: &C, args: &RemixArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        return tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(e, path));
    }

    if let Some(path) = &args.highlights {
        let mut sampler = sampler_for(args.seed);
        let session = load_session(config, path, None, &mut sampler).await?;
        return Ok(session.selection_text());
    }

    Err(Error::validation("Provide --text, --file, or --highlights"))
}

/// Numbered posts, each optionally followed by its tweet link.
fn format_remix(remix: &Remix, tweet_links: bool) -> Result<String> {
    let mut out = String::new();
    for (i, post) in remix.posts.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{}. {}", i + 1, post.text);
        if tweet_links {
            let _ = write!(out, "\n   {}", post.tweet_intent_url()?);
        }
    }
    Ok(out)
}

async fn save_remix(remix: &Remix, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(remix).map_err(|e| Error::Serialization(e.to_string()))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}
