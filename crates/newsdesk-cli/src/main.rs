use anyhow::{Context, Result};
use newsdesk_config::{Config, Direction};
use newsdesk_engine::io::{self, export::Exporter};
use newsdesk_engine::parsing::{TextStats, words};
use newsdesk_engine::{
    BlockData, BlockPatch, ClipboardPayload, Document, EditorSettings, PasteOutcome,
    TextDirection,
};
use std::{env, path::PathBuf, process, time::Duration};

struct Args {
    input: PathBuf,
    html: bool,
    out: Option<PathBuf>,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <clipboard-file> [--html] [--out <file>]");
    eprintln!("Pastes a clipboard dump into a new article and prints the export JSON");
    process::exit(1);
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("newsdesk-cli");

    let mut input = None;
    let mut html = false;
    let mut out = None;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--html" => html = true,
            "--out" => match rest.next() {
                Some(path) => out = Some(PathBuf::from(path)),
                None => usage(program),
            },
            flag if flag.starts_with("--") => usage(program),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            _ => usage(program),
        }
    }

    let Some(input) = input else { usage(program) };
    Args {
        input,
        html,
        out,
    }
}

fn editor_settings(config: &Config) -> EditorSettings {
    EditorSettings {
        words_per_minute: config.editor.words_per_minute as usize,
        focus_delay: Duration::from_millis(config.editor.focus_delay_ms),
        commit_debounce: Duration::from_millis(config.editor.commit_debounce_ms),
    }
}

fn exporter(config: &Config) -> Exporter {
    Exporter {
        version: config.export.schema_version.clone(),
        embed_width: config.export.embed_width,
        embed_height: config.export.embed_height,
    }
}

/// Paste into the first block, landing the cursor text in it
fn paste_into(doc: &mut Document, payload: &ClipboardPayload) -> Result<()> {
    let first = doc.blocks()[0].id();
    doc.select(first);

    match doc.paste(payload) {
        PasteOutcome::Inserted {
            target: Some(target),
            cursor,
            ..
        } => {
            doc.update(target, BlockPatch::html(cursor.to_html()));
        }
        PasteOutcome::Inserted { target: None, .. } | PasteOutcome::Aborted => {
            anyhow::bail!("paste had no block to land in");
        }
        PasteOutcome::Empty => log::info!("Clipboard file had no usable content"),
    }
    Ok(())
}

/// Word and reading-time totals over every block's text
///
/// Counted from the payloads rather than per-block metadata, which stays at
/// zero for paragraphs a paste inserts until they are next edited.
fn article_stats(doc: &Document, words_per_minute: usize) -> TextStats {
    let text = doc
        .blocks()
        .iter()
        .map(|block| match block.data() {
            BlockData::Paragraph { html, .. } | BlockData::Heading { html, .. } => html.clone(),
            BlockData::Quote { text, .. } => text.clone(),
            BlockData::List { items, .. } => items.join(" "),
            _ => String::new(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    words::estimate_with_rate(&text, words_per_minute)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = parse_args();
    let config_path = Config::config_path();
    if !config_path.exists() {
        log::info!("No config at {}, using defaults", config_path.display());
    }
    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let content = io::read_clipboard_file(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let payload = if args.html {
        ClipboardPayload::html(content)
    } else {
        ClipboardPayload::text(content)
    };

    let mut doc = Document::with_settings(editor_settings(&config));
    if config.editor.direction == Direction::Rtl {
        doc.set_direction(TextDirection::Rtl);
    }
    paste_into(&mut doc, &payload)?;

    let stats = article_stats(&doc, config.editor.words_per_minute as usize);
    log::info!(
        "Article has {} blocks, {} words, about {} min read",
        doc.block_count(),
        stats.word_count,
        stats.reading_time
    );

    let exported = exporter(&config).export(&doc);
    let destination = args.out.or_else(|| {
        config
            .output_dir
            .as_ref()
            .map(|dir| dir.join(io::export_file_name(exported.time)))
    });

    match destination {
        Some(path) => {
            io::write_export(&path, &exported)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", io::to_json_pretty(&exported)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_engine::{BlockType, InsertAt};

    #[test]
    fn test_article_stats_counts_every_pasted_line() {
        let mut doc = Document::new();
        let payload = ClipboardPayload::text("one two\nthree four\nfive six");

        paste_into(&mut doc, &payload).unwrap();
        let stats = article_stats(&doc, 200);

        assert_eq!(doc.block_count(), 3);
        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.reading_time, 1);
    }

    #[test]
    fn test_article_stats_includes_quotes() {
        let mut doc = Document::new();
        let first = doc.blocks()[0].id();
        doc.update(first, BlockPatch::html("<p>opening line</p>"));
        let quote = doc.insert(BlockType::Quote, InsertAt::End, None);
        doc.update(quote, BlockPatch::text("quoted words here"));

        let stats = article_stats(&doc, 200);

        assert_eq!(stats.word_count, 5);
    }
}
