use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use markshare::pages::preview::{PreviewPageData, generate};
use markshare::{
    Command, Config, MarkdownRenderer, OpenArgs, PreviewArgs, Session, ShareArgs, ShareLink,
    ShareStatus, ViewMode, decode_share, format_age, format_size, fragment_of, is_stdin,
    write_css_assets,
};

const LOG_ENV: &str = "MARKSHARE_LOG";
const DEFAULT_TITLE: &str = "MarkShare";

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.log.as_deref());

    config.validate().context("Invalid configuration")?;

    match &config.command {
        Command::Share(args) => share(args),
        Command::Open(args) => open_link(args),
        Command::Preview(args) => preview(args),
    }
}

fn init_logging(directive: Option<&str>) {
    let filter = match directive {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Reads markdown from a file, or stdin when the path is absent or "-".
fn read_markdown(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if !is_stdin(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display())),
        _ => {
            let mut markdown = String::new();
            io::stdin()
                .read_to_string(&mut markdown)
                .context("Failed to read markdown from stdin")?;
            Ok(markdown)
        }
    }
}

fn share(args: &ShareArgs) -> Result<()> {
    let markdown = read_markdown(args.file.as_deref())?;
    let link = ShareLink::new(&args.link.base_url).with_max_len(args.link.max_len);

    let url = link
        .build(&markdown)
        .context("Failed to generate share link")?;

    info!(
        content = %format_size(markdown.len()),
        link = %format_size(url.len()),
        "Generated share link"
    );
    println!("{}", url);

    Ok(())
}

fn open_link(args: &OpenArgs) -> Result<()> {
    let Some(shared) = decode_share(fragment_of(&args.link)) else {
        bail!("No shared content found in link");
    };

    if args.info {
        let age = shared
            .timestamp
            .map(format_age)
            .unwrap_or_else(|| "unknown".to_string());
        eprintln!("Format: {}", shared.format);
        eprintln!("Shared: {}", age);
        eprintln!("Size: {}", format_size(shared.content.len()));
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &shared.content)
                .with_context(|| format!("Failed to write markdown: {}", path.display()))?;
            println!("Wrote: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(shared.content.as_bytes())
                .context("Failed to write markdown to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}

fn preview(args: &PreviewArgs) -> Result<()> {
    let mut session = match (&args.file, &args.link) {
        (Some(path), _) => Session::new(read_markdown(Some(path))?, ViewMode::Split),
        (None, Some(link)) => {
            let shared = decode_share(fragment_of(link));
            if shared.is_none() {
                warn!("Link carries no readable content, showing welcome document");
            }
            Session::from_decoded(shared)
        }
        (None, None) => Session::from_fragment(""),
    };

    if let Some(view) = args.view {
        session.set_view_mode(view);
    }

    let title = args
        .title
        .as_deref()
        .or_else(|| session.title())
        .or_else(|| args.file.as_deref().and_then(|p| p.file_stem()?.to_str()))
        .unwrap_or(DEFAULT_TITLE);

    let share_result = if args.no_share {
        None
    } else {
        let link = ShareLink::new(&args.share.base_url).with_max_len(args.share.max_len);
        Some(session.share_link(&link).map_err(|e| e.to_string()))
    };
    let share = match &share_result {
        None => ShareStatus::Hidden,
        Some(Ok(url)) => ShareStatus::Ready(url),
        Some(Err(reason)) => {
            warn!(reason = %reason, "Preview page will not carry a share link");
            ShareStatus::Failed(reason)
        }
    };

    fs::create_dir_all(&args.output).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            args.output.display()
        )
    })?;
    write_css_assets(&args.output.join("assets")).context("Failed to write CSS assets")?;

    let page = generate(
        PreviewPageData {
            title,
            session: &session,
            share,
        },
        &MarkdownRenderer::new(),
    )
    .context("Failed to generate preview page")?;

    let index_path = args.output.join("index.html");
    fs::write(&index_path, page.into_string())
        .with_context(|| format!("Failed to write page: {}", index_path.display()))?;
    debug!(view = session.view_mode().name(), "Preview page written");

    println!("Generated: {}", index_path.display());

    if !args.no_open {
        if let Err(e) = open::that(&index_path) {
            warn!(error = %e, "Failed to open preview in browser");
        }
    }

    Ok(())
}
