mod app;
mod archive;
mod browse;
mod config;
mod input;
mod player;
mod tui;

use anyhow::Context;
use archive::ArchiveClient;
use archive::models::format_date;
use browse::query::{FilterChange, QueryState};
use browse::{DetailState, FetchOutcome, Filter, Navigator, Request};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "arcbrowse", version, about = "Terminal browser for a media archive")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Use this API base URL for this run instead of the configured one.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// List collections (headless).
    Collections {
        /// Collection name pattern; `*` matches everything.
        #[arg(long)]
        pattern: Option<String>,
        /// Sort key, e.g. "stars desc" or "num_reviews asc".
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// List the videos of one collection (headless).
    Videos {
        collection_id: String,
        /// Sort key, e.g. "date desc" or "title asc".
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one video's details (headless).
    Video { identifier: String },
    /// Dump the raw collection-list JSON to stdout (headless).
    ExploreJson {
        #[arg(long)]
        pattern: Option<String>,
    },

    /// Inspect or change the config file.
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Persist a new API base URL.
    SetEndpoint { url: String },
    /// Print the effective config.
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let command = cli.command.unwrap_or(Command::Tui);

    init_logging(&cfg, matches!(command, Command::Tui))?;
    let base_url = cli.base_url.as_deref();

    match command {
        Command::Tui => {
            let client = make_client(&cfg, base_url)?;
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            let mut app = app::App::new(cfg, Arc::new(client));
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Collections {
            pattern,
            sort,
            page,
        } => {
            let client = make_client(&cfg, base_url)?;
            let mut nav = Navigator::new();
            let mut req = nav.start();
            if let Some(pattern) = pattern {
                req = nav.set_filter(Filter::Pattern(pattern))?;
            }
            if let Some(sort) = sort {
                req = nav.set_sort(&sort)?;
            }
            if let Some(page) = page {
                req = nav.set_page(page)?;
            }
            run_listing(&mut nav, &client, req).await?;
        }
        Command::Videos {
            collection_id,
            sort,
            page,
        } => {
            let client = make_client(&cfg, base_url)?;
            let mut nav = Navigator::new();
            let mut req = nav.enter_collection(&collection_id);
            if let Some(sort) = sort {
                req = nav.set_sort(&sort)?;
            }
            if let Some(page) = page {
                req = nav.set_page(page)?;
            }
            run_listing(&mut nav, &client, req).await?;
        }
        Command::Video { identifier } => {
            let client = make_client(&cfg, base_url)?;
            let mut nav = Navigator::new();
            let req = nav.open_detail(&identifier);
            nav.dispatch(&client, req).await;
            match nav.detail() {
                DetailState::Ready(video) => print_video(video),
                DetailState::Error { error, .. } => {
                    anyhow::bail!("{} ({error})", browse::nav::DETAIL_ERROR_MESSAGE)
                }
                DetailState::Closed | DetailState::Loading { .. } => {
                    anyhow::bail!("detail request for {identifier} did not complete")
                }
            }
        }
        Command::ExploreJson { pattern } => {
            let client = make_client(&cfg, base_url)?;
            let mut query = QueryState::collections();
            if let Some(pattern) = pattern {
                query.set_filter(FilterChange::Pattern(pattern))?;
            }
            let v = client.explore_raw(query.query()).await?;
            println!("{}", serde_json::to_string_pretty(&v)?);
        }
        Command::Config { cmd } => run_config_command(cfg, cli.config.as_deref(), cmd)?,
    }

    Ok(())
}

/// `--base-url` applies to this run only and is never written back.
fn make_client(cfg: &config::Config, base_url: Option<&str>) -> anyhow::Result<ArchiveClient> {
    let base_url = base_url.unwrap_or(&cfg.api.base_url);
    let client = ArchiveClient::new(base_url, cfg.api.timeout()).context("build API client")?;
    tracing::debug!(base_url = client.base_url(), "archive client ready");
    Ok(client)
}

/// TUI output goes to a log file so it does not tear the screen; headless
/// commands log to stderr.
fn init_logging(cfg: &config::Config, tui: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if tui {
        let dir = &cfg.paths.data_dir;
        std::fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
        let path = dir.join("arcbrowse.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

fn run_config_command(
    mut cfg: config::Config,
    override_path: Option<&std::path::Path>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::SetEndpoint { url } => {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("endpoint must be an http(s) URL, got {url:?}");
            }
            cfg.api.base_url = url.trim_end_matches('/').to_string();
            config::save(&cfg, override_path).context("save config")?;
            println!("API endpoint set to {}", cfg.api.base_url);
        }
        ConfigCommand::Show => {
            let path = match override_path {
                Some(p) => p.to_path_buf(),
                None => config::default_config_path().context("default config path")?,
            };
            println!("# {}", path.display());
            print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
        }
    }
    Ok(())
}

async fn run_listing(nav: &mut Navigator, client: &ArchiveClient, req: Request) -> anyhow::Result<()> {
    nav.dispatch(client, req).await;
    let context = nav.context();

    match nav.videos() {
        Some(v) => {
            println!("{} [{}]", v.title(), v.collection_id());
            match v.outcome() {
                FetchOutcome::Success(page) => {
                    for (i, video) in page.items.iter().enumerate() {
                        let date = video.published().map(format_date).unwrap_or_default();
                        println!(
                            "{:02}. {}  {}  (id={})",
                            i + 1,
                            video.display_title(),
                            date,
                            video.identifier
                        );
                    }
                    println!("page {}/{}", v.query().page(), page.total_pages());
                }
                FetchOutcome::Empty => println!("{}", context.empty_message()),
                FetchOutcome::Error(e) => anyhow::bail!("{} ({e})", context.error_message()),
                FetchOutcome::Loading => anyhow::bail!("request did not complete"),
            }
        }
        None => match nav.root_outcome() {
            FetchOutcome::Success(page) => {
                for (i, c) in page.items.iter().enumerate() {
                    println!(
                        "{:02}. {}  stars={} reviews={} files={}  (id={})",
                        i + 1,
                        c.display_title(),
                        c.stars.map(|s| format!("{s:.1}")).unwrap_or_else(|| "-".into()),
                        c.num_reviews.unwrap_or(0),
                        c.files_count.unwrap_or(0),
                        c.identifier
                    );
                }
                println!(
                    "page {}/{} ({} collections)",
                    nav.root_query().page(),
                    page.total_pages(),
                    page.total_count.unwrap_or(page.items.len() as u64)
                );
            }
            FetchOutcome::Empty => println!("{}", context.empty_message()),
            FetchOutcome::Error(e) => anyhow::bail!("{} ({e})", context.error_message()),
            FetchOutcome::Loading => anyhow::bail!("request did not complete"),
        },
    }
    Ok(())
}

fn print_video(video: &archive::models::Video) {
    println!("{}", video.display_title());
    println!("  id:        {}", video.identifier);
    if let Some(date) = video.published() {
        println!("  date:      {}", format_date(date));
    }
    if let Some(creator) = &video.creator {
        println!("  creator:   {creator}");
    }
    if !video.collection.is_empty() {
        println!("  in:        {}", video.collection.join(", "));
    }
    if !video.tags.is_empty() {
        println!("  tags:      {}", video.tags.join(", "));
    }
    println!("  thumbnail: {}", video.thumbnail());
    for source in &video.playback_urls {
        println!("  play:      [{}] {}", source.format, source.url);
    }
    if let Some(description) = &video.description {
        println!();
        println!("{description}");
    }
}
