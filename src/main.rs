// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use globalsearch::logging::{self, Verbosity};
use globalsearch::{HttpCollectionClient, MemoryPage, RenderState, SearchConfig, Widget};
use url::Url;

mod cli;
use cli::{display, Cli, Commands, GlobalArgs};

/// Quiet period after stdin closes before `watch` exits.
const SETTLE_GRACE: Duration = Duration::from_millis(50);

type HeadlessWidget = Widget<MemoryPage, HttpCollectionClient>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.global.verbose, cli.global.quiet));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli.global)?;

    match cli.command {
        Commands::Config => {
            let rendered = toml::to_string_pretty(&config).context("serializing configuration")?;
            print!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search { query, html } => runtime()?.block_on(search(config, &query, html)),
        Commands::Watch => runtime()?.block_on(watch(config)),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting tokio runtime")
}

fn load_config(args: &GlobalArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    };

    if let Some(api_base) = &args.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(origin) = &args.origin {
        config.origin = Some(Url::parse(origin).with_context(|| format!("invalid --origin `{origin}`"))?);
    }
    if !args.collections.is_empty() {
        config.collections = args.collections.clone();
    }
    if let Some(locale) = &args.locale {
        config.locale = Some(locale.clone());
    }
    if let Some(debounce_ms) = args.debounce_ms {
        config.debounce_ms = debounce_ms;
    }

    config.validate()?;
    Ok(config)
}

/// Headless widget on an in-memory page carrying the configured mount nodes.
fn mount(config: SearchConfig) -> Result<(HeadlessWidget, Arc<MemoryPage>)> {
    let ids = &config.mount;
    let page = Arc::new(MemoryPage::with_widget_nodes(&ids.input, &ids.results, &ids.list));
    let client = HttpCollectionClient::new(&config.resolve_locale(None)).context("building HTTP client")?;
    let widget = Widget::mount(config, Arc::clone(&page), Arc::new(client))?;
    Ok((widget, page))
}

async fn search(config: SearchConfig, query: &str, html: bool) -> Result<ExitCode> {
    let (widget, page) = mount(config)?;
    widget.handle_input(query).await;

    let snapshot = widget.snapshot();
    if html {
        println!("{}", page.inner_html(&widget.config().mount.list).unwrap_or_default());
    } else {
        println!("{}", display::format_snapshot(&snapshot, widget.messages()));
    }

    Ok(match snapshot.state {
        RenderState::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn watch(config: SearchConfig) -> Result<ExitCode> {
    let (widget, _page) = mount(config)?;
    let settle = Duration::from_millis(widget.config().debounce_ms) + SETTLE_GRACE;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut renders = widget.subscribe();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => match line.context("reading stdin")? {
                Some(line) => widget.on_input(&line),
                None => input_open = false,
            },
            changed = renders.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = renders.borrow_and_update().clone();
                println!("{}", display::format_snapshot(&snapshot, widget.messages()));
            }
            () = tokio::time::sleep(settle), if !input_open => {
                if !matches!(widget.snapshot().state, RenderState::Loading) {
                    break;
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
