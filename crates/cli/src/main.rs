use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use hookdash_engine::{ActionCoordinator, RequestExecutor};
use hookdash_tui::{MISSING_SITES_MESSAGE, WidgetView, deploy_widget};
use hookdash_types::{ActionResult, Item, Notice, WidgetConfig};
use hookdash_util::{ReqwestTransport, default_log_path, load_config_from_path, resolve_config_path};
use tracing::info;

/// Fire deploy hooks for your sites from the terminal.
#[derive(Debug, Parser)]
#[command(name = "hookdash", version, about)]
struct Cli {
    /// Widget options file (JSON or YAML)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Print the configured sites
    List,
    /// Trigger the deploy hook of one site
    Deploy {
        /// 1-based position in the list, or the exact site title
        site: String,
    },
    /// Print the config file path in use
    ConfigPath,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // No subcommand => TUI, which owns the terminal, so logs go to a file.
    let tui_mode = cli.command.is_none();
    init_tracing(tui_mode)?;

    let config_path = resolve_config_path(cli.config.as_deref());
    match cli.command {
        None => {
            let config = load_config(&config_path)?;
            hookdash_tui::run(config).await
        }
        Some(Command::ConfigPath) => {
            println!("{}", config_path.display());
            Ok(())
        }
        Some(Command::List) => {
            let config = load_config(&config_path)?;
            print!("{}", render_list(&config));
            Ok(())
        }
        Some(Command::Deploy { site }) => {
            let config = load_config(&config_path)?;
            deploy(&config, &site).await
        }
    }
}

fn init_tracing(tui_mode: bool) -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if tui_mode {
        let log_path = default_log_path();
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating log directory {}", parent.display()))?;
        }
        let file = File::options()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("opening log file {}", log_path.display()))?;
        let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
    } else {
        let _ = builder.with_writer(std::io::stderr).try_init();
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<WidgetConfig> {
    let config = load_config_from_path(path)?;
    info!(path = %path.display(), sites = config.sites().len(), "config loaded");
    Ok(config)
}

fn render_list(config: &WidgetConfig) -> String {
    let widget = deploy_widget(config);
    let WidgetView::Sites { title, items } = &widget.view else {
        return format!("{MISSING_SITES_MESSAGE}\n");
    };
    let mut out = format!("{title}\n");
    for item in items {
        let hook = if item.has_action() { "deploy hook" } else { "no deploy hook" };
        out.push_str(&format!(
            "{:>3}. {}  {}  ({hook})\n",
            item.id.0 + 1,
            item.display_name,
            item.link_url
        ));
    }
    out
}

/// Finds a site by 1-based position or exact title.
fn find_item<'a>(items: &'a [Item], selector: &str) -> Option<&'a Item> {
    let selector = selector.trim();
    if let Ok(position) = selector.parse::<usize>() {
        return position.checked_sub(1).and_then(|index| items.get(index));
    }
    items.iter().find(|item| item.display_name == selector)
}

async fn deploy(config: &WidgetConfig, selector: &str) -> Result<()> {
    let widget = deploy_widget(config);
    if widget.view == WidgetView::MissingSites {
        bail!(MISSING_SITES_MESSAGE);
    }
    let item = find_item(widget.items(), selector).with_context(|| format!("no site matches '{selector}'"))?;

    let transport = ReqwestTransport::new(&config.transport)?;
    let coordinator = ActionCoordinator::new(
        Arc::new(RequestExecutor::new(transport)),
        Arc::new(|notice: Notice| println!("{notice}")),
    );
    let handle = coordinator.trigger(item).context("a deploy is already running")?;
    let report = handle.await.context("deploy task ended abnormally")?;
    match report.result {
        ActionResult::Success => Ok(()),
        ActionResult::Failure(reason) => bail!("deploy of '{}' failed: {reason}", item.display_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use hookdash_types::Site;

    fn config_with(sites: Vec<Site>) -> WidgetConfig {
        WidgetConfig {
            sites: Some(sites),
            ..WidgetConfig::default()
        }
    }

    fn site(title: &str, hook: Option<String>) -> Site {
        Site {
            title: title.into(),
            url: format!("https://{}.example.com", title.to_lowercase()),
            deploy_hook: hook,
        }
    }

    async fn spawn_hooks() -> String {
        let router = Router::new()
            .route("/ok", post(|| async { StatusCode::OK }))
            .route("/broken", post(|| async { StatusCode::BAD_GATEWAY }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn parses_subcommands_and_global_config() {
        let cli = Cli::try_parse_from(["hookdash", "deploy", "2", "--config", "/tmp/widget.yaml"]).unwrap();
        assert_eq!(cli.command, Some(Command::Deploy { site: "2".into() }));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/widget.yaml")));

        let tui = Cli::try_parse_from(["hookdash"]).unwrap();
        assert_eq!(tui.command, None);
    }

    #[test]
    fn finds_sites_by_position_or_title() {
        let widget = deploy_widget(&config_with(vec![site("Docs", None), site("Blog", None)]));
        let items = widget.items();
        assert_eq!(find_item(items, "2").map(|item| item.display_name.as_str()), Some("Blog"));
        assert_eq!(find_item(items, "Docs").map(|item| item.id.0), Some(0));
        assert!(find_item(items, "0").is_none());
        assert!(find_item(items, "3").is_none());
        assert!(find_item(items, "docs").is_none());
    }

    #[test]
    fn list_marks_sites_without_hooks() {
        let listing = render_list(&config_with(vec![
            site("Docs", Some("https://hooks.example.com/secret".into())),
            site("Blog", None),
        ]));
        assert!(listing.starts_with("Cloudflare Deploys\n"));
        assert!(listing.contains("  1. Docs  https://docs.example.com  (deploy hook)"));
        assert!(listing.contains("  2. Blog  https://blog.example.com  (no deploy hook)"));
        assert!(!listing.contains("secret"));

        assert_eq!(render_list(&WidgetConfig::default()), format!("{MISSING_SITES_MESSAGE}\n"));
    }

    #[tokio::test]
    async fn deploy_reports_outcome_through_exit_status() {
        let base = spawn_hooks().await;
        let config = config_with(vec![
            site("Docs", Some(format!("{base}/ok"))),
            site("Blog", Some(format!("{base}/broken"))),
            site("Status", None),
        ]);

        deploy(&config, "Docs").await.unwrap();

        let failed = deploy(&config, "2").await.unwrap_err();
        assert!(failed.to_string().contains("non-success status"));

        let missing = deploy(&config, "Status").await.unwrap_err();
        assert!(missing.to_string().contains("no endpoint configured"));

        assert!(deploy(&config, "Nope").await.is_err());
        assert!(deploy(&WidgetConfig::default(), "1").await.is_err());
    }
}
