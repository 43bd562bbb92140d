//! Terminal front end for the parking dashboard core.
//!
//! # Responsibility
//! - Build a dashboard from config and flags, then print what a UI would show.
//! - Exercise the core wiring (store, sync, search) without a browser.

mod text_view;

use clap::Parser;
use log::warn;
use parkada_core::{
    build_dashboard, default_log_level, init_logging, parse_route, resolve_profile_card,
    DashboardConfig, IdentityProvider, LogoutNotice, ProfileDirectory, ProfileError, SessionUser,
    UserProfile, ViewTarget,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use text_view::TextView;

#[derive(Debug, Parser)]
#[command(name = "parkada", version, about = "Campus parking dashboard (terminal view)")]
struct Cli {
    /// JSON config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the sample slot generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of generated slots.
    #[arg(long)]
    slots: Option<u32>,
    /// Page to open: dashboard|parking|payments|notifications|profile.
    #[arg(long, default_value = "dashboard")]
    route: String,
    /// Highlight slots and notifications matching this text.
    #[arg(long)]
    search: Option<String>,
    /// Mark one notification read before rendering.
    #[arg(long)]
    read: Option<u32>,
    /// Mark every notification read before rendering.
    #[arg(long)]
    mark_all_read: bool,
    /// Print the published view as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Print the logout notice and exit.
    #[arg(long)]
    logout: bool,
    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long)]
    log_dir: Option<String>,
}

/// The terminal has no auth backend: always signed out.
struct SignedOut;

impl IdentityProvider for SignedOut {
    fn current_user(&self) -> Option<SessionUser> {
        None
    }
}

impl ProfileDirectory for SignedOut {
    async fn fetch_profile(&self, _uid: &str) -> Result<Option<UserProfile>, ProfileError> {
        Ok(None)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("parkada: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(&cli)?;

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = config.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| err.to_string())?;
    }

    if cli.logout {
        let notice = LogoutNotice::from_config(&config);
        println!("{}: {}", notice.title, notice.text);
        println!("redirect: {}", notice.redirect_url);
        return Ok(());
    }

    let route = parse_route(&cli.route).map_err(|err| err.to_string())?;
    let mut controller = build_dashboard(&config).map_err(|err| err.to_string())?;

    let text_view = Arc::new(TextView::new(cli.json));
    let target: Arc<dyn ViewTarget> = text_view.clone();
    controller.attach(&target).map_err(|err| err.to_string())?;

    if let Some(id) = cli.read {
        controller.mark_notification_seen(id);
    }
    if cli.mark_all_read {
        controller.mark_all_seen();
    }
    let report = controller.navigate(route);
    if !report.is_clean() {
        warn!(
            "event=cli_render module=cli status=error failed={} missing={}",
            report.failed.len(),
            report.missing.len()
        );
    }

    print!("{}", text_view.latest());

    if let Some(query) = cli.search.as_deref() {
        let hits = controller.search(query);
        println!(
            "search `{}`: slots {:?}, notifications {:?}",
            hits.query, hits.slot_ids, hits.notification_ids
        );
    }

    let card = futures::executor::block_on(resolve_profile_card(&SignedOut, &SignedOut));
    println!("{} | {}", card.email_line, card.role_line);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<DashboardConfig, String> {
    let mut config = match cli.config.as_ref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("cannot read config `{}`: {err}", path.display()))?;
            serde_json::from_str::<DashboardConfig>(&raw)
                .map_err(|err| format!("invalid config `{}`: {err}", path.display()))?
        }
        None => DashboardConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(slots) = cli.slots {
        config.slot_count = slots;
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}
