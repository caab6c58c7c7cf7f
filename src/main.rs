use clap::Parser;
use klaxon::alerts::AlertTracker;
use klaxon::config::AlertConfig;
use klaxon::events::TimeUnit;
use klaxon::query::AlertQuery;
use log::{error, info, warn};
use std::sync::Arc;

/// Command-line arguments for the alert tracker config-check tool
#[derive(Parser)]
#[command(
    name = "klaxon",
    about = "Alert rate-governance core - throttle policy check and inspection",
    long_about = "Parses the alert throttle directives a monitoring server would start with, \
                  activates every configured alert type, and prints the resulting definition \
                  table as JSON. Any malformed directive is fatal, exactly as it would be at \
                  server startup."
)]
struct Cli {
    /// Alert throttle directive, repeatable
    #[arg(
        long = "alert",
        value_name = "DIRECTIVE",
        help = "Throttle directive of the form header,rate[/unit],burst[/unit]"
    )]
    alerts: Vec<String>,

    /// Backlog capacity
    #[arg(
        long = "alert-backlog",
        value_name = "N",
        help = "Maximum number of accepted events retained in the backlog"
    )]
    alert_backlog: Option<String>,

    /// Enable verbose logging
    #[arg(
        short,
        long,
        help = "Enable verbose logging output (sets RUST_LOG=debug)"
    )]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    // Fail fast: a malformed throttle directive must halt before serving
    let config = match AlertConfig::from_directives(&cli.alerts, cli.alert_backlog.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid alert configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Loaded {} alert template(s), backlog capacity {}",
        config.template_count(),
        config.backlog_capacity()
    );

    let headers = config.template_headers();
    let tracker = Arc::new(AlertTracker::new(config));

    // Built-in always-on type for server-generated events
    if let Err(e) = tracker.register_alert(
        "SYSTEM",
        "Server events",
        TimeUnit::Day,
        0,
        TimeUnit::Day,
        0,
        "any",
    ) {
        error!("Failed to register built-in alert type: {}", e);
        std::process::exit(1);
    }

    for header in headers {
        match tracker.activate_configured_alert(&header, "Configured alert", "") {
            Ok(Some(alert_ref)) => info!("Activated alert {} with ref {}", header, alert_ref),
            Ok(None) => warn!("Alert {} has no configured template", header),
            Err(e) => warn!("Could not activate alert {}: {}", header, e),
        }
    }

    let query = AlertQuery::new(tracker);
    match serde_json::to_string_pretty(&query.definitions()) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize alert definitions: {}", e);
            std::process::exit(1);
        }
    }
}
