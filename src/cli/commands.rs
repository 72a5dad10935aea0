use tracing::info;

use crate::analysis::analyzer::analyze_missing_fields;
use crate::autofill::fill_model::FillConfig;
use crate::autofill::site_handler::SiteHandlerRegistry;
use crate::cli::config::AppConfig;
use crate::driver::session::DriverSession;
use crate::form::scanner::scan_html;
use crate::profile::client::load_profile;
use crate::report::console::{format_analysis_report, format_fill_report, format_scan_report};
use crate::trace::logger::TraceLogger;
use crate::{AutofillRun, autofill_page};

// ============================================================================
// scan subcommand
// ============================================================================

pub fn cmd_scan(html_path: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(html_path)?;
    let forms = scan_html(&html);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&forms)?),
        _ => print!("{}", format_scan_report(&forms)),
    }

    Ok(())
}

// ============================================================================
// analyze subcommand
// ============================================================================

/// Run the completeness check and return whether the profile is complete.
pub fn cmd_analyze(
    html_path: &str,
    profile_source: &str,
    format: &str,
    config: &AppConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(html_path)?;
    let profile = load_profile(profile_source, config.profile.token.as_deref())?;

    let forms = scan_html(&html);
    let analysis = analyze_missing_fields(&forms, &profile);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&analysis)?),
        _ => print!("{}", format_analysis_report(&analysis)),
    }

    Ok(analysis.complete)
}

// ============================================================================
// fill subcommand
// ============================================================================

/// Open the page in the driver, scan, check and fill it. Returns the number
/// of fields filled.
pub fn cmd_fill(
    url: &str,
    profile_source: &str,
    force: bool,
    handler_name: Option<&str>,
    fill_config: FillConfig,
    format: &str,
    config: &AppConfig,
) -> Result<usize, Box<dyn std::error::Error>> {
    let profile = load_profile(profile_source, config.profile.token.as_deref())?;
    let registry = build_registry(config, handler_name, url)?;

    let tracer = if config.trace.enabled {
        TraceLogger::new(&config.trace.path)
    } else {
        TraceLogger::disabled()
    };

    let mut session = DriverSession::launch(&config.driver.node, &config.driver.script)?;
    session.navigate(url)?;
    let html = session.content()?;

    let run = autofill_page(
        &mut session,
        url,
        &html,
        &profile,
        &registry,
        fill_config,
        &tracer,
        force,
    );
    session.quit()?;

    if tracer.is_enabled() {
        tracer.flush();
        info!(
            run_id = tracer.run_id(),
            decisions = tracer.written(),
            path = %config.trace.path,
            "fill trace written"
        );
    }

    print_run(&run, format)?;
    Ok(run.filled.len())
}

fn print_run(run: &AutofillRun, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(run)?),
        _ => {
            print!("{}", format_analysis_report(&run.analysis));
            if run.attempted {
                print!("{}", format_fill_report(&run.filled));
            } else {
                println!("Autofill not attempted (use --force to fill anyway).");
            }
        }
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Registry from the config's host map; `--handler` pins a handler to the
/// target URL's host.
pub fn build_registry(
    config: &AppConfig,
    handler_name: Option<&str>,
    url: &str,
) -> Result<SiteHandlerRegistry, Box<dyn std::error::Error>> {
    let mut registry = SiteHandlerRegistry::new();

    for (host, name) in &config.site_handlers {
        let handler = SiteHandlerRegistry::handler_by_name(name)
            .ok_or_else(|| format!("Unknown site handler '{}' for host {}", name, host))?;
        registry.register(host, handler);
    }

    if let Some(name) = handler_name {
        let handler = SiteHandlerRegistry::handler_by_name(name)
            .ok_or_else(|| format!("Unknown site handler '{}'", name))?;
        let host = reqwest::Url::parse(url)?
            .host_str()
            .ok_or_else(|| format!("URL has no host: {}", url))?
            .to_string();
        info!(host = %host, handler = name, "pinning site handler");
        registry.register(&host, handler);
    }

    Ok(registry)
}
