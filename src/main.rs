//! Gantry CLI - build profile manager for Apple platform build pipelines
//!
//! Usage: gantry <COMMAND>
//!
//! Commands:
//!   init     Create the default build profile if it is missing
//!   sync     Reconcile profile steps against the step catalog
//!   diff     Preview what sync would change without writing
//!   show     Display profile settings and steps
//!   enable   Enable a build step
//!   disable  Disable a build step

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use gantry::diff::DiffResult;
use gantry::profile::SyncReport;
use gantry::store::ProfileWarning;

/// Gantry - build profile manager for Apple platform build pipelines
#[derive(Parser, Debug)]
#[command(name = "gantry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, default_value = "false")]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the default build profile if it is missing
    Init {
        /// Project root containing the .gantry directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Recreate the profile from defaults, discarding its contents
        #[arg(short, long)]
        force: bool,
    },

    /// Reconcile profile steps against the step catalog
    Sync {
        /// Project root containing the .gantry directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Dry run - report without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Preview what sync would change without writing
    Diff {
        /// Project root containing the .gantry directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },

    /// Display profile settings and steps
    Show {
        /// Project root containing the .gantry directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },

    /// Enable a build step
    Enable {
        /// Step name, e.g. `signing`
        step: String,

        /// Project root containing the .gantry directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },

    /// Disable a build step
    Disable {
        /// Step name, e.g. `signing`
        step: String,

        /// Project root containing the .gantry directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { project, force } => cmd_init(&project, force, cli.json),
        Commands::Sync { project, dry_run } => cmd_sync(&project, dry_run, cli.json),
        Commands::Diff { project } => cmd_diff(&project, cli.json),
        Commands::Show { project } => cmd_show(&project, cli.json, cli.verbose),
        Commands::Enable { step, project } => cmd_toggle(&project, &step, true, cli.json),
        Commands::Disable { step, project } => cmd_toggle(&project, &step, false, cli.json),
    }
}

fn cmd_init(project: &Path, force: bool, json: bool) -> Result<()> {
    use gantry::steps::builtin_catalog;
    use gantry::store::ProfileStore;

    if !json {
        println!("📦 Gantry Init");
        println!("Project: {}", project.display());
        if force {
            println!("Mode: Force recreate");
        }
    }

    let store = ProfileStore::new(project);
    let catalog = builtin_catalog();

    let report = if force {
        store.recreate_default(&catalog)?
    } else {
        store.ensure_default(&catalog)?
    };

    print_warnings(&report.warnings, json);

    if json {
        let output = serde_json::json!({
            "event": "init",
            "created": report.created,
            "profile": store.profile_path().display().to_string(),
            "created_dirs": report.created_dirs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            "steps": report.profile.step_names().collect::<Vec<_>>()
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for dir in &report.created_dirs {
            println!("  + Created {}/", dir.display());
        }
        println!();
        if report.created {
            println!("✓ Created {}", store.profile_path().display());
            println!("  Steps: {}", report.seeded.added.join(", "));
        } else {
            println!(
                "✓ Profile already exists: {}",
                store.profile_path().display()
            );
            println!(
                "  Steps: {}",
                report.profile.step_names().collect::<Vec<_>>().join(", ")
            );
        }
    }

    Ok(())
}

fn cmd_sync(project: &Path, dry_run: bool, json: bool) -> Result<()> {
    use gantry::profile::BuildProfile;
    use gantry::steps::builtin_catalog;
    use gantry::store::ProfileStore;

    if !json {
        println!("🔄 Gantry Sync");
        println!("Project: {}", project.display());
        if dry_run {
            println!("Mode: Dry run");
        }
    }

    let store = ProfileStore::new(project);
    let catalog = builtin_catalog();

    if dry_run {
        // Never writes. A missing document previews as a fresh default.
        let would_create = !store.exists();
        let mut profile = if would_create {
            BuildProfile::new()
        } else {
            let (profile, warnings) = store.load_with_warnings()?;
            print_warnings(&warnings, json);
            profile
        };
        let report = profile.sync_steps(&catalog);
        return emit_sync(&report, would_create, true, json);
    }

    let ensure = store.ensure_default(&catalog)?;
    print_warnings(&ensure.warnings, json);

    let mut profile = ensure.profile;
    let report = if ensure.created {
        ensure.seeded
    } else {
        let report = profile.sync_steps(&catalog);
        if !report.is_noop() {
            profile.touch();
            store.save(&profile)?;
        }
        report
    };

    emit_sync(&report, ensure.created, false, json)
}

fn emit_sync(report: &SyncReport, created: bool, dry_run: bool, json: bool) -> Result<()> {
    if json {
        let output = serde_json::json!({
            "event": "sync",
            "created": created,
            "dry_run": dry_run,
            "added": report.added,
            "removed": report.removed,
            "retained": report.retained.len()
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!();
    if created {
        if dry_run {
            println!("Would create default profile");
        } else {
            println!("✓ Created default profile");
        }
    }
    if report.is_noop() {
        println!(
            "✓ Profile steps already match the catalog ({} retained)",
            report.retained.len()
        );
    } else {
        if !report.added.is_empty() {
            println!("  ✓ Added: {}", report.added.join(", "));
        }
        if !report.removed.is_empty() {
            println!("  ✗ Removed: {}", report.removed.join(", "));
        }
        println!("  = Retained: {}", report.retained.len());
    }
    if dry_run {
        println!();
        println!("Dry run - nothing written");
    }

    Ok(())
}

fn cmd_diff(project: &Path, json: bool) -> Result<()> {
    use gantry::diff::diff_documents;
    use gantry::steps::builtin_catalog;
    use gantry::store::{render_profile, ProfileStore};

    let store = ProfileStore::new(project);

    if !json {
        println!("📊 Gantry Diff");
        println!("Profile: {}", store.profile_path().display());
        println!();
    }

    let (mut profile, warnings) = store.load_with_warnings()?;
    print_warnings(&warnings, json);

    let on_disk = std::fs::read_to_string(store.profile_path())?;
    profile.sync_steps(&builtin_catalog());
    let rendered = render_profile(&profile)?;

    let result = diff_documents(&on_disk, &rendered);

    if json {
        let output = serde_json::json!({
            "event": "diff",
            "additions": result.additions,
            "deletions": result.deletions,
            "changed": !result.is_empty()
        });
        println!("{}", serde_json::to_string(&output)?);
    } else if result.is_empty() {
        println!("✓ No changes - profile matches the catalog");
    } else {
        print!("{}", render_diff(&store.profile_path(), &result, use_color()));
        println!();
        println!("Summary: {}", result.summary());
    }

    Ok(())
}

fn cmd_show(project: &Path, json: bool, verbose: u8) -> Result<()> {
    use gantry::store::ProfileStore;

    let store = ProfileStore::new(project);
    let (profile, warnings) = store.load_with_warnings()?;
    print_warnings(&warnings, json);

    if json {
        let steps: Vec<_> = profile
            .steps
            .values()
            .map(|s| {
                serde_json::json!({
                    "name": s.name,
                    "enabled": s.enabled
                })
            })
            .collect();
        let output = serde_json::json!({
            "event": "show",
            "profile": store.profile_path().display().to_string(),
            "settings": serde_json::to_value(&profile.settings)?,
            "steps": steps,
            "updated_at": profile.updated_at.to_rfc3339()
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("🔍 Gantry Profile: {}", store.profile_path().display());
    println!();
    println!("Settings:");
    println!(
        "  Automate Info.plist:   {}",
        on_off(profile.settings.automate_info_plist)
    );
    if let Some(path) = &profile.settings.default_info_plist {
        println!("  Default Info.plist:    {}", asset_status(path, project));
    }
    println!(
        "  Automate entitlements: {}",
        on_off(profile.settings.automate_entitlements)
    );
    if let Some(path) = &profile.settings.default_entitlements {
        println!("  Default entitlements:  {}", asset_status(path, project));
    }
    println!(
        "  Non-exempt encryption: {}",
        profile.settings.app_uses_non_exempt_encryption
    );
    let min = &profile.settings.minimum_os_version;
    if !(min.ios.is_empty() && min.tvos.is_empty() && min.macos.is_empty()) {
        println!(
            "  Minimum OS versions:   ios={} tvos={} macos={}",
            dash(&min.ios),
            dash(&min.tvos),
            dash(&min.macos)
        );
    }
    println!();
    println!("Steps:");
    for step in profile.steps.values() {
        let icon = if step.enabled { "✓" } else { "○" };
        println!("  {} {}", icon, step.name);
        if verbose > 0 {
            for (key, value) in &step.settings {
                println!("      {} = {}", key, value);
            }
        }
    }

    Ok(())
}

fn cmd_toggle(project: &Path, step: &str, enabled: bool, json: bool) -> Result<()> {
    use gantry::catalog::closest_name;
    use gantry::error::GantryError;
    use gantry::store::ProfileStore;

    let store = ProfileStore::new(project);
    let (mut profile, warnings) = store.load_with_warnings()?;
    print_warnings(&warnings, json);

    let changed = match profile.set_enabled(step, enabled) {
        Ok(changed) => changed,
        Err(GantryError::UnknownStep { name }) => {
            let names: Vec<&str> = profile.step_names().collect();
            let mut message = format!("no build step named '{}' in the profile", name);
            if let Some(suggestion) = closest_name(&name, names) {
                message.push_str(&format!("\n  → Did you mean '{}'?", suggestion));
            }
            anyhow::bail!(message);
        }
        Err(e) => return Err(e.into()),
    };

    if changed {
        profile.touch();
        store.save(&profile)?;
    }

    if json {
        let output = serde_json::json!({
            "event": if enabled { "enable" } else { "disable" },
            "step": step,
            "changed": changed
        });
        println!("{}", serde_json::to_string(&output)?);
    } else if changed {
        let verb = if enabled { "Enabled" } else { "Disabled" };
        println!("✓ {} step '{}'", verb, step);
    } else {
        let state = if enabled { "enabled" } else { "disabled" };
        println!("✓ Step '{}' already {}", step, state);
    }

    Ok(())
}

fn print_warnings(warnings: &[ProfileWarning], json: bool) {
    for warning in warnings {
        if json {
            let output = serde_json::json!({
                "event": "warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion
            });
            if let Ok(s) = serde_json::to_string(&output) {
                println!("{}", s);
            }
        } else {
            let location = match warning.line {
                Some(line) => format!("{}:{}", warning.file.display(), line),
                None => warning.file.display().to_string(),
            };
            match &warning.suggestion {
                Some(suggestion) => eprintln!(
                    "⚠ Unknown key '{}' in {} - did you mean '{}'?",
                    warning.key, location, suggestion
                ),
                None => eprintln!("⚠ Unknown key '{}' in {}", warning.key, location),
            }
        }
    }
}

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

fn use_color() -> bool {
    use is_terminal::IsTerminal;

    std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none()
        && std::env::var_os("GANTRY_NO_COLOR").is_none()
}

fn render_diff(path: &Path, result: &DiffResult, supports_color: bool) -> String {
    use gantry::diff::DiffTag;

    let width = result
        .lines
        .iter()
        .filter_map(|l| l.old_line.max(l.new_line))
        .max()
        .unwrap_or(1)
        .to_string()
        .len();

    let mut out = String::new();
    let header_a = format!("--- {} (on disk)", path.display());
    out.push_str(&paint(&header_a, CYAN, supports_color));
    out.push('\n');
    out.push_str(&paint("+++ after sync", CYAN, supports_color));
    out.push('\n');

    for line in &result.lines {
        let (sign, color) = match line.tag {
            DiffTag::Delete => ("-", RED),
            DiffTag::Insert => ("+", GREEN),
            DiffTag::Equal => (" ", DIM),
        };

        let old_col = line_col(line.old_line, width);
        let new_col = line_col(line.new_line, width);
        let value = line.content.trim_end_matches('\n');
        let text = format!("{} {} {} {}", old_col, new_col, sign, value);
        out.push_str(&paint(&text, color, supports_color));
        out.push('\n');
    }

    out
}

fn line_col(n: Option<usize>, width: usize) -> String {
    n.map(|n| format!("{:>width$}", n, width = width))
        .unwrap_or_else(|| " ".repeat(width))
}

fn paint(s: &str, color: &str, supports_color: bool) -> String {
    if supports_color {
        format!("{}{}{}", color, s, RESET)
    } else {
        s.to_string()
    }
}

fn on_off(v: bool) -> &'static str {
    if v {
        "on"
    } else {
        "off"
    }
}

fn dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn asset_status(path: &Path, project: &Path) -> String {
    let expanded = expand_home(path);
    let resolved = if expanded.is_absolute() {
        expanded
    } else {
        project.join(&expanded)
    };
    if resolved.exists() {
        path.display().to_string()
    } else {
        format!("{} (missing)", path.display())
    }
}

/// Expand a leading `~/` to the user home directory.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
