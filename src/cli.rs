//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use crate::config::HedPaths;
use crate::edit::{self, EditOptions, HostFilter};
use crate::history::History;
use crate::hosts::HostsSession;
use crate::parser::{self, SYSTEM_GROUP};
use crate::store;

#[derive(Parser)]
#[command(name = "hed")]
#[command(about = "View, group and edit hosts file entries")]
pub struct Cli {
    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Hosts file to operate on (overrides HED_HOSTS_FILE and config)
    #[arg(long, global = true, value_name = "PATH")]
    pub hosts_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the location of the hosts file being edited
    Path,

    /// List mappings as group, ip, host
    List {
        /// Only mappings of this group
        #[arg(long)]
        group: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List groups with their mapping counts
    Groups {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a group's text (the whole file when omitted)
    Show { group: Option<String> },

    /// Normalize spacing and blank lines
    Format {
        /// Fail if the file is not normalized instead of rewriting it
        #[arg(long)]
        check: bool,
    },

    /// Map one or more hosts to an IP
    Add {
        ip: String,
        #[arg(required = true, num_args = 1..)]
        hosts: Vec<String>,
        /// Group to add to (created if missing); top level when omitted
        #[arg(long)]
        group: Option<String>,
        /// Add the hosts commented out
        #[arg(long)]
        disabled: bool,
    },

    /// Remove a host
    Remove {
        host: String,
        /// Only from this group
        #[arg(long)]
        group: Option<String>,
        /// Only from this IP
        #[arg(long)]
        ip: Option<String>,
    },

    /// Uncomment a host
    Enable {
        host: String,
        /// Only in this group
        #[arg(long)]
        group: Option<String>,
    },

    /// Comment out a host
    Disable {
        host: String,
        /// Only in this group
        #[arg(long)]
        group: Option<String>,
    },

    /// Manage groups (create, rename, remove, enable, disable, set-text)
    Group {
        #[command(subcommand)]
        cmd: GroupCmd,
    },

    /// Snapshots taken before each change (list, show, restore, clear)
    History {
        #[command(subcommand)]
        cmd: HistoryCmd,
    },

    /// Check the hosts file for unpaired markers and unparseable lines
    Doctor,
}

#[derive(Subcommand)]
pub enum GroupCmd {
    /// Add an empty group
    Create { name: String },
    /// Rename a group, keeping its place in the file
    Rename { old: String, new: String },
    /// Remove a group and all its mappings
    Remove { name: String },
    /// Uncomment every host in a group
    Enable { name: String },
    /// Comment out every host in a group
    Disable { name: String },
    /// Replace a group's text from a file or stdin
    SetText {
        name: String,
        /// Read the new text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum HistoryCmd {
    /// List snapshots, newest first
    List,
    /// Print a snapshot
    Show { index: usize },
    /// Write a snapshot back to the hosts file
    Restore { index: usize },
    /// Delete all snapshots
    Clear,
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::initialize_logging(&cli)?;

    let paths = HedPaths::default_paths();
    let config = store::load_config(&paths)?;
    let hosts_store = crate::platform::default_hosts_store(cli.hosts_file.as_deref(), &config);
    let history = History::new(&paths, config.history_limit);
    let session = HostsSession::new(hosts_store.as_ref())
        .with_history(&history)
        .with_line_ending(config.line_ending);
    let options = EditOptions {
        chunk_size: config.chunk_size,
    };
    tracing::debug!("hosts file: {}", hosts_store.location());

    match cli.command {
        Commands::Path => {
            println!("{}", hosts_store.location());
            Ok(())
        }
        Commands::List { group, json } => cmd_list(&session, group.as_deref(), json),
        Commands::Groups { json } => cmd_groups(&session, json),
        Commands::Show { group } => {
            let text = session.group_text(group.as_deref().unwrap_or(SYSTEM_GROUP))?;
            print_text(&text);
            Ok(())
        }
        Commands::Format { check } => cmd_format(&session, check),
        Commands::Add {
            ip,
            hosts,
            group,
            disabled,
        } => {
            let group = group.as_deref().unwrap_or(SYSTEM_GROUP);
            let changed =
                session.apply(|t| edit::add_hosts(t, group, &ip, &hosts, !disabled, options))?;
            report(changed, &format!("Mapped {} to {ip} ({group})", hosts.join(" ")));
            Ok(())
        }
        Commands::Remove { host, group, ip } => {
            let filter = HostFilter {
                group: group.as_deref(),
                ip: ip.as_deref(),
            };
            let changed = session.apply(|t| edit::remove_host(t, &host, filter, options))?;
            report(changed, &format!("Removed {host}"));
            Ok(())
        }
        Commands::Enable { host, group } => cmd_toggle_host(&session, &host, group, true, options),
        Commands::Disable { host, group } => {
            cmd_toggle_host(&session, &host, group, false, options)
        }
        Commands::Group { cmd } => cmd_group(&session, cmd, options),
        Commands::History { cmd } => cmd_history(&session, &history, cmd),
        Commands::Doctor => cmd_doctor(&session),
    }
}

fn report(changed: bool, message: &str) {
    if changed {
        println!("{message}");
    } else {
        println!("No changes");
    }
}

fn print_text(text: &str) {
    if text.is_empty() || text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

fn cmd_list(session: &HostsSession<'_>, group: Option<&str>, json: bool) -> Result<()> {
    let items = session.list(group)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }
    for item in &items {
        for host in &item.hosts {
            let state = if host.enabled { "" } else { "\t(disabled)" };
            println!("{}\t{}\t{}{state}", item.group, item.ip, host.content);
        }
    }
    Ok(())
}

fn cmd_groups(session: &HostsSession<'_>, json: bool) -> Result<()> {
    let groups = session.groups()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }
    for group in &groups {
        println!("{}\t{} mapping(s)", group.name, group.list.len());
    }
    Ok(())
}

fn cmd_format(session: &HostsSession<'_>, check: bool) -> Result<()> {
    if check {
        let text = session.read()?;
        if parser::format(&text) != text.replace("\r\n", "\n") {
            anyhow::bail!("{} is not normalized; run 'hed format'", session.store().location());
        }
        println!("{} is normalized", session.store().location());
        return Ok(());
    }
    let changed = session.format()?;
    report(changed, &format!("Formatted {}", session.store().location()));
    Ok(())
}

fn cmd_toggle_host(
    session: &HostsSession<'_>,
    host: &str,
    group: Option<String>,
    enabled: bool,
    options: EditOptions,
) -> Result<()> {
    let filter = HostFilter {
        group: group.as_deref(),
        ip: None,
    };
    let changed = session.apply(|t| edit::set_host_enabled(t, host, enabled, filter, options))?;
    let verb = if enabled { "Enabled" } else { "Disabled" };
    report(changed, &format!("{verb} {host}"));
    Ok(())
}

fn cmd_group(session: &HostsSession<'_>, cmd: GroupCmd, options: EditOptions) -> Result<()> {
    match cmd {
        GroupCmd::Create { name } => {
            let changed = session.apply(|t| edit::create_group(t, &name))?;
            report(changed, &format!("Created group: {name}"));
        }
        GroupCmd::Rename { old, new } => {
            let changed = session.apply(|t| edit::rename_group(t, &old, &new, options))?;
            report(changed, &format!("Renamed group: {old} -> {new}"));
        }
        GroupCmd::Remove { name } => {
            let changed = session.apply(|t| edit::remove_group(t, &name, options))?;
            report(changed, &format!("Removed group: {name}"));
        }
        GroupCmd::Enable { name } => {
            let changed = session.apply(|t| edit::set_group_enabled(t, &name, true, options))?;
            report(changed, &format!("Enabled group: {name}"));
        }
        GroupCmd::Disable { name } => {
            let changed = session.apply(|t| edit::set_group_enabled(t, &name, false, options))?;
            report(changed, &format!("Disabled group: {name}"));
        }
        GroupCmd::SetText { name, file } => {
            let group_text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))?,
                None => {
                    let mut s = String::new();
                    std::io::stdin().read_to_string(&mut s).context("read stdin")?;
                    s
                }
            };
            let group_text = group_text.trim_end_matches(['\n', '\r']);
            let changed = session.apply(|t| edit::set_group_text(t, &name, group_text))?;
            report(changed, &format!("Updated group text: {name}"));
        }
    }
    Ok(())
}

fn cmd_history(session: &HostsSession<'_>, history: &History, cmd: HistoryCmd) -> Result<()> {
    match cmd {
        HistoryCmd::List => {
            for (idx, entry) in history.load()?.iter().enumerate() {
                println!("{idx}\t{}\t{} line(s)", entry.created_at, entry.content.lines().count());
            }
        }
        HistoryCmd::Show { index } => print_text(&history.get(index)?.content),
        HistoryCmd::Restore { index } => {
            let changed = session.restore(index)?;
            report(changed, &format!("Restored snapshot {index}"));
        }
        HistoryCmd::Clear => {
            history.clear()?;
            println!("History cleared");
        }
    }
    Ok(())
}

fn cmd_doctor(session: &HostsSession<'_>) -> Result<()> {
    let text = session.read()?;
    let results = crate::doctor::run_checks(&text);
    let failed = results.iter().filter(|r| !r.ok).count();
    for r in &results {
        let mark = if r.ok { "ok" } else { "!!" };
        println!("[{mark}] {}", r.message);
    }
    if failed > 0 {
        anyhow::bail!("{failed} check(s) failed for {}", session.store().location());
    }
    Ok(())
}
