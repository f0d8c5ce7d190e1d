mod cli;

use std::io::{BufRead, IsTerminal, Read as _, Write as _};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use cli::{Cli, Command, Folders};
use timeblock::{output, ops, parser, paths, watch, FsVault, SyncError, SyncOptions};

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}

fn open_vault(root: &str) -> Result<FsVault> {
    let path = Path::new(root);
    if !path.is_dir() {
        bail!("vault root {} is not a directory", path.display());
    }
    let root = path
        .canonicalize()
        .with_context(|| format!("failed to resolve vault root {}", path.display()))?;
    Ok(FsVault::new(root))
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{label}: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read folder from stdin")?;
    Ok(line.trim().to_string())
}

/// Fill in any folder not given on the command line by asking for it.
fn resolve_folders(folders: Folders) -> Result<(String, String)> {
    let interactive = std::io::stdin().is_terminal();
    let pick = |given: Option<String>, label: &str, flag: &str| match given {
        Some(f) => Ok(f),
        None if interactive => prompt(label),
        None => bail!("no {label} given; pass {flag}"),
    };
    let source = pick(folders.source, "source folder", "--source")?;
    let dest = pick(folders.output, "output folder", "--output")?;
    Ok((source, dest))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Sync {
            folders,
            dry_run,
            json,
        } => {
            let vault = open_vault(&cli.vault)?;
            let (source, dest) = resolve_folders(folders)?;
            let opts = SyncOptions { dry_run };
            match ops::process_tasks_with(&vault, &source, &dest, &opts) {
                Ok(report) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    } else {
                        eprint!("{}", output::format_report(&report));
                    }
                }
                Err(e) => {
                    if json {
                        let err = output::ErrorReport::from(&e);
                        println!("{}", serde_json::to_string_pretty(&err)?);
                    }
                    return Err(e.into());
                }
            }
        }

        Command::Watch { folders, debounce } => {
            let vault = open_vault(&cli.vault)?;
            let (source, dest) = resolve_folders(folders)?;
            run_watch(&vault, &source, &dest, Duration::from_millis(debounce))?;
        }

        Command::Parse { lines } => {
            let lines = if lines.is_empty() {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf.lines().map(str::to_string).collect()
            } else {
                lines
            };
            let tasks: Vec<_> = lines
                .iter()
                .filter_map(|l| parser::parse_line(l))
                .map(|r| r.to_task())
                .collect();
            if tasks.is_empty() {
                bail!("no reminder lines found");
            }
            print!("{}", output::format_tasks(&tasks));
        }
    }

    Ok(())
}

fn sync_once(vault: &FsVault, source: &str, dest: &str) -> Result<(), SyncError> {
    let report = ops::process_tasks(vault, source, dest)?;
    if report.changed() {
        eprint!("{}", output::format_report(&report));
    }
    Ok(())
}

fn run_watch(vault: &FsVault, source: &str, dest: &str, debounce: Duration) -> Result<()> {
    sync_once(vault, source, dest)?;

    let source_dir = vault.root().join(paths::normalize(source));
    let dest_dir = vault.root().join(paths::normalize(dest));
    let (_watcher, rx) = watch::watch_notes(&source_dir, &dest_dir)?;
    info!("watching {} for changes", source_dir.display());

    watch::run_loop(&rx, debounce, || sync_once(vault, source, dest))?;
    Ok(())
}
