// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use storage_sys::{InspectConfig, Inspector};
use storage_types::{LvmRequest, all_attr_equals};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "storage-info")]
#[command(about = "Gather normalized facts about storage objects and LVM volumes")]
struct Args {
    /// Configuration file (defaults to $STORAGE_INFO_CONFIG, then built-ins)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    pretty: bool,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: InfoCommand,
}

#[derive(Debug, Subcommand)]
enum InfoCommand {
    /// Inspect a filesystem object (block device, file, socket, ...)
    #[command(alias = "device")]
    Dev { path: PathBuf },

    /// Report physical volumes, volume groups or logical volumes
    Lvm {
        /// pvs, vgs or lvs
        #[arg(long)]
        filter: Option<String>,

        /// LVM --units letter, e.g. m, g, G, h
        #[arg(long)]
        unit: Option<String>,

        /// Print whether every reported row has ATTR equal to VALUE
        #[arg(long, value_name = "ATTR=VALUE")]
        check: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let default_directive = if args.verbose {
        "storage_sys=debug,warn"
    } else {
        "storage_sys=info,warn"
    };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = InspectConfig::resolve(args.config.as_deref())?;
    let inspector = Inspector::system(config);

    match args.command {
        InfoCommand::Dev { path } => {
            let info = inspector
                .inspect_object(&path)
                .with_context(|| format!("inspecting {}", path.display()))?;
            print_json(&info, args.pretty)?;
        }
        InfoCommand::Lvm {
            filter,
            unit,
            check,
        } => {
            let check = check.as_deref().map(parse_check).transpose()?;
            let report = inspector
                .inspect_lvm(&LvmRequest { filter, unit })
                .context("querying LVM")?;

            if let Some((attr, expected)) = check {
                let uniform = all_attr_equals(report.entries(), attr, expected);
                println!("{uniform}");
                return Ok(if uniform {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                });
            }

            print_json(&report, args.pretty)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_check(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((attr, expected)) if !attr.is_empty() => Ok((attr, expected)),
        _ => bail!("--check expects ATTR=VALUE, got '{raw}'"),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
