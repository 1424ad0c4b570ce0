// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cicerone CLI entrypoint.
//!
//! Runs the interactive demo shell. Tour progress persists to a storage directory
//! (the current working directory by default) so completed tours survive restarts.

use std::error::Error;

use tracing_subscriber::EnvFilter;

use cicerone::runner::RunnerConfig;
use cicerone::store::{FileStorage, ProgressStore, WriteDurability};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<storage-dir>] [--durable-writes] [--cancel-on-leave]\n  {program} [--storage <dir>] [--durable-writes] [--cancel-on-leave]\n\nIf storage-dir/--storage is omitted, the current working directory is used.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n--cancel-on-leave ends the active tour when navigating away from its page instead of\npausing it and resuming on return."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    storage_dir: Option<String>,
    durable_writes: bool,
    cancel_on_leave: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--storage" => {
                if options.storage_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.storage_dir = Some(dir);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--cancel-on-leave" => {
                if options.cancel_on_leave {
                    return Err(());
                }
                options.cancel_on_leave = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.storage_dir.is_some() {
                    return Err(());
                }
                options.storage_dir = Some(arg);
            }
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();

        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "cicerone".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let dir = options.storage_dir.unwrap_or_else(|| ".".to_owned());
        let storage = if options.durable_writes {
            FileStorage::new(dir).with_durability(WriteDurability::Durable)
        } else {
            FileStorage::new(dir)
        };
        let progress = ProgressStore::new(storage);

        let config = RunnerConfig {
            resume_on_return: !options.cancel_on_leave,
            ..RunnerConfig::default()
        };

        cicerone::tui::run(progress, config)
    })();

    if let Err(err) = result {
        eprintln!("cicerone: {err}");
        std::process::exit(1);
    }
}
