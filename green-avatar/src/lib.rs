//! Green Avatar
//!
//! Tints an avatar green: red and blue channels are scaled by 0.3 while green
//! and alpha pass through, and the result is saved as a PNG.
//!
//! # Architecture
//! - `logic::Shell` accepts files (picker or drag-and-drop) and owns the UI state
//! - `logic::Pipeline` reads, decodes, paints and tints, one upload at a time
//! - `config` persists the save directory
//! - `desktop_main` is the command line front end

pub mod cli;
pub mod config;
pub mod logic;

use anyhow::Result;
use clap::Parser;
use image_loader::SourceFile;
use logic::{Shell, Submission};
use std::path::PathBuf;

/// Initializes the logger for desktop platforms.
///
/// Sets up a custom logger format with timestamp, log level, file name, line number,
/// and log message. Uses local time format for timestamps.
pub fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = cutil::time::local_now("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

/// Main entry point for the command line.
///
/// # Tasks
/// - Initializes logger and configuration
/// - Submits every file to the shell, in order
/// - Downloads the surviving image into the save directory
pub async fn desktop_main() -> Result<()> {
    let args = cli::Args::parse();

    init_logger();
    log::debug!("start...");
    config::init()?;

    let conf = config::all();
    if conf.is_first_run {
        log::info!("created default config: {}", conf.config_path.display());
    }

    let save_dir = args.save_dir.clone().unwrap_or_else(|| conf.save_dir());

    let shell = Shell::new();
    run(&shell, &args.files, args.drop).await;

    if !args.no_download {
        match shell.download(chrono::Utc::now())? {
            Some(artifact) => println!("{}", artifact.save(&save_dir)?.display()),
            None => log::warn!("no image loaded, nothing to download"),
        }
    }

    log::debug!("exit...");
    Ok(())
}

/// Submit `files` to `shell` concurrently, in order.
///
/// Each submission is started before the next one, so the last file that
/// is an image wins.
pub async fn run(shell: &Shell, files: &[PathBuf], drag_and_drop: bool) -> Vec<Submission> {
    let submissions = files.iter().map(|path| {
        let shell = shell.clone();
        let path = path.clone();

        async move {
            let file = match SourceFile::from_path(&path) {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("{e}");
                    return Submission::Rejected;
                }
            };

            let submission = if drag_and_drop {
                shell.drag_enter();
                shell.drop_file(file).await
            } else {
                shell.pick(file).await
            };

            match &submission {
                Submission::Rejected => log::warn!("{} is not an image, ignored", path.display()),
                Submission::Failed { reason } => {
                    log::warn!("{}: {reason}, pick another file", path.display())
                }
                Submission::Superseded => log::info!("{} superseded", path.display()),
                Submission::Loaded { width, height } => {
                    log::info!("{} loaded: {width}x{height}", path.display())
                }
            }

            submission
        }
    });

    futures::future::join_all(submissions).await
}
