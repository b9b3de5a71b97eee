use clap::Parser;
use std::path::PathBuf;

/// Turn your avatar green.
///
/// Files are submitted in order; only the last image that loads is kept and
/// downloaded as `<timestamp>-green-avatar.png`.
#[derive(Parser, Debug, Clone)]
#[command(name = "green-avatar", version, about, long_about)]
pub struct Args {
    /// Image files to tint
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Directory to save the tinted image to [default: from config]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Deliver files as a drag-and-drop gesture instead of a picker selection
    #[arg(long)]
    pub drop: bool,

    /// Only process the files, do not save the result
    #[arg(long)]
    pub no_download: bool,
}
