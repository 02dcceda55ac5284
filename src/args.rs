use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Terminal editor for 32x32 LED bitmaps
#[derive(Parser, Clone, Default, Debug)]
#[command(version, about, long_about = None)]
pub struct EditorArgs {
    /// what the compare action diffs
    #[arg(short, long, value_enum, default_value_t = CompareMode::History)]
    pub compare: CompareMode,
    /// image to import on start-up
    #[arg(short, long, value_name = "PATH")]
    pub image: Option<PathBuf>,
    /// keep copied bitmaps inside the editor instead of the system clipboard
    #[arg(long)]
    pub local_clipboard: bool,
    /// write a log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// more log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CompareMode {
    /// diff the last two pasted or imported bitmaps
    #[default]
    History,
    /// paste two bitmaps into a dialog and diff those
    Panels,
}

impl EditorArgs {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
