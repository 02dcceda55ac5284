use args::EditorArgs;
use clap::Parser;
use color_eyre::Result;
use simplelog::{Config, WriteLogger};
use std::fs::File;

mod action;
mod args;
mod bit_grid;
mod clipboard;
mod codec;
mod dialog;
mod diff;
mod editor;
mod error;
mod image_import;
mod input_state;
mod layout;
mod ui;
mod view_mode;

fn main() -> Result<()> {
    let args = EditorArgs::parse();
    color_eyre::install()?;
    // the terminal belongs to the editor, so logs only ever go to a file
    if let Some(path) = &args.log_file {
        WriteLogger::init(args.log_level(), Config::default(), File::create(path)?)?;
    }
    ui::main(args)
}
