mod app;
mod cli;
mod color;
mod data;
mod error;
mod export;
mod figure;
mod state;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::Args;
use state::ViewerState;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Validate inputs, load every table, then save and/or show the figure.
fn run(args: &Args) -> Result<()> {
    let files = data::discover::resolve_inputs(&args.files)?;
    data::discover::check_output(args.output.as_deref(), args.force)?;
    log::debug!("Input files: {files:?}");

    let table = data::loader::load_all(&files)?;
    let figure = figure::build_figure(&table, &args.measurements(), args.y_scale())?;

    if let Some(output) = args.output.as_deref().filter(|_| args.should_save()) {
        export::save_figure(&figure, output)?;
        log::info!("Figure saved to {}", output.display());
    }

    if args.should_show() {
        app::show(ViewerState::new(figure, table.len(), files.len()))?;
    }
    Ok(())
}
