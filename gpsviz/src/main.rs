mod chart;
#[cfg(test)]
mod fixtures;
mod options;
mod survey;

use anyhow::Error as AnyError;
use clap::Parser;
use options::Cli;
use std::path::PathBuf;
use survey::{Survey, Unreadable};

fn main() -> Result<(), AnyError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let out = run(&cli)?;
    let dir = out.parent().map_or_else(PathBuf::new, PathBuf::from);
    let name = out.file_name().unwrap_or_default().to_string_lossy();
    println!("Plot saved as '{name}' in {}", dir.display());
    Ok(())
}

/// Scans the requested directory and writes the plot, returning its
/// path.
fn run(cli: &Cli) -> Result<PathBuf, AnyError> {
    let root = cli.root_dir()?;
    let out = cli.output_path()?;
    let unreadable = if cli.skip_unreadable {
        Unreadable::Skip
    } else {
        Unreadable::Abort
    };

    let survey = Survey::scan(&root, unreadable)?;
    survey.summarize();
    chart::render(&survey.points, &out, (cli.width, cli.height))?;
    Ok(out)
}
