pub mod classify;
pub mod cli;
pub mod config;
pub mod crosstab;
pub mod data;
pub mod dataset;
pub mod format;
pub mod frequency;
pub mod inference;
pub mod io_utils;
pub mod json;
pub mod loader;
pub mod preview;
pub mod render;
pub mod report;
pub mod session;
pub mod stats;
pub mod table;
pub mod timeline;
pub mod upload;
pub mod wordcloud;
pub mod xlsx;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{ClassifyArgs, Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("data_insights", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Report(args) => report::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
        Commands::Classify(args) => handle_classify(&args),
        Commands::Crosstab(args) => crosstab::execute(&args),
    }
}

fn handle_classify(args: &ClassifyArgs) -> Result<()> {
    let Some(upload) = upload::open(&args.input)? else {
        return Ok(());
    };
    let groups = classify::classify(&upload.table);
    let rendered = render::renderer_for(args.output).render_groups(&groups)?;
    print!("{rendered}");
    info!(
        "Classified {} column(s): {} numeric, {} text, {} temporal",
        upload.table.column_count(),
        groups.numeric.len(),
        groups.text.len(),
        groups.temporal.len()
    );
    Ok(())
}
