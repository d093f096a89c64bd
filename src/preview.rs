use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, render, session::Preview, upload};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let Some(upload) = upload::open(&args.input)? else {
        return Ok(());
    };
    let rows = args
        .rows
        .unwrap_or_else(|| upload.config.selections().preview_rows);
    let preview = Preview::of(&upload.table, rows);
    let rendered = render::renderer_for(args.output).render_preview(&preview)?;
    print!("{rendered}");
    info!(
        "Displayed {} row(s) from {:?}",
        preview.rows.len(),
        args.input.input
    );
    Ok(())
}
