use anyhow::Result;
use log::info;

use crate::{
    cli::ReportArgs,
    render,
    session::{Selections, Session},
    upload,
};

pub fn execute(args: &ReportArgs) -> Result<()> {
    let Some(upload) = upload::open(&args.input)? else {
        return Ok(());
    };
    let selections = merge_selections(args, upload.config.selections());
    let session = Session::new(upload.table, selections);
    let dashboard = session.derive()?;

    let rendered = render::renderer_for(args.output).render(&dashboard)?;
    print!("{rendered}");
    info!(
        "Reported on {} column(s): {} text summar(ies), {} timeline(s), {} warning(s)",
        dashboard.column_count,
        dashboard.text.len(),
        dashboard.temporal.len(),
        dashboard.warnings.len()
    );
    Ok(())
}

/// Flags given on the command line win over the config file.
fn merge_selections(args: &ReportArgs, from_config: Selections) -> Selections {
    let columns = args
        .columns
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();
    Selections {
        columns: if columns.is_empty() {
            from_config.columns
        } else {
            Some(columns)
        },
        numeric: args.numeric.clone().or(from_config.numeric),
        text: args.text.clone().or(from_config.text),
        preview_rows: args.preview_rows.unwrap_or(from_config.preview_rows),
    }
}
