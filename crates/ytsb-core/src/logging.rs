use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::{fmt, fmt::writer::MakeWriterExt, EnvFilter};

use crate::Result;

/// Initialize tracing for the bot.
///
/// Events go to stdout and are appended to `log_file`. The filter defaults to
/// info for our crates and can be overridden with `RUST_LOG`.
pub fn init(service_name: &str, log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(service_name)));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stdout.and(Mutex::new(file)))
        .init();

    Ok(())
}

fn default_directives(service_name: &str) -> String {
    let crate_name = service_name.replace('-', "_");
    format!(
        "warn,{crate_name}=info,ytsb_core=info,ytsb_telegram=info,ytsb_youtube=info"
    )
}
