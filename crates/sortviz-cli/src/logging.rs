//! Log setup for the terminal front end.
//!
//! The TUI owns stdout/stderr while it runs, so log records only go to a file.
//! Without `--log-file` no logger is installed and every `log` macro is a
//! no-op. The level comes from `RUST_LOG` and defaults to `warn`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

pub fn init(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();

    log::info!("sortviz {} logging to {}", sortviz_core::VERSION, path.display());
    Ok(())
}
