use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Once;

use env_logger::{Env, Target};

static LOGGER: Once = Once::new();

/// Copies every log line to stderr and an append-only log file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Install the global logger. `RUST_LOG` overrides the `info` default.
///
/// With `log_file`, lines also go to that file; if it cannot be opened the
/// logger falls back to stderr only.
pub fn init_logger(log_file: Option<&Path>) {
    LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

        let mut open_error = None;
        if let Some(path) = log_file {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => {
                    builder.target(Target::Pipe(Box::new(Tee { file })));
                }
                Err(err) => open_error = Some((path.to_path_buf(), err)),
            }
        }

        builder.init();

        if let Some((path, err)) = open_error {
            log::warn!("cannot open log file {}: {}", path.display(), err);
        }
    });
}
