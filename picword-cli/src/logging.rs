//! Console logging setup.
//!
//! All user-facing output goes through the `log` macros. Info lines are
//! printed bare, warnings and errors get a level tag, and `--verbose` adds
//! timestamps and module paths. `--logfile` mirrors everything to a file
//! with ANSI escapes stripped.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Writes to stdout and, optionally, an ANSI-free copy to a file.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Log level for the given flags. `--quiet` wins over `--verbose`.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived level.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let file = logfile.map(File::create).transpose()?;

    let mut builder = Builder::new();
    builder
        .filter_level(level_for(quiet, verbose))
        .parse_default_env()
        .target(Target::Pipe(Box::new(TeeWriter { file })));

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.module_path().unwrap_or("?"),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stdout, |t| t.red()),
                record.args()
            ),
            Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        });
    }

    builder
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(level_for(true, true), LevelFilter::Warn);
        assert_eq!(level_for(false, true), LevelFilter::Debug);
        assert_eq!(level_for(false, false), LevelFilter::Info);
    }

    #[test]
    fn tee_strips_ansi_in_file_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let mut tee = TeeWriter {
            file: Some(File::create(&path).unwrap()),
        };
        tee.write_all(b"\x1b[32mok\x1b[0m done\n").unwrap();
        tee.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ok done\n");
    }
}
