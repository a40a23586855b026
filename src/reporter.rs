//! User-facing progress output.
//!
//! Progress lines are written through an explicit reporter rather than global
//! state so each run (and each test) owns its own output stream.
use std::fmt::Display;
use std::io::{self, Write};

/// Writes `--> ` progress lines and, when verbose, extra detail lines.
pub struct Reporter<'a> {
    out: &'a mut dyn Write,
    verbose: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(out: &'a mut dyn Write, verbose: bool) -> Self {
        Self { out, verbose }
    }

    /// Print a progress line.
    pub fn status(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.out, "--> {message}")
    }

    /// Print a detail line only in verbose mode.
    pub fn detail(&mut self, message: impl Display) -> io::Result<()> {
        if self.verbose {
            writeln!(self.out, "    {message}")?;
        }
        Ok(())
    }

    /// Print a plain line (listings and tables).
    pub fn line(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }
}

#[cfg(test)]
mod tests {
    use super::Reporter;
    use std::io::{self, Write};

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_are_returned_to_the_caller() {
        let mut out = ClosedPipe;
        let mut reporter = Reporter::new(&mut out, true);
        let err = reporter.status("Ready to sail").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(reporter.detail("pack path").is_err());
    }

    #[test]
    fn detail_lines_only_appear_when_verbose() {
        let mut quiet = Vec::new();
        {
            let mut reporter = Reporter::new(&mut quiet, false);
            reporter.status("Ready to sail").unwrap();
            reporter.detail("pack path: /tmp/packs/go").unwrap();
        }
        assert_eq!(String::from_utf8(quiet).unwrap(), "--> Ready to sail\n");

        let mut loud = Vec::new();
        {
            let mut reporter = Reporter::new(&mut loud, true);
            reporter.detail("pack path: /tmp/packs/go").unwrap();
        }
        assert_eq!(
            String::from_utf8(loud).unwrap(),
            "    pack path: /tmp/packs/go\n"
        );
    }
}
