use std::io::{self, Result, Write};

/// Controls where logs for a specific channel are routed to
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Policy {
    Stdout,
    Stderr,
    Silent,
}

pub struct Policies {
    /// Whether to print a banner like "=== Build ===" before each stage.
    pub opheader: Policy,
    /// Where the digests of finished Directories go.
    pub digest: Policy,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            opheader: Policy::Stdout,
            digest: Policy::Stdout,
        }
    }
}

impl Policies {
    /// Only the essentials: digests still go to stdout.
    pub fn quiet() -> Self {
        Self {
            opheader: Policy::Silent,
            digest: Policy::Stdout,
        }
    }
}

/// One of the two real process streams, or an in-memory recording of one.
pub enum Output {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
    Recorded(Vec<u8>),
}

impl Output {
    /// Everything written so far. Always empty for real streams.
    pub fn recorded(&self) -> &str {
        match self {
            Self::Recorded(v) => std::str::from_utf8(v).unwrap_or(""),
            _ => "",
        }
    }
}

impl Write for Output {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        match self {
            Self::Stdout(w) => w.write(bytes),
            Self::Stderr(w) => w.write(bytes),
            Self::Recorded(v) => v.write(bytes),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::Stderr(w) => w.flush(),
            Self::Recorded(_) => Ok(()),
        }
    }
}

pub enum LogWriter<'a> {
    Stdout(&'a mut Output),
    Stderr(&'a mut Output),
    Silent,
}

impl<'a> Write for LogWriter<'a> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        match self {
            Self::Stdout(w) => w.write(bytes),
            Self::Stderr(w) => w.write(bytes),
            Self::Silent => Ok(bytes.len()),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::Stderr(w) => w.flush(),
            Self::Silent => Ok(()),
        }
    }
}

const SEPARATOR: &str = "================================================================";

pub struct Logger {
    pub stdout: Output,
    pub stderr: Output,
    pub pol: Policies,
}

impl Logger {
    pub fn new_real() -> Self {
        Self {
            stdout: Output::Stdout(io::stdout()),
            stderr: Output::Stderr(io::stderr()),
            pol: Policies::default(),
        }
    }

    pub fn new_vec() -> Self {
        Self {
            stdout: Output::Recorded(vec![]),
            stderr: Output::Recorded(vec![]),
            pol: Policies::default(),
        }
    }

    /// What a `new_vec()` logger has captured, as (stdout, stderr).
    pub fn recorded(&self) -> (&str, &str) {
        (self.stdout.recorded(), self.stderr.recorded())
    }

    fn lw_for(&mut self, pol: Policy) -> LogWriter<'_> {
        match pol {
            Policy::Stdout => LogWriter::Stdout(&mut self.stdout),
            Policy::Stderr => LogWriter::Stderr(&mut self.stderr),
            Policy::Silent => LogWriter::Silent,
        }
    }

    pub fn opheader(&mut self) -> LogWriter<'_> {
        self.lw_for(self.pol.opheader)
    }

    pub fn digest(&mut self) -> LogWriter<'_> {
        self.lw_for(self.pol.digest)
    }

    /// Write a stage banner to the opheader channel.
    pub fn header(&mut self, title: impl std::fmt::Display) -> Result<()> {
        writeln!(self.opheader(), "{}\n{}\n{}", SEPARATOR, title, SEPARATOR)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use indoc::indoc;

    #[test]
    fn channels() -> Result<()> {
        let mut log = Logger::new_vec();
        log.pol.digest = Policy::Stderr;
        write!(log.opheader(), "Writing to {}...", "stdout")?;
        write!(log.digest(), "Writing to {}...", "stderr")?;
        assert_eq!(
            log.recorded(),
            ("Writing to stdout...", "Writing to stderr...")
        );
        Ok(())
    }

    #[test]
    fn header() -> Result<()> {
        let mut log = Logger::new_vec();
        log.header("Build")?;
        assert_eq!(
            log.recorded(),
            (
                indoc! {"
                    ================================================================
                    Build
                    ================================================================
                "},
                ""
            )
        );
        Ok(())
    }

    #[test]
    fn quiet() -> Result<()> {
        let mut log = Logger::new_vec();
        log.pol = Policies::quiet();
        log.header("Build")?;
        writeln!(log.digest(), "abc")?;
        assert_eq!(log.recorded(), ("abc\n", ""));
        Ok(())
    }

    #[test]
    fn real_streams_record_nothing() {
        let log = Logger::new_real();
        assert_eq!(log.recorded(), ("", ""));
    }
}
