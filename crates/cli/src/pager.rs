use std::{
    error::Error,
    fmt,
    io::{self, BufRead, Write},
};

const MORE: &str = "--More--";

/// The user answered `q` at the `--More--` prompt.
#[derive(Debug)]
pub struct QuitRequested;

impl fmt::Display for QuitRequested {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("quit at the --More-- prompt")
    }
}

impl Error for QuitRequested {}

/// Whether a write failed because the user quit from the pager.
pub fn is_quit(err: &io::Error) -> bool {
    err.get_ref().is_some_and(|e| e.is::<QuitRequested>())
}

/// Line-counting writer that stops for confirmation once a screen is full.
///
/// With no page height it passes everything straight through. The prompt
/// is shown lazily, right before the first line of the next page, so a
/// listing that ends exactly on a page boundary does not wait for input.
pub struct Pager<W, R> {
    out: W,
    input: R,
    page_rows: Option<usize>,
    rows: usize,
    at_line_start: bool,
}

impl<W: Write, R: BufRead> Pager<W, R> {
    pub fn new(out: W, input: R, page_rows: Option<usize>) -> Self {
        Pager {
            out,
            input,
            page_rows: page_rows.map(|r| r.max(2)),
            rows: 0,
            at_line_start: true,
        }
    }

    fn page_full(&self) -> bool {
        // The prompt takes the last row of the screen.
        self.page_rows.is_some_and(|p| self.rows >= p - 1)
    }

    fn more(&mut self) -> io::Result<()> {
        write!(self.out, "{MORE}")?;
        self.out.flush()?;

        let mut reply = String::new();
        if self.input.read_line(&mut reply)? == 0 {
            writeln!(self.out)?;
            return Err(io::Error::other(QuitRequested));
        }

        let reply = reply.trim_end_matches(['\r', '\n']);
        if reply.starts_with(['q', 'Q']) {
            return Err(io::Error::other(QuitRequested));
        }

        if reply.is_empty() || reply.starts_with(' ') {
            self.rows = 0;
        } else if let Some(p) = self.page_rows {
            // One more line, then ask again.
            self.rows = p - 2;
        }
        Ok(())
    }
}

impl<W: Write, R: BufRead> Write for Pager<W, R> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.at_line_start && self.page_full() {
            self.more()?;
        }

        let (chunk, ends_line) = match buf.iter().position(|&b| b == b'\n') {
            Some(i) => (&buf[..=i], true),
            None => (buf, false),
        };

        let n = self.out.write(chunk)?;
        if n > 0 {
            self.at_line_start = ends_line && n == chunk.len();
            if self.at_line_start {
                self.rows += 1;
            }
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
#[path = "pager_tests.rs"]
mod tests;
