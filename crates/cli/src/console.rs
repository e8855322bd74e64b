use std::io::{self, BufRead, Read};

/// Line-at-a-time reader over stdin.
///
/// The pager and the deletion prompt each own one of these. Every refill
/// takes the stdin lock for exactly one line, so neither holds the lock
/// while the other is waiting and no reply is buffered away from the
/// prompt that asked for it.
#[derive(Debug, Default)]
pub struct ConsoleInput {
    line: Vec<u8>,
    pos: usize,
}

impl ConsoleInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Read for ConsoleInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for ConsoleInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.line.len() {
            self.line.clear();
            self.pos = 0;
            io::stdin().lock().read_until(b'\n', &mut self.line)?;
        }
        Ok(&self.line[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.line.len());
    }
}
