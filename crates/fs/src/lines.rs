use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use log::warn;

/// Count `\n` bytes in a file. A file that cannot be opened or read counts 0.
pub fn count_lines(path: &Path) -> u64 {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            warn!("[lines] open({:?}) failed: {e}", path);
            return 0;
        }
    };

    match count_newlines(BufReader::new(file)) {
        Ok(n) => n,
        Err(e) => {
            warn!("[lines] read({:?}) failed: {e}", path);
            0
        }
    }
}

pub fn count_newlines<R: BufRead>(mut reader: R) -> io::Result<u64> {
    let mut count = 0u64;
    loop {
        let buf = match reader.fill_buf() {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            return Ok(count);
        }
        count += buf.iter().filter(|&&b| b == b'\n').count() as u64;
        let len = buf.len();
        reader.consume(len);
    }
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;
