use std::io::{self, BufRead, Write};

use texsift_log::{Chunk, LogFilter};
use texsift_term::render_line;

/// Reads byte lines from `reader` and pumps them through `filter`,
/// rendering chunks into `sink` as they appear. Lines that are not valid
/// UTF-8 are reported and skipped; the stream continues. The final
/// unterminated line, if any, is drained before returning.
pub fn pump<R: BufRead, W: Write>(
    mut reader: R,
    mut filter: LogFilter,
    sink: &mut W,
    color: bool,
) -> io::Result<()> {
    let mut buf = Vec::new();
    let mut lineno: u64 = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lineno += 1;
        match decode(&buf) {
            Some(line) => {
                for chunk in filter.feed_line(line) {
                    sink.write_all(render_line(&chunk, color).as_bytes())?;
                }
            }
            None => log::warn!("line {lineno} is not valid UTF-8, skipped"),
        }
    }
    for chunk in filter.finish() {
        sink.write_all(render_line(&chunk, color).as_bytes())?;
    }
    Ok(())
}

/// Like [`pump`], but collects the chunks instead of rendering them.
pub fn collect<R: BufRead>(mut reader: R, mut filter: LogFilter) -> io::Result<Vec<Chunk>> {
    let mut buf = Vec::new();
    let mut lineno: u64 = 0;
    let mut chunks = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lineno += 1;
        match decode(&buf) {
            Some(line) => chunks.extend(filter.feed_line(line)),
            None => log::warn!("line {lineno} is not valid UTF-8, skipped"),
        }
    }
    chunks.extend(filter.finish());
    Ok(chunks)
}

fn decode(buf: &[u8]) -> Option<&str> {
    let mut end = buf.len();
    while end > 0 && (buf[end - 1] == b'\n' || buf[end - 1] == b'\r') {
        end -= 1;
    }
    std::str::from_utf8(&buf[..end]).ok()
}
