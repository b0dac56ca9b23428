use std::io::{BufReader, Read};

/// Reads every line of `input` in order, without line terminators.
///
/// A line ends at `\n`, `\r` or `\r\n`. Bytes that are not valid UTF-8 are
/// replaced with U+FFFD rather than failing the read.
pub fn read_lines<R: Read>(input: R) -> std::io::Result<Vec<String>> {
    let mut buf = Vec::new();
    BufReader::new(input).read_to_end(&mut buf)?;
    let text = String::from_utf8_lossy(&buf);

    let mut lines = Vec::new();
    let mut rest: &str = &text;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(end) => {
                lines.push(rest[..end].to_string());
                let tail = &rest[end..];
                rest = tail.strip_prefix("\r\n").unwrap_or(&tail[1..]);
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }
    Ok(lines)
}
