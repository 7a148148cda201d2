use std::collections::HashMap;
use std::io::BufRead;

use crate::document::{Document, Section};
use crate::error::{Error, Result};

/// Characters which start a comment; the rest of the line is dropped.
pub const COMMENT_CHARS: [u8; 2] = [b'#', b';'];

/// Parse INI text from `r` into a `Document`.
///
/// Input is consumed one line at a time. The first malformed line aborts
/// the parse, and the error names that line (counting from 1, blank and
/// comment lines included). Section and key names are lowercased; values
/// keep their case. Bytes which are not valid UTF-8 are replaced with
/// U+FFFD rather than rejected. A repeated key overwrites the earlier
/// value, and a repeated section header starts that section afresh.
///
/// # Example
///
/// ```
/// use inilook::parser::parse;
///
/// let doc = parse("[Server]\nHost = 10.0.0.1 ; primary\n".as_bytes()).unwrap();
/// assert_eq!(doc.read("server", "host"), "10.0.0.1");
/// ```
pub fn parse<R: BufRead>(mut r: R) -> Result<Document> {
    let mut sections: HashMap<String, Section> = HashMap::new();
    let mut curr_sect: Option<(String, Section)> = None;
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if r.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let text = String::from_utf8_lossy(strip_comment(&buf));
        trace!("Read line {}: {}", line_no, text.trim_end());
        let line = text.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            let name = section_name(line).ok_or_else(|| {
                warn!("Rejecting section header at line {}: {}", line_no, line);
                Error::InvalidSection { line: line_no }
            })?;
            debug!("Opened section [{}] at line {}", name, line_no);
            if let Some((prev, keys)) = curr_sect.replace((name, Section::default())) {
                close_section(&mut sections, prev, keys);
            }
            continue;
        }

        let (raw_key, raw_val) = line
            .split_once('=')
            .ok_or(Error::InvalidFormat { line: line_no })?;
        let (sect, keys) = curr_sect
            .as_mut()
            .ok_or(Error::KeyWithoutSection { line: line_no })?;
        let key = raw_key.trim().to_lowercase();
        if key.is_empty() {
            return Err(Error::EmptyKey { line: line_no });
        }

        if keys.insert(key.clone(), raw_val.trim().to_string()).is_some() {
            debug!("Key {} in [{}] overwritten at line {}", key, sect, line_no);
        }
    }

    if let Some((name, keys)) = curr_sect {
        close_section(&mut sections, name, keys);
    }
    debug!("Parsed {} lines into {} sections", line_no, sections.len());
    Ok(Document::new(sections))
}

/// Store a finished section, replacing any earlier one of the same name.
fn close_section(sections: &mut HashMap<String, Section>, name: String, keys: Section) {
    if sections.insert(name.clone(), keys).is_some() {
        warn!("Section [{}] redefined, discarding earlier keys", name);
    }
}

/// Everything before the first comment character. Both comment
/// characters are ASCII, so this is done before UTF-8 decoding.
fn strip_comment(line: &[u8]) -> &[u8] {
    match line.iter().position(|b| COMMENT_CHARS.contains(b)) {
        Some(n) => &line[..n],
        None => line,
    }
}

/// The lowercased name of a trimmed `[ name ]` header, or `None` if the
/// header is malformed or names nothing.
fn section_name(line: &str) -> Option<String> {
    if line.len() <= 2 || !line.ends_with(']') {
        return None;
    }
    let name = line[1..line.len() - 1].trim().to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
