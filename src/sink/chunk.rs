//! Splitting long announcements to fit a per-message size limit.

/// Splits `text` into pieces of at most `limit` characters.
///
/// Pieces break on line boundaries; a line is only cut when it alone
/// exceeds the limit. Empty input yields no pieces.
pub fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.lines() {
        let line_len = line.chars().count();

        if line_len > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            chunks.extend(split_long_line(line, limit));
            continue;
        }

        let needed = if current.is_empty() {
            line_len
        } else {
            current_len + 1 + line_len
        };
        if needed > limit {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_long_line(line: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    chars.chunks(limit).map(|c| c.iter().collect()).collect()
}
