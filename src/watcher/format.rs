//! Announcement text.
//!
//! Each batch is one message: a header line followed by one line per row.

use crate::types::DateRange;

pub const FEATURE_REQUESTED_HEADER: &str = "기능 요청이 들어왔습니다 ✨";
pub const FEATURE_COMPLETED_HEADER: &str = "기능이 추가됐습니다 ✅";
pub const BOARD_NOTICE: &str = "게시판에 새로운 글이 올라왔습니다.";
pub const SCHEDULE_HEADER: &str = "새 일정이 등록되었습니다 📅";

pub const NO_CONTENT: &str = "(내용 없음)";
pub const NO_DESCRIPTION: &str = "(설명 없음)";
pub const NO_TAGS: &str = "(태그 없음)";

/// `- content — description`, with placeholders for empty fields.
pub fn feature_line(content: &str, description: &str) -> String {
    format!(
        "- {} — {}",
        or_placeholder(content, NO_CONTENT),
        or_placeholder(description, NO_DESCRIPTION)
    )
}

/// `- tag, tag — date`; the date part is omitted when the row has none.
pub fn schedule_line(tags: &[String], date: Option<&DateRange>) -> String {
    let tags = if tags.is_empty() {
        NO_TAGS.to_string()
    } else {
        tags.join(", ")
    };
    match date.map(DateRange::display) {
        Some(date) if !date.is_empty() => format!("- {tags} — {date}"),
        _ => format!("- {tags}"),
    }
}

/// Header plus lines, or nothing when there are no lines.
pub fn batch(header: &str, lines: &[String]) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    let mut text = String::from(header);
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }
    Some(text)
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
