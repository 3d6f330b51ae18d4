//! Rich-text draft tool: a textarea with formatting buttons whose content is
//! kept in browser local storage.

pub mod toolbar;

pub use toolbar::RichTextEditor;

const DRAFT_KEY_PREFIX: &str = "rich_text_draft:";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn draft_key(name: &str) -> String {
    format!("{}{}", DRAFT_KEY_PREFIX, name)
}

pub fn load_draft(name: &str) -> Option<String> {
    storage()?.get_item(&draft_key(name)).ok()?
}

pub fn save_draft(name: &str, content: &str) {
    if let Some(storage) = storage() {
        if let Err(e) = storage.set_item(&draft_key(name), content) {
            log::warn!("Cannot store draft `{}`: {:?}", name, e);
        }
    }
}

pub fn clear_draft(name: &str) {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(&draft_key(name));
    }
}

/// Byte offset of the UTF-16 offset `pos` (textarea selection units).
fn byte_offset(text: &str, pos: u32) -> usize {
    let mut units = 0u32;
    for (byte, ch) in text.char_indices() {
        if units >= pos {
            return byte;
        }
        units += ch.len_utf16() as u32;
    }
    text.len()
}

/// Wraps `text[start..end]` (UTF-16 offsets) in `open`/`close`. Returns the
/// new text and the UTF-16 range of the wrapped part.
pub fn wrap_selection(text: &str, start: u32, end: u32, open: &str, close: &str) -> (String, u32, u32) {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let (a, b) = (byte_offset(text, start), byte_offset(text, end));

    let mut out = String::with_capacity(text.len() + open.len() + close.len());
    out.push_str(&text[..a]);
    out.push_str(open);
    out.push_str(&text[a..b]);
    out.push_str(close);
    out.push_str(&text[b..]);

    let shift = open.encode_utf16().count() as u32;
    let inner = text[a..b].encode_utf16().count() as u32;
    let new_start = text[..a].encode_utf16().count() as u32 + shift;
    (out, new_start, new_start + inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_ascii() {
        let (text, s, e) = wrap_selection("hello world", 6, 11, "<strong>", "</strong>");
        assert_eq!(text, "hello <strong>world</strong>");
        assert_eq!((s, e), (14, 19));
    }

    #[test]
    fn test_wrap_empty_selection_inserts_tags() {
        let (text, s, e) = wrap_selection("ab", 1, 1, "<em>", "</em>");
        assert_eq!(text, "a<em></em>b");
        assert_eq!(s, e);
    }

    #[test]
    fn test_wrap_counts_utf16_units() {
        // "é" is one UTF-16 unit, "𝄞" is two
        let (text, _, _) = wrap_selection("é𝄞x", 1, 3, "[", "]");
        assert_eq!(text, "é[𝄞]x");
        let (text, _, _) = wrap_selection("é𝄞x", 3, 1, "[", "]");
        assert_eq!(text, "é[𝄞]x");
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let (text, _, _) = wrap_selection("abc", 2, 99, "<", ">");
        assert_eq!(text, "ab<c>");
    }
}
