//! `SKILL.md` frontmatter splitting.

/// Split `---`-fenced YAML frontmatter from the markdown body.
///
/// Returns `None` when the document does not open with a fence or the fence
/// is never closed. The body has its leading blank lines removed.
#[must_use]
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let after_open = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))?;

    // An empty block closes immediately.
    if let Some(rest) = after_open.strip_prefix("---") {
        return Some(("", body_after_fence(rest)?));
    }

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            let yaml = &after_open[..offset];
            let rest = &after_open[offset + line.len()..];
            return Some((yaml, rest.trim_start_matches(['\n', '\r'])));
        }
        offset += line.len();
    }
    None
}

fn body_after_fence(rest: &str) -> Option<&str> {
    if rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n") {
        Some(rest.trim_start_matches(['\n', '\r']))
    } else {
        None
    }
}
