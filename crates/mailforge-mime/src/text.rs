//! Plain-text body helpers: line terminator, soft wrapping and dot-stuffing.

/// Line terminator used inside assembled header and body blocks.
///
/// Matches the host platform, like the local mail submission programs that
/// consume the rendered output.
pub const EOL: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Default soft-wrap column for plain-text bodies.
pub const DEFAULT_WRAP_COLUMN: usize = 78;

/// Soft-wraps `text` so that lines stay within `width` columns where possible.
///
/// Breaks are only inserted at spaces (the space is replaced by [`EOL`]);
/// a word longer than `width` is left intact on its own line. Existing
/// [`EOL`] sequences reset the column count. A `width` of zero is treated
/// as one.
#[must_use]
pub fn word_wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    let brk: Vec<char> = EOL.chars().collect();

    let mut out = String::with_capacity(text.len() + text.len() / width);
    let mut line_start = 0;
    let mut last_space = 0;
    let mut i = 0;

    while i < chars.len() {
        // Existing line break
        if chars[i..].starts_with(&brk) && i + brk.len() < chars.len() {
            out.extend(&chars[line_start..i + brk.len()]);
            i += brk.len();
            line_start = i;
            last_space = i;
            continue;
        }

        if chars[i] == ' ' {
            if i - line_start >= width {
                out.extend(&chars[line_start..i]);
                out.push_str(EOL);
                line_start = i + 1;
            }
            last_space = i;
        } else if i - line_start >= width && line_start < last_space {
            out.extend(&chars[line_start..last_space]);
            out.push_str(EOL);
            line_start = last_space + 1;
            last_space = line_start;
        }

        i += 1;
    }

    if line_start < chars.len() {
        out.extend(&chars[line_start..]);
    }

    out
}

/// Rewrites every line consisting of a lone `.` to `..`.
///
/// A lone dot terminates the message for SMTP-style transports. Lines are
/// split on `\n`; a trailing `\r` is preserved.
#[must_use]
pub fn dot_stuff(text: &str) -> String {
    text.split('\n')
        .map(|line| match line {
            "." => "..",
            ".\r" => "..\r",
            other => other,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_line_unchanged() {
        assert_eq!(word_wrap("Hello, World!", 78), "Hello, World!");
    }

    #[test]
    fn test_wrap_at_word_boundary() {
        let wrapped = word_wrap("The quick brown fox", 10);
        assert_eq!(wrapped, format!("The quick{EOL}brown fox"));
    }

    #[test]
    fn test_wrap_long_word_not_split() {
        let wrapped = word_wrap("aaaaaaaaaaaaaaa bb", 5);
        assert_eq!(wrapped, format!("aaaaaaaaaaaaaaa{EOL}bb"));
    }

    #[test]
    fn test_wrap_keeps_existing_breaks() {
        let text = format!("one two{EOL}three four");
        assert_eq!(word_wrap(&text, 78), text);
    }

    #[test]
    fn test_wrap_every_line_within_width() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua";
        let wrapped = word_wrap(text, 20);
        for line in wrapped.split(EOL) {
            assert!(line.chars().count() <= 20, "line too long: {line:?}");
        }
        assert_eq!(wrapped.replace(EOL, " "), text);
    }

    #[test]
    fn test_wrap_zero_width() {
        assert_eq!(word_wrap("a b", 0), format!("a{EOL}b"));
    }

    #[test]
    fn test_wrap_idempotent() {
        let text = "a fairly long sentence that will need wrapping at some point";
        assert_eq!(word_wrap(text, 12), word_wrap(text, 12));
    }

    #[test]
    fn test_dot_stuff_lone_dot() {
        assert_eq!(dot_stuff("a\n.\nb"), "a\n..\nb");
    }

    #[test]
    fn test_dot_stuff_edges() {
        assert_eq!(dot_stuff("."), "..");
        assert_eq!(dot_stuff("a\n."), "a\n..");
        assert_eq!(dot_stuff("a\r\n.\r\nb"), "a\r\n..\r\nb");
    }

    #[test]
    fn test_dot_stuff_leaves_other_dots() {
        assert_eq!(dot_stuff("a.\n.b\n..\n"), "a.\n.b\n..\n");
    }

    #[test]
    fn test_dot_stuff_once() {
        let once = dot_stuff("x\n.\ny");
        assert_eq!(dot_stuff(&once), once);
    }
}
