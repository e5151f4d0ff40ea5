//! Property tests for the encoding and text helpers.

#![allow(clippy::unwrap_used)]

use mailforge_mime::EOL;
use mailforge_mime::encoding::{
    BASE64_LINE_LENGTH, decode_base64, decode_word, encode_base64_wrapped, encode_word,
};
use mailforge_mime::text::{dot_stuff, word_wrap};
use proptest::prelude::*;

proptest! {
    #[test]
    fn encoded_word_round_trips(text in "\\PC*") {
        let word = encode_word(&text);
        prop_assert!(word.starts_with("=?UTF-8?B?"));
        prop_assert!(word.ends_with("?="));
        prop_assert_eq!(decode_word(&word).unwrap(), text);
    }

    #[test]
    fn wrapped_base64_lines_bounded(data in proptest::collection::vec(any::<u8>(), 0..600)) {
        let wrapped = encode_base64_wrapped(&data);
        let mut joined = String::new();
        for line in wrapped.split(EOL) {
            prop_assert!(line.len() <= BASE64_LINE_LENGTH);
            joined.push_str(line);
        }
        prop_assert_eq!(decode_base64(&joined).unwrap(), data);
    }

    #[test]
    fn wrap_only_replaces_spaces(text in "[a-z ]{0,200}", width in 1usize..40) {
        let wrapped = word_wrap(&text, width);
        prop_assert_eq!(wrapped.replace(EOL, " "), text);
    }

    #[test]
    fn wrap_is_deterministic(text in "[a-z .]{0,200}", width in 1usize..40) {
        prop_assert_eq!(word_wrap(&text, width), word_wrap(&text, width));
    }

    #[test]
    fn no_lone_dot_line_survives(lines in proptest::collection::vec("[.a-c]{0,3}", 0..10)) {
        let body = lines.join("\n");
        let stuffed = dot_stuff(&body);
        prop_assert!(stuffed.split('\n').all(|line| line != "."));
        prop_assert_eq!(stuffed.split('\n').count(), body.split('\n').count());
    }
}
