//! Sentence-boundary-preserving truncation.

/// Default context budget in characters.
pub const DEFAULT_TRUNCATION_BUDGET: usize = 12_000;

/// Bound `text` to at most `max_chars` characters without splitting a
/// sentence.
///
/// Text within the budget is returned unchanged. Otherwise the prefix of
/// `max_chars` characters is cut back to its last period, keeping only
/// complete sentences. When the prefix contains no period at all the raw
/// prefix is returned; a mid-sentence cut is the only option left.
pub fn truncate_at_sentence(text: &str, max_chars: usize) -> &str {
    let cut = match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => byte_idx,
        None => return text,
    };

    let prefix = &text[..cut];
    match prefix.rfind('.') {
        Some(period) => &prefix[..=period],
        None => prefix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_at_sentence("Hello. World.", 100), "Hello. World.");
    }

    #[test]
    fn text_exactly_at_the_boundary_is_unchanged() {
        let text = "abcde";
        assert_eq!(truncate_at_sentence(text, 5), text);
    }

    #[test]
    fn cuts_back_to_the_last_period() {
        assert_eq!(truncate_at_sentence("A. B. C.", 5), "A. B.");
    }

    #[test]
    fn output_never_exceeds_the_budget() {
        let text = "one. two. three. four. five. six.";
        for max in 0..text.len() + 4 {
            let out = truncate_at_sentence(text, max);
            if text.chars().count() <= max {
                assert_eq!(out, text);
            } else {
                assert!(out.chars().count() <= max, "max={max} out={out:?}");
            }
        }
    }

    #[test]
    fn no_period_falls_back_to_the_raw_prefix() {
        assert_eq!(truncate_at_sentence("NoPeriodsHereAtAll", 5), "NoPer");
    }

    #[test]
    fn only_period_is_the_final_character() {
        // Period sits beyond the prefix, so the raw prefix is used.
        assert_eq!(truncate_at_sentence("abcdefgh.", 5), "abcde");
    }

    #[test]
    fn period_at_the_end_of_the_prefix_is_kept() {
        assert_eq!(truncate_at_sentence("abcd.xyzw", 5), "abcd.");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(truncate_at_sentence("", 10), "");
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let text = "héllo wörld and then some more text without any stop";
        let out = truncate_at_sentence(text, 10);
        assert_eq!(out.chars().count(), 10);
    }
}
