//! Rule-based sentence segmentation.
//!
//! A sentence ends at a run of terminators (`.`, `!`, `?`, `…`) optionally
//! followed by closing quotes or brackets, when the run is followed by
//! whitespace and the next word does not start in lowercase. A period after a
//! known abbreviation or a single-letter initial does not end a sentence. A
//! blank line always does.

use crate::lexicon;

/// Split `text` into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    sentence_spans(text)
        .into_iter()
        .map(|(start, end)| text[start..end].to_string())
        .collect()
}

/// Byte spans of the sentences in `text`, trimmed of surrounding whitespace.
pub fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];

        if is_terminator(c) {
            let mut j = i + 1;
            while j < chars.len() && (is_terminator(chars[j].1) || is_closer(chars[j].1)) {
                j += 1;
            }
            let end = chars.get(j).map_or(text.len(), |&(p, _)| p);

            let boundary = match chars.get(j) {
                None => true,
                Some(&(_, next)) if next.is_whitespace() => {
                    !(c == '.' && j == i + 1 && ends_with_abbreviation(&text[start..pos]))
                        && !next_word_is_lowercase(&chars[j..])
                }
                Some(_) => false,
            };

            if boundary {
                push_span(text, start, end, &mut spans);
                start = end;
            }
            i = j;
            continue;
        }

        if c == '\n' {
            if let Some(after) = blank_line_end(&chars, i) {
                push_span(text, start, pos, &mut spans);
                start = chars.get(after).map_or(text.len(), |&(p, _)| p);
                i = after;
                continue;
            }
        }

        i += 1;
    }

    push_span(text, start, text.len(), &mut spans);
    spans
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '”' | '’' | '»')
}

/// `true` when the last word before a period is an abbreviation or initial.
fn ends_with_abbreviation(before: &str) -> bool {
    let Some(word) = before.split_whitespace().last() else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        return false;
    }

    let mut letters = word.chars();
    let single_initial = matches!(
        (letters.next(), letters.next()),
        (Some(first), None) if first.is_alphabetic() && first.is_uppercase()
    );

    single_initial || lexicon::is_abbreviation(&word.to_lowercase())
}

fn next_word_is_lowercase(rest: &[(usize, char)]) -> bool {
    rest.iter()
        .map(|&(_, c)| c)
        .find(|c| !c.is_whitespace())
        .is_some_and(char::is_lowercase)
}

/// If a blank line starts at the newline at `i`, the index just past it.
fn blank_line_end(chars: &[(usize, char)], i: usize) -> Option<usize> {
    let mut j = i + 1;
    while j < chars.len() && matches!(chars[j].1, ' ' | '\t' | '\r') {
        j += 1;
    }
    if chars.get(j).map(|&(_, c)| c) != Some('\n') {
        return None;
    }
    while j < chars.len() && chars[j].1.is_whitespace() {
        j += 1;
    }
    Some(j)
}

fn push_span(text: &str, start: usize, end: usize, spans: &mut Vec<(usize, usize)>) {
    let slice = &text[start..end];
    let trimmed_start = start + (slice.len() - slice.trim_start().len());
    let trimmed_end = start + slice.trim_end().len();
    if trimmed_start < trimmed_end {
        spans.push((trimmed_start, trimmed_end));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_simple_sentences() {
        assert_eq!(
            split_sentences("Hello world. Bye."),
            vec!["Hello world.", "Bye."]
        );
    }

    #[test]
    fn keeps_question_and_exclamation_runs() {
        assert_eq!(
            split_sentences("Really?! Yes. Wow!!! Done"),
            vec!["Really?!", "Yes.", "Wow!!!", "Done"]
        );
    }

    #[test]
    fn abbreviations_do_not_end_sentences() {
        assert_eq!(
            split_sentences("Mr. Smith met Dr. Jones at 5 p.m. today. They left."),
            vec!["Mr. Smith met Dr. Jones at 5 p.m. today.", "They left."]
        );
    }

    #[test]
    fn initials_do_not_end_sentences() {
        assert_eq!(
            split_sentences("J. R. R. Tolkien wrote it. It sold."),
            vec!["J. R. R. Tolkien wrote it.", "It sold."]
        );
    }

    #[test]
    fn lowercase_continuation_is_not_a_boundary() {
        assert_eq!(
            split_sentences("The value is approx. ten units."),
            vec!["The value is approx. ten units."]
        );
    }

    #[test]
    fn closing_quote_stays_with_its_sentence() {
        assert_eq!(
            split_sentences("She said \"Stop.\" Then she left."),
            vec!["She said \"Stop.\"", "Then she left."]
        );
    }

    #[test]
    fn decimals_are_not_boundaries() {
        assert_eq!(
            split_sentences("Pi is 3.14 roughly. Yes."),
            vec!["Pi is 3.14 roughly.", "Yes."]
        );
    }

    #[test]
    fn blank_line_ends_a_sentence() {
        assert_eq!(
            split_sentences("A heading\n\nBody text here"),
            vec!["A heading", "Body text here"]
        );
    }

    #[test]
    fn whitespace_only_input_has_no_sentences() {
        assert!(split_sentences("   \n\t ").is_empty());
    }

    proptest! {
        #[test]
        fn sentences_cover_all_non_whitespace(text in "[A-Za-z .!?\n]{0,120}") {
            let joined: String = split_sentences(&text).concat();
            let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            let actual: String = joined.chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn spans_are_ordered_and_non_empty(text in "\\PC{0,80}") {
            let spans = sentence_spans(&text);
            let mut last_end = 0;
            for (start, end) in spans {
                prop_assert!(start < end);
                prop_assert!(start >= last_end);
                prop_assert!(end <= text.len());
                last_end = end;
            }
        }
    }
}
