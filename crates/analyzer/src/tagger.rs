//! Tokenisation and coarse part-of-speech tagging.
//!
//! Tags come from, in order: character class (punctuation, symbols,
//! numbers), the closed-class lexicon, capitalisation, the open-class
//! lexicon, the previous token, and finally suffix rules. Anything left
//! over is a `NOUN`.

use std::sync::LazyLock;

use lexa_core::analyzer::Token;
use lexa_core::pos::PosTag;
use regex::Regex;

use crate::lexicon;

const TOKEN_PATTERN: &str = r"\d+(?:[.,:]\d+)*|\w+(?:[-'’]\w+)*|[^\w\s]";

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("valid regex"));

const CONTRACTION_SUFFIXES: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

const SYMBOL_CHARS: &str = "$€£¥%&+=<>#@©®°§~^*/\\|";

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];

/// A token before tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split `text[start..end]` into tokens with absolute byte offsets.
///
/// Negations and clitics are split off their host word, so `"don't"` yields
/// `do` + `n't` and `"cat's"` yields `cat` + `'s`.
pub fn tokenize(text: &str, start: usize, end: usize) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    for m in TOKEN_RE.find_iter(&text[start..end]) {
        let (s, e) = (start + m.start(), start + m.end());
        let word = &text[s..e];
        let split = clitic_split(word);
        if split > 0 && split < word.len() {
            tokens.push(RawToken {
                text: &text[s..s + split],
                start: s,
                end: s + split,
            });
            tokens.push(RawToken {
                text: &text[s + split..e],
                start: s + split,
                end: e,
            });
        } else {
            tokens.push(RawToken {
                text: word,
                start: s,
                end: e,
            });
        }
    }
    tokens
}

/// Byte index at which a trailing clitic starts, or 0 if there is none.
fn clitic_split(word: &str) -> usize {
    let normalized = word.replace('’', "'").to_lowercase();
    if normalized.len() != word.len() {
        return 0;
    }
    if normalized.ends_with("n't") && normalized.len() > 3 {
        return word.len() - 3;
    }
    CONTRACTION_SUFFIXES
        .iter()
        .find(|suffix| normalized.ends_with(*suffix) && normalized.len() > suffix.len())
        .map_or(0, |suffix| word.len() - suffix.len())
}

/// Tag the tokens of a single sentence.
pub fn tag_sentence(tokens: &[RawToken<'_>]) -> Vec<Token> {
    let mut tagged: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut first_word_seen = false;

    for (i, token) in tokens.iter().enumerate() {
        let is_word = token.text.chars().any(char::is_alphanumeric);
        let context = Context {
            sentence_initial: is_word && !first_word_seen,
            prev: tagged.last().map(|t| (t.text.to_lowercase(), t.pos)),
            next: tokens.get(i + 1).map(|t| t.text),
        };
        if is_word {
            first_word_seen = true;
        }

        tagged.push(Token {
            text: token.text.to_string(),
            pos: tag_token(token.text, &context),
            start: token.start,
            end: token.end,
        });
    }
    tagged
}

struct Context<'a> {
    sentence_initial: bool,
    prev: Option<(String, PosTag)>,
    next: Option<&'a str>,
}

fn tag_token(word: &str, context: &Context<'_>) -> PosTag {
    let Some(first) = word.chars().next() else {
        return PosTag::X;
    };

    if !word.chars().any(char::is_alphanumeric) {
        return if word.chars().all(|c| SYMBOL_CHARS.contains(c)) {
            PosTag::Sym
        } else {
            PosTag::Punct
        };
    }
    if first.is_ascii_digit() {
        return PosTag::Num;
    }

    let lower = word.replace('’', "'").to_lowercase();
    let next_lower = context.next.map(str::to_lowercase);

    if lower == "to" {
        return match next_lower.as_deref() {
            Some(next) if lexicon::is_known_verb(next) => PosTag::Part,
            _ => PosTag::Adp,
        };
    }
    if lower == "i" {
        return PosTag::Pron;
    }

    let capitalized = first.is_uppercase();
    let acronym = word.chars().count() > 1
        && word.chars().all(|c| c.is_uppercase() || c.is_ascii_digit());

    if capitalized && !context.sentence_initial && (lexicon::closed_class(&lower).is_none() || acronym)
    {
        return PosTag::Propn;
    }
    if let Some(tag) = lexicon::closed_class(&lower) {
        return tag;
    }
    if capitalized && context.sentence_initial && looks_like_name(&lower, context) {
        return PosTag::Propn;
    }
    if let Some(tag) = lexicon::open_class(&lower) {
        return tag;
    }

    if let Some((prev, prev_tag)) = &context.prev {
        if prev_tag == &PosTag::Part || lexicon::is_subject_pronoun(prev) {
            return PosTag::Verb;
        }
    }

    suffix_tag(&lower)
}

/// Whether a capitalised sentence-initial word unknown to the lexicon is a name.
fn looks_like_name(lower: &str, context: &Context<'_>) -> bool {
    if lexicon::is_place(lower)
        || lexicon::is_month(lower)
        || lexicon::is_weekday(lower)
        || lexicon::is_title(lower)
    {
        return true;
    }
    if lexicon::open_class(lower).is_some() {
        return false;
    }
    match context.next {
        Some(next) => {
            let next_lower = next.to_lowercase();
            next.chars().next().is_some_and(char::is_uppercase)
                || lexicon::is_known_verb(&next_lower)
                || matches!(
                    lexicon::closed_class(&next_lower),
                    Some(PosTag::Aux)
                )
        }
        None => false,
    }
}

fn suffix_tag(lower: &str) -> PosTag {
    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ly") {
        PosTag::Adv
    } else if (len > 5 && lower.ends_with("ing")) || (len > 4 && lower.ends_with("ed")) {
        PosTag::Verb
    } else if ADJECTIVE_SUFFIXES
        .iter()
        .any(|s| lower.ends_with(s) && len >= s.len() + 3)
    {
        PosTag::Adj
    } else {
        PosTag::Noun
    }
}
