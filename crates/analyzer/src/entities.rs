//! Named-entity spans over tagged tokens.
//!
//! Recognised labels: `PERSON`, `ORG`, `GPE`, `DATE`, `MONEY`, `PERCENT`
//! and `CARDINAL`. Spans never cross a sentence boundary because the caller
//! passes one sentence at a time.

use lexa_core::analyzer::{Entity, Token};
use lexa_core::pos::PosTag;

use crate::lexicon;

pub const PERSON: &str = "PERSON";
pub const ORG: &str = "ORG";
pub const GPE: &str = "GPE";
pub const DATE: &str = "DATE";
pub const MONEY: &str = "MONEY";
pub const PERCENT: &str = "PERCENT";
pub const CARDINAL: &str = "CARDINAL";

/// Extract entities from the tagged tokens of one sentence of `text`.
pub fn extract_entities(text: &str, tokens: &[Token]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let lower = token.text.to_lowercase();

        let consumed = if is_capitalized(&token.text)
            && (lexicon::is_month(&lower) || lexicon::is_weekday(&lower))
        {
            date_span(text, tokens, i, &mut entities)
        } else if token.pos == PosTag::Num {
            number_span(text, tokens, i, &mut entities)
        } else if token.pos == PosTag::Propn {
            name_span(text, tokens, i, &mut entities)
        } else {
            1
        };
        i += consumed.max(1);
    }

    entities
}

/// `May 5, 2024`, `June 2020`, `Friday`.
fn date_span(text: &str, tokens: &[Token], start: usize, out: &mut Vec<Entity>) -> usize {
    let mut end = start + 1;
    if tokens.get(end).is_some_and(|t| t.pos == PosTag::Num) {
        end += 1;
        if tokens.get(end).is_some_and(|t| t.text == ",")
            && tokens.get(end + 1).is_some_and(|t| t.pos == PosTag::Num)
        {
            end += 2;
        }
    }
    out.push(entity(text, &tokens[start..end], DATE));
    end - start
}

/// Runs of numbers, labelled by the symbol or word around them.
fn number_span(text: &str, tokens: &[Token], start: usize, out: &mut Vec<Entity>) -> usize {
    let mut end = start + 1;
    while tokens.get(end).is_some_and(|t| t.pos == PosTag::Num) {
        end += 1;
    }

    let prev_is_currency = start > 0 && lexicon::is_currency_symbol(&tokens[start - 1].text);
    let next = tokens.get(end).map(|t| t.text.to_lowercase());

    let (first, label) = if prev_is_currency {
        (start - 1, MONEY)
    } else if matches!(next.as_deref(), Some("%") | Some("percent")) {
        end += 1;
        (start, PERCENT)
    } else if end - start == 1 && is_year(&tokens[start].text) {
        (start, DATE)
    } else {
        (start, CARDINAL)
    };

    out.push(entity(text, &tokens[first..end], label));
    end - start
}

/// Runs of proper nouns, optionally joined by `of`/`&` and led by a title.
fn name_span(text: &str, tokens: &[Token], start: usize, out: &mut Vec<Entity>) -> usize {
    let mut end = start + 1;
    loop {
        match tokens.get(end) {
            Some(t) if t.pos == PosTag::Propn => end += 1,
            // "Dr." keeps its period inside the run.
            Some(t)
                if t.text == "."
                    && t.start == tokens[end - 1].end
                    && lexicon::is_title(&tokens[end - 1].text.to_lowercase()) =>
            {
                end += 1
            }
            Some(t)
                if (t.text == "of" || t.text == "&")
                    && tokens.get(end + 1).is_some_and(|n| n.pos == PosTag::Propn) =>
            {
                end += 2
            }
            _ => break,
        }
    }

    let run = &tokens[start..end];
    let first_lower = run[0].text.to_lowercase();

    if lexicon::is_title(&first_lower) {
        let name_start = run
            .iter()
            .position(|t| t.pos == PosTag::Propn && !lexicon::is_title(&t.text.to_lowercase()));
        if let Some(offset) = name_start {
            out.push(entity(text, &run[offset..], PERSON));
        }
        return end - start;
    }

    let names: Vec<String> = run
        .iter()
        .filter(|t| t.pos == PosTag::Propn)
        .map(|t| t.text.to_lowercase())
        .collect();
    let prev_lower = start.checked_sub(1).map(|p| tokens[p].text.to_lowercase());
    let after_locative = prev_lower
        .as_deref()
        .is_some_and(lexicon::is_locative_preposition);

    let label = if names.iter().any(|n| lexicon::is_org_keyword(n))
        || (run.len() == 1 && is_acronym(&run[0].text))
    {
        ORG
    } else if names.last().is_some_and(|n| lexicon::is_place(n))
        || (run.len() == 1 && after_locative)
    {
        GPE
    } else {
        PERSON
    };

    out.push(entity(text, run, label));
    end - start
}

fn entity(text: &str, run: &[Token], label: &str) -> Entity {
    let start = run[0].start;
    let end = run[run.len() - 1].end;
    Entity {
        text: text[start..end].to_string(),
        label: label.to_string(),
    }
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() > 1 && word.chars().all(|c| c.is_uppercase())
}

fn is_year(word: &str) -> bool {
    word.len() == 4 && word.parse::<u16>().is_ok_and(|y| (1000..=2100).contains(&y))
}
