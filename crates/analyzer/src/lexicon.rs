//! Word lists backing the rule-based analyzer.
//!
//! Lookups take lowercase words. Closed word classes are listed fully, open
//! classes only by their most frequent irregular members, with suffix rules
//! in [`crate::tagger`] covering the rest.

use lexa_core::pos::PosTag;

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e", "a.m",
    "p.m", "approx", "dept", "est", "fig", "inc", "ltd", "co", "corp", "no", "vol", "jan", "feb",
    "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k", "gen",
    "gov", "sen", "rep", "capt", "col", "lt", "sgt",
];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "another", "all", "both", "either", "neither", "my", "your", "his", "its", "our", "their",
    "whose", "which", "what",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "mine", "yours",
    "hers", "ours", "theirs", "who", "whom", "someone", "somebody", "something", "anyone",
    "anything", "everyone", "everything", "nobody", "nothing",
];

/// Pronouns that typically open a clause as its subject.
const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "from", "up", "down", "of", "off", "over",
    "under", "near", "across", "behind", "beyond", "without", "within", "among", "around",
    "toward", "towards", "upon", "via", "per", "like",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "so"];

const SUBORDINATORS: &[&str] = &[
    "because", "although", "though", "while", "if", "unless", "since", "whereas", "whether",
    "once", "until", "than",
];

const AUXILIARIES: &[&str] = &[
    "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "'s",
    "'re", "'ve", "'ll", "'d", "'m",
];

const PARTICLES: &[&str] = &["not", "n't", "'s"];

const INTERJECTIONS: &[&str] = &[
    "oh", "ah", "wow", "hey", "hello", "hi", "bye", "goodbye", "ouch", "oops", "yes", "no",
    "please", "thanks", "alas", "hmm", "uh", "um",
];

const VERBS: &[&str] = &[
    "sat", "sit", "sits", "ran", "run", "runs", "went", "go", "goes", "saw", "see", "sees",
    "ate", "eat", "eats", "came", "come", "comes", "took", "take", "takes", "made", "make",
    "makes", "said", "say", "says", "got", "get", "gets", "gave", "give", "gives", "found",
    "find", "finds", "thought", "think", "thinks", "told", "tell", "tells", "became", "become",
    "becomes", "left", "leave", "leaves", "felt", "feel", "feels", "brought", "bring", "brings",
    "began", "begin", "begins", "kept", "keep", "keeps", "held", "hold", "holds", "wrote",
    "write", "writes", "stood", "stand", "stands", "heard", "hear", "hears", "met", "meet",
    "meets", "paid", "pay", "pays", "sold", "sell", "sells", "bought", "buy", "buys", "built",
    "build", "builds", "lost", "lose", "loses", "knew", "know", "knows", "want", "wants", "like",
    "likes", "love", "loves", "live", "lives", "work", "works", "jumped", "jump", "jumps", "read",
    "reads", "fell", "fall", "falls", "flew", "fly", "flies", "won", "win", "wins", "let", "put",
    "set", "sent", "send", "sends", "spent", "spend", "spends", "grew", "grow", "grows", "drove",
    "drive", "drives", "spoke", "speak", "speaks", "sang", "sing", "sings", "slept", "sleep",
    "sleeps", "barked", "bark", "barks", "chased", "chase", "chases", "opened", "open", "opens",
];

const ADVERBS: &[&str] = &[
    "very", "too", "also", "just", "now", "then", "here", "there", "always", "never", "often",
    "sometimes", "soon", "already", "still", "again", "almost", "quite", "rather", "well",
    "away", "back", "today", "tomorrow", "yesterday", "tonight", "however", "perhaps", "maybe",
    "ever", "once", "twice", "even", "only", "really", "much", "more", "most", "less", "least",
    "fast", "hard", "late", "early", "where", "when", "why", "how",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "new", "old", "big", "small", "large", "little", "long", "short", "high",
    "low", "great", "young", "early", "important", "few", "public", "same", "able", "red",
    "blue", "green", "black", "white", "happy", "sad", "quick", "slow", "brown", "lazy", "hot",
    "cold", "nice", "fine", "best", "better", "worse", "worst", "other", "many", "several",
    "own", "free", "full", "easy", "hard", "real", "sure", "true", "whole", "clear", "late",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion", "trillion", "dozen",
];

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "dr", "prof", "sir", "madam", "lord", "lady", "president",
    "king", "queen", "captain", "general", "senator",
];

const ORG_KEYWORDS: &[&str] = &[
    "inc", "corp", "corporation", "ltd", "llc", "plc", "co", "company", "group", "bank",
    "university", "institute", "college", "foundation", "agency", "association", "committee",
    "council", "ministry", "department", "party", "club", "times", "news",
];

const PLACES: &[&str] = &[
    "london", "paris", "berlin", "madrid", "rome", "tokyo", "beijing", "moscow", "washington",
    "boston", "chicago", "seattle", "california", "texas", "florida", "york", "england",
    "france", "germany", "spain", "italy", "japan", "china", "russia", "india", "brazil",
    "canada", "mexico", "australia", "europe", "asia", "africa", "america", "ireland",
    "scotland", "wales", "portugal", "sweden", "norway",
];

/// Prepositions that usually introduce a location.
const LOCATIVE_PREPOSITIONS: &[&str] = &["in", "at", "from", "to", "near", "across"];

const CURRENCY_SYMBOLS: &[&str] = &["$", "€", "£", "¥"];

pub fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.contains(&word)
}

/// Closed-class tag for `word`, if it belongs to one of the closed classes.
///
/// Ambiguous words resolve to the class listed first: auxiliaries before
/// particles (`'s`), determiners before interjections (`no`).
pub fn closed_class(word: &str) -> Option<PosTag> {
    const TABLE: &[(&[&str], PosTag)] = &[
        (DETERMINERS, PosTag::Det),
        (PRONOUNS, PosTag::Pron),
        (AUXILIARIES, PosTag::Aux),
        (PARTICLES, PosTag::Part),
        (COORDINATORS, PosTag::Cconj),
        (SUBORDINATORS, PosTag::Sconj),
        (ADPOSITIONS, PosTag::Adp),
        (INTERJECTIONS, PosTag::Intj),
    ];
    TABLE
        .iter()
        .find(|(words, _)| words.contains(&word))
        .map(|&(_, tag)| tag)
}

/// Open-class tag for `word` when it is one of the listed irregular forms.
pub fn open_class(word: &str) -> Option<PosTag> {
    if VERBS.contains(&word) {
        Some(PosTag::Verb)
    } else if ADVERBS.contains(&word) {
        Some(PosTag::Adv)
    } else if ADJECTIVES.contains(&word) {
        Some(PosTag::Adj)
    } else if NUMBER_WORDS.contains(&word) {
        Some(PosTag::Num)
    } else {
        None
    }
}

pub fn is_known_verb(word: &str) -> bool {
    VERBS.contains(&word)
}

pub fn is_subject_pronoun(word: &str) -> bool {
    SUBJECT_PRONOUNS.contains(&word)
}

pub fn is_month(word: &str) -> bool {
    MONTHS.contains(&word)
}

pub fn is_weekday(word: &str) -> bool {
    WEEKDAYS.contains(&word)
}

pub fn is_title(word: &str) -> bool {
    TITLES.contains(&word)
}

/// Words that mark a name as an organisation wherever they appear in it.
pub fn is_org_keyword(word: &str) -> bool {
    ORG_KEYWORDS.contains(&word)
}

pub fn is_place(word: &str) -> bool {
    PLACES.contains(&word)
}

pub fn is_locative_preposition(word: &str) -> bool {
    LOCATIVE_PREPOSITIONS.contains(&word)
}

pub fn is_currency_symbol(token: &str) -> bool {
    CURRENCY_SYMBOLS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_class_resolves_common_words() {
        assert_eq!(closed_class("the"), Some(PosTag::Det));
        assert_eq!(closed_class("they"), Some(PosTag::Pron));
        assert_eq!(closed_class("with"), Some(PosTag::Adp));
        assert_eq!(closed_class("and"), Some(PosTag::Cconj));
        assert_eq!(closed_class("because"), Some(PosTag::Sconj));
        assert_eq!(closed_class("was"), Some(PosTag::Aux));
        assert_eq!(closed_class("cat"), None);
    }

    #[test]
    fn ambiguous_closed_class_words_take_first_listed_class() {
        assert_eq!(closed_class("'s"), Some(PosTag::Aux));
        assert_eq!(closed_class("no"), Some(PosTag::Det));
    }

    #[test]
    fn open_class_covers_irregular_verbs() {
        assert_eq!(open_class("sat"), Some(PosTag::Verb));
        assert_eq!(open_class("quickly"), None);
        assert_eq!(open_class("seven"), Some(PosTag::Num));
    }
}
