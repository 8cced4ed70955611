//! Closed lexical sets and morphological feature tables.
//!
//! Everything here is a fixed table: pronoun inventories with their
//! number/person/gender/animacy features, determiner lists per NP subtype,
//! and the default biomedical hypernym and coercion tables consulted by the
//! zero-article recognizer and the coercion scoring function. Tables are
//! built once and shared; per-configuration overrides live in [`Lexicon`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Morphological features
// =============================================================================

/// Grammatical number, with a wildcard for unknowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Number {
    /// Singular
    Singular,
    /// Plural
    Plural,
    /// Unknown/underspecified; compatible with anything
    Either,
}

/// Grammatical gender, with a wildcard for unknowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Masculine
    Masculine,
    /// Feminine
    Feminine,
    /// Neuter
    Neuter,
    /// Unknown/underspecified; compatible with anything
    Either,
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    /// First person
    First,
    /// Second person
    Second,
    /// Third person
    Third,
}

/// Animacy, with a wildcard for unknowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Animacy {
    /// Animate
    Animate,
    /// Inanimate
    Inanimate,
    /// Unknown/underspecified; compatible with anything
    Either,
}

/// Wildcard-aware compatibility between two feature values.
macro_rules! impl_compatible {
    ($ty:ident) => {
        impl $ty {
            /// Two values agree when equal or when either is the wildcard.
            #[must_use]
            pub fn compatible(self, other: Self) -> bool {
                self == other || self == $ty::Either || other == $ty::Either
            }
        }
    };
}

impl_compatible!(Number);
impl_compatible!(Gender);
impl_compatible!(Animacy);

impl Person {
    /// Person has no wildcard; agreement is plain equality.
    #[must_use]
    pub fn compatible(self, other: Self) -> bool {
        self == other
    }
}

// =============================================================================
// Pronoun inventory
// =============================================================================

/// Feature bundle for one pronoun lemma.
#[derive(Debug, Clone, Copy)]
pub struct PronounEntry {
    /// Number
    pub number: Number,
    /// Person
    pub person: Person,
    /// Gender
    pub gender: Gender,
    /// Animacy
    pub animacy: Animacy,
    /// Reflexive form (himself, itself, themselves)
    pub reflexive: bool,
}

const fn entry(
    number: Number,
    person: Person,
    gender: Gender,
    animacy: Animacy,
    reflexive: bool,
) -> PronounEntry {
    PronounEntry {
        number,
        person,
        gender,
        animacy,
        reflexive,
    }
}

/// Personal and possessive pronoun features, keyed by lowercase lemma.
static PRONOUN_FEATURES: Lazy<HashMap<&'static str, PronounEntry>> = Lazy::new(|| {
    use Animacy::*;
    use Gender::*;
    use Number::*;
    use Person::*;
    let mut m = HashMap::new();
    // First/second person
    for lemma in ["i", "me", "my", "mine"] {
        m.insert(lemma, entry(Singular, First, Gender::Either, Animate, false));
    }
    m.insert("myself", entry(Singular, First, Gender::Either, Animate, true));
    for lemma in ["we", "us", "our", "ours"] {
        m.insert(lemma, entry(Plural, First, Gender::Either, Animate, false));
    }
    m.insert("ourselves", entry(Plural, First, Gender::Either, Animate, true));
    for lemma in ["you", "your", "yours"] {
        m.insert(lemma, entry(Number::Either, Second, Gender::Either, Animate, false));
    }
    m.insert("yourself", entry(Singular, Second, Gender::Either, Animate, true));
    m.insert("yourselves", entry(Plural, Second, Gender::Either, Animate, true));
    // Third person
    for lemma in ["he", "him", "his"] {
        m.insert(lemma, entry(Singular, Third, Masculine, Animate, false));
    }
    m.insert("himself", entry(Singular, Third, Masculine, Animate, true));
    for lemma in ["she", "her", "hers"] {
        m.insert(lemma, entry(Singular, Third, Feminine, Animate, false));
    }
    m.insert("herself", entry(Singular, Third, Feminine, Animate, true));
    for lemma in ["it", "its"] {
        m.insert(lemma, entry(Singular, Third, Neuter, Inanimate, false));
    }
    m.insert("itself", entry(Singular, Third, Neuter, Inanimate, true));
    for lemma in ["they", "them", "their", "theirs"] {
        m.insert(lemma, entry(Plural, Third, Gender::Either, Animacy::Either, false));
    }
    for lemma in ["themselves", "themself"] {
        m.insert(lemma, entry(Plural, Third, Gender::Either, Animacy::Either, true));
    }
    m
});

/// Feature bundle for a pronoun lemma, if it is one.
#[must_use]
pub fn pronoun_features(lemma: &str) -> Option<&'static PronounEntry> {
    PRONOUN_FEATURES.get(lemma.to_ascii_lowercase().as_str())
}

/// Is the lemma a reflexive pronoun?
#[must_use]
pub fn is_reflexive(lemma: &str) -> bool {
    pronoun_features(lemma).is_some_and(|e| e.reflexive)
}

/// Personal pronouns (subject/object forms).
pub static PERSONAL_PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "we", "us", "you", "he", "him", "she", "her", "it", "they", "them", "myself",
        "ourselves", "yourself", "yourselves", "himself", "herself", "itself", "themselves",
        "themself",
    ]
    .into_iter()
    .collect()
});

/// Possessive pronouns and determiners.
pub static POSSESSIVE_PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["my", "mine", "our", "ours", "your", "yours", "his", "her", "hers", "its", "their", "theirs"]
        .into_iter()
        .collect()
});

/// Demonstrative pronouns.
pub static DEMONSTRATIVE_PRONOUNS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["this", "that", "these", "those"].into_iter().collect());

/// Distributive pronouns.
pub static DISTRIBUTIVE_PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["each", "either", "neither", "both", "all", "none"].into_iter().collect()
});

/// Reciprocal pronouns (multi-word lemmas).
pub static RECIPROCAL_PRONOUNS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["each other", "one another"].into_iter().collect());

/// Relative pronouns.
pub static RELATIVE_PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["who", "whom", "whose", "which", "that", "where", "when", "why", "how", "what"]
        .into_iter()
        .collect()
});

/// Relative lemmas that never corefer with a nominal antecedent.
pub static NONREFERENTIAL_RELATIVES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["when", "why", "how", "what"].into_iter().collect());

/// Indefinite pronouns.
pub static INDEFINITE_PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "one", "some", "any", "someone", "anyone", "something", "anything", "somebody",
        "anybody", "other", "others", "another",
    ]
    .into_iter()
    .collect()
});

// =============================================================================
// Determiner and adjective lists
// =============================================================================

/// The definite article.
pub static DEFINITE_DETERMINERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["the"].into_iter().collect());

/// Indefinite articles and determiners.
pub static INDEFINITE_DETERMINERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["a", "an", "some", "another"].into_iter().collect());

/// Demonstrative determiners.
pub static DEMONSTRATIVE_DETERMINERS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["this", "that", "these", "those"].into_iter().collect());

/// Distributive determiners.
pub static DISTRIBUTIVE_DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["each", "every", "either", "neither", "both", "all", "most"].into_iter().collect()
});

/// Union of every determiner list; consulted by the zero-article test.
pub static ALL_DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    DEFINITE_DETERMINERS
        .iter()
        .chain(INDEFINITE_DETERMINERS.iter())
        .chain(DEMONSTRATIVE_DETERMINERS.iter())
        .chain(DISTRIBUTIVE_DETERMINERS.iter())
        .copied()
        .collect()
});

/// Discourse-deictic adjectives that disqualify a zero-article reading.
pub static DISCOURSE_ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "such", "same", "above", "aforementioned", "previous", "following", "present",
        "current", "certain", "other", "former", "latter", "said",
    ]
    .into_iter()
    .collect()
});

// =============================================================================
// Domain tables
// =============================================================================

/// Default hypernym lemmas licensing a zero-article coreferential NP in
/// biomedical prose ("protein", "drug", "patients", ...).
pub static ZERO_ARTICLE_HYPERNYMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "patient", "subject", "participant", "drug", "agent", "compound", "inhibitor",
        "protein", "gene", "enzyme", "receptor", "antibody", "cell", "tissue", "organism",
        "disease", "disorder", "syndrome", "infection", "lesion", "tumor", "treatment",
        "therapy", "procedure", "study", "trial", "dose", "injection", "infusion", "level",
        "concentration", "mutation", "variant",
    ]
    .into_iter()
    .collect()
});

/// Semantic types counted as animate.
pub static ANIMATE_SEM_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["Person", "PatientGroup", "Population", "Organization", "Animal", "Organism"]
        .into_iter()
        .collect()
});

fn default_coercion_pairs() -> HashMap<String, HashSet<String>> {
    let table: &[(&str, &[&str])] = &[
        ("patient", &["Person", "PatientGroup", "Population"]),
        ("subject", &["Person", "PatientGroup", "Population"]),
        ("drug", &["Drug", "Chemical", "Compound"]),
        ("agent", &["Drug", "Chemical", "Compound"]),
        ("compound", &["Drug", "Chemical", "Compound"]),
        ("protein", &["Protein", "Gene", "GeneProduct"]),
        ("gene", &["Gene", "Protein"]),
        ("enzyme", &["Protein", "Enzyme"]),
        ("disease", &["Disease", "Disorder", "Finding"]),
        ("disorder", &["Disease", "Disorder", "Finding"]),
        ("treatment", &["Drug", "Procedure", "Therapy"]),
        ("therapy", &["Drug", "Procedure", "Therapy"]),
    ];
    table
        .iter()
        .map(|(head, types)| {
            (
                (*head).to_string(),
                types.iter().map(|t| (*t).to_string()).collect(),
            )
        })
        .collect()
}

// =============================================================================
// Surface patterns
// =============================================================================

/// Pleonastic "it" surface pattern ("it is likely that ...", "it seems to ...").
pub static PLEONASTIC_IT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^it\s+(?:is|was|were|will\s+be|would\s+be|may\s+be|might\s+be|could\s+be|seems?|seemed|appears?|appeared)\b[^.;]*\b(?:that|to|whether|how)\b",
    )
    .expect("pleonastic pattern must compile")
});

/// Bare colon separating a label from its value ("Allergies: penicillin").
pub static KEY_VALUE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*:\s*$").expect("key-value pattern must compile"));

// =============================================================================
// Lexicon
// =============================================================================

/// Per-configuration lexical overrides.
///
/// The static tables above are the defaults; a configuration can swap the
/// hypernym list or the coercion table for a different corpus without
/// touching the closed pronoun/determiner inventories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    /// Hypernym lemmas licensing zero-article coreference
    pub hypernyms: HashSet<String>,
    /// Expression head lemma -> semantic types it may coerce to
    pub coercion_pairs: HashMap<String, HashSet<String>>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            hypernyms: ZERO_ARTICLE_HYPERNYMS.iter().map(|s| (*s).to_string()).collect(),
            coercion_pairs: default_coercion_pairs(),
        }
    }
}

impl Lexicon {
    /// Is the lemma a licensed zero-article hypernym?
    #[must_use]
    pub fn is_hypernym(&self, lemma: &str) -> bool {
        self.hypernyms.contains(&lemma.to_ascii_lowercase())
    }

    /// May an expression headed by `head` coerce to a candidate of semantic
    /// type `sem_type`?
    #[must_use]
    pub fn coerces(&self, head: &str, sem_type: &str) -> bool {
        self.coercion_pairs
            .get(&head.to_ascii_lowercase())
            .is_some_and(|types| types.contains(sem_type))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_compatibility() {
        assert!(Number::Singular.compatible(Number::Singular));
        assert!(!Number::Singular.compatible(Number::Plural));
        assert!(Number::Either.compatible(Number::Plural));
        assert!(Gender::Neuter.compatible(Gender::Either));
        assert!(!Gender::Masculine.compatible(Gender::Feminine));
        assert!(!Person::First.compatible(Person::Third));
        assert!(Animacy::Either.compatible(Animacy::Inanimate));
    }

    #[test]
    fn test_pronoun_features() {
        let it = pronoun_features("it").unwrap();
        assert_eq!(it.number, Number::Singular);
        assert_eq!(it.person, Person::Third);
        assert_eq!(it.gender, Gender::Neuter);
        assert_eq!(it.animacy, Animacy::Inanimate);
        assert!(!it.reflexive);

        let they = pronoun_features("They").unwrap();
        assert_eq!(they.number, Number::Plural);
        assert_eq!(they.gender, Gender::Either);

        assert!(pronoun_features("protein").is_none());
    }

    #[test]
    fn test_reflexives() {
        assert!(is_reflexive("itself"));
        assert!(is_reflexive("themselves"));
        assert!(!is_reflexive("it"));
        assert!(!is_reflexive("aspirin"));
    }

    #[test]
    fn test_closed_lists() {
        assert!(DEMONSTRATIVE_PRONOUNS.contains("those"));
        assert!(NONREFERENTIAL_RELATIVES.contains("why"));
        assert!(!NONREFERENTIAL_RELATIVES.contains("which"));
        assert!(ALL_DETERMINERS.contains("the"));
        assert!(ALL_DETERMINERS.contains("every"));
        assert!(DISCOURSE_ADJECTIVES.contains("aforementioned"));
    }

    #[test]
    fn test_pleonastic_pattern() {
        assert!(PLEONASTIC_IT.is_match("It is likely that the dose was too low"));
        assert!(PLEONASTIC_IT.is_match("it seems to inhibit the receptor"));
        assert!(!PLEONASTIC_IT.is_match("It inhibits the receptor"));
    }

    #[test]
    fn test_default_lexicon() {
        let lex = Lexicon::default();
        assert!(lex.is_hypernym("protein"));
        assert!(lex.is_hypernym("Patient"));
        assert!(!lex.is_hypernym("banana"));
        assert!(lex.coerces("drug", "Chemical"));
        assert!(!lex.coerces("drug", "Disease"));
        assert!(!lex.coerces("banana", "Chemical"));
    }
}
