//! Internal-consistency rules — the definition does not contradict
//! itself or its declared ontological category.

use std::sync::OnceLock;

use regex::Regex;

use toets_core::types::{OntologicalCategory, TextSpan};

use super::text::{find_phrase, phrase_matcher, Word};
use super::{Rule, RuleCheck, RuleInput, ViolationDraft};

/// Quantifier pairs that cannot both be meant.
const CONTRADICTING_PAIRS: [(&str, &str); 5] = [
    ("altijd", "behalve"),
    ("altijd", "tenzij"),
    ("nooit", "soms"),
    ("alle", "sommige"),
    ("uitsluitend", "ook"),
];

/// Past-tense and future auxiliaries that break present-tense phrasing.
const NON_PRESENT_TENSE: [&str; 8] = [
    "was", "waren", "werd", "werden", "zou", "zouden", "zal", "zullen",
];

pub struct GeenTegenstrijdigeKwantoren;

impl Rule for GeenTegenstrijdigeKwantoren {
    fn id(&self) -> &'static str { "CON-01" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let has = |needle: &str| input.view.words.iter().any(|w| w.lower == needle);
        for (a, b) in CONTRADICTING_PAIRS {
            if has(a) && has(b) {
                return RuleCheck::fail(
                    ViolationDraft::new(
                        "tegenstrijdige-kwantoren",
                        format!("'{a}' en '{b}' in dezelfde definitie spreken elkaar tegen."),
                    )
                    .suggest("Kies één kwantor of herformuleer de uitzondering expliciet."),
                );
            }
        }
        RuleCheck::pass()
    }
}

pub struct GetalCongruentie;

impl Rule for GetalCongruentie {
    fn id(&self) -> &'static str { "CON-02" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"^\s*(?:een|het)\s+\S+\s+zijn\b").expect("static regex compiles")
        });
        if re.is_match(&input.view.lower) {
            RuleCheck::fail(
                ViolationDraft::new(
                    "getal-incongruent",
                    "Enkelvoudig lidwoord met meervoudig koppelwerkwoord ('een ... zijn').",
                )
                .suggest("Gebruik 'is' bij een enkelvoudige term."),
            )
        } else {
            RuleCheck::pass()
        }
    }
}

pub struct TegenwoordigeTijd;

impl Rule for TegenwoordigeTijd {
    fn id(&self) -> &'static str { "CON-03" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        match input
            .view
            .words
            .iter()
            .find(|w| NON_PRESENT_TENSE.contains(&w.lower.as_str()))
        {
            Some(w) => RuleCheck::fail(
                ViolationDraft::new(
                    "niet-tegenwoordige-tijd",
                    format!(
                        "'{}' haalt de definitie uit de tegenwoordige tijd.",
                        &input.view.raw[w.start..w.end]
                    ),
                )
                .at(w.span()),
            ),
            None => RuleCheck::pass(),
        }
    }
}

pub struct StabielPerspectief;

impl Rule for StabielPerspectief {
    fn id(&self) -> &'static str { "CON-04" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let groups: [&[&str]; 3] = [&["u", "uw"], &["je", "jij", "jou", "jouw"], &["men"]];
        let present = groups
            .iter()
            .filter(|group| {
                input
                    .view
                    .words
                    .iter()
                    .any(|w| group.contains(&w.lower.as_str()))
            })
            .count();
        if present >= 2 {
            RuleCheck::fail(
                ViolationDraft::new(
                    "wisselend-perspectief",
                    "De definitie wisselt tussen aanspreekvormen (u, je, men).",
                )
                .suggest("Schrijf de definitie onpersoonlijk."),
            )
        } else {
            RuleCheck::pass()
        }
    }
}

pub struct GeenIsWanneer;

impl Rule for GeenIsWanneer {
    fn id(&self) -> &'static str { "CON-05" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<aho_corasick::AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&["is wanneer", "is als", "zijn wanneer", "zijn als"])
        });
        match find_phrase(&input.view.lower, ac) {
            Some((start, end, _)) => RuleCheck::fail(
                ViolationDraft::new(
                    "is-wanneer",
                    "Een begrip is geen moment of voorwaarde; 'is wanneer' en 'is als' definiëren niet.",
                )
                .at(TextSpan::new(start, end))
                .suggest("Benoem een genus: 'is een <genus> die ...'."),
            ),
            None => RuleCheck::pass(),
        }
    }
}

pub struct GeenDubbeleOntkenning;

/// `on-` words that are not negations.
const ON_EXCEPTIONS: [&str; 4] = ["onder", "ondanks", "ons", "onze"];

impl Rule for GeenDubbeleOntkenning {
    fn id(&self) -> &'static str { "CON-06" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let words = &input.view.words;
        for (i, w) in words.iter().enumerate() {
            if w.lower != "niet" && w.lower != "geen" {
                continue;
            }
            let window = words.get(i + 1..(i + 3).min(words.len())).unwrap_or(&[]);
            if let Some(neg) = window.iter().find(|n| {
                n.lower.starts_with("on")
                    && n.lower.chars().count() > 4
                    && !ON_EXCEPTIONS.contains(&n.lower.as_str())
            }) {
                return RuleCheck::fail(
                    ViolationDraft::new(
                        "dubbele-ontkenning",
                        format!(
                            "'{} {}' is een dubbele ontkenning.",
                            w.lower,
                            &input.view.raw[neg.start..neg.end]
                        ),
                    )
                    .at(TextSpan::new(w.start, neg.end))
                    .suggest("Formuleer bevestigend."),
                );
            }
        }
        RuleCheck::pass()
    }
}

pub struct CategorieCongruentie;

/// Genus words that contradict a declared ontological category.
fn contradicting_genus(category: OntologicalCategory) -> &'static [&'static str] {
    match category {
        OntologicalCategory::Proces => &["voorwerp", "object", "document", "akte", "persoon"],
        OntologicalCategory::Resultaat => &["proces", "procedure", "handeling"],
        OntologicalCategory::Type => &["exemplaar"],
        OntologicalCategory::Exemplaar => &["soort", "type", "categorie", "klasse"],
    }
}

impl Rule for CategorieCongruentie {
    fn id(&self) -> &'static str { "CON-07" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        // Applicability guarantees a category, but a rule never panics
        // on its own input.
        let category = match input.category {
            Some(c) => c,
            None => return RuleCheck::pass(),
        };
        let forbidden = contradicting_genus(category);
        let head_window: Vec<&Word> = input.view.definiens_words().iter().take(3).collect();
        if let Some(w) = head_window
            .iter()
            .find(|w| forbidden.contains(&w.lower.as_str()))
        {
            RuleCheck::fail(
                ViolationDraft::new(
                    "categorie-tegenspraak",
                    format!(
                        "Het genus '{}' past niet bij de ontologische categorie '{category}'.",
                        w.lower
                    ),
                )
                .at(w.span()),
            )
        } else {
            RuleCheck::pass()
        }
    }
}

pub struct AfkortingGeintroduceerd;

impl Rule for AfkortingGeintroduceerd {
    fn id(&self) -> &'static str { "CON-08" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"\b[A-Z]{2,5}\b").expect("static regex compiles")
        });
        let term_upper = input.term.to_uppercase();
        for m in re.find_iter(&input.view.raw) {
            let abbr = m.as_str();
            // The term itself may be an abbreviation.
            if term_upper.contains(abbr) {
                continue;
            }
            // Introduced form: "... (AVG) ..." after the expansion.
            if input.view.raw.contains(&format!("({abbr})")) {
                continue;
            }
            return RuleCheck::fail(
                ViolationDraft::new(
                    "afkorting-niet-geintroduceerd",
                    format!("De afkorting '{abbr}' wordt gebruikt zonder introductie."),
                )
                .at(TextSpan::new(m.start(), m.end()))
                .suggest(format!("Schrijf de afkorting eenmalig voluit, gevolgd door '({abbr})'.")),
            );
        }
        RuleCheck::pass()
    }
}

pub struct GeenZelfverwijzing;

impl Rule for GeenZelfverwijzing {
    fn id(&self) -> &'static str { "CON-09" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<aho_corasick::AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&[
                "deze definitie",
                "dit begrip",
                "deze omschrijving",
                "bovenstaande definitie",
            ])
        });
        match find_phrase(&input.view.lower, ac) {
            Some((start, end, _)) => RuleCheck::fail(
                ViolationDraft::new(
                    "zelfverwijzing",
                    "De definitie verwijst naar zichzelf.",
                )
                .at(TextSpan::new(start, end)),
            ),
            None => RuleCheck::pass(),
        }
    }
}

pub struct ConsistenteGetalnotatie;

impl Rule for ConsistenteGetalnotatie {
    fn id(&self) -> &'static str { "CON-10" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static COMMA: OnceLock<Regex> = OnceLock::new();
        static POINT: OnceLock<Regex> = OnceLock::new();
        let comma = COMMA.get_or_init(|| Regex::new(r"\d+,\d").expect("static regex compiles"));
        let point = POINT.get_or_init(|| Regex::new(r"\d+\.\d").expect("static regex compiles"));
        if comma.is_match(&input.view.raw) && point.is_match(&input.view.raw) {
            RuleCheck::fail(
                ViolationDraft::new(
                    "gemengde-getalnotatie",
                    "Komma- en puntdecimalen worden door elkaar gebruikt.",
                )
                .suggest("Gebruik de Nederlandse kommanotatie."),
            )
        } else {
            RuleCheck::pass()
        }
    }
}
