//! Forbidden-content rules — language that never belongs in a definition.

use std::sync::OnceLock;

use aho_corasick::AhoCorasick;
use regex::Regex;

use toets_core::types::TextSpan;

use super::text::{find_phrase, phrase_matcher};
use super::{Rule, RuleCheck, RuleInput, ViolationDraft};

/// A rule that fails on the first whole-word occurrence of any phrase.
/// Most forbidden-content rules reduce to this shape.
fn phrase_rule(
    input: &RuleInput<'_>,
    ac: &AhoCorasick,
    code: &'static str,
    describe: impl Fn(&str) -> String,
) -> RuleCheck {
    match find_phrase(&input.view.lower, ac) {
        Some((start, end, _)) => {
            // Offsets index the lowercased buffer; slice that one.
            let found = &input.view.lower[start..end];
            RuleCheck::fail(
                ViolationDraft::new(code, describe(found)).at(TextSpan::new(start, end)),
            )
        }
        None => RuleCheck::pass(),
    }
}

pub struct GeenNormatieveTaal;

impl Rule for GeenNormatieveTaal {
    fn id(&self) -> &'static str { "VER-01" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&[
                "moet", "moeten", "dient", "dienen", "verplicht", "behoort", "behoren",
                "mag niet", "mogen niet", "gehouden te",
            ])
        });
        phrase_rule(input, ac, "normatieve-taal", |found| {
            format!("'{found}' schrijft voor; een definitie beschrijft alleen.")
        })
    }
}

pub struct GeenSubjectieveKwalificaties;

impl Rule for GeenSubjectieveKwalificaties {
    fn id(&self) -> &'static str { "VER-02" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&[
                "goed", "goede", "mooi", "mooie", "belangrijk", "belangrijke",
                "redelijk", "redelijke", "wenselijk", "wenselijke", "passend", "passende",
            ])
        });
        phrase_rule(input, ac, "subjectieve-kwalificatie", |found| {
            format!("'{found}' is een subjectieve kwalificatie zonder criterium.")
        })
    }
}

pub struct GeenVageAfzwakkingen;

impl Rule for GeenVageAfzwakkingen {
    fn id(&self) -> &'static str { "VER-03" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&[
                "ongeveer", "meestal", "vaak", "doorgaans", "veelal", "wellicht",
                "circa", "min of meer", "in principe", "in de regel",
            ])
        });
        phrase_rule(input, ac, "vage-afzwakking", |found| {
            format!("'{found}' maakt de definitie vrijblijvend.")
        })
    }
}

pub struct GeenOpenEinde;

impl Rule for GeenOpenEinde {
    fn id(&self) -> &'static str { "VER-04" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&[
                "enzovoort", "enzovoorts", "etcetera", "etc", "e.d", "en dergelijke",
                "en zo verder",
            ])
        });
        phrase_rule(input, ac, "open-einde", |found| {
            format!("'{found}' laat de opsomming open; een definitie begrenst.")
        })
    }
}

pub struct GeenVoorbeelden;

impl Rule for GeenVoorbeelden {
    fn id(&self) -> &'static str { "VER-05" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&["bijvoorbeeld", "bijv", "denk aan", "onder andere", "onder meer"])
        });
        phrase_rule(input, ac, "voorbeeld-in-definitie", |found| {
            format!("'{found}' introduceert voorbeelden; die horen in de toelichting.")
        })
    }
}

pub struct GeenDocumentverwijzing;

impl Rule for GeenDocumentverwijzing {
    fn id(&self) -> &'static str { "VER-06" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&[
                "zie artikel", "hierboven", "hieronder", "bovenstaand", "bovenstaande",
                "onderstaand", "onderstaande", "in dit document", "deze paragraaf",
                "dit hoofdstuk",
            ])
        });
        phrase_rule(input, ac, "documentverwijzing", |found| {
            format!("'{found}' verwijst naar documentstructuur die buiten de definitie valt.")
        })
    }
}

pub struct GeenPersoonsvorm;

impl Rule for GeenPersoonsvorm {
    fn id(&self) -> &'static str { "VER-07" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&[
                "ik", "wij", "we", "ons", "onze", "u", "uw", "je", "jij", "jou", "jouw",
                "jullie",
            ])
        });
        phrase_rule(input, ac, "persoonsvorm", |found| {
            format!("'{found}' maakt de definitie persoonsgebonden.")
        })
    }
}

pub struct GeenTijdsverwijzing;

impl Rule for GeenTijdsverwijzing {
    fn id(&self) -> &'static str { "VER-08" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&[
                "momenteel", "tegenwoordig", "binnenkort", "huidige", "huidig",
                "onlangs", "recent", "recente", "op dit moment", "thans",
            ])
        });
        phrase_rule(input, ac, "tijdsverwijzing", |found| {
            format!("'{found}' veroudert; een definitie is tijdloos geformuleerd.")
        })
    }
}

pub struct GeenEnOf;

impl Rule for GeenEnOf {
    fn id(&self) -> &'static str { "VER-09" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        match input.view.lower.find("en/of") {
            Some(start) => RuleCheck::fail(
                ViolationDraft::new(
                    "en-of",
                    "'en/of' laat in het midden wat bedoeld wordt.",
                )
                .at(TextSpan::new(start, start + "en/of".len()))
                .suggest("Kies 'en', 'of', of formuleer beide gevallen uit."),
            ),
            None => RuleCheck::pass(),
        }
    }
}

pub struct GeenVraagUitroep;

impl Rule for GeenVraagUitroep {
    fn id(&self) -> &'static str { "VER-10" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        match input.view.raw.find(['?', '!']) {
            Some(pos) => RuleCheck::fail(
                ViolationDraft::new(
                    "vraag-of-uitroep",
                    "De definitie bevat een vraagteken of uitroepteken.",
                )
                .at(TextSpan::new(pos, pos + 1)),
            ),
            None => RuleCheck::pass(),
        }
    }
}

pub struct GeenOpmaakresten;

impl Rule for GeenOpmaakresten {
    fn id(&self) -> &'static str { "VER-11" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"</?[a-zA-Z][^>]*>|&[a-z]+;|\*\*|__|##|\]\(")
                .expect("static regex compiles")
        });
        match re.find(&input.view.raw) {
            Some(m) => RuleCheck::fail(
                ViolationDraft::new(
                    "opmaakresten",
                    format!("'{}' is een opmaakrest uit een ander formaat.", m.as_str()),
                )
                .at(TextSpan::new(m.start(), m.end())),
            ),
            None => RuleCheck::pass(),
        }
    }
}

pub struct GeenPlaatshouders;

impl Rule for GeenPlaatshouders {
    fn id(&self) -> &'static str { "VER-12" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static AC: OnceLock<AhoCorasick> = OnceLock::new();
        let ac = AC.get_or_init(|| {
            phrase_matcher(&[
                "todo", "xxx", "n.t.b", "nader te bepalen", "nog in te vullen", "p.m",
            ])
        });
        phrase_rule(input, ac, "plaatshouder", |found| {
            format!("'{found}' is plaatshoudertekst; de definitie is niet af.")
        })
    }
}

pub struct GeenOntkenningsdefinitie;

impl Rule for GeenOntkenningsdefinitie {
    fn id(&self) -> &'static str { "VER-13" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let words = &input.view.words;
        if let Some(i) = input.view.copula_index {
            if let Some(next) = words.get(i + 1) {
                if next.lower == "niet" || next.lower == "geen" {
                    return RuleCheck::fail(
                        ViolationDraft::new(
                            "ontkenningsdefinitie",
                            "De definitie zegt alleen wat het begrip niet is.",
                        )
                        .at(TextSpan::new(words[i].start, next.end))
                        .suggest("Definieer wat het begrip wél is."),
                    );
                }
            }
        }
        RuleCheck::pass()
    }
}

pub struct GeenKaleVerwijzing;

impl Rule for GeenKaleVerwijzing {
    fn id(&self) -> &'static str { "VER-14" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        match input.view.words.first() {
            Some(w) if w.lower == "zie" => RuleCheck::fail(
                ViolationDraft::new(
                    "kale-verwijzing",
                    "De definitie is een kale verwijzing naar een andere term.",
                )
                .at(w.span())
                .suggest("Neem de inhoud van de verwezen definitie op of definieer zelfstandig."),
            ),
            _ => RuleCheck::pass(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::input_for;

    fn check_rule(rule: &dyn Rule, text: &str) -> RuleCheck {
        let (view, ctx) = input_for(text);
        rule.check(&RuleInput {
            term: "begrip",
            text,
            view: &view,
            category: None,
            context: &ctx,
        })
    }

    #[test]
    fn test_normative_language() {
        let check = check_rule(
            &GeenNormatieveTaal,
            "Een aanvraag is een verzoek dat binnen zes weken moet worden behandeld.",
        );
        assert!(!check.passed);
        assert_eq!(check.violations[0].code, "normatieve-taal");
    }

    #[test]
    fn test_moet_inside_word_is_not_flagged() {
        let check = check_rule(&GeenNormatieveTaal, "Een vermoetelijke samenkomst van partijen.");
        assert!(check.passed);
    }

    #[test]
    fn test_en_of() {
        let check = check_rule(&GeenEnOf, "Een pand en/of onderpand voor een vordering.");
        assert!(!check.passed);
    }

    #[test]
    fn test_negation_only_definition() {
        let check = check_rule(&GeenOntkenningsdefinitie, "Een gift is geen lening van geld.");
        assert!(!check.passed);
    }

    #[test]
    fn test_bare_cross_reference() {
        let check = check_rule(&GeenKaleVerwijzing, "Zie hypotheek.");
        assert!(!check.passed);
    }

    #[test]
    fn test_markup_residue() {
        let check = check_rule(&GeenOpmaakresten, "Een <b>recht</b> op een zaak.");
        assert!(!check.passed);
    }
}
