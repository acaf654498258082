//! Structure rules — sentence form of the definition.

use std::sync::OnceLock;

use regex::Regex;

use toets_core::types::{Severity, TextSpan};

use super::text::is_article;
use super::{Rule, RuleCheck, RuleInput, ViolationDraft};

/// Character count below which a text cannot be a definition at all.
const MIN_LENGTH_HARD: usize = 10;
/// Character count at which the minimum-length rule is fully satisfied.
const MIN_LENGTH_FULL: usize = 40;
const MAX_LENGTH_CHARS: usize = 350;
const MAX_LENGTH_WORDS: usize = 50;

pub struct BegintMetLidwoord;

impl Rule for BegintMetLidwoord {
    fn id(&self) -> &'static str { "STR-01" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        match input.view.words.first() {
            Some(w) if is_article(&w.lower) => RuleCheck::pass(),
            Some(w) => RuleCheck::fail(
                ViolationDraft::new(
                    "begint-niet-met-lidwoord",
                    format!("De definitie begint met '{}' in plaats van een lidwoord.", &input.text[w.start..w.end]),
                )
                .at(w.span())
                .suggest("Begin de definitie met 'Een', 'De' of 'Het'."),
            ),
            None => RuleCheck::fail(ViolationDraft::new(
                "begint-niet-met-lidwoord",
                "De definitie bevat geen woorden.",
            )),
        }
    }
}

pub struct BevatKoppelwerkwoord;

impl Rule for BevatKoppelwerkwoord {
    fn id(&self) -> &'static str { "STR-02" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        if input.view.copula_index.is_some() {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(
                ViolationDraft::new(
                    "koppelwerkwoord-ontbreekt",
                    "De definitie bevat geen 'is' of 'zijn' dat term en genus verbindt.",
                )
                .suggest("Formuleer als 'Een <term> is een <genus> die ...'."),
            )
        }
    }
}

pub struct MinimaleLengte;

impl Rule for MinimaleLengte {
    fn id(&self) -> &'static str { "STR-03" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let len = input.text.trim().chars().count();
        if len >= MIN_LENGTH_FULL {
            return RuleCheck::pass();
        }
        if len < MIN_LENGTH_HARD {
            return RuleCheck::fail(ViolationDraft::new(
                "te-kort",
                format!("De definitie telt {len} tekens; minimaal {MIN_LENGTH_HARD} vereist."),
            ));
        }
        // Between the hard floor and full credit: partial credit, the
        // one structurally graded rule in the corpus.
        let contribution =
            (len - MIN_LENGTH_HARD) as f64 / (MIN_LENGTH_FULL - MIN_LENGTH_HARD) as f64;
        RuleCheck::graded(
            contribution,
            ViolationDraft::new(
                "aan-de-korte-kant",
                format!("De definitie telt {len} tekens; {MIN_LENGTH_FULL} of meer is gebruikelijk."),
            )
            .with_severity(Severity::Warning),
        )
    }
}

pub struct MaximaleLengte;

impl Rule for MaximaleLengte {
    fn id(&self) -> &'static str { "STR-04" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let chars = input.text.trim().chars().count();
        let words = input.view.words.len();
        if chars <= MAX_LENGTH_CHARS && words <= MAX_LENGTH_WORDS {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(
                ViolationDraft::new(
                    "te-lang",
                    format!(
                        "De definitie telt {chars} tekens en {words} woorden; maximaal \
                         {MAX_LENGTH_CHARS} tekens of {MAX_LENGTH_WORDS} woorden."
                    ),
                )
                .suggest("Verplaats toelichting naar een apart toelichtingsveld."),
            )
        }
    }
}

pub struct EnkeleZin;

impl Rule for EnkeleZin {
    fn id(&self) -> &'static str { "STR-05" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let terminators = input.view.sentence_terminators();
        if terminators <= 1 {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(
                ViolationDraft::new(
                    "meerdere-zinnen",
                    format!("De definitie bestaat uit {terminators} zinnen in plaats van één."),
                )
                .suggest("Beperk de definitie tot één zin."),
            )
        }
    }
}

pub struct EindigtMetPunt;

impl Rule for EindigtMetPunt {
    fn id(&self) -> &'static str { "STR-06" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        if input.text.trim_end().ends_with('.') {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(ViolationDraft::new(
                "eindigt-niet-met-punt",
                "De definitie eindigt niet met een punt.",
            ))
        }
    }
}

pub struct GeenOpsomming;

impl Rule for GeenOpsomming {
    fn id(&self) -> &'static str { "STR-07" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"(?m)^\s*(?:[-*•]|\d+[.)])\s").expect("static regex compiles")
        });
        match re.find(&input.view.raw) {
            None => RuleCheck::pass(),
            Some(m) => RuleCheck::fail(
                ViolationDraft::new(
                    "opsommingsteken",
                    "De definitie bevat een opsommingsteken of genummerde lijst.",
                )
                .at(TextSpan::new(m.start(), m.end()))
                .suggest("Schrijf de definitie als doorlopende zin."),
            ),
        }
    }
}

pub struct BegintMetHoofdletter;

impl Rule for BegintMetHoofdletter {
    fn id(&self) -> &'static str { "STR-08" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let first_alpha = input.text.trim_start().chars().find(|c| c.is_alphabetic());
        match first_alpha {
            Some(c) if c.is_uppercase() => RuleCheck::pass(),
            Some(_) => RuleCheck::fail(ViolationDraft::new(
                "begint-niet-met-hoofdletter",
                "De definitie begint niet met een hoofdletter.",
            )),
            // No letters at all: leave this to the length rule.
            None => RuleCheck::pass(),
        }
    }
}

pub struct WitruimteHygiene;

impl Rule for WitruimteHygiene {
    fn id(&self) -> &'static str { "STR-09" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let raw = &input.view.raw;
        let mut problems = Vec::new();
        if raw != raw.trim() {
            problems.push("witruimte aan begin of einde");
        }
        if raw.contains("  ") {
            problems.push("dubbele spaties");
        }
        if raw.contains('\t') {
            problems.push("tabtekens");
        }
        if problems.is_empty() {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(ViolationDraft::new(
                "witruimte",
                format!("De definitie bevat {}.", problems.join(" en ")),
            ))
        }
    }
}

pub struct HaakjesInBalans;

impl Rule for HaakjesInBalans {
    fn id(&self) -> &'static str { "STR-10" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let raw = &input.view.raw;
        let count = |c: char| raw.chars().filter(|&x| x == c).count();
        let balanced = count('(') == count(')')
            && count('[') == count(']')
            && count('"') % 2 == 0;
        if balanced {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(ViolationDraft::new(
                "haakjes-uit-balans",
                "Haakjes of aanhalingstekens zijn niet in balans.",
            ))
        }
    }
}
