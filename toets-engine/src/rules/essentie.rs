//! Essential-content rules — genus, differentia, circularity, anchoring.

use super::text::{is_article, shares_root, term_content_words, Word};
use super::{Rule, RuleCheck, RuleInput, ViolationDraft};

/// Words that cannot serve as a genus: they name nothing.
const VAGUE_GENUS: [&str; 8] = [
    "iets", "ding", "dingen", "zaak", "zaken", "begrip", "fenomeen", "verschijnsel",
];

/// Relative pronouns and prepositions that introduce distinguishing
/// characteristics after the genus.
const DIFFERENTIA_MARKERS: [&str; 16] = [
    "die", "dat", "waarbij", "waarmee", "waarvan", "waarop", "waardoor", "waarin",
    "waaruit", "met", "voor", "door", "tot", "op", "van", "in",
];

/// Signals that a definiens describes a process.
const PROCESS_SIGNALS: [&str; 10] = [
    "proces", "procedure", "handeling", "activiteit", "verloop", "behandeling",
    "uitvoering", "totstandkoming", "verrichting", "werkwijze",
];

/// Signals that a definiens names the act a result came from.
const RESULT_SIGNALS: [&str; 8] = [
    "resultaat", "uitkomst", "gevolg", "ontstaat", "ontstaan", "voortvloeit",
    "voortkomt", "voortgekomen",
];

/// Supertype markers for type definitions.
const SUPERTYPE_SIGNALS: [&str; 6] = ["soort", "vorm", "type", "categorie", "klasse", "variant"];

/// Identification anchors for instance definitions.
const IDENTIFICATION_SIGNALS: [&str; 10] = [
    "geïdentificeerd", "aangeduid", "uniek", "unieke", "nummer", "code",
    "registratie", "geregistreerd", "ingeschreven", "vastgelegd",
];

/// Words signalling a statutory anchor.
const STATUTORY_SIGNALS: [&str; 8] = [
    "wet", "wetboek", "artikel", "besluit", "regeling", "verordening", "richtlijn",
    "grondslag",
];

pub struct GeenCirculaireDefinitie;

impl Rule for GeenCirculaireDefinitie {
    fn id(&self) -> &'static str { "ESS-01" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let term_words = term_content_words(input.term);
        if term_words.is_empty() {
            return RuleCheck::pass();
        }
        // Only the definiens counts: the subject before the copula may
        // restate the term ("Een hypotheek is ...").
        for word in input.view.definiens_words() {
            for term_word in &term_words {
                if shares_root(&word.lower, term_word) {
                    return RuleCheck::fail(
                        ViolationDraft::new(
                            "circulaire-definitie",
                            format!(
                                "'{}' herhaalt de term '{}' als eigen verklaring.",
                                &input.view.raw[word.start..word.end],
                                input.term
                            ),
                        )
                        .at(word.span())
                        .suggest("Omschrijf het begrip zonder de term of een afleiding ervan te gebruiken."),
                    );
                }
            }
        }
        RuleCheck::pass()
    }
}

pub struct BenoemtGenus;

/// Definiens openers that rule out a genus noun.
const NON_GENUS_OPENERS: [&str; 9] = [
    "wanneer", "als", "wat", "wie", "waar", "hoe", "dat", "om", "te",
];

impl BenoemtGenus {
    /// The first definiens word that could be the genus head: skips one
    /// leading article.
    fn genus_head<'v>(words: &'v [Word]) -> Option<&'v Word> {
        match words.first() {
            Some(w) if is_article(&w.lower) => words.get(1),
            other => other,
        }
    }
}

impl Rule for BenoemtGenus {
    fn id(&self) -> &'static str { "ESS-02" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        if input.view.copula_index.is_none() {
            return RuleCheck::fail(
                ViolationDraft::new(
                    "genus-ontbreekt",
                    "Zonder koppelwerkwoord is geen genus herkenbaar.",
                )
                .suggest("Formuleer als 'Een <term> is een <genus> die ...'."),
            );
        }
        let definiens = input.view.definiens_words();
        match Self::genus_head(definiens) {
            Some(head)
                if !NON_GENUS_OPENERS.contains(&head.lower.as_str())
                    && head.lower.chars().count() >= 3 =>
            {
                RuleCheck::pass()
            }
            Some(head) => RuleCheck::fail(
                ViolationDraft::new(
                    "genus-ontbreekt",
                    format!(
                        "Na het koppelwerkwoord volgt '{}' in plaats van een genus.",
                        &input.view.raw[head.start..head.end]
                    ),
                )
                .at(head.span()),
            ),
            None => RuleCheck::fail(ViolationDraft::new(
                "genus-ontbreekt",
                "Na het koppelwerkwoord volgt geen genus.",
            )),
        }
    }
}

pub struct BevatDifferentia;

impl Rule for BevatDifferentia {
    fn id(&self) -> &'static str { "ESS-03" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        // Skip the genus phrase itself (article + head noun).
        let definiens = input.view.definiens_words();
        let tail = definiens.get(2..).unwrap_or(&[]);
        if tail
            .iter()
            .any(|w| DIFFERENTIA_MARKERS.contains(&w.lower.as_str()))
        {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(
                ViolationDraft::new(
                    "differentia-ontbreekt",
                    "De definitie onderscheidt het begrip niet van andere begrippen met hetzelfde genus.",
                )
                .suggest("Voeg onderscheidende kenmerken toe, bijvoorbeeld met 'die' of 'waarbij'."),
            )
        }
    }
}

pub struct ProcesFormulering;

impl Rule for ProcesFormulering {
    fn id(&self) -> &'static str { "ESS-04" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let has_signal = input.view.definiens_words().iter().any(|w| {
            PROCESS_SIGNALS.contains(&w.lower.as_str()) || w.lower.ends_with("ing")
        });
        if has_signal {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(
                ViolationDraft::new(
                    "geen-procesformulering",
                    "Een procesdefinitie beschrijft een handeling of verloop; die ontbreekt.",
                )
                .suggest("Gebruik een genus als 'proces', 'handeling' of een werkwoordsvorm op -ing."),
            )
        }
    }
}

pub struct ResultaatVerwijstNaarHandeling;

impl Rule for ResultaatVerwijstNaarHandeling {
    fn id(&self) -> &'static str { "ESS-05" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let has_signal = input.view.definiens_words().iter().any(|w| {
            RESULT_SIGNALS.contains(&w.lower.as_str()) || w.lower.ends_with("ing")
        });
        if has_signal {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(ViolationDraft::new(
                "geen-herkomstverwijzing",
                "Een resultaatdefinitie verwijst naar de handeling waaruit het resultaat voortkomt; die ontbreekt.",
            ))
        }
    }
}

pub struct TypeBenoemtSupertype;

impl Rule for TypeBenoemtSupertype {
    fn id(&self) -> &'static str { "ESS-06" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let has_signal = input
            .view
            .definiens_words()
            .iter()
            .any(|w| SUPERTYPE_SIGNALS.contains(&w.lower.as_str()));
        if has_signal {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(ViolationDraft::new(
                "supertype-ontbreekt",
                "Een typedefinitie benoemt het bovenliggende type ('soort', 'vorm', 'categorie'); dat ontbreekt.",
            ))
        }
    }
}

pub struct ExemplaarIdentificatie;

impl Rule for ExemplaarIdentificatie {
    fn id(&self) -> &'static str { "ESS-07" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let has_signal = input
            .view
            .definiens_words()
            .iter()
            .any(|w| IDENTIFICATION_SIGNALS.contains(&w.lower.as_str()));
        if has_signal {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(ViolationDraft::new(
                "identificatie-ontbreekt",
                "Een exemplaardefinitie verankert het exemplaar aan een eenduidige identificatie; die ontbreekt.",
            ))
        }
    }
}

pub struct VerwijstNaarGrondslag;

impl Rule for VerwijstNaarGrondslag {
    fn id(&self) -> &'static str { "ESS-08" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let lower = &input.view.lower;
        let mentions_statute = input
            .view
            .words
            .iter()
            .any(|w| STATUTORY_SIGNALS.contains(&w.lower.as_str()))
            || input
                .context
                .wettelijke_grondslagen
                .iter()
                .any(|g| lower.contains(&g.to_lowercase()));
        if mentions_statute {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(
                ViolationDraft::new(
                    "grondslag-ontbreekt",
                    "Er is een wettelijke grondslag aangeleverd, maar de definitie verwijst er niet naar.",
                )
                .suggest(format!(
                    "Verwijs naar bijvoorbeeld: {}.",
                    input.context.wettelijke_grondslagen.join("; ")
                )),
            )
        }
    }
}

pub struct GeenLeegGenus;

impl Rule for GeenLeegGenus {
    fn id(&self) -> &'static str { "ESS-09" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let definiens = input.view.definiens_words();
        let head = match BenoemtGenus::genus_head(definiens) {
            Some(h) => h,
            None => return RuleCheck::pass(),
        };
        if VAGUE_GENUS.contains(&head.lower.as_str()) {
            RuleCheck::fail(
                ViolationDraft::new(
                    "inhoudsloos-genus",
                    format!(
                        "'{}' is een inhoudsloos genus.",
                        &input.view.raw[head.start..head.end]
                    ),
                )
                .at(head.span())
                .suggest("Benoem de concrete soort waartoe het begrip behoort."),
            )
        } else {
            RuleCheck::pass()
        }
    }
}

pub struct GeenVoorbeeldopsomming;

impl Rule for GeenVoorbeeldopsomming {
    fn id(&self) -> &'static str { "ESS-10" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        match input.view.definiens_words().first() {
            Some(w) if w.lower == "zoals" || w.lower == "bijvoorbeeld" => RuleCheck::fail(
                ViolationDraft::new(
                    "alleen-voorbeelden",
                    "De definitie bestaat uit een opsomming van voorbeelden in plaats van een omschrijving.",
                )
                .at(w.span()),
            ),
            _ => RuleCheck::pass(),
        }
    }
}

pub struct TermEchoDekking;

/// Minimum number of content words the definiens must add beyond the
/// term itself.
const MIN_NEW_CONTENT_WORDS: usize = 3;

impl Rule for TermEchoDekking {
    fn id(&self) -> &'static str { "ESS-11" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let term_words = term_content_words(input.term);
        let new_content = input
            .view
            .definiens_words()
            .iter()
            .filter(|w| w.lower.chars().count() >= 4)
            .filter(|w| !term_words.iter().any(|t| shares_root(&w.lower, t)))
            .count();
        if new_content >= MIN_NEW_CONTENT_WORDS {
            return RuleCheck::pass();
        }
        let contribution = new_content as f64 / MIN_NEW_CONTENT_WORDS as f64;
        RuleCheck::graded(
            contribution,
            ViolationDraft::new(
                "te-weinig-inhoud",
                format!(
                    "De definitie voegt slechts {new_content} inhoudswoord(en) toe aan de term."
                ),
            ),
        )
    }
}

pub struct OrganisatorischeAansluiting;

impl Rule for OrganisatorischeAansluiting {
    fn id(&self) -> &'static str { "ESS-12" }

    fn check(&self, input: &RuleInput<'_>) -> RuleCheck {
        let keywords: Vec<String> = input
            .context
            .organisatorische_context
            .iter()
            .flat_map(|k| term_content_words(k))
            .collect();
        if keywords.is_empty() {
            return RuleCheck::pass();
        }
        let matches = input
            .view
            .words
            .iter()
            .any(|w| keywords.iter().any(|k| shares_root(&w.lower, k)));
        if matches {
            RuleCheck::pass()
        } else {
            RuleCheck::fail(ViolationDraft::new(
                "context-aansluiting-ontbreekt",
                "De definitie sluit niet aan op de aangeleverde organisatorische context.",
            ))
        }
    }
}
