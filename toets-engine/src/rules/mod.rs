//! Rule implementations — 46 pure checks over (term, text, context).
//!
//! Each rule implements the [`Rule`] trait and is registered in
//! [`implementations`], a fixed enumerable table keyed by rule id. No
//! runtime discovery: the registry verifies this table against the
//! loaded spec corpus at bind time, and the consistency report does the
//! same offline for CI.
//!
//! Rules are side-effect-free and never read another rule's outcome.
//! That contract is what makes parallel execution safe without changing
//! results.

pub mod consistentie;
pub mod essentie;
pub mod structuur;
pub mod text;
pub mod verboden;

use toets_core::types::{OntologicalCategory, Severity, TextSpan, ValidationContext};

use text::TextView;

/// Everything a rule may consult. Shared views are precomputed once per
/// validation so 46 rules don't re-tokenize the same text.
pub struct RuleInput<'a> {
    pub term: &'a str,
    pub text: &'a str,
    pub view: &'a TextView,
    pub category: Option<OntologicalCategory>,
    pub context: &'a ValidationContext,
}

/// A violation as produced by a rule, before the executor attaches the
/// rule's spec metadata (id, category, tier-derived severity).
#[derive(Debug, Clone)]
pub struct ViolationDraft {
    /// Stable machine-readable code, unique per violation kind.
    pub code: &'static str,
    pub message: String,
    /// Overrides the tier-derived default when set.
    pub severity: Option<Severity>,
    pub location: Option<TextSpan>,
    pub suggestions: Vec<String>,
}

impl ViolationDraft {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: None,
            location: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn at(mut self, span: TextSpan) -> Self {
        self.location = Some(span);
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// The raw result of one rule check.
#[derive(Debug, Clone)]
pub struct RuleCheck {
    pub passed: bool,
    /// `None` means binary scoring: 1.0 when passed, 0.0 when failed.
    /// Graded rules report a fraction in `[0, 1]`.
    pub contribution: Option<f64>,
    pub violations: Vec<ViolationDraft>,
}

impl RuleCheck {
    pub fn pass() -> Self {
        Self {
            passed: true,
            contribution: None,
            violations: Vec::new(),
        }
    }

    pub fn fail(violation: ViolationDraft) -> Self {
        Self {
            passed: false,
            contribution: None,
            violations: vec![violation],
        }
    }

    pub fn fail_all(violations: Vec<ViolationDraft>) -> Self {
        Self {
            passed: false,
            contribution: None,
            violations,
        }
    }

    /// A failing check that still earns partial credit.
    pub fn graded(contribution: f64, violation: ViolationDraft) -> Self {
        Self {
            passed: false,
            contribution: Some(contribution),
            violations: vec![violation],
        }
    }
}

/// One independently evaluable check against a candidate definition.
///
/// Implementations must be pure: no I/O, no mutable shared state, no
/// dependence on other rules. The executor converts panics into
/// synthetic system violations, so a broken rule never aborts a run.
pub trait Rule: Send + Sync {
    /// The spec id this implementation is bound to.
    fn id(&self) -> &'static str;

    /// Evaluate the rule.
    fn check(&self, input: &RuleInput<'_>) -> RuleCheck;
}

/// The compile-time registration table: every shipped rule, exactly once.
///
/// Order is irrelevant here; the registry sorts bound rules by
/// (category, id) for stable execution.
pub fn implementations() -> Vec<Box<dyn Rule>> {
    vec![
        // structuur
        Box::new(structuur::BegintMetLidwoord),
        Box::new(structuur::BevatKoppelwerkwoord),
        Box::new(structuur::MinimaleLengte),
        Box::new(structuur::MaximaleLengte),
        Box::new(structuur::EnkeleZin),
        Box::new(structuur::EindigtMetPunt),
        Box::new(structuur::GeenOpsomming),
        Box::new(structuur::BegintMetHoofdletter),
        Box::new(structuur::WitruimteHygiene),
        Box::new(structuur::HaakjesInBalans),
        // essentie
        Box::new(essentie::GeenCirculaireDefinitie),
        Box::new(essentie::BenoemtGenus),
        Box::new(essentie::BevatDifferentia),
        Box::new(essentie::ProcesFormulering),
        Box::new(essentie::ResultaatVerwijstNaarHandeling),
        Box::new(essentie::TypeBenoemtSupertype),
        Box::new(essentie::ExemplaarIdentificatie),
        Box::new(essentie::VerwijstNaarGrondslag),
        Box::new(essentie::GeenLeegGenus),
        Box::new(essentie::GeenVoorbeeldopsomming),
        Box::new(essentie::TermEchoDekking),
        Box::new(essentie::OrganisatorischeAansluiting),
        // consistentie
        Box::new(consistentie::GeenTegenstrijdigeKwantoren),
        Box::new(consistentie::GetalCongruentie),
        Box::new(consistentie::TegenwoordigeTijd),
        Box::new(consistentie::StabielPerspectief),
        Box::new(consistentie::GeenIsWanneer),
        Box::new(consistentie::GeenDubbeleOntkenning),
        Box::new(consistentie::CategorieCongruentie),
        Box::new(consistentie::AfkortingGeintroduceerd),
        Box::new(consistentie::GeenZelfverwijzing),
        Box::new(consistentie::ConsistenteGetalnotatie),
        // verboden
        Box::new(verboden::GeenNormatieveTaal),
        Box::new(verboden::GeenSubjectieveKwalificaties),
        Box::new(verboden::GeenVageAfzwakkingen),
        Box::new(verboden::GeenOpenEinde),
        Box::new(verboden::GeenVoorbeelden),
        Box::new(verboden::GeenDocumentverwijzing),
        Box::new(verboden::GeenPersoonsvorm),
        Box::new(verboden::GeenTijdsverwijzing),
        Box::new(verboden::GeenEnOf),
        Box::new(verboden::GeenVraagUitroep),
        Box::new(verboden::GeenOpmaakresten),
        Box::new(verboden::GeenPlaatshouders),
        Box::new(verboden::GeenOntkenningsdefinitie),
        Box::new(verboden::GeenKaleVerwijzing),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use toets_core::types::ValidationContext;

    use super::text::TextView;

    /// Build the shared views a rule test needs for a given text.
    pub fn input_for(text: &str) -> (TextView, ValidationContext) {
        (TextView::build(text), ValidationContext::default())
    }
}
