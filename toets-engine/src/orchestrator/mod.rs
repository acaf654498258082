//! Validation orchestrator — single calls, batches, and failure policy.
//!
//! The orchestrator wires the pipeline together per call: optional
//! pre-processing, active-rule selection from the registry snapshot,
//! execution, aggregation, and observability metadata. Failure policy:
//! nothing escapes. A failing item becomes a degraded report at its
//! position; `batch_validate` always returns as many reports as it was
//! given requests, in order.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rayon::prelude::*;
use xxhash_rust::xxh3::xxh3_64;

use toets_core::config::EngineConfig;
use toets_core::errors::{ConfigError, OrchestrationError, ToetsErrorCode};
use toets_core::events::{
    BatchCompletedEvent, EventDispatcher, RulePanickedEvent, ToetsEventHandler,
    ValidationCompletedEvent, ValidationStartedEvent,
};
use toets_core::traits::{Cancellable, TextNormalizer};
use toets_core::types::{
    Definition, Disposition, OntologicalCategory, PhaseTimings, RuleCategory, Severity,
    SystemInfo, ValidationContext, ValidationReport, ValidationRequest, Violation,
};

use crate::codes;
use crate::executor::RuleExecutor;
use crate::registry::RuleRegistry;
use crate::rules::text::TextView;
use crate::scoring::ScoringAggregator;
use crate::ENGINE_VERSION;

static CORRELATION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Coordinates a single validation or a batch.
pub struct ValidationOrchestrator {
    config: EngineConfig,
    registry: Arc<RuleRegistry>,
    normalizer: Option<Arc<dyn TextNormalizer>>,
    events: EventDispatcher,
    scorer: ScoringAggregator,
    executor: RuleExecutor,
    profile: String,
}

impl ValidationOrchestrator {
    /// Build an orchestrator from config, loading the rule corpus the
    /// config points at. Fails only on `ConfigError` (bad corpus or
    /// binding mismatch in strict mode).
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let registry = Arc::new(RuleRegistry::from_config(&config.binding)?);
        Ok(Self::with_registry(config, registry))
    }

    /// Build an orchestrator around an existing registry, e.g. one that
    /// is hot-reloaded elsewhere.
    pub fn with_registry(config: EngineConfig, registry: Arc<RuleRegistry>) -> Self {
        let scorer = ScoringAggregator::new(config.scoring.resolved_threshold());
        let executor = RuleExecutor::new(config.execution.resolved_parallel_rules());
        let profile = config.scoring.resolved_profile().to_string();
        Self {
            config,
            registry,
            normalizer: None,
            events: EventDispatcher::new(),
            scorer,
            executor,
            profile,
        }
    }

    /// Inject the optional pre-processing collaborator. Without one,
    /// raw text is validated unchanged.
    pub fn with_normalizer(mut self, normalizer: Arc<dyn TextNormalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn ToetsEventHandler>) -> Self {
        self.events.register(handler);
        self
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    /// Validate a candidate definition text.
    ///
    /// Never fails and never panics: pipeline errors degrade into the
    /// returned report.
    pub fn validate_text(
        &self,
        term: &str,
        text: &str,
        ontological_category: Option<OntologicalCategory>,
        context: Option<ValidationContext>,
    ) -> ValidationReport {
        let mut request = ValidationRequest::new(term, text);
        request.ontological_category = ontological_category;
        request.context = context.unwrap_or_default();
        self.validate_request(&request)
    }

    /// Validate a curated definition entity.
    pub fn validate_definition(&self, definition: &Definition) -> ValidationReport {
        self.validate_request(&ValidationRequest::from(definition))
    }

    /// Validate one request. The no-throw boundary for single calls.
    pub fn validate_request(&self, request: &ValidationRequest) -> ValidationReport {
        let correlation_id = request
            .correlation_id
            .clone()
            .unwrap_or_else(|| generate_correlation_id(&request.term));
        let started = Instant::now();
        let timestamp_ms = unix_timestamp_ms();

        self.events.emit_validation_started(&ValidationStartedEvent {
            correlation_id: correlation_id.clone(),
            term: request.term.clone(),
        });

        let result = catch_unwind(AssertUnwindSafe(|| {
            self.run_pipeline(request, &correlation_id, timestamp_ms, started)
        }));

        let report = match result {
            Ok(report) => report,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                let error = OrchestrationError::ItemPanic {
                    message: message.clone(),
                };
                tracing::error!(
                    %correlation_id,
                    code = error.error_code(),
                    %error,
                    "item pipeline absorbed"
                );
                self.degraded_report(
                    &correlation_id,
                    timestamp_ms,
                    started.elapsed(),
                    Disposition::Degraded,
                    codes::ITEM_FOUT,
                    Severity::Error,
                    format!("De validatie faalde onverwacht: {message}"),
                )
            }
        };

        self.events
            .emit_validation_completed(&ValidationCompletedEvent {
                correlation_id,
                overall_score: report.overall_score,
                is_acceptable: report.is_acceptable,
                violation_count: report.violations.len(),
                duration_ms: report.system.duration_ms,
            });

        report
    }

    /// Validate a batch, preserving input order.
    ///
    /// Every item is validated independently: no state is shared across
    /// items, a failing item degrades only its own position, and
    /// `output.len() == input.len()` always holds. Cancellation stops
    /// unstarted items; completed ones keep their results.
    pub fn batch_validate(
        &self,
        requests: &[ValidationRequest],
        cancellation: Option<&dyn Cancellable>,
    ) -> Vec<ValidationReport> {
        let started = Instant::now();
        let timeout = Duration::from_millis(self.config.execution.resolved_item_timeout_ms());

        let run = || {
            requests
                .par_iter()
                .map(|request| self.run_batch_item(request, cancellation, timeout))
                .collect::<Vec<_>>()
        };

        let reports = match self.config.execution.batch_threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(run),
                Err(_) => run(),
            },
            None => run(),
        };

        self.events.emit_batch_completed(&BatchCompletedEvent {
            item_count: reports.len(),
            degraded_count: reports
                .iter()
                .filter(|r| {
                    matches!(
                        r.system.disposition,
                        Disposition::Degraded | Disposition::TimedOut
                    )
                })
                .count(),
            cancelled_count: reports
                .iter()
                .filter(|r| r.system.disposition == Disposition::Cancelled)
                .count(),
            duration_ms: started.elapsed().as_millis() as u64,
        });

        debug_assert_eq!(reports.len(), requests.len());
        reports
    }

    fn run_batch_item(
        &self,
        request: &ValidationRequest,
        cancellation: Option<&dyn Cancellable>,
        timeout: Duration,
    ) -> ValidationReport {
        let timestamp_ms = unix_timestamp_ms();
        let started = Instant::now();
        let correlation_id = request
            .correlation_id
            .clone()
            .unwrap_or_else(|| generate_correlation_id(&request.term));

        if cancellation.is_some_and(|c| c.is_cancelled()) {
            return self.degraded_report(
                &correlation_id,
                timestamp_ms,
                started.elapsed(),
                Disposition::Cancelled,
                codes::GEANNULEERD,
                Severity::Info,
                "De batch is geannuleerd voordat dit item werd gevalideerd.".to_string(),
            );
        }

        let report = self.validate_request(request);

        // Cooperative time budget: the item ran to completion, but an
        // over-budget result is reported as a timeout so one
        // pathological input is visible in batch telemetry.
        if started.elapsed() > timeout {
            let error = OrchestrationError::ItemTimeout {
                timeout_ms: timeout.as_millis() as u64,
            };
            tracing::warn!(%correlation_id, code = error.error_code(), %error, "item over budget");
            return self.degraded_report(
                &correlation_id,
                timestamp_ms,
                started.elapsed(),
                Disposition::TimedOut,
                codes::TIJDSLIMIET,
                Severity::Error,
                format!(
                    "Het item overschreed de tijdslimiet van {}ms.",
                    timeout.as_millis()
                ),
            );
        }

        report
    }

    /// The actual pipeline: pre-processing, execution, aggregation.
    fn run_pipeline(
        &self,
        request: &ValidationRequest,
        correlation_id: &str,
        timestamp_ms: u64,
        started: Instant,
    ) -> ValidationReport {
        // Phase 1: pre-processing.
        let phase_start = Instant::now();
        let text = match self.normalizer {
            Some(ref normalizer) => normalizer.normalize(&request.text),
            None => request.text.clone(),
        };
        let view = TextView::build(&text);
        let preprocessing_us = phase_start.elapsed().as_micros() as u64;

        // Phase 2: rule execution against the pinned snapshot.
        let phase_start = Instant::now();
        let snapshot = self.registry.snapshot();
        let active = snapshot.active_rules(request.ontological_category, &request.context);
        let suppressed_rules =
            snapshot.suppressed_rules(request.ontological_category, &request.context);
        let executed = self.executor.execute(
            &active,
            &request.term,
            &view,
            request.ontological_category,
            &request.context,
        );
        let rule_execution_us = phase_start.elapsed().as_micros() as u64;

        for rule in &executed {
            for violation in &rule.outcome.violations {
                if violation.code == codes::REGEL_PANIEK {
                    self.events.emit_rule_panicked(&RulePanickedEvent {
                        correlation_id: correlation_id.to_string(),
                        rule_id: rule.outcome.rule_id.clone(),
                        message: violation.message.clone(),
                    });
                }
            }
        }

        // Phase 3: aggregation.
        let phase_start = Instant::now();
        let breakdown = self.scorer.aggregate(&executed);
        let aggregation_us = phase_start.elapsed().as_micros() as u64;

        tracing::debug!(
            %correlation_id,
            score = breakdown.overall_score,
            acceptable = breakdown.is_acceptable,
            violations = breakdown.violations.len(),
            "validation completed"
        );

        ValidationReport {
            overall_score: breakdown.overall_score,
            is_acceptable: breakdown.is_acceptable,
            violations: breakdown.violations,
            passed_rules: breakdown.passed_rules,
            detailed_scores: breakdown.detailed_scores,
            improvement_suggestions: breakdown.improvement_suggestions,
            system: SystemInfo {
                correlation_id: correlation_id.to_string(),
                engine_version: ENGINE_VERSION.to_string(),
                profile_used: self.profile.clone(),
                timestamp_ms,
                duration_ms: started.elapsed().as_millis() as u64,
                phase_timings: PhaseTimings {
                    preprocessing_us,
                    rule_execution_us,
                    aggregation_us,
                },
                disposition: Disposition::Completed,
                suppressed_rules,
            },
        }
    }

    /// A report for an item whose pipeline did not complete normally.
    #[allow(clippy::too_many_arguments)]
    fn degraded_report(
        &self,
        correlation_id: &str,
        timestamp_ms: u64,
        elapsed: Duration,
        disposition: Disposition,
        code: &str,
        severity: Severity,
        message: String,
    ) -> ValidationReport {
        ValidationReport {
            overall_score: 0.0,
            is_acceptable: false,
            violations: vec![Violation {
                code: code.to_string(),
                rule_id: codes::SYS_RULE_ID.to_string(),
                category: RuleCategory::System,
                severity,
                message,
                location: None,
                suggestions: Vec::new(),
            }],
            passed_rules: Vec::new(),
            detailed_scores: Default::default(),
            improvement_suggestions: Vec::new(),
            system: SystemInfo {
                correlation_id: correlation_id.to_string(),
                engine_version: ENGINE_VERSION.to_string(),
                profile_used: self.profile.clone(),
                timestamp_ms,
                duration_ms: elapsed.as_millis() as u64,
                phase_timings: PhaseTimings::default(),
                disposition,
                suppressed_rules: Vec::new(),
            },
        }
    }
}

/// Correlation ids: an xxh3 over term, wall clock, and a process-wide
/// counter. Unique enough for tracing; never used as a key.
fn generate_correlation_id(term: &str) -> String {
    let counter = CORRELATION_COUNTER.fetch_add(1, Ordering::Relaxed);
    let now_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let hash = xxh3_64(format!("{term}:{now_ns}:{counter}").as_bytes());
    format!("tv-{hash:016x}")
}

fn unix_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "onbekende paniek".to_string()
    }
}
