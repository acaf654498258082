//! Console renderer — human-readable output for batch tooling.

use toets_core::types::Severity;

use crate::mapper::VersionedValidationResult;

/// Renders a versioned result for terminal consumption.
pub struct ConsoleRenderer {
    pub use_color: bool,
}

impl ConsoleRenderer {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn verdict_symbol(&self, acceptable: bool) -> &'static str {
        if acceptable {
            "✓"
        } else {
            "✗"
        }
    }

    fn color_start(&self, severity: Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Critical => "\x1b[35m", // magenta
            Severity::Error => "\x1b[31m",    // red
            Severity::Warning => "\x1b[33m",  // yellow
            Severity::Info => "\x1b[36m",     // cyan
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }

    /// Render one result.
    pub fn render(&self, result: &VersionedValidationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} score {:.2} ({}) — {} overtreding(en)\n",
            self.verdict_symbol(result.is_acceptable),
            result.overall_score,
            if result.is_acceptable {
                "acceptabel"
            } else {
                "afgekeurd"
            },
            result.violations.len(),
        ));

        for (category, score) in &result.detailed_scores {
            output.push_str(&format!("  {category}: {score:.2}\n"));
        }

        for violation in &result.violations {
            output.push_str(&format!(
                "  {}{}{} [{}] {}: {}\n",
                self.color_start(violation.severity),
                violation.severity,
                self.color_end(),
                violation.rule_id,
                violation.code,
                violation.message,
            ));
        }

        if !result.improvement_suggestions.is_empty() {
            output.push_str("  suggesties:\n");
            for suggestion in &result.improvement_suggestions {
                output.push_str(&format!("    - {suggestion}\n"));
            }
        }

        output.push_str(&format!(
            "  [{} | engine {} | profiel {} | {}ms]\n",
            result.system.correlation_id,
            result.system.engine_version,
            result.system.profile_used,
            result.system.duration_ms,
        ));

        output
    }

    /// Render a batch, in order.
    pub fn render_batch(&self, results: &[VersionedValidationResult]) -> String {
        let mut output = String::new();
        for (i, result) in results.iter().enumerate() {
            output.push_str(&format!("#{}\n", i + 1));
            output.push_str(&self.render(result));
        }
        let rejected = results.iter().filter(|r| !r.is_acceptable).count();
        output.push_str(&format!(
            "{} item(s), {} afgekeurd\n",
            results.len(),
            rejected
        ));
        output
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
