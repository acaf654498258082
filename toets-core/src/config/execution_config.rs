//! Execution configuration: parallelism and per-item time budget.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Run rule executors on the rayon pool. Results are identical
    /// either way; this only trades latency for cores.
    pub parallel_rules: Option<bool>,
    /// Worker threads for `batch_validate`. `None` lets rayon decide.
    pub batch_threads: Option<usize>,
    /// Per-item time budget in milliseconds. An item over budget is
    /// reported as a degraded timeout result. Default: 5000.
    pub item_timeout_ms: Option<u64>,
}

impl ExecutionConfig {
    pub fn resolved_item_timeout_ms(&self) -> u64 {
        self.item_timeout_ms.unwrap_or(5_000)
    }

    pub fn resolved_parallel_rules(&self) -> bool {
        self.parallel_rules.unwrap_or(false)
    }
}
