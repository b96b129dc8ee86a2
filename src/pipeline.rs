//! Effect pipeline
//!
//! Compilation resolves every named effect and validates its parameters up
//! front; execution threads one image through the compiled steps in order.
//! A step that cannot be resolved, validated, or run is warned about and
//! skipped - the pipeline always continues from the last good image, and the
//! outcome of every step is recorded in a `RunReport`.

use crate::buffer::ImageBuffer;
use crate::config::BatchConfig;
use crate::effects::{EffectRegistry, EffectStep};
use crate::rng::RandomSource;
use log::{info, warn};

enum CompiledStep {
    /// Resolved and validated, ready to run.
    Ready {
        name: String,
        step: Box<dyn EffectStep>,
    },
    /// Name not present in the registry.
    Unresolved { name: String },
    /// Resolved, but parameter validation failed.
    Invalid { name: String, reason: String },
}

/// Outcome of one pipeline step against one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Applied,
    /// Effect name unknown; image passed through untouched.
    SkippedUnknown,
    /// Parameters invalid or execution failed; image passed through untouched.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
}

/// Per-step diagnostics for one run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
}

impl RunReport {
    fn record(&mut self, name: &str, status: StepStatus) {
        self.steps.push(StepReport {
            name: name.to_string(),
            status,
        });
    }

    /// Number of steps that actually modified the image.
    pub fn applied(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Applied)
            .count()
    }

    pub fn all_applied(&self) -> bool {
        self.applied() == self.steps.len()
    }
}

/// An ordered, compiled sequence of effect invocations.
pub struct Pipeline {
    steps: Vec<CompiledStep>,
}

impl Pipeline {
    /// Resolve and validate every entry of `effects_order` against the
    /// registry. Resolution and validation failures are kept as inert steps
    /// (warned once here, again per run) so execution order and diagnostics
    /// stay faithful to the configured order.
    pub fn compile(config: &BatchConfig, registry: &EffectRegistry) -> Self {
        let steps = config
            .effects_order
            .iter()
            .map(|name| match registry.resolve(name) {
                None => {
                    warn!("effect '{}' not found, it will be skipped", name);
                    CompiledStep::Unresolved { name: name.clone() }
                },
                Some(effect) => match effect.prepare(&config.params_for(name)) {
                    Ok(step) => CompiledStep::Ready {
                        name: name.clone(),
                        step,
                    },
                    Err(e) => {
                        warn!("{}, the step will be skipped", e);
                        CompiledStep::Invalid {
                            name: name.clone(),
                            reason: e.to_string(),
                        }
                    },
                },
            })
            .collect();
        Self { steps }
    }

    /// Number of compiled steps (including inert ones).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run the pipeline over one image.
    ///
    /// Each ready step executes against a working copy; on failure the copy
    /// is discarded and the previous image carries forward, so one bad effect
    /// never destroys already-applied results.
    pub fn run(&self, image: ImageBuffer, rng: &mut RandomSource) -> (ImageBuffer, RunReport) {
        let mut current = image;
        let mut report = RunReport::default();

        for step in &self.steps {
            match step {
                CompiledStep::Unresolved { name } => {
                    warn!("skipping unknown effect '{}'", name);
                    report.record(name, StepStatus::SkippedUnknown);
                },
                CompiledStep::Invalid { name, reason } => {
                    warn!("skipping effect '{}': {}", name, reason);
                    report.record(name, StepStatus::Failed(reason.clone()));
                },
                CompiledStep::Ready { name, step } => {
                    let mut candidate = current.clone();
                    match step.run(&mut candidate, rng) {
                        Ok(()) => {
                            info!("applied effect '{}'", name);
                            current = candidate;
                            report.record(name, StepStatus::Applied);
                        },
                        Err(e) => {
                            warn!("effect '{}' failed: {}", name, e);
                            report.record(name, StepStatus::Failed(e.to_string()));
                        },
                    }
                },
            }
        }

        (current, report)
    }
}
