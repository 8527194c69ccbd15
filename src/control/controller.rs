//! The sample → evaluate → mutate → publish → cool-down loop.

use std::time::Duration;

use tokio::time::sleep;

use crate::chart::{ChartError, ReplicaChange, ValuesFile};
use crate::config::TunerConfig;
use crate::control::evaluator::is_breached;
use crate::control::state::CyclePhase;
use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;
use crate::publish::{CommandRunner, ProcessRunner, PublishReport, Publisher};
use crate::usage::{MetricsClient, MetricsError, Sample};

/// Everything that happened in one cycle.
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Phases entered, in order, ending with `CoolingDown`.
    pub phases: Vec<CyclePhase>,
    pub sample: Option<Sample>,
    /// Value compared against the threshold (0.0 without a signal).
    pub usage: f64,
    pub breached: bool,
    pub mutation: Option<Result<ReplicaChange, ChartError>>,
    pub publish: Option<PublishReport>,
}

impl CycleReport {
    pub fn mutated(&self) -> bool {
        matches!(self.mutation, Some(Ok(_)))
    }
}

/// Closed-loop controller for one workload and one chart.
pub struct Controller<R = ProcessRunner> {
    threshold: f64,
    interval: Duration,
    sampler: MetricsClient,
    values: ValuesFile,
    publisher: Option<Publisher<R>>,
}

impl Controller<ProcessRunner> {
    /// Build a controller that publishes through the system `git`.
    pub fn from_config(config: &TunerConfig) -> Result<Self, MetricsError> {
        Self::with_runner(config, ProcessRunner)
    }
}

impl<R: CommandRunner> Controller<R> {
    /// Build a controller with a custom command runner.
    pub fn with_runner(config: &TunerConfig, runner: R) -> Result<Self, MetricsError> {
        let sampler = MetricsClient::new(config.metrics.clone())?;
        let values = ValuesFile::new(config.chart.values_path(), config.chart.replica_field.clone());
        let publisher = config
            .publish
            .enabled
            .then(|| Publisher::new(config.chart.repo_path.clone(), config.publish.clone(), runner));

        Ok(Self {
            threshold: config.threshold,
            interval: Duration::from_secs(config.interval_secs),
            sampler,
            values,
            publisher,
        })
    }

    pub fn publisher(&self) -> Option<&Publisher<R>> {
        self.publisher.as_ref()
    }

    /// Run one cycle up to the cool-down pause.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();
        let mut phase = CyclePhase::Idle;

        loop {
            report.phases.push(phase);
            match phase {
                CyclePhase::Idle => tracing::info!("Starting usage check"),
                CyclePhase::Sampling => {
                    let sample = self.sampler.sample().await;
                    report.usage = sample.value();
                    tracing::info!(usage = report.usage, signal = sample.is_signal(), "Fetched usage for target");
                    report.sample = Some(sample);
                }
                CyclePhase::Evaluating => {
                    report.breached = is_breached(report.usage, self.threshold);
                    let has_signal = report.sample.as_ref().is_some_and(Sample::is_signal);
                    metrics::record_sample(report.usage, has_signal, report.breached);

                    if report.breached {
                        tracing::info!(usage = report.usage, threshold = self.threshold, "Threshold breached, updating values");
                    } else {
                        tracing::info!(usage = report.usage, threshold = self.threshold, "Usage below threshold, no update needed");
                    }
                }
                CyclePhase::Mutating => {
                    let result = self.values.increment_replicas();
                    match &result {
                        Ok(change) => {
                            tracing::info!(
                                path = %self.values.path().display(),
                                from = change.from,
                                to = change.to,
                                "Replica count incremented"
                            );
                            metrics::record_mutation(Some(change.to));
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to update values file");
                            metrics::record_mutation(None);
                        }
                    }
                    report.mutation = Some(result);
                }
                CyclePhase::Publishing => {
                    if let Some(publisher) = &self.publisher {
                        let outcome = publisher.publish().await;
                        for step in &outcome.steps {
                            metrics::record_publish_step(step.step.as_str(), step.result.is_ok());
                        }
                        report.publish = Some(outcome);
                    }
                }
                CyclePhase::CoolingDown => break,
            }
            phase = phase.next(report.breached, report.mutated() && self.publisher.is_some());
        }

        report
    }

    /// Run cycles until shutdown is signalled. The signal is only observed
    /// during the pause between cycles.
    pub async fn run(&self, mut shutdown: ShutdownListener) {
        tracing::info!(
            threshold = self.threshold,
            interval_secs = self.interval.as_secs(),
            values = %self.values.path().display(),
            publish = self.publisher.is_some(),
            "Control loop starting"
        );

        loop {
            self.run_cycle().await;

            tracing::debug!(secs = self.interval.as_secs(), "Cooling down");
            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = shutdown.wait() => {
                    tracing::info!("Control loop received shutdown signal, exiting");
                    break;
                }
            }
        }
    }
}
