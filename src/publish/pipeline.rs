//! The add → commit → push sequence.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::PublishConfig;
use crate::publish::runner::{git_args, CommandRunner};

/// One git invocation in the publish sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishStep {
    Add,
    Commit,
    Push,
}

impl PublishStep {
    pub const ALL: [PublishStep; 3] = [PublishStep::Add, PublishStep::Commit, PublishStep::Push];

    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStep::Add => "add",
            PublishStep::Commit => "commit",
            PublishStep::Push => "push",
        }
    }
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a step did not succeed.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The git binary could not be started.
    #[error("failed to spawn git: {0}")]
    Spawn(#[from] std::io::Error),

    /// git ran and reported failure.
    #[error("git exited with {}: {output}", describe_status(.status))]
    Failed { status: Option<i32>, output: String },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "signal".to_string(),
    }
}

/// Outcome of one step. `Ok` carries the command's combined output.
#[derive(Debug)]
pub struct StepOutcome {
    pub step: PublishStep,
    pub result: Result<String, PublishError>,
}

/// Ordered outcomes of a publish attempt.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub steps: Vec<StepOutcome>,
}

impl PublishReport {
    /// Every step ran and succeeded.
    pub fn is_complete(&self) -> bool {
        self.steps.len() == PublishStep::ALL.len() && self.steps.iter().all(|s| s.result.is_ok())
    }

    pub fn failed_steps(&self) -> Vec<PublishStep> {
        self.steps
            .iter()
            .filter(|s| s.result.is_err())
            .map(|s| s.step)
            .collect()
    }

    pub fn outcome(&self, step: PublishStep) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.step == step)
    }
}

/// Propagates chart changes to the remote repository.
pub struct Publisher<R> {
    repo: PathBuf,
    config: PublishConfig,
    runner: R,
}

impl<R: CommandRunner> Publisher<R> {
    pub fn new(repo: impl Into<PathBuf>, config: PublishConfig, runner: R) -> Self {
        Self {
            repo: repo.into(),
            config,
            runner,
        }
    }

    /// Arguments passed to `git` for a step.
    pub fn args_for(&self, step: PublishStep) -> Vec<String> {
        match step {
            PublishStep::Add => git_args(&self.repo, &["add", "."]),
            PublishStep::Commit => git_args(&self.repo, &["commit", "-m", self.config.commit_message.as_str()]),
            PublishStep::Push => {
                let mut args = vec!["push"];
                if let Some(remote) = self.config.remote.as_deref() {
                    args.push(remote);
                    if let Some(branch) = self.config.branch.as_deref() {
                        args.push(branch);
                    }
                }
                git_args(&self.repo, &args)
            }
        }
    }

    /// Run add, commit and push in order. A failed step does not stop the
    /// following ones and nothing is rolled back.
    pub async fn publish(&self) -> PublishReport {
        tracing::info!(repo = %self.repo.display(), "Committing and pushing chart change");

        let mut report = PublishReport::default();
        for step in PublishStep::ALL {
            let args = self.args_for(step);
            tracing::debug!(step = %step, args = ?args, "Running git");

            let result = match self.runner.run("git", &args).await {
                Ok(out) if out.success() => {
                    tracing::info!(step = %step, output = %out.output.trim(), "git step succeeded");
                    Ok(out.output)
                }
                Ok(out) => {
                    let err = PublishError::Failed {
                        status: out.status,
                        output: out.output,
                    };
                    tracing::error!(step = %step, error = %err, "git step failed");
                    Err(err)
                }
                Err(e) => {
                    tracing::error!(step = %step, error = %e, "git step could not start");
                    Err(PublishError::Spawn(e))
                }
            };

            report.steps.push(StepOutcome { step, result });
        }

        if report.is_complete() {
            tracing::info!("Chart change published");
        } else {
            tracing::warn!(failed = ?report.failed_steps(), "Chart change partially published");
        }
        report
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}
