//! `logs`: fetch Robusta runner logs through kubectl.

use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::debug;

/// Deployment and container the runner logs come from.
const RUNNER_DEPLOYMENT: &str = "deployment/robusta-runner";
const RUNNER_CONTAINER: &str = "runner";

/// Fetch Robusta runner logs
#[derive(Args, Debug, Default)]
pub struct LogsCommand {
    /// Namespace Robusta is installed in
    #[arg(long, env = "ROBUSTA_NAMESPACE")]
    namespace: Option<String>,

    /// Stream runner logs
    #[arg(short = 'f', long = "follow")]
    follow: bool,

    /// Only return logs newer than a relative duration like 5s, 2m, or 3h
    #[arg(long)]
    since: Option<String>,

    /// Lines of recent log file to display
    #[arg(long)]
    tail: Option<u32>,

    /// The name of the kubeconfig context to use
    #[arg(long)]
    context: Option<String>,
}

impl LogsCommand {
    /// Arguments passed to `kubectl`.
    #[must_use]
    pub fn kubectl_args(&self) -> Vec<String> {
        let mut args = vec!["logs".to_string()];
        if self.follow {
            args.push("-f".into());
        }
        if let Some(namespace) = &self.namespace {
            args.push(format!("--namespace={namespace}"));
        }
        args.push(RUNNER_DEPLOYMENT.into());
        args.push("-c".into());
        args.push(RUNNER_CONTAINER.into());
        if let Some(since) = &self.since {
            args.push(format!("--since={since}"));
        }
        if let Some(tail) = self.tail {
            args.push(format!("--tail={tail}"));
        }
        if let Some(context) = &self.context {
            args.push(format!("--context={context}"));
        }
        args
    }

    /// Run kubectl with the terminal attached.
    ///
    /// # Errors
    ///
    /// Returns an error if kubectl cannot be started or exits unsuccessfully.
    pub fn run(&self) -> Result<()> {
        let args = self.kubectl_args();
        debug!(?args, "Running kubectl");

        let status = Command::new("kubectl")
            .args(&args)
            .status()
            .context("Failed to run kubectl. Is it installed and on PATH?")?;

        if !status.success() {
            bail!("kubectl logs failed ({status})");
        }
        Ok(())
    }
}
