//! Discovery engine orchestrating enumeration passes.
//!
//! One pass streams one wordlist against the target; the engine decides which
//! wordlists run (a specific category, an explicit file, or every registered
//! category) and aggregates their findings.

use crate::console::ConsoleOutput;
use crate::probe::Probe;
use crate::registry::{CategoryRegistry, ALL_CATEGORIES};
use crate::types::{AdfindError, DiscoveryResult, Finding, PassResult, ProbeOutcome, Result};
use crate::wordlist::Wordlist;
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Operator verdict after a hit, when the stop-on-find policy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Resume enumeration with the next candidate.
    Continue,
    /// Terminate the run immediately; no further candidate is probed.
    Halt,
}

/// Pluggable decision source consulted synchronously on every hit.
///
/// The binary installs a stdin prompt; tests install scripted answers.
pub trait FoundDecision: Send + Sync {
    fn on_found(&self, finding: &Finding) -> Verdict;
}

/// Main engine that turns a target, a category selector, and wordlists into
/// a set of reachable URLs.
pub struct DiscoveryEngine {
    registry: CategoryRegistry,
    probe: Arc<dyn Probe>,
    console: ConsoleOutput,
    decision: Option<Arc<dyn FoundDecision>>,
    concurrency: usize,
    cancel: CancellationToken,
}

impl DiscoveryEngine {
    pub fn new(registry: CategoryRegistry, probe: Arc<dyn Probe>, console: ConsoleOutput) -> Self {
        Self {
            registry,
            probe,
            console,
            decision: None,
            concurrency: 1,
            cancel: CancellationToken::new(),
        }
    }

    /// Install the stop-on-find decision source. Forces sequential probing:
    /// the policy needs a single synchronous decision point, so it is
    /// mutually exclusive with `with_concurrency`.
    pub fn with_stop_policy(mut self, decision: Arc<dyn FoundDecision>) -> Self {
        self.decision = Some(decision);
        self.concurrency = 1;
        self
    }

    /// Bounded number of in-flight probes within a pass. Ignored while a
    /// stop policy is installed.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        if self.decision.is_none() {
            self.concurrency = concurrency.max(1);
        }
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run discovery against `target`.
    ///
    /// - a specific registered category runs one pass over its wordlist;
    /// - `"all"` with an explicit wordlist runs one pass over that file,
    ///   bypassing the registry;
    /// - bare `"all"` runs one pass per registered category and returns the
    ///   union; a category whose pass fails is logged and skipped.
    pub async fn discover(
        &self,
        target: &str,
        category: &str,
        wordlist_override: Option<&Path>,
    ) -> Result<DiscoveryResult> {
        let start = Instant::now();
        let target = normalize_target(target)?;

        if category != ALL_CATEGORIES && !self.registry.contains(category) {
            return Err(AdfindError::UnknownCategory {
                category: category.to_string(),
            });
        }

        self.console.print_scan_start(&target);

        let mut found: Vec<Finding> = Vec::new();
        let mut errors: Vec<String> = Vec::new();
        let mut passes_completed = 0;
        let mut halted = false;

        if category != ALL_CATEGORIES {
            let path = self.registry.wordlist_path(category)?;
            let pass = self.enumerate(&target, &path).await?;
            absorb_pass(pass, &mut found, &mut errors, &mut passes_completed, &mut halted);
        } else if let Some(path) = wordlist_override {
            let pass = self.enumerate(&target, path).await?;
            absorb_pass(pass, &mut found, &mut errors, &mut passes_completed, &mut halted);
        } else {
            // One broken category file must not block findings in the others.
            for cat in self.registry.categories() {
                let path = match self.registry.wordlist_path(cat) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!("skipping category {}: {}", cat, e);
                        errors.push(format!("category {}: {}", cat, e));
                        continue;
                    }
                };

                self.console
                    .print_progress(&format!("category {}: {}", cat, path.display()));

                match self.enumerate(&target, &path).await {
                    Ok(pass) => {
                        absorb_pass(pass, &mut found, &mut errors, &mut passes_completed, &mut halted);
                        if halted {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("skipping category {}: {}", cat, e);
                        errors.push(format!("category {}: {}", cat, e));
                    }
                }

                if self.cancel.is_cancelled() {
                    break;
                }
            }
        }

        Ok(DiscoveryResult {
            target,
            found,
            passes_completed,
            errors,
            halted,
            duration_secs: start.elapsed().as_secs_f64(),
        })
    }

    /// Run one enumeration pass over a single wordlist.
    async fn enumerate(&self, target: &str, wordlist_path: &Path) -> Result<PassResult> {
        let wordlist = Wordlist::open(wordlist_path).await?;

        if self.concurrency > 1 {
            self.enumerate_concurrent(target, wordlist).await
        } else {
            self.enumerate_sequential(target, wordlist).await
        }
    }

    /// Strictly sequential pass: one probe in flight, findings in wordlist
    /// order, the stop policy consulted after every hit.
    async fn enumerate_sequential(&self, target: &str, mut wordlist: Wordlist) -> Result<PassResult> {
        let mut result = PassResult::default();
        let spinner = self.console.create_spinner();

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let entry = match wordlist.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    // Findings accumulated before the error survive.
                    warn!("error reading wordlist: {}", e);
                    result.read_error = Some(e.to_string());
                    break;
                }
            };

            let url = format!("{}/{}", target, entry);
            if let Some(ref spinner) = spinner {
                spinner.set_message(url.clone());
                spinner.tick();
            }

            match self.probe.check(&url).await {
                ProbeOutcome::Reachable { status } => {
                    let finding = Finding { url, status };
                    self.console.print_finding(&finding);
                    result.found.push(finding);

                    if let Some(ref decision) = self.decision {
                        let last = result.found.last().unwrap();
                        if decision.on_found(last) == Verdict::Halt {
                            result.halted = true;
                            break;
                        }
                    }
                }
                ProbeOutcome::Unreachable { status } => {
                    debug!("not found: {} ({})", url, status);
                }
                ProbeOutcome::TransportError { error } => {
                    // A flaky probe must not lose the rest of the wordlist.
                    debug!("probe failed for {}: {}", url, error);
                }
            }
        }

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        Ok(result)
    }

    /// Bounded-parallel pass. Probes run unordered; findings are re-sorted by
    /// wordlist position so the result is execution-order independent.
    async fn enumerate_concurrent(&self, target: &str, mut wordlist: Wordlist) -> Result<PassResult> {
        let mut result = PassResult::default();

        let mut entries: Vec<(usize, String)> = Vec::new();
        loop {
            match wordlist.next_entry().await {
                Ok(Some(entry)) => entries.push((entries.len(), entry)),
                Ok(None) => break,
                Err(e) => {
                    warn!("error reading wordlist: {}", e);
                    result.read_error = Some(e.to_string());
                    break;
                }
            }
        }

        let probe = &self.probe;
        let cancel = &self.cancel;

        let mut hits: Vec<(usize, Finding)> = stream::iter(entries)
            .map(|(position, entry)| {
                let url = format!("{}/{}", target, entry);
                async move {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    match probe.check(&url).await {
                        ProbeOutcome::Reachable { status } => {
                            Some((position, Finding { url, status }))
                        }
                        ProbeOutcome::Unreachable { status } => {
                            debug!("not found: {} ({})", url, status);
                            None
                        }
                        ProbeOutcome::TransportError { error } => {
                            debug!("probe failed for {}: {}", url, error);
                            None
                        }
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|hit| async move { hit })
            .collect()
            .await;

        hits.sort_by_key(|(position, _)| *position);
        for (_, finding) in hits {
            self.console.print_finding(&finding);
            result.found.push(finding);
        }

        Ok(result)
    }
}

fn absorb_pass(
    pass: PassResult,
    found: &mut Vec<Finding>,
    errors: &mut Vec<String>,
    passes_completed: &mut usize,
    halted: &mut bool,
) {
    found.extend(pass.found);
    *passes_completed += 1;
    *halted |= pass.halted;
    if let Some(read_error) = pass.read_error {
        errors.push(format!("wordlist read error: {}", read_error));
    }
}

/// Validate the target and strip trailing slashes so concatenation never
/// produces a double slash.
fn normalize_target(target: &str) -> Result<String> {
    let trimmed = target.trim_end_matches('/');
    url::Url::parse(trimmed)?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_target("http://example.com/").unwrap(),
            "http://example.com"
        );
        assert_eq!(
            normalize_target("http://example.com///").unwrap(),
            "http://example.com"
        );
        assert_eq!(
            normalize_target("http://example.com").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn normalize_rejects_relative_urls() {
        assert!(normalize_target("example.com/admin").is_err());
    }
}
