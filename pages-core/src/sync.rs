//! Reconciliation between the repository universe and the deployment tree
//!
//! Two entry points: a periodic full sync over every repository, and a
//! fast single-repository sync driven by push notifications. Both take
//! the same process-wide lock, so at most one pass of either kind touches
//! the deployment tree at a time.

use tokio::sync::Mutex;

use crate::deploy::DeployTree;
use crate::source::SourceTree;
use crate::{RepoName, Result};

/// The reconciliation engine
///
/// Holds the two directory trees and the lock serializing all passes.
/// Shared by reference between the periodic task and the webhook handler;
/// there is no ambient singleton.
#[derive(Debug)]
pub struct SyncEngine {
    source: SourceTree,
    deploy: DeployTree,
    lock: Mutex<()>,
}

impl SyncEngine {
    /// Create an engine over a source tree and a deployment tree
    pub fn new(source: SourceTree, deploy: DeployTree) -> Self {
        Self {
            source,
            deploy,
            lock: Mutex::new(()),
        }
    }

    /// Reconcile every repository against the deployment tree
    ///
    /// Removal of stale deployments runs first, then every repository with
    /// a publish branch is re-materialized unconditionally. The refresh is
    /// not a change-detection optimization: re-running it converges the
    /// tree even after a partially failed earlier pass. Per-repository
    /// failures are logged and skipped; only a failed enumeration aborts
    /// the pass, because the universe itself is then unknown.
    pub async fn full_sync(&self) -> Result<()> {
        let _guard = self.lock.lock().await;

        tracing::info!("running full sync");

        let available = self.source.available()?;
        let deployed = self.deploy.deployed()?;

        // Drop deployments whose repository or publish branch is gone
        for name in &deployed {
            if !available.contains(name) {
                tracing::info!(repo = %name, "removing deployment, repository is gone");
                self.remove_site(name);
                continue;
            }

            if !self.source.branch_state(name).is_present() {
                tracing::info!(
                    repo = %name,
                    branch = self.source.branch(),
                    "removing deployment, publish branch is gone"
                );
                self.remove_site(name);
                continue;
            }

            tracing::debug!(repo = %name, "deployment ok");
        }

        // Refresh every repository that has the publish branch
        for name in &available {
            if !self.source.branch_state(name).is_present() {
                continue;
            }
            self.write_site(name);
        }

        Ok(())
    }

    /// Reconcile a single repository, typically on a push notification
    ///
    /// Gates on branch existence the same way the full pass does, so a
    /// notification for a repository whose publish branch was deleted
    /// removes the stale deployment immediately instead of waiting for
    /// the next periodic pass. Best effort: outcomes are logged, never
    /// surfaced to the notifier.
    pub async fn sync_repo(&self, name: &RepoName) {
        let _guard = self.lock.lock().await;

        if !self.source.exists(name) {
            tracing::info!(repo = %name, "removing deployment, repository is gone");
            self.remove_site(name);
            return;
        }

        if !self.source.branch_state(name).is_present() {
            tracing::info!(
                repo = %name,
                branch = self.source.branch(),
                "removing deployment, publish branch is gone"
            );
            self.remove_site(name);
            return;
        }

        self.write_site(name);
    }

    /// Materialize one deployment; failures are logged, never fatal
    fn write_site(&self, name: &RepoName) {
        let repo = match self.source.open(name) {
            Ok(repo) => repo,
            Err(e) => {
                tracing::warn!(repo = %name, error = %e, "failed to open repository");
                return;
            }
        };

        if let Err(e) = self.deploy.materialize(name, &repo, self.source.branch()) {
            tracing::warn!(repo = %name, error = %e, "failed to update deployment");
        } else {
            tracing::info!(repo = %name, "deployment updated");
        }
    }

    /// Remove one deployment; failures are logged, never fatal
    fn remove_site(&self, name: &RepoName) {
        if let Err(e) = self.deploy.remove(name) {
            tracing::warn!(repo = %name, error = %e, "failed to remove deployment");
        }
    }
}
