mod github;

use std::future::Future;

pub use github::GithubLister;

use crate::error::Error;

/// Revision used by pipelines for the parent of a repository's first commit.
pub const EMPTY_COMMIT: &str = "0000000000000000000000000000000000000000";

/// The commits bounding a change set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    pub repo: String,
    pub before: String,
    pub after: String,
}

impl CommitRange {
    /// Check if there is no prior state to compare against.
    pub fn is_initial(&self) -> bool {
        self.before.is_empty() || self.before == EMPTY_COMMIT
    }
}

pub trait ChangeLister {
    /// List the files of a single revision.
    fn list_all(
        &self,
        repo: &str,
        revision: &str,
    ) -> impl Future<Output = Result<Vec<String>, Error>> + Send;

    /// List the files changed between two revisions.
    fn list_changed(
        &self,
        repo: &str,
        before: &str,
        after: &str,
    ) -> impl Future<Output = Result<Vec<String>, Error>> + Send;

    /// List the files changed by a commit range.
    ///
    /// Without a prior revision every file of `after` counts as changed.
    fn changed_files(
        &self,
        range: &CommitRange,
    ) -> impl Future<Output = Result<Vec<String>, Error>> + Send
    where
        Self: Sync,
    {
        async move {
            if range.is_initial() {
                tracing::debug!("listing files of {} in {}", range.after, range.repo);
                self.list_all(&range.repo, &range.after).await
            } else {
                tracing::debug!(
                    "listing files changed between {} and {} in {}",
                    range.before,
                    range.after,
                    range.repo
                );
                self.list_changed(&range.repo, &range.before, &range.after)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingLister {
        calls: Mutex<Vec<String>>,
    }

    impl ChangeLister for RecordingLister {
        async fn list_all(&self, repo: &str, revision: &str) -> Result<Vec<String>, Error> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("all {repo} {revision}"));
            Ok(vec!["a.go".into()])
        }

        async fn list_changed(
            &self,
            repo: &str,
            before: &str,
            after: &str,
        ) -> Result<Vec<String>, Error> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("changed {repo} {before}...{after}"));
            Ok(vec!["b.go".into()])
        }
    }

    fn range(before: &str) -> CommitRange {
        CommitRange {
            repo: "octocat/hello-world".into(),
            before: before.into(),
            after: "abc123".into(),
        }
    }

    #[tokio::test]
    async fn test_changed_files_empty_commit() {
        let lister = RecordingLister::default();
        assert_eq!(lister.changed_files(&range(EMPTY_COMMIT)).await.unwrap(), ["a.go"]);
        assert_eq!(lister.changed_files(&range("")).await.unwrap(), ["a.go"]);
        insta::assert_debug_snapshot!(lister.calls.lock().unwrap(), @r###"
        [
            "all octocat/hello-world abc123",
            "all octocat/hello-world abc123",
        ]
        "###);
    }

    #[tokio::test]
    async fn test_changed_files_compare() {
        let lister = RecordingLister::default();
        assert_eq!(lister.changed_files(&range("6dcb09b")).await.unwrap(), ["b.go"]);
        insta::assert_debug_snapshot!(lister.calls.lock().unwrap(), @r###"
        [
            "changed octocat/hello-world 6dcb09b...abc123",
        ]
        "###);
    }
}
