use std::{path::PathBuf, time::Duration};

use clap::Parser as ClapParser;

use crate::{
    error::{Error, ValidationError},
    lister::CommitRange,
    matcher::{Matcher, PatternSet},
};

/// Plugin arguments, read from the pipeline environment.
///
/// Every setting is optional at parse time so that validation can report all
/// missing values at once.
#[derive(ClapParser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Glob patterns selecting the changed files of interest. Without any,
    /// every changed file that isn't excluded is of interest.
    #[arg(long, env = "PLUGIN_INCLUDE", value_delimiter = ',')]
    pub include: Vec<String>,

    /// Glob patterns for changed files to ignore. Exclusion always wins over
    /// inclusion.
    #[arg(long, env = "PLUGIN_EXCLUDE", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Token used to authenticate with GitHub.
    #[arg(long, env = "PLUGIN_GITHUB_TOKEN", default_value = "", hide_env_values = true)]
    pub github_token: String,

    /// GitHub Enterprise server. By default, the public GitHub API is used.
    #[arg(long, env = "PLUGIN_GITHUB_SERVER", default_value = "")]
    pub github_server: String,

    /// Repository slug, `owner/name`.
    #[arg(long, env = "DRONE_REPO", default_value = "")]
    pub repo: String,

    /// The revision to compare against.
    #[arg(long, env = "DRONE_COMMIT_BEFORE", default_value = "")]
    pub commit_before: String,

    /// The revision to compare with.
    #[arg(long, env = "DRONE_COMMIT_AFTER", default_value = "")]
    pub commit_after: String,

    /// File the `MATCH_SEEN` output variable is appended to.
    #[arg(long, env = "DRONE_OUTPUT", default_value = "")]
    pub output: String,

    /// Log level.
    #[arg(long, env = "PLUGIN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Seconds allowed for listing the changed files. Zero disables the limit.
    #[arg(long, env = "PLUGIN_TIMEOUT", default_value_t = 60)]
    pub timeout: u64,
}

/// A validated invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub matcher: Matcher,
    pub range: CommitRange,
    pub output: PathBuf,
    pub token: String,
    pub server: Option<String>,
    pub timeout: Option<Duration>,
}

impl Args {
    /// Check the arguments, reporting every problem in a fixed order.
    pub fn validate(&self) -> Result<Invocation, Error> {
        let include = non_empty(&self.include);
        let exclude = non_empty(&self.exclude);

        let mut errors = Vec::new();
        if self.github_token.is_empty() {
            errors.push(ValidationError::MissingToken);
        }
        if include.is_empty() && exclude.is_empty() {
            errors.push(ValidationError::MissingPatterns);
        }
        if self.output.is_empty() {
            errors.push(ValidationError::MissingOutput);
        }
        if self.commit_before.is_empty() {
            errors.push(ValidationError::MissingCommitBefore);
        }
        if self.commit_after.is_empty() {
            errors.push(ValidationError::MissingCommitAfter);
        }
        if self.repo.is_empty() {
            errors.push(ValidationError::MissingRepo);
        }
        if !errors.is_empty() {
            return Err(Error::Invalid(errors));
        }

        Ok(Invocation {
            matcher: Matcher::new(PatternSet::new(exclude), PatternSet::new(include)),
            range: CommitRange {
                repo: self.repo.clone(),
                before: self.commit_before.clone(),
                after: self.commit_after.clone(),
            },
            output: PathBuf::from(&self.output),
            token: self.github_token.clone(),
            server: Some(self.github_server.trim_end_matches('/'))
                .filter(|server| !server.is_empty())
                .map(str::to_owned),
            timeout: Some(self.timeout)
                .filter(|&seconds| seconds > 0)
                .map(Duration::from_secs),
        })
    }
}

/// Drop blank entries, e.g. from a trailing comma in the environment.
fn non_empty(patterns: &[String]) -> Vec<&str> {
    patterns
        .iter()
        .map(|pattern| pattern.trim())
        .filter(|pattern| !pattern.is_empty())
        .collect()
}
