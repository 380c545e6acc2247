mod args;
mod error;
mod lister;
mod matcher;
mod output;

pub use args::{Args, Invocation};
pub use error::{Error, ValidationError};
pub use lister::{ChangeLister, CommitRange, GithubLister, EMPTY_COMMIT};
pub use matcher::{aggregate, matches, Matcher, PatternSet};
pub use output::{write_output, MATCH_SEEN};

/// Validate the arguments, list the changed files on GitHub and record whether
/// any of them is of interest.
pub async fn exec(args: &Args) -> Result<bool, Error> {
    let invocation = args.validate()?;
    let lister = GithubLister::new(&invocation.token, invocation.server.as_deref())?;
    run(&lister, &invocation).await
}

/// List the changed files of a validated invocation and append the decision to
/// its output file. Nothing is written if listing fails.
pub async fn run(
    lister: &(impl ChangeLister + Sync),
    invocation: &Invocation,
) -> Result<bool, Error> {
    let listing = lister.changed_files(&invocation.range);
    let files = match invocation.timeout {
        Some(timeout) => tokio::time::timeout(timeout, listing)
            .await
            .map_err(|_| Error::Timeout(timeout))??,
        None => listing.await?,
    };

    let mut match_seen = false;
    for file in invocation.matcher.matched_files(&files) {
        tracing::info!("match seen for file {file}");
        match_seen = true;
    }

    write_output(&invocation.output, MATCH_SEEN, &match_seen.to_string())?;
    Ok(match_seen)
}

#[cfg(test)]
mod testing;
