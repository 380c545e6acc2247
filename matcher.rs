use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

/// A set of compiled glob patterns.
///
/// Malformed patterns are kept out of the compiled set but still count toward
/// [`PatternSet::is_empty`], so a set made only of bad patterns matches nothing
/// rather than everything.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    len: usize,
    patterns: GlobSet,
}

impl PatternSet {
    pub fn new(patterns: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let mut len = 0;
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            len += 1;
            let pattern = pattern.as_ref();
            match glob(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(error) => tracing::warn!("ignoring malformed pattern {pattern:?}: {error}"),
            }
        }
        let patterns = builder.build().unwrap_or_else(|error| {
            tracing::warn!("ignoring patterns that failed to compile: {error}");
            GlobSet::empty()
        });
        Self { len, patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if any pattern in the set matches the path.
    pub fn is_match(&self, path: &str) -> bool {
        self.patterns.is_match(path)
    }
}

/// `*`, `?` and classes stay within a path component, `**` crosses them and
/// leading dots are not special.
fn glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
}

/// Include and exclude pattern sets compiled once per invocation.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    exclude: PatternSet,
    include: PatternSet,
}

impl Matcher {
    pub fn new(exclude: PatternSet, include: PatternSet) -> Self {
        Self { exclude, include }
    }

    /// Check if a changed file is of interest.
    ///
    /// Exclusion always wins. Without include patterns every file that isn't
    /// excluded is of interest.
    pub fn matches(&self, file: &str) -> bool {
        if self.exclude.is_match(file) {
            return false;
        }
        self.include.is_match(file) || self.include.is_empty()
    }

    /// Iterate over the files that are of interest, in their original order.
    pub fn matched_files<'a, S: AsRef<str> + 'a>(
        &'a self,
        files: impl IntoIterator<Item = &'a S> + 'a,
    ) -> impl Iterator<Item = &'a str> + 'a {
        files
            .into_iter()
            .map(|file| file.as_ref())
            .filter(|file| self.matches(file))
    }

    /// Check if any of the files is of interest.
    pub fn any_match(&self, files: &[impl AsRef<str>]) -> bool {
        files.iter().any(|file| self.matches(file.as_ref()))
    }
}

/// Check a single file against raw exclude and include patterns.
pub fn matches(exclude: &[impl AsRef<str>], include: &[impl AsRef<str>], file: &str) -> bool {
    Matcher::new(PatternSet::new(exclude), PatternSet::new(include)).matches(file)
}

/// Check if any of the files matches the raw exclude and include patterns.
pub fn aggregate(
    exclude: &[impl AsRef<str>],
    include: &[impl AsRef<str>],
    files: &[impl AsRef<str>],
) -> bool {
    Matcher::new(PatternSet::new(exclude), PatternSet::new(include)).any_match(files)
}
