//! Shell-style globs. `*` also crosses `/`, so a single pattern can match raw
//! symbols and nested document paths alike.

use crate::error::Result;
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

fn glob(pattern: &str) -> Result<Glob> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(false)
        .backslash_escape(true)
        .build()?)
}

pub fn glob_matcher(pattern: &str) -> Result<GlobMatcher> {
    Ok(glob(pattern)?.compile_matcher())
}

pub fn glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(glob(pattern.as_ref())?);
    }
    Ok(builder.build()?)
}
