use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{Error, Result};
use crate::paths;

const RULE_FILE: &str = ".gitignore";

/// Walk `root` and collect everything a local `.gitignore` file ignores.
///
/// Each rule file is evaluated only against the immediate children of the
/// directory that declares it, which is how git scopes `.gitignore` itself.
/// Matched entries are recorded relative to `root`, in the forward-slash
/// form rsync expects, with a trailing `/` on directories. A matched
/// directory is pruned: nothing beneath it is visited or listed.
pub fn exclusions(root: &Path) -> Result<BTreeSet<String>> {
    let mut excluded = BTreeSet::new();
    let mut frontier = vec![root.to_path_buf()];

    while let Some(dir) = frontier.pop() {
        let rules = load_rules(&dir)?;
        let mut descend = vec![];

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_dir = entry.file_type()?.is_dir();

            if matched(&rules, &path, is_dir) {
                debug!("Excluding {:?}", path);
                excluded.insert(exclude_entry(root, &path, is_dir));
            } else if is_dir {
                descend.push(path);
            }
        }

        frontier.extend(descend);
    }

    Ok(excluded)
}

/// A malformed rule file is a broken configuration, not something to paper
/// over, so it fails the run.
fn load_rules(dir: &Path) -> Result<Option<Gitignore>> {
    let rule_file = dir.join(RULE_FILE);
    if !rule_file.is_file() {
        return Ok(None);
    }

    let mut builder = GitignoreBuilder::new(dir);
    if let Some(err) = builder.add(&rule_file) {
        return Err(Error::Rules(err));
    }

    let rules = builder.build()?;
    debug!("Loaded {:?}", rule_file);
    Ok(Some(rules))
}

fn matched(rules: &Option<Gitignore>, path: &Path, is_dir: bool) -> bool {
    match rules {
        // The matcher is rooted at the declaring directory, so `path` is
        // tested by its name relative to that directory, and directory-only
        // patterns see the `is_dir` flag.
        Some(rules) => rules.matched(path, is_dir).is_ignore(),
        None => false,
    }
}

fn exclude_entry(root: &Path, path: &Path, is_dir: bool) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel.to_string_lossy();

    let mut entry = paths::to_slashes(&paths::to_portable(&rel));
    if is_dir && !entry.ends_with('/') {
        entry.push('/');
    }

    entry
}
