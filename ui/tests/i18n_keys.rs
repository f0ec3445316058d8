//! Translation key checks.
//!
//! - Every `t!("...")` literal used under `src/` exists in the fallback bundle.
//! - Every locale folder defines all fallback keys, with no duplicates.
//!
//! The FTL parsing is a line heuristic: `key = ...` lines are messages,
//! comments, terms and attribute or continuation lines are skipped.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "fingerfit-ui.ftl";
const FALLBACK: &str = "en-US";

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Message ids in file order, duplicates kept.
fn message_ids(src: &str) -> Vec<String> {
    src.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| !line.starts_with('-') && !line.starts_with('.'))
        .filter_map(|line| {
            let id = line[..line.find('=')?].trim();
            (!id.is_empty() && id.chars().all(valid_key_char)).then(|| id.to_string())
        })
        .collect()
}

fn read_locale(i18n_root: &Path, locale: &str) -> String {
    let path = i18n_root.join(locale).join(FTL_FILENAME);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("cannot read {path:?}: {err}"))
}

fn locale_dirs(i18n_root: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = fs::read_dir(i18n_root)
        .expect("i18n directory readable")
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.contains('-'))
        .collect();
    dirs.sort();
    dirs
}

/// First literal argument of every `t!("...")` call in the given tree.
fn referenced_keys(src_root: &Path) -> BTreeSet<String> {
    let needle = "t!(\"";
    let mut found = BTreeSet::new();
    let mut stack = vec![src_root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        let mut rest = content.as_str();
        while let Some(pos) = rest.find(needle) {
            rest = &rest[pos + needle.len()..];
            if let Some(end) = rest.find('"') {
                let key = &rest[..end];
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
                rest = &rest[end..];
            }
        }
    }

    found
}

fn i18n_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("i18n")
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let fallback: HashSet<String> = message_ids(&read_locale(&i18n_root(), FALLBACK))
        .into_iter()
        .collect();
    assert!(!fallback.is_empty(), "fallback bundle has no messages");

    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let referenced = referenced_keys(&src_root);
    assert!(
        referenced.contains("login-submit"),
        "key scan found nothing; did the macro name change?"
    );

    let missing: Vec<_> = referenced
        .iter()
        .filter(|key| !fallback.contains(*key))
        .cloned()
        .collect();
    assert!(
        missing.is_empty(),
        "keys used in src/ but missing from {FALLBACK}:\n  {}",
        missing.join("\n  ")
    );
}

#[test]
fn every_locale_has_all_fallback_keys() {
    let root = i18n_root();
    let fallback: BTreeSet<String> = message_ids(&read_locale(&root, FALLBACK))
        .into_iter()
        .collect();

    let locales = locale_dirs(&root);
    assert!(locales.len() > 1, "expected at least one locale besides {FALLBACK}");

    let mut failures = Vec::new();
    for locale in &locales {
        let keys: BTreeSet<String> = message_ids(&read_locale(&root, locale)).into_iter().collect();
        let missing: Vec<_> = fallback.difference(&keys).cloned().collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing:\n  {}", missing.join("\n  ")));
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}

#[test]
fn no_locale_defines_a_key_twice() {
    let root = i18n_root();
    for locale in locale_dirs(&root) {
        let mut seen = HashSet::new();
        let dups: Vec<_> = message_ids(&read_locale(&root, &locale))
            .into_iter()
            .filter(|id| !seen.insert(id.clone()))
            .collect();
        assert!(dups.is_empty(), "duplicate keys in {locale}: {dups:?}");
    }
}
