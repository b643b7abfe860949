//! Lexical path helpers.
//!
//! Outputs may not exist yet when paths are compared, so nothing here touches
//! the filesystem: `..` and `.` are folded purely on components.

use std::path::{Component, Path, PathBuf};

/// Folds `.` and `..` components without consulting the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Joins `rel` onto `base` unless it is already absolute, then normalizes.
pub fn resolve_against(base: &Path, rel: &Path) -> PathBuf {
    if rel.is_absolute() {
        normalize(rel)
    } else {
        normalize(&base.join(rel))
    }
}

/// Makes `path` absolute against the process working directory.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    Ok(normalize(&std::path::absolute(path)?))
}

/// Relative path from directory `from` to `to`, `/`-separated. Both should be
/// absolute and normalized. Returns `""` when they are equal.
pub fn relative_path(from: &Path, to: &Path) -> String {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();
    // different roots/prefixes: nothing to walk, keep the target as is
    if from.first() != to.first() {
        return to_slash(&to.iter().collect::<PathBuf>());
    }
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".into());
    }
    for comp in &to[common..] {
        parts.push(comp.as_os_str().to_string_lossy().into_owned());
    }
    parts.join("/")
}

/// `/`-separated rendering of a path, used for stylesheet keys and urls.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// URL-style join: empty and `.` segments are dropped, `..` pops the previous
/// segment when there is one. A leading `/` on the first non-empty part is
/// kept. An empty result is `"."`.
pub fn url_join(parts: &[&str]) -> String {
    let absolute = parts
        .iter()
        .find(|p| !p.is_empty())
        .is_some_and(|p| p.starts_with('/'));
    let mut segs: Vec<&str> = Vec::new();
    for part in parts {
        for seg in part.split(['/', '\\']) {
            match seg {
                "" | "." => {}
                ".." => match segs.last() {
                    Some(&last) if last != ".." => {
                        segs.pop();
                    }
                    _ if absolute => {}
                    _ => segs.push(".."),
                },
                s => segs.push(s),
            }
        }
    }
    let joined = segs.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".into(),
        (false, false) => joined,
    }
}
