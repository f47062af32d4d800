//! Lexical path helpers
//!
//! `basename` and `dirname` follow POSIX semantics; `realpath` resolves `.`
//! and `..` purely lexically against a working directory without touching the
//! filesystem (the 8-bit targets have no symlinks to resolve).

/// Final component of a path
pub fn basename(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(slash) => &trimmed[slash + 1..],
        None => trimmed,
    }
}

/// Everything but the final component of a path
pub fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    match trimmed.rfind('/') {
        None => ".",
        Some(slash) => {
            let head = trimmed[..slash].trim_end_matches('/');
            if head.is_empty() {
                "/"
            } else {
                head
            }
        }
    }
}

/// Absolute, normalized form of `path` relative to the directory `cwd`
pub fn realpath(path: &str, cwd: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    let joined = if path.starts_with('/') {
        path.split('/').collect::<Vec<_>>()
    } else {
        cwd.split('/').chain(path.split('/')).collect()
    };

    for component in joined {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            }
            name => parts.push(name),
        }
    }

    format!("/{}", parts.join("/"))
}
