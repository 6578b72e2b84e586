//! Path cleaning and segment extraction.
//!
//! Both functions are pure. Extraction always starts from the full path and
//! the requested depth, so no previous call has to run first.

/// Clean a URL path into its rooted canonical form.
///
/// Resolves `.` and `..`, collapses repeated slashes and drops any trailing
/// slash. `..` never climbs above the root. The empty path cleans to `/`.
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return "/".to_string();
    }

    let mut cleaned = String::with_capacity(path.len() + 1);
    for segment in segments {
        cleaned.push('/');
        cleaned.push_str(segment);
    }
    cleaned
}

/// Select the segment at `depth` (0-indexed) and the remainder after it.
///
/// For `/a/b/c/d`: depth 2 gives `("c", "/d")`, depth 3 gives `("d", "/")`
/// and any depth past the last segment gives `("", "/")`.
pub fn shift_path(path: &str, depth: usize) -> (String, String) {
    let cleaned = clean_path(path);
    let mut rest = cleaned.as_str();
    let mut head = "";

    for step in 0..=depth {
        match rest[1..].find('/') {
            Some(i) => {
                head = &rest[1..=i];
                rest = &rest[i + 1..];
            }
            None if depth > step => return (String::new(), "/".to_string()),
            None => return (rest[1..].to_string(), "/".to_string()),
        }
    }

    (head.to_string(), rest.to_string())
}
