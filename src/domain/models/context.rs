#[cfg(test)]
#[path = "context_test.rs"]
mod tests;

/// Snippets past this length are truncated before they go anywhere.
pub const SNIPPET_MAX_CHARS: usize = 2000;

/// What the page side knows about the problem the user is working on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProblemContext {
    pub problem_id: String,
    pub snippet: String,
    pub url: String,
    pub failure: String,
}

impl ProblemContext {
    pub fn new(problem_id: &str, snippet: &str, url: &str, failure: &str) -> ProblemContext {
        let mut id = problem_id.trim().to_string();
        if id.is_empty() {
            id = slug_from_url(url).unwrap_or_else(|| return "unknown".to_string());
        }

        let mut truncated = snippet.to_string();
        if truncated.chars().count() > SNIPPET_MAX_CHARS {
            truncated = truncated.chars().take(SNIPPET_MAX_CHARS).collect();
        }

        return ProblemContext {
            problem_id: id,
            snippet: truncated,
            url: url.to_string(),
            failure: failure.to_string(),
        };
    }
}

/// Derives a stable problem key from the page URL when the page did not
/// send an explicit one, e.g. `https://judge.dev/problems/two-sum/` turns
/// into `two-sum`.
fn slug_from_url(url: &str) -> Option<String> {
    let without_fragment = url.split('#').next().unwrap_or("");
    let without_query = without_fragment.split('?').next().unwrap_or("");

    let path = match without_query.split_once("://") {
        Some((_scheme, rest)) => rest,
        None => without_query,
    };

    let segment = path
        .split('/')
        .skip(1)
        .filter(|part| return !part.is_empty())
        .last()?;

    let slug = segment
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                return c;
            }
            return '-';
        })
        .collect::<String>();

    if slug.is_empty() {
        return None;
    }

    return Some(slug);
}
