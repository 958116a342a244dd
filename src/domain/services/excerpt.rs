#[cfg(test)]
#[path = "excerpt_test.rs"]
mod tests;

const MAX_LINES: usize = 3;
const MAX_LINE_CHARS: usize = 120;

const STARTER: &str = "def solve():\n    # handle the empty input first\n    pass";

/// Builds the local code excerpt offered once the hint cap is reached. The
/// excerpt always comes from the user's own snippet, never from a solution.
pub struct Excerpts {}

impl Excerpts {
    /// First three non-empty, trimmed lines of the snippet, each capped in
    /// length. An empty snippet yields a generic starter fragment.
    pub fn local(snippet: &str) -> String {
        let lines = snippet
            .split('\n')
            .map(|line| return line.trim())
            .filter(|line| return !line.is_empty())
            .take(MAX_LINES)
            .map(|line| {
                if line.chars().count() > MAX_LINE_CHARS {
                    return line.chars().take(MAX_LINE_CHARS).collect();
                }
                return line.to_string();
            })
            .collect::<Vec<String>>();

        if lines.is_empty() {
            return STARTER.to_string();
        }

        return lines.join("\n");
    }
}
