#[cfg(test)]
#[path = "heuristics_test.rs"]
mod tests;

use crate::domain::models::HINT_CAP;

enum Family {
    HashLookup,
    Boundary,
    Complexity,
    General,
}

/// Deterministic hint rules, the floor of the fallback chain. Keyed on the
/// escalation level and on keywords in the problem id and failure text;
/// always returns a non-empty hint.
pub struct Heuristics {}

impl Heuristics {
    pub fn hint(level: u32, problem_id: &str, failure: &str) -> String {
        let level = level.clamp(1, HINT_CAP);
        let haystack = format!("{problem_id} {failure}").to_lowercase();

        let hint = match Heuristics::family(&haystack) {
            Family::HashLookup => match level {
                1 => "Think about a lookup structure with constant-time membership checks; a hash map fits pair-finding problems well.",
                2 => "Scan once and store what you've seen in a hash map; before inserting a number, check whether its complement is already there.",
                _ => "Single pass with a hash map: for each element x, return when target - x is already stored, otherwise insert x with its index.",
            },
            Family::Boundary => match level {
                1 => "The failure points at an access outside the valid range; walk through the smallest and largest inputs by hand.",
                2 => "Check the index arithmetic at the loop edges, especially i + 1 and i - 1 around the first and last element.",
                _ => "Guard the edges: handle the empty input before the loop and stop at len - 1 wherever you read neighbouring pairs.",
            },
            Family::Complexity => match level {
                1 => "The approach looks correct but too slow; estimate its time complexity before optimizing anything.",
                2 => "Find the nested loop over the input; a hash map or a sorted structure usually removes one factor of n.",
                _ => "Replace the quadratic scan with a single pass plus a lookup table, or sort once and move two pointers.",
            },
            Family::General => match level {
                1 => "Restate the problem in your own words and identify which known pattern it matches.",
                2 => "Write the brute-force version first, then look for repeated work you could cache or skip.",
                _ => "Try mapping the problem onto a structure you know: sliding window, hash lookup, or two pointers cover most cases.",
            },
        };

        return hint.to_string();
    }

    fn family(haystack: &str) -> Family {
        let hash_keywords = ["two-sum", "two_sum", "twosum", "pair-sum", "anagram", "duplicate"];
        if hash_keywords.iter().any(|kw| return haystack.contains(kw)) {
            return Family::HashLookup;
        }

        let boundary_keywords = ["index", "range", "bound", "off-by-one", "overflow"];
        if boundary_keywords.iter().any(|kw| return haystack.contains(kw)) {
            return Family::Boundary;
        }

        let complexity_keywords = ["time limit", "tle", "timed out", "exceeded"];
        if complexity_keywords.iter().any(|kw| return haystack.contains(kw)) {
            return Family::Complexity;
        }

        return Family::General;
    }
}
