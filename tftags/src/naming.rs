use regex::Regex;
use std::sync::OnceLock;

/// Convert an API field name such as `PropagateAtLaunch` or `ResourceARN`
/// into the snake_case attribute name used in Terraform state.
pub fn to_snake_case(s: &str) -> String {
    static WORD: OnceLock<Regex> = OnceLock::new();
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();

    let word = WORD.get_or_init(|| Regex::new("(.)([A-Z][a-z]+)").expect("valid regex"));
    let boundary = BOUNDARY.get_or_init(|| Regex::new("([0-9a-z])([A-Z])").expect("valid regex"));

    let result = word.replace_all(s, "${1}_${2}");
    let result = boundary.replace_all(&result, "${1}_${2}");
    result.to_lowercase()
}
