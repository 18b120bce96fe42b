//! Naming-notation conversion between schema names and Elixir identifiers.

/// Convert a snake_case name to UpperCamelCase.
///
/// Used for Elixir module/struct names derived from schema names.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(to_camel_case("user_profile"), "UserProfile");
/// ```
pub fn to_camel_case(s: &str) -> String {
    s.split('_')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert a name to lower_snake_case, mapping `.` and other separators
/// to `_`.
///
/// Consecutive uppercase letters stay together so acronyms survive
/// (`sessionID` becomes `session_id`, `HTTPServer` becomes `http_server`).
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut snake = String::new();
    for i in 0..chars.len() {
        let c = chars[i];
        if c == '.' || c == '-' || c == ' ' {
            if !snake.ends_with('_') {
                snake.push('_');
            }
        } else if c.is_uppercase() {
            if i > 0 && !snake.ends_with('_') {
                let prev = chars[i - 1];
                if !prev.is_uppercase() || (i + 1 < chars.len() && chars[i + 1].is_lowercase()) {
                    snake.push('_');
                }
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}
