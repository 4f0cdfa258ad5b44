/// Title-cases an identifier or phrase for display.
///
/// Word boundaries are whitespace, `-`, `_` and lower→upper camelCase
/// transitions: `drinkingWater` → `Drinking Water`,
/// `agricultural products` → `Agricultural Products`.
pub fn to_header_case(input: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower_or_digit = false;

    for ch in input.chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower_or_digit = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower_or_digit && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower_or_digit = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `Ship Parts` → `Ship+Parts`
pub fn category_slug(name: &str) -> String {
    name.replace(' ', "+")
}

/// `Ship+Parts` → `Ship Parts`
pub fn category_from_slug(slug: &str) -> String {
    slug.replace('+', " ")
}
