//! Small string helpers shared by the view layer

/// Upper-case the first letter of every space separated word, lower-case the rest
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"1 attribute"`, `"2 attributes"`, `"0 attributes"`
pub fn plural_if_needed(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("TIME"), "Time");
        assert_eq!(title_case("SET/STRING"), "Set/string");
        assert_eq!(title_case("hello big world"), "Hello Big World");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn plurals() {
        assert_eq!(plural_if_needed(0, "attribute"), "0 attributes");
        assert_eq!(plural_if_needed(1, "attribute"), "1 attribute");
        assert_eq!(plural_if_needed(12, "attribute"), "12 attributes");
    }
}
