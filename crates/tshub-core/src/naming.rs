//! Identifier casing transforms.
//!
//! Host names are `PascalCase`; generated TypeScript uses `lowerCamel` for
//! methods, parameters and members, and `PascalCase` for handler names.

/// Converts a `PascalCase` identifier to `camelCase`.
///
/// A leading run of upper-case letters is lowered as a unit, except for its
/// last letter when that letter starts the next word.
///
/// # Examples
///
/// ```
/// use tshub_core::to_camel_case;
///
/// assert_eq!(to_camel_case("SomethingHappened"), "somethingHappened");
/// assert_eq!(to_camel_case("IOStream"), "ioStream");
/// assert_eq!(to_camel_case("ID"), "id");
/// assert_eq!(to_camel_case("already"), "already");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len());

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            result.extend(chars[i..].iter());
            return result;
        }
        let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
        if i > 0 && next_is_lower {
            result.extend(chars[i..].iter());
            return result;
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Converts an identifier to `PascalCase` by upper-casing its first character.
///
/// # Examples
///
/// ```
/// use tshub_core::to_pascal_case;
///
/// assert_eq!(to_pascal_case("pong"), "Pong");
/// assert_eq!(to_pascal_case("SomethingHappened"), "SomethingHappened");
/// assert_eq!(to_pascal_case(""), "");
/// ```
#[must_use]
pub fn to_pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_simple() {
        assert_eq!(to_camel_case("DoStuffObject"), "doStuffObject");
        assert_eq!(to_camel_case("Pong"), "pong");
        assert_eq!(to_camel_case("SomeNullableInt"), "someNullableInt");
    }

    #[test]
    fn test_camel_case_acronyms() {
        assert_eq!(to_camel_case("URLValue"), "urlValue");
        assert_eq!(to_camel_case("HTML"), "html");
        assert_eq!(to_camel_case("A"), "a");
    }

    #[test]
    fn test_camel_case_passthrough() {
        assert_eq!(to_camel_case("someObject"), "someObject");
        assert_eq!(to_camel_case("_private"), "_private");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("somethingHappened"), "SomethingHappened");
        assert_eq!(to_pascal_case("X"), "X");
    }
}
