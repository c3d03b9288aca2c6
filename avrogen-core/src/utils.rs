//! Shared utility functions for naming steps.

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld").
///
/// Underscores and dashes both act as word separators.
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-'])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to camelCase (e.g., "hello_world" -> "helloWorld")
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Compose a step name from a verb, a grouping and a target.
///
/// `qualified_name("generate", "main", "protocol")` is `generateMainProtocol`.
/// Empty segments are skipped.
pub fn qualified_name(verb: &str, grouping: &str, target: &str) -> String {
    let mut name = to_camel_case(verb);
    name.push_str(&to_pascal_case(grouping));
    name.push_str(&to_pascal_case(target));
    if verb.is_empty() {
        to_camel_case(&name)
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("main"), "Main");
        assert_eq!(to_pascal_case("integration_test"), "IntegrationTest");
        assert_eq!(to_pascal_case("integration-test"), "IntegrationTest");
        assert_eq!(to_pascal_case("hElLo"), "HElLo");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("generate"), "generate");
        assert_eq!(to_camel_case("compile_kotlin"), "compileKotlin");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(
            qualified_name("generate", "main", "protocol"),
            "generateMainProtocol"
        );
        assert_eq!(
            qualified_name("generate", "test", "source"),
            "generateTestSource"
        );
        assert_eq!(qualified_name("compile", "main", "java"), "compileMainJava");
        assert_eq!(
            qualified_name("compile", "integration-test", "kotlin"),
            "compileIntegrationTestKotlin"
        );
        assert_eq!(qualified_name("", "main", "source"), "mainSource");
    }
}
