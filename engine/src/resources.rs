//! Assets embedded in the binary at compile time.

use crate::error::{ImportError, ImportResult};

const RESOURCES: &[(&str, &[u8])] = &[
    ("event-schema.json", include_bytes!("../schemas/event-schema.json")),
    (
        "event-schema.schema.json",
        include_bytes!("../schemas/event-schema.schema.json"),
    ),
];

/// Bytes of the embedded resource `name`.
pub fn resource(name: &str) -> ImportResult<&'static [u8]> {
    RESOURCES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, bytes)| *bytes)
        .ok_or_else(|| ImportError::MissingResource(name.to_string()))
}

/// Names of every embedded resource.
pub fn names() -> impl Iterator<Item = &'static str> {
    RESOURCES.iter().map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_resource() {
        let bytes = resource("event-schema.json").unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_unknown_resource() {
        let err = resource("fonts/Inter.ttf").unwrap_err();
        assert!(matches!(err, ImportError::MissingResource(ref n) if n == "fonts/Inter.ttf"));
    }

    #[test]
    fn test_names() {
        assert_eq!(names().count(), 2);
    }
}
