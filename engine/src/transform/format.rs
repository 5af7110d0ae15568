//! Splits a workshop cell such as `"Pottery (Maria Lopez)"` into workshop
//! name and leader.
//!
//! The last parenthesised group is the leader, so names that contain
//! parentheses themselves survive: `"Clay (Intro) (Maria)"` is workshop
//! `"Clay (Intro)"` led by `"Maria"`. A cell without a closing group is kept
//! whole as the workshop name with an empty leader; [`ParsedWorkshop::well_formed`]
//! tells the caller so it can warn.

/// Result of parsing one workshop cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWorkshop {
    pub name: String,
    pub leader: String,
    /// False when no `(Leader)` group was found.
    pub well_formed: bool,
}

pub fn parse_workshop_cell(text: &str) -> ParsedWorkshop {
    let text = text.trim();

    let split = text.rfind('(').and_then(|open| {
        text[open + 1..]
            .find(')')
            .map(|close| (open, open + 1 + close))
    });

    match split {
        Some((open, close)) => ParsedWorkshop {
            name: text[..open].trim().to_string(),
            leader: text[open + 1..close].trim().to_string(),
            well_formed: true,
        },
        None => ParsedWorkshop {
            name: text.to_string(),
            leader: String::new(),
            well_formed: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_leader() {
        let parsed = parse_workshop_cell("Pottery (Maria Lopez)");
        assert_eq!(parsed.name, "Pottery");
        assert_eq!(parsed.leader, "Maria Lopez");
        assert!(parsed.well_formed);
    }

    #[test]
    fn test_last_group_is_leader() {
        let parsed = parse_workshop_cell("Clay Work (Beginners) ( Sam Lee )");
        assert_eq!(parsed.name, "Clay Work (Beginners)");
        assert_eq!(parsed.leader, "Sam Lee");
    }

    #[test]
    fn test_no_group_keeps_whole_text() {
        let parsed = parse_workshop_cell("  Open Studio  ");
        assert_eq!(parsed.name, "Open Studio");
        assert_eq!(parsed.leader, "");
        assert!(!parsed.well_formed);
    }

    #[test]
    fn test_unclosed_group_keeps_whole_text() {
        let parsed = parse_workshop_cell("Painting (Ana");
        assert_eq!(parsed.name, "Painting (Ana");
        assert!(!parsed.well_formed);
    }

    #[test]
    fn test_leader_only() {
        let parsed = parse_workshop_cell("(Maria)");
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.leader, "Maria");
    }
}
