//! Field schema: which validator applies to which record field

/// Identifier field present in every record
pub const ID_FIELD: &str = "_id";

/// English name, used to label entities in diagnostics
pub const NAME_FIELD: &str = "en.name";

pub const BIRTHDAY_FIELD: &str = "birthday";
pub const DEATH_FIELD: &str = "death";

/// How a record field is treated on import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// The record's own identifier
    Id,
    /// Free text bounded in length
    Name,
    /// Canonicalized to Male/Female
    Gender,
    /// YYYY/MM/DD calendar date
    Date,
    /// Reference to a zoo, emitted as an edge labeled with the field name
    ZooReference,
    /// Comma-separated child ids, emitted as family edges
    Children,
    /// Copied verbatim without validation
    Passthrough,
}

/// Ordered classification rules; the first pattern contained in the field name wins.
const RULES: &[(&str, FieldKind)] = &[
    ("name", FieldKind::Name),
    ("gender", FieldKind::Gender),
    (BIRTHDAY_FIELD, FieldKind::Date),
    (DEATH_FIELD, FieldKind::Date),
    ("birthplace", FieldKind::ZooReference),
    ("zoo", FieldKind::ZooReference),
    ("children", FieldKind::Children),
];

impl FieldKind {
    /// Classify a field name. Unrecognized fields pass through.
    pub fn classify(field: &str) -> Self {
        if field == ID_FIELD {
            return Self::Id;
        }
        RULES
            .iter()
            .find(|(pattern, _)| field.contains(pattern))
            .map(|(_, kind)| *kind)
            .unwrap_or(Self::Passthrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_fields() {
        assert_eq!(FieldKind::classify("_id"), FieldKind::Id);
        assert_eq!(FieldKind::classify("en.name"), FieldKind::Name);
        assert_eq!(FieldKind::classify("jp.othernames"), FieldKind::Name);
        assert_eq!(FieldKind::classify("gender"), FieldKind::Gender);
        assert_eq!(FieldKind::classify("birthday"), FieldKind::Date);
        assert_eq!(FieldKind::classify("death"), FieldKind::Date);
        assert_eq!(FieldKind::classify("birthplace"), FieldKind::ZooReference);
        assert_eq!(FieldKind::classify("zoo"), FieldKind::ZooReference);
        assert_eq!(FieldKind::classify("children"), FieldKind::Children);
    }

    #[test]
    fn test_classify_passthrough() {
        assert_eq!(FieldKind::classify("photo.1"), FieldKind::Passthrough);
        assert_eq!(FieldKind::classify("litter"), FieldKind::Passthrough);
        assert_eq!(FieldKind::classify("_idx"), FieldKind::Passthrough);
    }

    #[test]
    fn test_name_rule_takes_precedence() {
        // "zoo.name" is a name, not a zoo reference
        assert_eq!(FieldKind::classify("zoo.name"), FieldKind::Name);
    }
}
