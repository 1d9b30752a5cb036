//! Command grammar for Herbarium.
//!
//! A line is tokenized into a [`Command`] before anything touches the
//! collection, so grammar errors never leave partial state behind.
//!
//! ```text
//! ADD <kind>, <name>, <attribute>
//! REM <field> <op> <value>
//! PRINT
//! ```

use crate::core::condition::Condition;
use crate::core::plant::{Plant, PlantKind};
use crate::error::{HerbariumError, Result};

/// A parsed core command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a plant.
    Add(Plant),
    /// Remove every plant matching the condition.
    Remove(Condition),
    /// List all plants.
    Print,
}

/// Split a line into its verb and the untrimmed remainder.
pub fn split_verb(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], &line[idx..]),
        None => (line, ""),
    }
}

impl Command {
    /// Parse one command line.
    ///
    /// Verbs are case-sensitive. An unknown verb is an `UnknownCommand`
    /// error.
    pub fn parse(line: &str) -> Result<Self> {
        let (verb, rest) = split_verb(line);
        match verb {
            "ADD" => parse_add(rest).map(Command::Add),
            "REM" => Condition::parse(rest).map(Command::Remove),
            "PRINT" => Ok(Command::Print),
            other => Err(HerbariumError::unknown_command(other)),
        }
    }
}

/// Parse the arguments of ADD: `<kind>, <name>, <attribute>`.
///
/// Kind and name are trimmed, so `tree, Oak, 5` and `tree,Oak,5` are the
/// same record.
fn parse_add(args: &str) -> Result<Plant> {
    let mut fields = args.splitn(3, ',');

    let kind_token = fields.next().map(str::trim).unwrap_or_default();
    if kind_token.is_empty() {
        return Err(HerbariumError::malformed_record("missing plant type"));
    }
    let kind = PlantKind::from_keyword(kind_token)
        .ok_or_else(|| HerbariumError::unknown_plant_kind(kind_token))?;

    let name = fields
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| HerbariumError::malformed_record("missing plant name"))?;

    let attribute = fields.next().unwrap_or_default();
    Plant::from_fields(kind, name, attribute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compare::Operand;

    #[test]
    fn test_split_verb() {
        assert_eq!(split_verb("PRINT"), ("PRINT", ""));
        assert_eq!(split_verb("  REM age > 3"), ("REM", " age > 3"));
        assert_eq!(split_verb(""), ("", ""));
    }

    #[test]
    fn test_parse_add_tree() {
        let command = Command::parse("ADD tree, Oak, 5").unwrap();
        assert_eq!(command, Command::Add(Plant::tree("Oak", 5)));
    }

    #[test]
    fn test_parse_add_shrub_and_cactus() {
        assert_eq!(
            Command::parse("ADD shrub, Rose, May").unwrap(),
            Command::Add(Plant::shrub("Rose", "May"))
        );
        assert_eq!(
            Command::parse("ADD cactus, Saguaro, 2.5").unwrap(),
            Command::Add(Plant::cactus("Saguaro", 2.5))
        );
    }

    #[test]
    fn test_parse_add_trims_fields() {
        assert_eq!(
            Command::parse("ADD tree,Oak,5").unwrap(),
            Command::Add(Plant::tree("Oak", 5))
        );
        assert_eq!(
            Command::parse("ADD   tree ,  Old Oak  ,  7  ").unwrap(),
            Command::Add(Plant::tree("Old Oak", 7))
        );
    }

    #[test]
    fn test_parse_add_unknown_kind() {
        let err = Command::parse("ADD fern, Bracken, 3").unwrap_err();
        assert!(matches!(err, HerbariumError::UnknownPlantKind { ref kind } if kind == "fern"));

        // Kind keywords are case-sensitive.
        let err = Command::parse("ADD Tree, Oak, 5").unwrap_err();
        assert!(matches!(err, HerbariumError::UnknownPlantKind { .. }));
    }

    #[test]
    fn test_parse_add_missing_fields() {
        for line in ["ADD", "ADD tree", "ADD tree,", "ADD tree, ,5", "ADD tree, Oak"] {
            let err = Command::parse(line).unwrap_err();
            assert!(
                matches!(err, HerbariumError::MalformedRecord { .. }),
                "'{line}' should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_rem() {
        match Command::parse("REM   age > 3").unwrap() {
            Command::Remove(Condition::Compare { operand, .. }) => {
                assert_eq!(operand, Operand::Int(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rem_malformed() {
        let err = Command::parse("REM age > many").unwrap_err();
        assert!(matches!(err, HerbariumError::MalformedCondition { .. }));
    }

    #[test]
    fn test_parse_print() {
        assert_eq!(Command::parse("PRINT").unwrap(), Command::Print);
        assert_eq!(Command::parse("PRINT   ").unwrap(), Command::Print);
    }

    #[test]
    fn test_unknown_verbs() {
        for line in ["print", "DELETE age > 3", "", "ADDtree, Oak, 5"] {
            let err = Command::parse(line).unwrap_err();
            assert!(
                matches!(err, HerbariumError::UnknownCommand { .. }),
                "'{line}' should be unknown"
            );
        }
    }
}
