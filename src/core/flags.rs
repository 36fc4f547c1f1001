//! Read-only view over a parsed command line

use clap::parser::ValueSource;
use clap::ArgMatches;

use crate::core::field::{FieldKind, FieldValue};

/// Source of flag values for one command invocation
///
/// Absent flags read as their zero value (`""`, `false`, `0`).
pub trait FlagSource {
    fn string(&self, flag: &str) -> String;

    fn bool(&self, flag: &str) -> bool;

    fn int(&self, flag: &str) -> i64;

    /// Whether the user explicitly set the flag on the command line
    fn changed(&self, flag: &str) -> bool;

    /// Read a flag as the given kind
    fn value(&self, flag: &str, kind: FieldKind) -> FieldValue {
        match kind {
            FieldKind::String => FieldValue::String(self.string(flag)),
            FieldKind::Bool => FieldValue::Bool(self.bool(flag)),
            FieldKind::Int => FieldValue::Int(self.int(flag)),
        }
    }
}

impl FlagSource for ArgMatches {
    fn string(&self, flag: &str) -> String {
        self.try_get_one::<String>(flag)
            .ok()
            .flatten()
            .cloned()
            .unwrap_or_default()
    }

    fn bool(&self, flag: &str) -> bool {
        self.try_get_one::<bool>(flag)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false)
    }

    fn int(&self, flag: &str) -> i64 {
        self.try_get_one::<i64>(flag)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(0)
    }

    fn changed(&self, flag: &str) -> bool {
        match self.try_contains_id(flag) {
            Ok(true) => self.value_source(flag) == Some(ValueSource::CommandLine),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{value_parser, Arg, ArgAction, Command};

    fn command() -> Command {
        Command::new("test")
            .arg(Arg::new("name").long("name"))
            .arg(
                Arg::new("enabled")
                    .long("enabled")
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(bool))
                    .num_args(0..=1)
                    .require_equals(true)
                    .default_missing_value("true"),
            )
            .arg(
                Arg::new("count")
                    .long("count")
                    .value_parser(value_parser!(i64))
                    .allow_negative_numbers(true),
            )
            .arg(Arg::new("region").long("region").default_value("eu"))
    }

    #[test]
    fn test_absent_flags_read_as_zero_values() {
        let matches = command().try_get_matches_from(["test"]).unwrap();
        assert_eq!(matches.string("name"), "");
        assert!(!matches.bool("enabled"));
        assert_eq!(matches.int("count"), 0);
        assert!(!matches.changed("name"));
    }

    #[test]
    fn test_typed_values() {
        let matches = command()
            .try_get_matches_from(["test", "--name", "acme", "--enabled", "--count=-3"])
            .unwrap();
        assert_eq!(matches.string("name"), "acme");
        assert!(matches.bool("enabled"));
        assert_eq!(matches.int("count"), -3);
        assert_eq!(
            matches.value("count", FieldKind::Int),
            FieldValue::Int(-3)
        );
    }

    #[test]
    fn test_explicit_false_is_changed() {
        let matches = command()
            .try_get_matches_from(["test", "--enabled=false"])
            .unwrap();
        assert!(!matches.bool("enabled"));
        assert!(matches.changed("enabled"));
    }

    #[test]
    fn test_default_value_is_not_changed() {
        let matches = command().try_get_matches_from(["test"]).unwrap();
        assert_eq!(matches.string("region"), "eu");
        assert!(!matches.changed("region"));
    }

    #[test]
    fn test_unknown_flag_is_not_changed() {
        let matches = command().try_get_matches_from(["test"]).unwrap();
        assert!(!matches.changed("missing"));
        assert_eq!(matches.string("missing"), "");
    }
}
