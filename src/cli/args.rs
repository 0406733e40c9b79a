use crate::core::{BankConfig, DEFAULT_MAX_ISSUE_ATTEMPTS, DEFAULT_STORE_FILE};
use clap::Parser;
use std::path::PathBuf;

/// Terminal banking simulator backed by a SQLite card store
#[derive(Parser, Debug)]
#[command(name = "simple-banking")]
#[command(about = "Terminal banking simulator backed by a SQLite card store", long_about = None)]
pub struct CliArgs {
    /// SQLite store file holding the card table
    #[arg(
        long = "fileName",
        visible_alias = "file-name",
        value_name = "PATH",
        default_value = DEFAULT_STORE_FILE,
        help = "Path to the SQLite store file (created if missing)"
    )]
    pub file_name: PathBuf,

    /// Collision retries allowed when issuing a card number
    #[arg(
        long = "max-issue-attempts",
        value_name = "COUNT",
        help = "Card numbers tried per issued account before giving up (default: 1000)"
    )]
    pub max_issue_attempts: Option<u32>,

    /// Dump the ledger as CSV instead of starting a session
    #[arg(
        long = "export",
        help = "Write every card number and balance to stdout as CSV, then exit"
    )]
    pub export: bool,
}

impl CliArgs {
    /// Create a BankConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; `BankConfig::new` also
    /// replaces a zero attempt budget with the default.
    pub fn to_config(&self) -> BankConfig {
        BankConfig::new(
            self.file_name.clone(),
            self.max_issue_attempts
                .unwrap_or(DEFAULT_MAX_ISSUE_ATTEMPTS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_file(&["program"], "db.s3db")]
    #[case::legacy_flag(&["program", "--fileName", "card.s3db"], "card.s3db")]
    #[case::kebab_alias(&["program", "--file-name", "other.db"], "other.db")]
    #[case::equals_form(&["program", "--fileName=bank.sqlite"], "bank.sqlite")]
    fn test_file_name_parsing(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.file_name, PathBuf::from(expected));
    }

    #[rstest]
    #[case::not_given(&["program"], None, false)]
    #[case::attempts(&["program", "--max-issue-attempts", "50"], Some(50), false)]
    #[case::export(&["program", "--export"], None, true)]
    #[case::all_options(
        &["program", "--fileName", "x.s3db", "--max-issue-attempts", "3", "--export"],
        Some(3),
        true
    )]
    fn test_options(
        #[case] args: &[&str],
        #[case] max_issue_attempts: Option<u32>,
        #[case] export: bool,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.max_issue_attempts, max_issue_attempts);
        assert_eq!(parsed.export, export);
    }

    #[rstest]
    #[case::all_defaults(&["program"], "db.s3db", 1000)]
    #[case::custom_attempts(&["program", "--max-issue-attempts", "8"], "db.s3db", 8)]
    #[case::zero_attempts_fall_back(&["program", "--max-issue-attempts", "0"], "db.s3db", 1000)]
    #[case::custom_file(&["program", "--fileName", "a.s3db"], "a.s3db", 1000)]
    fn test_config_conversion(
        #[case] args: &[&str],
        #[case] expected_path: &str,
        #[case] expected_attempts: u32,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_config();

        assert_eq!(config.store_path, PathBuf::from(expected_path));
        assert_eq!(config.max_issue_attempts, expected_attempts);
    }

    #[rstest]
    #[case::missing_file_value(&["program", "--fileName"])]
    #[case::negative_attempts(&["program", "--max-issue-attempts", "-1"])]
    #[case::non_numeric_attempts(&["program", "--max-issue-attempts", "many"])]
    #[case::unknown_flag(&["program", "--verbose"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
