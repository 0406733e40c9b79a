//! End-to-end integration tests
//!
//! These tests drive complete sessions against a real SQLite store file:
//! 1. Create a temporary store file
//! 2. Feed a scripted sequence of menu choices through `run_session_with_rng`
//! 3. Inspect the transcript and reopen the store to check persisted balances
//!
//! Several tests span more than one session to check that cards and balances
//! survive a restart of the program.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;
    use simple_banking::core::identifier;
    use simple_banking::io::export_store;
    use simple_banking::session::run_session_with_rng;
    use simple_banking::{BankConfig, BankError, Card, Ledger, SqliteLedger};
    use std::io::Cursor;
    use tempfile::TempDir;

    /// Temporary store file plus the config pointing at it
    fn temp_store() -> (TempDir, BankConfig) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = BankConfig::new(dir.path().join("card.s3db"), 100);
        (dir, config)
    }

    /// Run one session over `script` and return its transcript
    fn run(config: &BankConfig, seed: u64, script: &str) -> String {
        let mut output = Vec::new();
        run_session_with_rng(
            config,
            StdRng::seed_from_u64(seed),
            Cursor::new(script.as_bytes()),
            &mut output,
        )
        .unwrap_or_else(|e| panic!("Session failed: {}", e));
        String::from_utf8(output).expect("Transcript is not UTF-8")
    }

    /// Extract every card printed in a transcript
    fn issued_cards(transcript: &str) -> Vec<Card> {
        let lines: Vec<&str> = transcript.lines().collect();
        lines
            .windows(4)
            .filter(|w| w[0] == "Your card number:" && w[2] == "Your card PIN:")
            .map(|w| Card {
                number: w[1].to_string(),
                pin: w[3].to_string(),
            })
            .collect()
    }

    fn balance(config: &BankConfig, number: &str) -> i64 {
        let ledger = SqliteLedger::open(&config.store_path).expect("Failed to reopen store");
        ledger.balance(number).expect("Balance lookup failed")
    }

    #[test]
    fn test_issue_login_deposit_across_sessions() {
        let (_dir, config) = temp_store();

        let transcript = run(&config, 1, "1\n0\n");
        let cards = issued_cards(&transcript);
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert!(identifier::validate(&card.number));
        assert!(card.number.starts_with("400000"));

        let script = format!("2\n{}\n{}\n2\n500\n1\n0\n", card.number, card.pin);
        let transcript = run(&config, 2, &script);

        assert!(transcript.contains("You have successfully logged in!\n"));
        assert!(transcript.contains("Income was added!\n"));
        assert!(transcript.contains("Balance: 500\n"));
        assert_eq!(balance(&config, &card.number), 500);
    }

    #[test]
    fn test_transfer_between_issued_cards() {
        let (_dir, config) = temp_store();

        let cards = issued_cards(&run(&config, 3, "1\n1\n0\n"));
        assert_eq!(cards.len(), 2);
        let (sender, recipient) = (&cards[0], &cards[1]);

        let script = format!(
            "2\n{}\n{}\n2\n100\n3\n{}\n150\n3\n{}\n60\n5\n0\n",
            sender.number, sender.pin, recipient.number, recipient.number
        );
        let transcript = run(&config, 4, &script);

        assert!(transcript.contains("Not enough money!\n"));
        assert!(transcript.contains("Success!\n"));
        assert_eq!(balance(&config, &sender.number), 40);
        assert_eq!(balance(&config, &recipient.number), 60);
    }

    #[test]
    fn test_closed_card_cannot_log_in_or_receive() {
        let (_dir, config) = temp_store();
        let cards = issued_cards(&run(&config, 5, "1\n1\n0\n"));
        let (kept, closed) = (&cards[0], &cards[1]);

        let close = format!("2\n{}\n{}\n4\n0\n", closed.number, closed.pin);
        assert!(run(&config, 6, &close).contains("The account has been closed!\n"));

        let script = format!(
            "2\n{}\n{}\n2\n{}\n{}\n3\n{}\n0\n",
            closed.number, closed.pin, kept.number, kept.pin, closed.number
        );
        let transcript = run(&config, 7, &script);

        assert!(transcript.contains("Wrong card number or PIN!\n"));
        assert!(transcript.contains("Such a card does not exist.\n"));
    }

    #[rstest]
    #[case::malformed_menu_choice("x\n0\n", "Can't process your input: x\n")]
    #[case::wrong_credentials(
        "2\n4000001234567899\n0000\n0\n",
        "Wrong card number or PIN!\n"
    )]
    fn test_bad_input_leaves_store_empty(#[case] script: &str, #[case] message: &str) {
        let (_dir, config) = temp_store();

        let transcript = run(&config, 8, script);

        assert!(transcript.contains(message));
        let ledger = SqliteLedger::open(&config.store_path).unwrap();
        assert!(ledger.accounts().unwrap().is_empty());
    }

    #[test]
    fn test_export_lists_numbers_and_balances() {
        let (_dir, config) = temp_store();
        let cards = issued_cards(&run(&config, 9, "1\n0\n"));
        let card = &cards[0];
        run(
            &config,
            10,
            &format!("2\n{}\n{}\n2\n75\n0\n", card.number, card.pin),
        );

        let mut output = Vec::new();
        export_store(&config, &mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        assert_eq!(csv, format!("number,balance\n{},75\n", card.number));
    }

    #[test]
    fn test_unopenable_store_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a store file
        let config = BankConfig::new(dir.path().to_path_buf(), 10);

        let result = run_session_with_rng(
            &config,
            StdRng::seed_from_u64(0),
            Cursor::new(&b"0\n"[..]),
            Vec::new(),
        );

        let error = result.unwrap_err();
        assert!(matches!(error, BankError::Storage { .. }));
        assert!(!error.is_recoverable());
    }
}
