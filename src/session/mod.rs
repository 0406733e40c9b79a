//! Interactive banking session
//!
//! The session is a finite state machine over [`State`]. Each step prints the
//! menu for the current state, reads one choice and runs the chosen action,
//! which yields the next state. The loop ends in [`State::Terminal`].
//!
//! Input and output are injected, so the whole session can be scripted from
//! a byte buffer in tests.
//!
//! # Error Handling
//!
//! Recoverable errors ([`BankError::is_recoverable`]) become a message to the
//! user and the session stays in the same state. Any other error ends
//! [`Session::run`] with `Err`.

pub mod menu;

use crate::core::{Bank, BankConfig, Ledger, SqliteLedger};
use crate::types::{Balance, BankError};
use menu::{AccountAction, StartAction, ACCOUNT_MENU, START_MENU};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Open the configured store and run one interactive session on it
///
/// The store connection is released on every exit path: explicitly after a
/// clean run, by drop when the session fails.
pub fn run_session<I: BufRead, O: Write>(
    config: &BankConfig,
    input: I,
    output: O,
) -> Result<(), BankError> {
    run_session_with_rng(config, StdRng::from_entropy(), input, output)
}

/// [`run_session`] with a caller-supplied random source
pub fn run_session_with_rng<R: Rng, I: BufRead, O: Write>(
    config: &BankConfig,
    rng: R,
    input: I,
    output: O,
) -> Result<(), BankError> {
    let ledger = SqliteLedger::open(&config.store_path)?;
    let bank = Bank::new(ledger, rng, config.max_issue_attempts);

    let mut session = Session::new(bank, input, output);
    session.run()?;

    let (bank, _) = session.into_parts();
    bank.into_ledger().close()?;
    info!("session finished");
    Ok(())
}

/// Where the session currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Main menu, nobody logged in
    Start,
    /// Card holder with this number is logged in
    LoggedIn(String),
    /// Session is over
    Terminal,
}

/// Parse a user-entered amount, which must be a positive integer
pub fn parse_amount(operation: &str, input: &str) -> Result<Balance, BankError> {
    let amount: Balance = input
        .trim()
        .parse()
        .map_err(|_| BankError::invalid_amount(input))?;
    if amount <= 0 {
        return Err(BankError::non_positive_amount(operation, amount));
    }
    Ok(amount)
}

/// Menu-driven session over a bank, an input reader and an output writer
pub struct Session<L, R, I, O> {
    bank: Bank<L, R>,
    input: I,
    output: O,
}

impl<L, R, I, O> Session<L, R, I, O>
where
    L: Ledger,
    R: Rng,
    I: BufRead,
    O: Write,
{
    pub fn new(bank: Bank<L, R>, input: I, output: O) -> Self {
        Session {
            bank,
            input,
            output,
        }
    }

    /// Run the state machine until the user exits, input ends, or a fatal
    /// error occurs
    pub fn run(&mut self) -> Result<(), BankError> {
        let mut state = State::Start;
        while state != State::Terminal {
            state = self.step(state)?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Perform one transition
    pub fn step(&mut self, state: State) -> Result<State, BankError> {
        match state {
            State::Start => self.start_menu(),
            State::LoggedIn(number) => self.account_menu(number),
            State::Terminal => Ok(State::Terminal),
        }
    }

    /// Hand back the bank and the output writer
    pub fn into_parts(self) -> (Bank<L, R>, O) {
        (self.bank, self.output)
    }

    fn start_menu(&mut self) -> Result<State, BankError> {
        menu::render(START_MENU, &mut self.output)?;
        let Some(line) = self.read_line()? else {
            return self.exit();
        };

        match menu::choose(START_MENU, &line) {
            Some(StartAction::CreateAccount) => self.create_account(),
            Some(StartAction::LogIn) => self.log_in(),
            Some(StartAction::Exit) => self.exit(),
            None => {
                writeln!(self.output, "Can't process your input: {}", line)?;
                Ok(State::Start)
            }
        }
    }

    fn account_menu(&mut self, number: String) -> Result<State, BankError> {
        menu::render(ACCOUNT_MENU, &mut self.output)?;
        let Some(line) = self.read_line()? else {
            return self.exit();
        };

        match menu::choose(ACCOUNT_MENU, &line) {
            Some(AccountAction::Balance) => self.show_balance(number),
            Some(AccountAction::AddIncome) => self.add_income(number),
            Some(AccountAction::Transfer) => self.do_transfer(number),
            Some(AccountAction::CloseAccount) => self.close_account(number),
            Some(AccountAction::LogOut) => {
                writeln!(self.output, "You have successfully logged out!")?;
                Ok(State::Start)
            }
            Some(AccountAction::Exit) => self.exit(),
            None => {
                writeln!(self.output, "Can't process your input: {}", line)?;
                Ok(State::LoggedIn(number))
            }
        }
    }

    fn create_account(&mut self) -> Result<State, BankError> {
        let card = self.bank.issue_account()?;
        writeln!(self.output, "Your card has been created")?;
        writeln!(self.output, "{}", card)?;
        Ok(State::Start)
    }

    fn log_in(&mut self) -> Result<State, BankError> {
        writeln!(self.output, "Enter your card number:")?;
        let Some(number) = self.read_line()? else {
            return self.exit();
        };
        writeln!(self.output, "Enter your PIN:")?;
        let Some(pin) = self.read_line()? else {
            return self.exit();
        };

        if self.bank.login(&number, &pin)? {
            writeln!(self.output, "You have successfully logged in!")?;
            Ok(State::LoggedIn(number))
        } else {
            writeln!(self.output, "Wrong card number or PIN!")?;
            Ok(State::Start)
        }
    }

    fn show_balance(&mut self, number: String) -> Result<State, BankError> {
        let balance = self.bank.balance_of(&number)?;
        writeln!(self.output, "Balance: {}", balance)?;
        Ok(State::LoggedIn(number))
    }

    fn add_income(&mut self, number: String) -> Result<State, BankError> {
        writeln!(self.output, "Enter income:")?;
        let Some(line) = self.read_line()? else {
            return self.exit();
        };

        let result = parse_amount("deposit", &line)
            .and_then(|amount| self.bank.deposit(&number, amount));
        match result {
            Ok(()) => writeln!(self.output, "Income was added!")?,
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "deposit rejected");
                writeln!(
                    self.output,
                    "There was a problem with your response: {}",
                    line
                )?;
            }
            Err(e) => return Err(e),
        }
        Ok(State::LoggedIn(number))
    }

    fn do_transfer(&mut self, number: String) -> Result<State, BankError> {
        writeln!(self.output, "Transfer")?;
        writeln!(self.output, "Enter card number:")?;
        let Some(recipient) = self.read_line()? else {
            return self.exit();
        };

        match self.bank.check_recipient(&recipient) {
            Ok(()) => {}
            Err(BankError::InvalidCardNumber { .. }) => {
                writeln!(
                    self.output,
                    "Probably you made a mistake in the card number. Please try again!"
                )?;
                return Ok(State::LoggedIn(number));
            }
            Err(BankError::UnknownCard { .. }) => {
                writeln!(self.output, "Such a card does not exist.")?;
                return Ok(State::LoggedIn(number));
            }
            Err(e) => return Err(e),
        }

        writeln!(self.output, "Enter how much money you want to transfer:")?;
        let Some(line) = self.read_line()? else {
            return self.exit();
        };

        let result = parse_amount("transfer", &line)
            .and_then(|amount| self.bank.transfer(&number, &recipient, amount));
        match result {
            Ok(()) => writeln!(self.output, "Success!")?,
            Err(BankError::InsufficientFunds { .. }) => {
                writeln!(self.output, "Not enough money!")?
            }
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "transfer rejected");
                writeln!(
                    self.output,
                    "There was a problem with your response: {}",
                    line
                )?;
            }
            Err(e) => return Err(e),
        }
        Ok(State::LoggedIn(number))
    }

    fn close_account(&mut self, number: String) -> Result<State, BankError> {
        self.bank.close(&number)?;
        writeln!(self.output, "The account has been closed!")?;
        Ok(State::Start)
    }

    fn exit(&mut self) -> Result<State, BankError> {
        writeln!(self.output, "Bye!")?;
        Ok(State::Terminal)
    }

    /// Next input line without surrounding whitespace, `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>, BankError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
