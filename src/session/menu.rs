//! Menu tables for the interactive session
//!
//! Each menu is a static list of numbered options. Rendering prints them in
//! order; choosing maps a line of user input back to the option's action.

use std::io::{self, Write};

/// One numbered entry of a menu
#[derive(Debug, Clone, Copy)]
pub struct MenuOption<A> {
    pub id: u8,
    pub label: &'static str,
    pub action: A,
}

/// Actions offered before logging in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAction {
    CreateAccount,
    LogIn,
    Exit,
}

/// Actions offered to a logged-in card holder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Balance,
    AddIncome,
    Transfer,
    CloseAccount,
    LogOut,
    Exit,
}

pub const START_MENU: &[MenuOption<StartAction>] = &[
    MenuOption {
        id: 1,
        label: "Create an account",
        action: StartAction::CreateAccount,
    },
    MenuOption {
        id: 2,
        label: "Log into account",
        action: StartAction::LogIn,
    },
    MenuOption {
        id: 0,
        label: "Exit",
        action: StartAction::Exit,
    },
];

pub const ACCOUNT_MENU: &[MenuOption<AccountAction>] = &[
    MenuOption {
        id: 1,
        label: "Balance",
        action: AccountAction::Balance,
    },
    MenuOption {
        id: 2,
        label: "Add income",
        action: AccountAction::AddIncome,
    },
    MenuOption {
        id: 3,
        label: "Do transfer",
        action: AccountAction::Transfer,
    },
    MenuOption {
        id: 4,
        label: "Close account",
        action: AccountAction::CloseAccount,
    },
    MenuOption {
        id: 5,
        label: "Log out",
        action: AccountAction::LogOut,
    },
    MenuOption {
        id: 0,
        label: "Exit",
        action: AccountAction::Exit,
    },
];

/// Print every option as `<id>. <label>`
pub fn render<A>(options: &[MenuOption<A>], output: &mut dyn Write) -> io::Result<()> {
    for option in options {
        writeln!(output, "{}. {}", option.id, option.label)?;
    }
    Ok(())
}

/// Map a line of input to the matching option's action
pub fn choose<A: Copy>(options: &[MenuOption<A>], input: &str) -> Option<A> {
    let id: u8 = input.trim().parse().ok()?;
    options
        .iter()
        .find(|option| option.id == id)
        .map(|option| option.action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_render_start_menu() {
        let mut output = Vec::new();
        render(START_MENU, &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "1. Create an account\n2. Log into account\n0. Exit\n"
        );
    }

    #[test]
    fn test_render_account_menu() {
        let mut output = Vec::new();
        render(ACCOUNT_MENU, &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "1. Balance\n2. Add income\n3. Do transfer\n4. Close account\n5. Log out\n0. Exit\n"
        );
    }

    #[rstest]
    #[case::create("1", Some(StartAction::CreateAccount))]
    #[case::login(" 2 ", Some(StartAction::LogIn))]
    #[case::exit("0", Some(StartAction::Exit))]
    #[case::unknown_id("7", None)]
    #[case::not_a_number("one", None)]
    #[case::empty("", None)]
    #[case::negative("-1", None)]
    fn test_choose_start(#[case] input: &str, #[case] expected: Option<StartAction>) {
        assert_eq!(choose(START_MENU, input), expected);
    }

    #[rstest]
    #[case::balance("1", Some(AccountAction::Balance))]
    #[case::transfer("3", Some(AccountAction::Transfer))]
    #[case::log_out("5", Some(AccountAction::LogOut))]
    #[case::out_of_range("6", None)]
    fn test_choose_account(#[case] input: &str, #[case] expected: Option<AccountAction>) {
        assert_eq!(choose(ACCOUNT_MENU, input), expected);
    }
}
