//! Menu commands

use std::{fmt, str::FromStr};

/// Every action offered by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddMember,
    AddBook,
    ListBooks,
    SearchBooks,
    ShowMemberDetails,
    UpdateBookStock,
    UpdateMemberEmail,
    DeleteMember,
    DeleteBook,
    BorrowBook,
    ReturnBook,
    Exit,
}

impl Command {
    /// Commands in menu order
    pub const ALL: [Command; 12] = [
        Command::AddMember,
        Command::AddBook,
        Command::ListBooks,
        Command::SearchBooks,
        Command::ShowMemberDetails,
        Command::UpdateBookStock,
        Command::UpdateMemberEmail,
        Command::DeleteMember,
        Command::DeleteBook,
        Command::BorrowBook,
        Command::ReturnBook,
        Command::Exit,
    ];

    /// Number typed to select the command
    pub fn number(self) -> u8 {
        match self {
            Command::AddMember => 1,
            Command::AddBook => 2,
            Command::ListBooks => 3,
            Command::SearchBooks => 4,
            Command::ShowMemberDetails => 5,
            Command::UpdateBookStock => 6,
            Command::UpdateMemberEmail => 7,
            Command::DeleteMember => 8,
            Command::DeleteBook => 9,
            Command::BorrowBook => 10,
            Command::ReturnBook => 11,
            Command::Exit => 12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::AddMember => "Add Member",
            Command::AddBook => "Add Book",
            Command::ListBooks => "List Books",
            Command::SearchBooks => "Search Books",
            Command::ShowMemberDetails => "Show Member Details",
            Command::UpdateBookStock => "Update Book Stock",
            Command::UpdateMemberEmail => "Update Member Email",
            Command::DeleteMember => "Delete Member",
            Command::DeleteBook => "Delete Book",
            Command::BorrowBook => "Borrow Book",
            Command::ReturnBook => "Return Book",
            Command::Exit => "Exit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// A menu choice that names no command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice(pub String);

impl FromStr for Command {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = s.trim();
        choice
            .parse::<u8>()
            .ok()
            .and_then(|n| Command::ALL.into_iter().find(|c| c.number() == n))
            .ok_or_else(|| InvalidChoice(choice.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_menu_number() {
        for (idx, command) in Command::ALL.iter().enumerate() {
            let typed = (idx + 1).to_string();
            assert_eq!(typed.parse::<Command>(), Ok(*command));
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 10\n".parse::<Command>(), Ok(Command::BorrowBook));
    }

    #[test]
    fn test_parse_rejects_unknown_choices() {
        assert_eq!("0".parse::<Command>(), Err(InvalidChoice("0".into())));
        assert_eq!("13".parse::<Command>(), Err(InvalidChoice("13".into())));
        assert!("borrow".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::ShowMemberDetails.to_string(), "5. Show Member Details");
        assert_eq!(Command::Exit.to_string(), "12. Exit");
    }
}
