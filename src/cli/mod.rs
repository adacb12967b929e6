//! Interactive menu shell
//!
//! Reads one menu choice per loop iteration, prompts for the inputs of the
//! chosen command and prints the outcome. Operation failures are printed and
//! the loop carries on; only I/O failures on the terminal end it early.

pub mod command;

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub use command::{Command, InvalidChoice};

use crate::{
    error::AppError,
    models::{book::Book, CreateBook, CreateMember, UpdateMemberEmail},
    services::Services,
};

const MENU_TITLE: &str = "--- Library Management System ---";

#[derive(Debug, Error)]
enum ShellError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Invalid number: '{0}'")]
    BadNumber(String),

    #[error("Input is not valid UTF-8")]
    BadEncoding,

    #[error("input closed")]
    Eof,

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

type ShellResult<T> = Result<T, ShellError>;

/// Menu loop over an input and an output stream
pub struct Shell<R, W> {
    services: Services,
    input: R,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(services: Services, input: R, output: W) -> Self {
        Self {
            services,
            input,
            output,
        }
    }

    /// Run until Exit is chosen or the input ends
    pub async fn run(&mut self) -> std::io::Result<()> {
        loop {
            self.print_menu().await?;

            let choice = match self.prompt("Choose option: ").await {
                Ok(choice) => choice,
                Err(ShellError::Eof) => break,
                Err(ShellError::Io(e)) => return Err(e),
                Err(e) => {
                    self.println(&format!("Error: {}", e)).await?;
                    continue;
                }
            };

            let command = match choice.parse::<Command>() {
                Ok(Command::Exit) => break,
                Ok(command) => command,
                Err(InvalidChoice(choice)) => {
                    tracing::debug!("Invalid menu choice {:?}", choice);
                    self.println("Invalid choice. Please try again.").await?;
                    continue;
                }
            };

            match self.dispatch(command).await {
                Ok(()) => {}
                Err(ShellError::Eof) => break,
                Err(ShellError::Io(e)) => return Err(e),
                Err(ShellError::App(e)) => {
                    self.println(&format!("Error: {}", e.user_message())).await?;
                }
                Err(e) => self.println(&format!("Error: {}", e)).await?,
            }
        }

        self.output.flush().await
    }

    async fn dispatch(&mut self, command: Command) -> ShellResult<()> {
        match command {
            Command::AddMember => self.add_member().await,
            Command::AddBook => self.add_book().await,
            Command::ListBooks => self.list_books().await,
            Command::SearchBooks => self.search_books().await,
            Command::ShowMemberDetails => self.show_member().await,
            Command::UpdateBookStock => self.update_book_stock().await,
            Command::UpdateMemberEmail => self.update_member_email().await,
            Command::DeleteMember => self.delete_member().await,
            Command::DeleteBook => self.delete_book().await,
            Command::BorrowBook => self.borrow_book().await,
            Command::ReturnBook => self.return_book().await,
            // Handled by the loop before dispatch
            Command::Exit => Ok(()),
        }
    }

    async fn add_member(&mut self) -> ShellResult<()> {
        let name = self.prompt("Member name: ").await?;
        let email = self.prompt("Member email: ").await?;

        let member = self
            .services
            .members
            .add_member(CreateMember { name, email })
            .await?;
        self.print_record("Added Member:", &member).await
    }

    async fn add_book(&mut self) -> ShellResult<()> {
        let title = self.prompt("Book title: ").await?;
        let author = self.prompt("Book author: ").await?;
        let category = self.prompt("Book category: ").await?;
        let stock = self.prompt_number("Stock quantity: ").await?;

        let book = self
            .services
            .catalog
            .add_book(CreateBook {
                title,
                author,
                category,
                stock,
            })
            .await?;
        self.print_record("Added Book:", &book).await
    }

    async fn list_books(&mut self) -> ShellResult<()> {
        let books = self.services.catalog.list_books().await?;
        self.print_books("--- Book List ---", &books).await
    }

    async fn search_books(&mut self) -> ShellResult<()> {
        let keyword = self.prompt("Search keyword: ").await?;
        let books = self.services.catalog.search_books(&keyword).await?;
        self.print_books("--- Search Results ---", &books).await
    }

    async fn show_member(&mut self) -> ShellResult<()> {
        let member_id = self.prompt_number("Member ID: ").await?;
        let details = self.services.members.member_details(member_id).await?;

        self.println("").await?;
        self.print_record("Member Details:", &details.member).await?;
        self.println(&format!(
            "\nBorrow Records ({} not returned):",
            details.open_borrows()
        ))
        .await?;
        for borrow in &details.borrows {
            let book_id = borrow
                .book_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            let title = borrow.book_title.as_deref().unwrap_or("(deleted)");
            self.println(&format!(
                "Book ID: {}, Title: {}, Status: {}",
                book_id, title, borrow.status
            ))
            .await?;
        }
        Ok(())
    }

    async fn update_book_stock(&mut self) -> ShellResult<()> {
        let book_id = self.prompt_number("Book ID: ").await?;
        let stock = self.prompt_number("New stock quantity: ").await?;

        let book = self
            .services
            .catalog
            .update_book_stock(book_id, stock)
            .await?;
        self.print_record("Stock Updated:", &book).await
    }

    async fn update_member_email(&mut self) -> ShellResult<()> {
        let member_id = self.prompt_number("Member ID: ").await?;
        let email = self.prompt("New email: ").await?;

        let member = self
            .services
            .members
            .update_member_email(member_id, UpdateMemberEmail { email })
            .await?;
        self.print_record("Email Updated:", &member).await
    }

    async fn delete_member(&mut self) -> ShellResult<()> {
        let member_id = self.prompt_number("Member ID to delete: ").await?;
        self.services.members.delete_member(member_id).await?;
        self.println(&format!("Member {} deleted.", member_id)).await?;
        Ok(())
    }

    async fn delete_book(&mut self) -> ShellResult<()> {
        let book_id = self.prompt_number("Book ID to delete: ").await?;
        self.services.catalog.delete_book(book_id).await?;
        self.println(&format!("Book {} deleted.", book_id)).await?;
        Ok(())
    }

    async fn borrow_book(&mut self) -> ShellResult<()> {
        let member_id = self.prompt_number("Member ID: ").await?;
        let book_id = self.prompt_number("Book ID: ").await?;

        self.services.loans.borrow_book(member_id, book_id).await?;
        self.println("Book borrowed successfully.").await?;
        Ok(())
    }

    async fn return_book(&mut self) -> ShellResult<()> {
        let member_id = self.prompt_number("Member ID: ").await?;
        let book_id = self.prompt_number("Book ID: ").await?;

        self.services.loans.return_book(member_id, book_id).await?;
        self.println("Book returned successfully.").await?;
        Ok(())
    }

    async fn print_menu(&mut self) -> std::io::Result<()> {
        let mut menu = format!("\n{}\n", MENU_TITLE);
        for command in Command::ALL {
            menu.push_str(&format!("{}\n", command));
        }
        self.output.write_all(menu.as_bytes()).await
    }

    async fn print_books(&mut self, heading: &str, books: &[Book]) -> ShellResult<()> {
        self.println(&format!("\n{}", heading)).await?;
        for book in books {
            self.println(&format!(
                "[{}] {} by {} ({}) - stock: {}",
                book.book_id, book.title, book.author, book.category, book.stock
            ))
            .await?;
        }
        Ok(())
    }

    async fn print_record<T: Serialize>(&mut self, label: &str, record: &T) -> ShellResult<()> {
        let json = serde_json::to_string(record)?;
        self.println(&format!("{} {}", label, json)).await?;
        Ok(())
    }

    async fn println(&mut self, line: &str) -> std::io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await
    }

    /// Print `label` and read one line, without its line ending
    async fn prompt(&mut self, label: &str) -> ShellResult<String> {
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;

        // Read raw bytes so a bad line is consumed whole and can be rejected
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw).await? == 0 {
            return Err(ShellError::Eof);
        }
        let line = String::from_utf8(raw).map_err(|_| ShellError::BadEncoding)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    async fn prompt_number(&mut self, label: &str) -> ShellResult<i64> {
        let raw = self.prompt(label).await?;
        raw.trim()
            .parse::<i64>()
            .map_err(|_| ShellError::BadNumber(raw.trim().to_string()))
    }
}
