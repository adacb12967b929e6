//! Menu shell driven with scripted input

mod common;

use librarian::cli::Shell;

use common::{add_book, add_member, services, stock};

async fn run_bytes(services: &librarian::services::Services, script: &[u8]) -> String {
    let mut output = Vec::new();
    Shell::new(services.clone(), script, &mut output)
        .run()
        .await
        .unwrap();
    String::from_utf8_lossy(&output).into_owned()
}

async fn run_script(services: &librarian::services::Services, script: &str) -> String {
    run_bytes(services, script.as_bytes()).await
}

#[tokio::test]
async fn test_borrow_and_return_session() {
    let services = services().await;
    let script = "\
1\nAnn\nann@example.com\n\
2\nThe Hobbit\nJ.R.R. Tolkien\nFantasy\n1\n\
10\n1\n1\n\
10\n1\n1\n\
5\n1\n\
11\n1\n1\n\
12\n";

    let output = run_script(&services, script).await;

    assert!(output.contains("--- Library Management System ---"));
    assert!(output.contains("12. Exit"));
    assert!(output.contains("Added Member: {"));
    assert!(output.contains("\"email\":\"ann@example.com\""));
    assert!(output.contains("Added Book: {"));
    assert!(output.contains("Book borrowed successfully."));
    assert!(output.contains("Error: Book 1 is not available"));
    assert!(output.contains("Member Details: {"));
    assert!(output.contains("Borrow Records (1 not returned):"));
    assert!(output.contains("Book ID: 1, Title: The Hobbit, Status: Not returned"));
    assert!(output.contains("Book returned successfully."));

    assert_eq!(stock(&services, 1).await, 1);
}

#[tokio::test]
async fn test_invalid_choice_redisplays_menu() {
    let services = services().await;

    let output = run_script(&services, "99\nhello\n12\n").await;

    assert_eq!(output.matches("Invalid choice. Please try again.").count(), 2);
    assert_eq!(output.matches("--- Library Management System ---").count(), 3);
}

#[tokio::test]
async fn test_non_utf8_input_is_reported_and_loop_continues() {
    let services = services().await;
    add_book(&services, "Études", "Frédéric Chopin", "Musique", 1).await;

    let output = run_bytes(&services, b"\xff\xfe\n3\n4\n\xc3\n12\n").await;

    assert_eq!(output.matches("Error: Input is not valid UTF-8").count(), 2);
    assert!(output.contains("--- Book List ---"));
    assert!(output.contains("[1] Études by Frédéric Chopin (Musique) - stock: 1"));
}

#[tokio::test]
async fn test_errors_do_not_end_the_loop() {
    let services = services().await;
    add_member(&services, "Ann", "ann@example.com").await;

    let script = "\
1\nAnother Ann\nann@example.com\n\
6\nabc\n\
11\n1\n1\n\
9\n5\n\
3\n\
12\n";
    let output = run_script(&services, script).await;

    assert!(output.contains("Error: Member with email 'ann@example.com' already exists"));
    assert!(output.contains("Error: Invalid number: 'abc'"));
    assert!(output.contains("Error: No active borrow record for member 1 and book 1"));
    assert!(output.contains("Error: Not found: Book with id 5 not found"));
    assert!(output.contains("--- Book List ---"));
    assert_eq!(services.members.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_catalog_commands() {
    let services = services().await;
    add_book(&services, "The Hobbit", "J.R.R. Tolkien", "Fantasy", 2).await;
    add_book(&services, "Dune", "Frank Herbert", "Sci-Fi", 1).await;

    let script = "\
4\nFANTASY\n\
6\n2\n4\n\
9\n1\n\
3\n\
12\n";
    let output = run_script(&services, script).await;

    let results = output
        .split("--- Search Results ---")
        .nth(1)
        .and_then(|rest| rest.split("--- Library Management System ---").next())
        .unwrap();
    assert!(results.contains("[1] The Hobbit by J.R.R. Tolkien (Fantasy) - stock: 2"));
    assert!(!results.contains("Dune"));

    assert!(output.contains("Stock Updated: {"));
    assert!(output.contains("Book 1 deleted."));
    assert!(output.contains("[2] Dune by Frank Herbert (Sci-Fi) - stock: 4"));
}

#[tokio::test]
async fn test_member_commands() {
    let services = services().await;
    add_member(&services, "Ann", "ann@example.com").await;

    let script = "\
7\n1\nann@library.org\n\
8\n1\n\
5\n1\n\
12\n";
    let output = run_script(&services, script).await;

    assert!(output.contains("Email Updated: {"));
    assert!(output.contains("\"email\":\"ann@library.org\""));
    assert!(output.contains("Member 1 deleted."));
    assert!(output.contains("Error: Not found: Member with id 1 not found"));
}

#[tokio::test]
async fn test_end_of_input_exits_cleanly() {
    let services = services().await;

    let output = run_script(&services, "1\nAnn\n").await;

    assert!(output.contains("Member email: "));
    assert_eq!(services.members.count().await.unwrap(), 0);
}
