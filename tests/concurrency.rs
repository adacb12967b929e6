//! Concurrent borrow and return against a multi-connection file database

mod common;

use librarian::AppError;

use common::{add_book, add_member, open, open_borrows, stock, Library};

const BORROWERS: usize = 16;
const COPIES: i64 = 5;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_borrows_never_oversell() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("library.db").display());
    let Library { services, repository } = open(&url, 8).await;

    let book = add_book(&services, "Dune", "Frank Herbert", "Sci-Fi", COPIES).await;
    let mut members = Vec::new();
    for i in 0..BORROWERS {
        let member = add_member(&services, "Reader", &format!("reader{}@example.com", i)).await;
        members.push(member.member_id);
    }

    let handles: Vec<_> = members
        .iter()
        .map(|&member_id| {
            let services = services.clone();
            let book_id = book.book_id;
            tokio::spawn(async move { services.loans.borrow_book(member_id, book_id).await })
        })
        .collect();

    let mut winners = Vec::new();
    for (member_id, handle) in members.iter().zip(handles) {
        match handle.await.unwrap() {
            Ok(_) => winners.push(*member_id),
            Err(AppError::OutOfStock(_)) => {}
            Err(e) => panic!("unexpected borrow failure: {}", e),
        }
    }

    assert_eq!(winners.len() as i64, COPIES);
    assert_eq!(stock(&services, book.book_id).await, 0);
    assert_eq!(open_borrows(&repository, book.book_id).await, COPIES);

    // Two racing returns per winner: exactly one of each pair closes the record
    let handles: Vec<_> = winners
        .iter()
        .flat_map(|&member_id| [member_id, member_id])
        .map(|member_id| {
            let services = services.clone();
            let book_id = book.book_id;
            tokio::spawn(async move { services.loans.return_book(member_id, book_id).await })
        })
        .collect();

    let mut returned = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => returned += 1,
            Err(AppError::NoActiveBorrow { .. }) => {}
            Err(e) => panic!("unexpected return failure: {}", e),
        }
    }

    assert_eq!(returned as i64, COPIES);
    assert_eq!(stock(&services, book.book_id).await, COPIES);
    assert_eq!(open_borrows(&repository, book.book_id).await, 0);
}
