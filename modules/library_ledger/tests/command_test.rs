//! The JSON command surface end to end through the local client.

use serde_json::{json, Value};

use library_ledger::api::command::handle_line;
use library_ledger::LibraryLedger;

async fn call(ledger: &LibraryLedger, request: Value) -> Value {
    let client = ledger.client();
    let line = handle_line(client.as_ref(), &request.to_string()).await;
    serde_json::from_str(&line).expect("response must be valid JSON")
}

#[tokio::test]
async fn alice_borrows_and_returns_dune() {
    let ledger = LibraryLedger::default();

    let alice = call(&ledger, json!({"op": "createUser", "name": "Alice"})).await;
    let user_id = alice["ok"]["id"].as_str().unwrap().to_string();
    assert_eq!(alice["ok"]["borrowedBookIds"], json!([]));

    let dune = call(&ledger, json!({"op": "createBook", "name": "Dune"})).await;
    let book_id = dune["ok"]["id"].as_str().unwrap().to_string();
    assert_eq!(dune["ok"]["borrowed"], json!(false));

    let borrow = json!({"op": "borrowBook", "bookId": book_id, "userId": user_id});
    let first = call(&ledger, borrow.clone()).await;
    assert_eq!(first["ok"]["borrowed"], json!(true));

    let second = call(&ledger, borrow).await;
    assert_eq!(second["err"]["kind"], "AlreadyBorrowed");

    let user = call(&ledger, json!({"op": "getUserById", "id": user_id})).await;
    assert_eq!(user["ok"]["borrowedBookIds"], json!([book_id]));

    let returned = call(
        &ledger,
        json!({"op": "returnBook", "bookId": book_id, "userId": user_id}),
    )
    .await;
    assert_eq!(returned["ok"]["borrowed"], json!(false));

    let user = call(&ledger, json!({"op": "getUserById", "id": user_id})).await;
    assert_eq!(user["ok"]["borrowedBookIds"], json!([]));
}

#[tokio::test]
async fn listing_operations_return_arrays() {
    let ledger = LibraryLedger::default();

    assert_eq!(call(&ledger, json!({"op": "getAllUsers"})).await, json!({"ok": []}));
    assert_eq!(call(&ledger, json!({"op": "getAllBook"})).await, json!({"ok": []}));

    call(&ledger, json!({"op": "createBook", "name": "Dune"})).await;
    call(&ledger, json!({"op": "createBook", "name": "Emma"})).await;

    let books = call(&ledger, json!({"op": "getAllBook"})).await;
    assert_eq!(books["ok"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn missing_arguments_are_invalid_parameters() {
    let ledger = LibraryLedger::default();

    let resp = call(&ledger, json!({"op": "createUser"})).await;
    assert_eq!(resp["err"]["kind"], "InvalidParameter");

    let resp = call(&ledger, json!({"op": "getBookById", "id": ""})).await;
    assert_eq!(resp["err"]["kind"], "InvalidParameter");

    let resp = call(&ledger, json!({"op": "getBookById", "id": "nope"})).await;
    assert_eq!(resp["err"]["kind"], "BookNotFound");
}

#[tokio::test]
async fn malformed_lines_are_rejected() {
    let ledger = LibraryLedger::default();
    let client = ledger.client();

    for line in ["not json", r#"{"op": "deleteUser", "id": "x"}"#, "{}"] {
        let resp: Value = serde_json::from_str(&handle_line(client.as_ref(), line).await).unwrap();
        assert_eq!(resp["err"]["kind"], "InvalidRequest", "line: {line}");
    }
}
