use tracing::{debug, warn};

use crate::api::command::dto::{BookDto, Payload, Request, Response, UserDto};
use crate::contract::client::LibraryApi;

/// Execute one request against the ledger.
pub async fn dispatch(api: &dyn LibraryApi, req: Request) -> Response {
    let op = req.op();
    debug!("Dispatching {}", op);

    let response: Response = match req {
        Request::CreateUser { name } => api.create_user(&name).await.into(),
        Request::CreateBook { name } => api.create_book(&name).await.into(),
        Request::BorrowBook { book_id, user_id } => {
            api.borrow_book(&book_id, &user_id).await.into()
        }
        Request::ReturnBook { book_id, user_id } => {
            api.return_book(&book_id, &user_id).await.into()
        }
        Request::GetBookById { id } => api.get_book(&id).await.into(),
        Request::GetUserById { id } => api.get_user(&id).await.into(),
        Request::GetAllUsers => Response::Ok(Payload::Users(
            api.list_users().await.into_iter().map(UserDto::from).collect(),
        )),
        Request::GetAllBook => Response::Ok(Payload::Books(
            api.list_books().await.into_iter().map(BookDto::from).collect(),
        )),
    };

    if let Response::Err(ref e) = response {
        warn!("{} failed: {}", op, e.message);
    }
    response
}

/// Decode one JSON request line, run it, and encode the response.
pub async fn handle_line(api: &dyn LibraryApi, line: &str) -> String {
    let response = match serde_json::from_str::<Request>(line) {
        Ok(req) => dispatch(api, req).await,
        Err(e) => {
            warn!("Rejected malformed request: {}", e);
            Response::invalid_request(e.to_string())
        }
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"err":{{"kind":"Internal","message":"failed to encode response: {e}"}}}}"#)
    })
}
