//! Employee API Module
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | /api/employees | POST | Create employee and its credentials |
//! | /api/employees | GET | List Active employees |
//! | /api/employees/{id} | GET | Active employee by id |
//! | /api/employees/{id} | PUT | Partial update |
//! | /api/employees/{id} | DELETE | Soft delete |
//! | /api/employees/authenticate | POST | Resolve one credential to an employee |
//! | /api/employees/check-email/{email} | GET | Email already registered |
//! | /api/employees/check-name/{name} | GET | Name used by an Active employee |

mod handler;


use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/authenticate", post(handler::authenticate))
        .route("/check-email/{email}", get(handler::check_email))
        .route("/check-name/{name}", get(handler::check_name))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
