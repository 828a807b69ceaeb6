//! Task-local request context.
//!
//! Exposes the current request's id to anything running inside the request's
//! task, most importantly the problem-details error responder. Uses Tokio
//! task-local storage; the scope is established by the `RequestTrace`
//! middleware. Service and domain code must not import this module.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static REQUEST_ID: RefCell<Option<String>>;
}

/// Request id of the current task, or "unknown" outside a request scope.
pub fn request_id() -> String {
    REQUEST_ID
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| "unknown".to_string())
        })
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future with the given request id in scope.
pub async fn with_request_id<F, R>(request_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    REQUEST_ID.scope(RefCell::new(Some(request_id)), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn outside_scope_is_unknown() {
        assert_eq!(request_id(), "unknown");
    }

    #[tokio::test]
    async fn inside_scope_returns_the_id() {
        let id = "req-123".to_string();
        let got = with_request_id(id.clone(), async { request_id() }).await;
        assert_eq!(got, id);
        assert_eq!(request_id(), "unknown");
    }
}
