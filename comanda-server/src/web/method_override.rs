//! HTML form method override
//!
//! Browsers only submit GET and POST. A form posting to `/mesa/3?_method=PUT`
//! is routed as `PUT /mesa/3`. The rewrite has to run before routing, so this
//! middleware wraps the whole router rather than individual routes.

use axum::extract::{Query, Request};
use axum::middleware::Next;
use axum::response::Response;
use http::Method;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MethodOverride {
    #[serde(rename = "_method")]
    method: Option<String>,
}

pub async fn method_override(mut req: Request, next: Next) -> Response {
    if req.method() == Method::POST
        && let Some(method) = overridden_method(&req)
    {
        tracing::trace!(uri = %req.uri(), %method, "Method override");
        *req.method_mut() = method;
    }
    next.run(req).await
}

fn overridden_method(req: &Request) -> Option<Method> {
    let Query(query) = Query::<MethodOverride>::try_from_uri(req.uri()).ok()?;
    match query.method?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn post(uri: &str) -> Request {
        http::Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_overridden_method() {
        assert_eq!(overridden_method(&post("/mesa/1?_method=PUT")), Some(Method::PUT));
        assert_eq!(overridden_method(&post("/mesa/1?_method=delete")), Some(Method::DELETE));
        assert_eq!(overridden_method(&post("/mesa/1?_method=GET")), None);
        assert_eq!(overridden_method(&post("/mesa/1")), None);
        assert_eq!(overridden_method(&post("/mesa/1?x=1&_method=PUT")), Some(Method::PUT));
    }
}
