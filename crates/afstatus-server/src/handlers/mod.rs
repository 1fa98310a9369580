pub mod status;

use axum::{
  body::Body,
  http::{StatusCode, header},
  response::Response,
};

pub(crate) const CONTENT_TYPE_HTML: &str = "text/html;charset=UTF-8";

pub(crate) fn html_response(status: StatusCode, body: String) -> Response {
  Response::builder()
    .status(status)
    .header(header::CONTENT_TYPE, CONTENT_TYPE_HTML)
    .body(Body::from(body))
    .unwrap()
}
