//! HTTP-level tests driving the full router over in-memory stores.

mod helpers;

mod admin_test;
mod lawyer_test;
mod register_test;
mod requests_test;
