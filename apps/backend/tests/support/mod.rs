#![allow(dead_code)]

pub mod app;
pub mod fixtures;
pub mod mailer;

pub use app::{call, call_json, test_app, test_state, TEST_SECRET};
pub use fixtures::{complete_request, new_request_body, seed_supplier, seed_user};
pub use mailer::RecordingMailer;
