// Test utility module for postmap integration tests
#![allow(dead_code)]

use postmap::{Message, Person};
use std::path::PathBuf;

/// Person shaped like the original fixtures: username `user#<id>`.
pub fn user(id: i64) -> Person {
    Person::new(id).with_username(format!("user#{id}"))
}

pub fn user_at(id: i64, lat: f64, lng: f64) -> Person {
    user(id).with_position(lat, lng)
}

/// Post shaped like the original fixtures: title `Post #<id>`.
pub fn post(id: i64, user_id: i64) -> Message {
    Message::new(id, user_id, format!("Post #{id}")).with_body(format!("Post #{id} body"))
}

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

// Helper to create temporary test files
pub fn create_test_file(content: &str, name: &str) -> (tempfile::TempDir, PathBuf) {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join(name);
    std::fs::write(&file_path, content).expect("Failed to write test file");
    (temp_dir, file_path)
}
