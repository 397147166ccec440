//! Test Module
//!
//! Cross-module test suites for the MindBridge service.
//!
//! ## Test Categories
//! - `brain_tests`: keyword classification properties, response selection, mood and session context
//! - `database_tests`: users, chats and voice persistence
//! - `actor_tests`: Whisper HTTP backend and the transcriber actor
//! - `api_tests`: HTTP routes for every service profile
//! - `config_tests`: environment-driven configuration

pub mod brain_tests;
pub mod database_tests;
