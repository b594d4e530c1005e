//! mangashelf — a local shelf of bookmarked manga.
//!
//! The bookmark store keeps an ordered, id-unique list of bookmarks in memory
//! and mirrors it to one durable storage slot after every change. This library
//! crate exposes all modules for use by the RPC binary and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod storage;
pub mod types;
