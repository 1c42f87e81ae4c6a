// Library target exists for the integration tests under tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// tests can import types via `chunkr::engine::*` / `chunkr::session::*`.
// Most code is only exercised through the binary, so suppress dead_code
// warnings.
#![allow(dead_code)]

pub mod engine;
pub mod feedback;
pub mod levels;
pub mod session;
pub mod store;

// Private: binary-side modules, compiled here too so the library target
// covers the whole tree
mod app;
mod config;
mod event;
mod ui;
