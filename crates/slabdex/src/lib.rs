//! Slabdex - spreadsheet-backed slab inventory search.
//!
//! This crate provides both a CLI application and a library for serving
//! filtered inventory searches out of a sheet used as a makeshift
//! database. The heart of it is the filter-project engine in
//! [`engine`]; everything around it — row sources, users, tokens,
//! serverless-style handlers — is plumbing that feeds the engine or
//! guards access to it.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod functions;
pub mod schema;
pub mod search;
pub mod users;

// Public CLI module (needed by binary)
pub mod cli;
