//! resctl: command-line access to remote API resources
//!
//! Resources are described declaratively (parent scopes, field flags and one
//! callback per operation) and the registrar turns each description into
//! `list`, `get`, `create`, `update` and `delete` subcommands.

pub mod cli;
pub mod core;
pub mod entities;
pub mod logging;
pub mod testing;
