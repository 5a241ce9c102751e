//! Calendar MCP - Google Calendar tools over an MCP event stream
//!
//! Agents connect over SSE, call calendar tools through JSON-RPC, and are
//! told to authenticate when no credential is present. Authorization runs
//! out of band: the consent callback installs the credential and notifies
//! every session waiting on the same correlation token.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
