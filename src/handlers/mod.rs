//! MCP tool handlers for the quadrant server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each handler is in a separate file for better organization.

pub mod add;
pub mod complete;
pub mod delete;
pub mod list;
pub mod suggest;
pub mod update;
