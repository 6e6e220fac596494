//! Unit tests for tether CLI
//!
//! These tests drive the library API with stub ports and temporary
//! directories; they never spawn the binary or an external tool.

mod manifest_properties;
