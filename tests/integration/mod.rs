//! Integration test suite for blockflow.
//!
//! These tests run the public analysis entry points over whole board
//! snapshots and check the derived output the canvas, list, and flow
//! views consume.
//!
//! # Test Categories
//!
//! - `scenarios`: End-to-end board scenarios through `analyze`
//! - `cycles`: Malformed and cyclic dependency input
//! - `edges`: Manual and inferred block edges with geometry
//! - `snapshots`: Snapshot files and configuration on disk

mod fixtures;

mod cycles;
mod scenarios;
