//! Integration tests driving the whole journal over a temporary data directory.

mod config;
mod editing;
mod persistence;
