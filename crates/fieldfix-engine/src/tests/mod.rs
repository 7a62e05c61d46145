//! Unit tests for fieldfix-engine.
