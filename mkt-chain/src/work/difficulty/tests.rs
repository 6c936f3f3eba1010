//! Tests for difficulty and work

mod prop;
