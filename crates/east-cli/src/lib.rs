//! Library half of the `east` demonstration binary, split out so its
//! scenario fixtures are reachable from integration tests (spec §2 item 8).

pub mod scenarios;
