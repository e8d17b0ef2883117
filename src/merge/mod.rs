//! Coordinate-ordered merge of a call set with a reference site panel.
//!
//! Both inputs are pulled through [`RecordCursor`](cursor::RecordCursor)s. Each
//! iteration compares the two current coordinates and takes one of three
//! branches (see [`next_step`](engine::next_step)):
//!
//! | Comparison | Action |
//! |------------|--------|
//! | call < site | write the call-set record |
//! | call > site | synthesize `0|0` for the site if its contig is declared |
//! | equal | write the call-set record, discard the site |
//!
//! When one side runs out the other is drained with the same rules.

pub mod cursor;
pub mod engine;
pub mod synth;
