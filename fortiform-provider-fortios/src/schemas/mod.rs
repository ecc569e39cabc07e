//! Resource schemas for the FortiOS provider

pub mod generated;
