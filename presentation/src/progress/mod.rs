//! Progress reporting for turn execution

pub mod reporter;
