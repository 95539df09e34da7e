#![allow(clippy::unwrap_used, reason = "tests panic on unexpected results")]

mod params;

use crate::NodePattern;

fn pattern(source: &str) -> NodePattern {
    match NodePattern::new(source) {
        Ok(pattern) => pattern,
        Err(err) => panic!("pattern `{source}` failed to compile: {err}"),
    }
}
