// Core algorithm exports
pub mod copy;
pub mod matching;
pub mod valuation;

pub use copy::{format_price, format_thousands, write_ad, write_email, write_reel_script};
pub use matching::{score_property, Matcher};
pub use valuation::{estimate_price, rate_for_city};
