mod parse;

pub use parse::{parse_opts, Opts};
