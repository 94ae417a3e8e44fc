pub const DEFAULT_QUERY_TYPE: &str = "A";

pub const THREAD_NAME: &str = "odoh-client";
