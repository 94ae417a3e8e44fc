mod http_client_main;

pub use http_client_main::HttpClient;
