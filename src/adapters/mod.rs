// 轉接層：領域 ports 的具體實作

pub mod http;

pub use http::HttpTrackingProvider;
