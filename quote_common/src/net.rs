//! Shared networking constants and helpers used by client and server.

/// Default port of the quote service.
pub const SERVICE_PORT: u16 = 8080;
/// Path of the inbound quote endpoint.
pub const QUOTE_PATH: &str = "/cotacao";
/// Default external USD→BRL quote source.
pub const PROVIDER_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// URL of the quote endpoint on `host:port`.
pub fn quote_url(host: &str, port: u16) -> String {
    format!("http://{}{}", addr(host, port), QUOTE_PATH)
}
