use std::fmt;

use nutype::nutype;

pub type HttpClient = reqwest_middleware::ClientWithMiddleware;

fn trim_trailing_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(
        rest,
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace)
    )
}

#[nutype(
    sanitize(trim, with = trim_trailing_slash),
    validate(predicate = is_http_url),
    derive(Debug, Clone, AsRef, Display)
)]
pub struct SupabaseUrl(String);

#[nutype(sanitize(trim), validate(not_empty), derive(Clone, AsRef))]
pub struct SupabaseAnonKey(String);

/// Where the hosted backend lives and the public key sent along every
/// request.
#[derive(Clone)]
pub struct SupabaseConfig {
    pub url:      SupabaseUrl,
    pub anon_key: SupabaseAnonKey,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

impl SupabaseConfig {
    pub fn rest(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    pub fn auth(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.url, endpoint)
    }

    pub fn anon_key(&self) -> &str { self.anon_key.as_ref() }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::net::TcpListener;
    use std::sync::Arc;

    use actix_web::{web, App, HttpServer};
    use yare::parameterized;

    use super::*;

    /// Serve `routes` on a free local port, standing in for the hosted
    /// backend. Must be called from an actix runtime.
    pub(crate) fn serve(
        routes: fn(&mut web::ServiceConfig),
    ) -> (SupabaseConfig, Arc<HttpClient>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let server = HttpServer::new(move || App::new().configure(routes))
            .workers(1)
            .disable_signals()
            .listen(listener)
            .unwrap()
            .run();
        actix_web::rt::spawn(server);
        let config = SupabaseConfig {
            url:      SupabaseUrl::try_new(url).unwrap(),
            anon_key: SupabaseAnonKey::try_new("anon").unwrap(),
        };
        let client =
            reqwest_middleware::ClientBuilder::new(reqwest::Client::new())
                .build();
        (config, Arc::new(client))
    }

    #[parameterized(
        https = {"https://abc.supabase.co", true},
        trailing_slash = {"https://abc.supabase.co/", true},
        http_local = {"http://127.0.0.1:54321", true},
        no_scheme = {"abc.supabase.co", false},
        empty_host = {"https://", false}
    )]
    fn test_supabase_url(url: &str, valid: bool) {
        assert_eq!(SupabaseUrl::try_new(url).is_ok(), valid);
    }

    #[test]
    fn test_endpoints() {
        let config = SupabaseConfig {
            url:      SupabaseUrl::try_new("https://abc.supabase.co/").unwrap(),
            anon_key: SupabaseAnonKey::try_new("anon").unwrap(),
        };
        assert_eq!(
            config.rest("pledges"),
            "https://abc.supabase.co/rest/v1/pledges"
        );
        assert_eq!(config.auth("user"), "https://abc.supabase.co/auth/v1/user");
        assert!(!format!("{:?}", config).contains("anon\""));
    }
}
