use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};

/// Key under which requests are rate limited.
const UNKNOWN: &str = "unknown";

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(middleware))
}

async fn middleware(mut request: Request, next: Next) -> Response {
    let client_key = ClientKey::from_headers(request.headers());
    request.extensions_mut().insert(client_key);
    next.run(request).await
}

/// Identity of the client as reported by the reverse proxy.
///
/// Clients without proxy headers all share the `unknown` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(pub String);

impl ClientKey {
    fn from_headers(headers: &HeaderMap) -> Self {
        let forwarded_for = headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next());
        let real_ip = headers
            .get("x-real-ip")
            .and_then(|value| value.to_str().ok());

        let key = [forwarded_for, real_ip]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(UNKNOWN);

        Self(key.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn key(headers: &[(&'static str, &'static str)]) -> String {
        let mut map = HeaderMap::new();
        for &(name, value) in headers {
            map.insert(name, HeaderValue::from_static(value));
        }
        ClientKey::from_headers(&map).0
    }

    #[test]
    fn forwarded_for_first_hop() {
        assert_eq!(key(&[("x-forwarded-for", "1.2.3.4, 10.0.0.1")]), "1.2.3.4");
    }

    #[test]
    fn forwarded_for_wins_over_real_ip() {
        assert_eq!(
            key(&[("x-forwarded-for", "1.2.3.4"), ("x-real-ip", "5.6.7.8")]),
            "1.2.3.4"
        );
    }

    #[test]
    fn real_ip_fallback() {
        assert_eq!(key(&[("x-real-ip", " 5.6.7.8 ")]), "5.6.7.8");
        assert_eq!(
            key(&[("x-forwarded-for", ""), ("x-real-ip", "5.6.7.8")]),
            "5.6.7.8"
        );
    }

    #[test]
    fn unknown_without_headers() {
        assert_eq!(key(&[]), "unknown");
    }
}
