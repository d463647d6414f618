use actix_web::HttpRequest;

/// Client address used to key login attempts. `X-Forwarded-For` is honoured
/// only when the service sits behind a trusted proxy.
pub fn get_client_ip(req: &HttpRequest, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn forwarded_header_only_when_trusted() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.9, 10.0.0.1"))
            .peer_addr("127.0.0.1:5000".parse().unwrap())
            .to_http_request();

        assert_eq!(get_client_ip(&req, true), "203.0.113.9");
        assert_eq!(get_client_ip(&req, false), "127.0.0.1");
    }
}
