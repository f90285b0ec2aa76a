use super::*;
use crate::models::PropertyType;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accept one connection, answer with the canned response, return the raw request text.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];

        let header_end = loop {
            let n = socket.read(&mut buf).await.unwrap();
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            assert!(n > 0, "connection closed before headers completed");
        };

        let headers = String::from_utf8_lossy(&raw[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while raw.len() < header_end + content_length {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&raw).into_owned()
    });

    (format!("http://{addr}/api"), handle)
}

fn api_for(base_url: &str) -> HttpApi {
    HttpApi::new(&ClientConfig::default().with_api_base_url(base_url)).unwrap()
}

const EMPTY_PAGE: &str = r#"{"content":[],"page":1,"totalPages":3,"totalElements":20}"#;

#[tokio::test]
async fn list_properties_sends_paging_and_bearer_token() {
    let (base, server) = serve_once("HTTP/1.1 200 OK", EMPTY_PAGE).await;
    let api = api_for(&base);
    api.set_bearer_token(Some("t1".into()));

    let page = api.list_properties(PageRequest::new(1, 9)).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 3);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/properties?page=1&size=9 HTTP/1.1"), "{request}");
    assert!(request.to_lowercase().contains("authorization: bearer t1"));
}

#[tokio::test]
async fn requests_carry_no_token_after_it_is_cleared() {
    let (base, server) = serve_once("HTTP/1.1 200 OK", EMPTY_PAGE).await;
    let api = api_for(&base);
    api.set_bearer_token(Some("t1".into()));
    api.set_bearer_token(None);

    api.my_properties(PageRequest::new(0, 9)).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/properties/me?page=0&size=9 "));
    assert!(!request.to_lowercase().contains("authorization:"));
}

#[tokio::test]
async fn search_sends_only_non_empty_filters() {
    let (base, server) = serve_once("HTTP/1.1 200 OK", EMPTY_PAGE).await;
    let api = api_for(&base);
    let filters = SearchFilters {
        location: Some("Austin".into()),
        property_type: Some("RENT".into()),
        keywords: Some(String::new()),
        ..Default::default()
    };

    api.search_properties(&filters, PageRequest::new(0, 9)).await.unwrap();

    let request = server.await.unwrap();
    assert!(
        request.starts_with("GET /api/properties/search?location=Austin&type=RENT&page=0&size=9 "),
        "{request}"
    );
}

#[tokio::test]
async fn error_status_surfaces_server_message() {
    let (base, server) = serve_once(
        "HTTP/1.1 401 Unauthorized",
        r#"{"status":401,"message":"Bad credentials","errors":null}"#,
    )
    .await;
    let api = api_for(&base);

    let err = api
        .login(&LoginRequest { email: "a@b.com".into(), password: "x".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert_eq!(err.message_or("Invalid email or password"), "Bad credentials");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/auth/login "));
    assert!(request.contains(r#""email":"a@b.com""#));
}

#[tokio::test]
async fn error_without_json_body_has_no_message() {
    let (base, server) = serve_once("HTTP/1.1 502 Bad Gateway", "upstream down").await;
    let api = api_for(&base);

    let err = api.get_property(9).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.message_or("Property not found"), "Property not found");
    server.await.unwrap();
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let (base, server) = serve_once("HTTP/1.1 204 No Content", "").await;
    let api = api_for(&base);

    api.delete_user(5).await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("DELETE /api/admin/users/5 "));
}

#[tokio::test]
async fn create_property_sends_multipart_parts() {
    let (base, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"id":11,"title":"Cabin","description":"A quiet cabin by the lake with two bedrooms.","price":99000,"type":"SALE","location":"Tahoe","status":"PENDING"}"#,
    )
    .await;
    let api = api_for(&base);
    let payload = PropertyPayload {
        title: "Cabin".into(),
        description: "A quiet cabin by the lake with two bedrooms.".into(),
        price: 99000.0,
        property_type: PropertyType::Sale,
        location: "Tahoe".into(),
        contact_email: None,
        contact_phone: None,
    };
    let image = ImageUpload::new("cabin.png", b"png-bytes".to_vec());

    let created = api.create_property(&payload, Some(image)).await.unwrap();
    assert_eq!(created.id, 11);

    let request = server.await.unwrap();
    let lower = request.to_lowercase();
    assert!(request.starts_with("POST /api/properties "));
    assert!(lower.contains("content-type: multipart/form-data; boundary="));
    assert!(request.contains(r#"name="property""#));
    assert!(request.contains(r#"name="image"; filename="cabin.png""#));
    assert!(request.contains(r#""contactEmail":null"#));
    assert!(request.contains("png-bytes"));
}
