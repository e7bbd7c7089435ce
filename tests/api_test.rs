use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`
use travel_desk::api;
use travel_desk::config::Config;
use travel_desk::db;
use travel_desk::infrastructure::AppState;
use travel_desk::server;

// Helper to create a test router; the temp dir must outlive the requests
async fn setup_app() -> (Router, TempDir) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let uploads = tempfile::tempdir().expect("Failed to create upload dir");
    let state = AppState::new(db, uploads.path());
    (api::api_router(state), uploads)
}

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn create_hotel(app: &Router, max_guests: Option<i32>) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/hotels",
            json!({
                "name": "Hilton Tashkent City",
                "address": "Amir Temur Square 107/B",
                "city": "Tashkent",
                "type": "hotel",
                "stars": 5,
                "maxGuests": max_guests,
                "currentGuests": 0
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _uploads) = setup_app().await;

    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_full_router_serves_api_under_prefix() {
    let db = db::init_db("sqlite::memory:").await.unwrap();
    let uploads = tempfile::tempdir().unwrap();
    let config = Config {
        upload_dir: uploads.path().to_path_buf(),
        ..Config::from_lookup(|_| None)
    };
    let app = server::build_router(AppState::new(db, uploads.path()), &config);

    let (status, _) = send(&app, empty_request("GET", "/api/health")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, empty_request("GET", "/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/receipts"].is_object());
}

#[tokio::test]
async fn test_receipt_lifecycle() {
    let (app, _uploads) = setup_app().await;

    let payload = json!({
        "clientName": "John Smith",
        "clientEmail": "john.smith@example.com",
        "receiptDate": "2024-05-01",
        "amountPaid": 250.0,
        "activities": [
            { "type": "hotel", "propertyName": "Hilton Tashkent City", "amount": 250.0 }
        ]
    });
    let (status, created) = send(&app, json_request("POST", "/receipts", payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["receiptNumber"], "M00001");
    assert_eq!(created["activities"][0]["type"], "hotel");
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, empty_request("GET", &format!("/receipts/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["clientName"], "John Smith");

    let (status, found) = send(&app, empty_request("GET", "/receipts/search?q=SMITH")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, empty_request("DELETE", &format!("/receipts/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Receipt deleted successfully");

    let (status, body) = send(&app, empty_request("GET", &format!("/receipts/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Receipt not found");

    // Deleting again is still a success
    let (status, _) = send(&app, empty_request("DELETE", &format!("/receipts/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_receipt_errors() {
    let (app, _uploads) = setup_app().await;

    let malformed = Request::builder()
        .uri("/receipts")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/receipts",
            json!({ "clientName": "John", "receiptDate": "yesterday" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("YYYY-MM-DD"));

    let (status, body) = send(&app, empty_request("GET", "/receipts/search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query is required");

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/receipts/999",
            json!({ "clientName": "John", "receiptDate": "2024-05-01" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_json_error() {
    let (app, _uploads) = setup_app().await;

    for (method, uri) in [
        ("GET", "/receipts/abc"),
        ("DELETE", "/proposals/1.5"),
        ("GET", "/hotels/abc/images"),
        ("DELETE", "/car-rentals/x"),
    ] {
        let (status, body) = send(&app, empty_request(method, uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        let message = body["error"].as_str().unwrap_or_default();
        assert!(message.starts_with("Invalid request data"), "{} {}: {}", method, uri, body);
    }

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/hotels/abc",
            json!({ "name": "Hilton", "address": "Amir Temur 107", "city": "Tashkent", "type": "hotel", "stars": 5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_car_rentals() {
    let (app, _uploads) = setup_app().await;

    let (status, body) = send(&app, json_request("POST", "/car-rentals", json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");

    let (status, created) = send(
        &app,
        json_request("POST", "/car-rentals", json!({ "name": "Avis Uzbekistan" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, list) = send(&app, empty_request("GET", "/car-rentals")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let (status, _) = send(&app, empty_request("DELETE", &format!("/car-rentals/{}", id))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, empty_request("DELETE", &format!("/car-rentals/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Car rental not found");
}

#[tokio::test]
async fn test_proposal_capacity_and_dates() {
    let (app, _uploads) = setup_app().await;
    let hotel_id = create_hotel(&app, Some(4)).await;

    let proposal = |guests: i32, check_out: &str| {
        json!({
            "hotelId": hotel_id,
            "clientName": "Dilnoza",
            "guests": guests,
            "checkIn": "2024-06-10",
            "checkOut": check_out,
            "price": 300.0,
            "rooms": [{ "count": 1 }]
        })
    };

    let (status, body) = send(&app, json_request("POST", "/proposals", proposal(5, "2024-06-12"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("4 spots available"));

    let (status, body) = send(&app, json_request("POST", "/proposals", proposal(2, "2024-06-09"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Check-out date must be after check-in date");

    let (status, created) = send(&app, json_request("POST", "/proposals", proposal(2, "2024-06-12"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["proposalNumber"], "P00001");
    assert_eq!(created["hotel"]["name"], "Hilton Tashkent City");

    // Referenced hotels cannot be deleted
    let (status, _) = send(&app, empty_request("DELETE", &format!("/hotels/{}", hotel_id))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut unknown_hotel = proposal(2, "2024-06-12");
    unknown_hotel["hotelId"] = json!(999);
    let (status, body) = send(&app, json_request("POST", "/proposals", unknown_hotel)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Hotel not found");
}

#[tokio::test]
async fn test_image_upload_and_listing() {
    let (app, _uploads) = setup_app().await;
    let hotel_id = create_hotel(&app, None).await;

    let boundary = "travel-desk-boundary";
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"lobby.PNG\"\r\n\
         Content-Type: image/png\r\n\r\n\
         png-bytes\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"scan.gif\"\r\n\
         Content-Type: image/gif\r\n\r\n\
         gif-bytes\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let req = Request::builder()
        .uri(format!("/hotels/{}/images", hotel_id))
        .method("POST")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, uploaded) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK, "{}", uploaded);
    let uploaded = uploaded["uploaded"].as_array().unwrap().clone();
    assert_eq!(uploaded.len(), 2);
    assert_eq!(uploaded[0]["sortOrder"], 1);
    assert_eq!(uploaded[0]["mime"], "image/png");
    assert_eq!(
        uploaded[1]["path"],
        format!("/uploads/hotels/{0}/{0}_2.jpg", hotel_id)
    );

    let (status, listed) = send(
        &app,
        empty_request("GET", &format!("/hotels/{}/images", hotel_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["images"].as_array().map(Vec::len), Some(2));

    let (status, encoded) = send(
        &app,
        empty_request("GET", &format!("/hotels/{}/images/base64?limit=abc", hotel_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(encoded["images"].as_array().map(Vec::len), Some(2));

    let (status, encoded) = send(
        &app,
        empty_request("GET", &format!("/hotels/{}/images/base64?limit=1", hotel_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let images = encoded["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert!(images[0].as_str().unwrap().starts_with("data:image/png;base64,"));

    let (status, body) = send(&app, empty_request("GET", "/hotels/999/images")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Hotel not found");
}
