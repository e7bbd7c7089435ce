use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use travel_desk::db;
use travel_desk::domain::{DomainError, ImageStore};
use travel_desk::infrastructure::storage::DiskImageStore;
use travel_desk::models::{HotelRequest, hotel_image};
use travel_desk::services::hotel_image_service::{self, UploadedFile};
use travel_desk::services::hotel_service::{self, HotelFilter};

async fn setup_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn hotel_request(name: &str, city: &str) -> HotelRequest {
    HotelRequest {
        name: name.to_string(),
        address: "Amir Temur Square 107/B".to_string(),
        city: city.to_string(),
        kind: "hotel".to_string(),
        stars: 4,
        ..Default::default()
    }
}

fn upload(name: &str) -> UploadedFile {
    UploadedFile {
        file_name: name.to_string(),
        data: format!("bytes of {}", name).into_bytes(),
    }
}

/// Refuses every file whose name contains "bad"
struct FlakyStore {
    inner: DiskImageStore,
}

#[async_trait]
impl ImageStore for FlakyStore {
    async fn save(
        &self,
        hotel_id: i32,
        file_name: &str,
        data: &[u8],
    ) -> Result<String, DomainError> {
        if data.starts_with(b"bytes of bad") {
            return Err(DomainError::Internal("disk full".to_string()));
        }
        self.inner.save(hotel_id, file_name, data).await
    }

    async fn load(&self, path: &str) -> Result<Vec<u8>, DomainError> {
        self.inner.load(path).await
    }

    async fn remove_hotel(&self, hotel_id: i32) -> Result<(), DomainError> {
        self.inner.remove_hotel(hotel_id).await
    }
}

#[tokio::test]
async fn test_hotel_validation() {
    let db = setup_db().await;

    let mut blank = hotel_request("  ", "Tashkent");
    blank.address = String::new();
    let mut five_plus = hotel_request("Hilton", "Tashkent");
    five_plus.stars = 6;
    let mut villa = hotel_request("Hilton", "Tashkent");
    villa.kind = "villa".to_string();
    let mut overbooked = hotel_request("Hilton", "Tashkent");
    overbooked.max_guests = Some(10);
    overbooked.current_guests = Some(11);

    let cases = [
        (blank, "Name, Address, and City are required"),
        (five_plus, "Stars must be between 1 and 5"),
        (villa, "Type must be 'hotel' or 'apartment'"),
        (overbooked, "Current guests cannot exceed max guests"),
    ];

    for (request, expected) in cases {
        match hotel_service::create_hotel(&db, request).await {
            Err(DomainError::Validation(msg)) => assert_eq!(msg, expected),
            other => panic!("Expected '{}', got {:?}", expected, other),
        }
    }
}

#[tokio::test]
async fn test_list_filters_by_city_ignoring_case() {
    let db = setup_db().await;

    hotel_service::create_hotel(&db, hotel_request("Hilton", "Tashkent"))
        .await
        .unwrap();
    hotel_service::create_hotel(&db, hotel_request("Registan Plaza", "Samarkand"))
        .await
        .unwrap();

    let all = hotel_service::list_hotels(&db, HotelFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let filtered = hotel_service::list_hotels(
        &db,
        HotelFilter {
            city: Some("samar".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Registan Plaza");

    hotel_service::create_hotel(&db, hotel_request("Ўзбекистон", "Тошкент"))
        .await
        .unwrap();
    let cyrillic = hotel_service::list_hotels(
        &db,
        HotelFilter {
            city: Some(" тошкент ".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(cyrillic.len(), 1);
    assert_eq!(cyrillic[0].city, "Тошкент");
}

#[tokio::test]
async fn test_upload_continues_sort_order_and_normalises_extensions() {
    let db = setup_db().await;
    let dir = tempfile::tempdir().unwrap();
    let store = DiskImageStore::new(dir.path());

    let hotel = hotel_service::create_hotel(&db, hotel_request("Hilton", "Tashkent"))
        .await
        .unwrap();

    let first = hotel_image_service::upload_images(&db, &store, hotel.id, vec![upload("a.png")])
        .await
        .expect("Failed to upload");
    assert_eq!(first[0].sort_order, 1);

    let second = hotel_image_service::upload_images(
        &db,
        &store,
        hotel.id,
        vec![upload("lobby.GIF"), upload("pool.webp")],
    )
    .await
    .expect("Failed to upload");

    let orders: Vec<i32> = second.iter().map(|i| i.sort_order).collect();
    assert_eq!(orders, vec![2, 3]);
    assert_eq!(second[0].mime, "image/jpeg");
    assert_eq!(
        second[0].path,
        format!("/uploads/hotels/{0}/{0}_2.jpg", hotel.id)
    );
    assert_eq!(second[1].mime, "image/webp");

    let listed = hotel_image_service::list_images(&db, hotel.id).await.unwrap();
    assert_eq!(listed.len(), 3);

    let urls = hotel_image_service::images_as_data_urls(&db, &store, hotel.id, Some(1))
        .await
        .unwrap();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].starts_with("data:image/png;base64,"));

    let fetched = hotel_service::get_hotel(&db, hotel.id).await.unwrap();
    assert_eq!(fetched.images.len(), 3);
}

#[tokio::test]
async fn test_failed_file_write_is_skipped() {
    let db = setup_db().await;
    let dir = tempfile::tempdir().unwrap();
    let store = FlakyStore {
        inner: DiskImageStore::new(dir.path()),
    };

    let hotel = hotel_service::create_hotel(&db, hotel_request("Hilton", "Tashkent"))
        .await
        .unwrap();

    let uploaded = hotel_image_service::upload_images(
        &db,
        &store,
        hotel.id,
        vec![upload("one.jpg"), upload("bad.jpg"), upload("three.png")],
    )
    .await
    .expect("Upload should succeed for the good files");

    let orders: Vec<i32> = uploaded.iter().map(|i| i.sort_order).collect();
    assert_eq!(orders, vec![1, 3]);
    assert_eq!(hotel_image::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_upload_requires_files_and_a_hotel() {
    let db = setup_db().await;
    let dir = tempfile::tempdir().unwrap();
    let store = DiskImageStore::new(dir.path());

    assert!(matches!(
        hotel_image_service::upload_images(&db, &store, 99, vec![upload("a.jpg")]).await,
        Err(DomainError::NotFound(_))
    ));

    let hotel = hotel_service::create_hotel(&db, hotel_request("Hilton", "Tashkent"))
        .await
        .unwrap();
    assert!(matches!(
        hotel_image_service::upload_images(&db, &store, hotel.id, Vec::new()).await,
        Err(DomainError::Validation(ref m)) if m == "No files"
    ));
}

#[tokio::test]
async fn test_delete_hotel_removes_images_and_files() {
    let db = setup_db().await;
    let dir = tempfile::tempdir().unwrap();
    let store = DiskImageStore::new(dir.path());

    let hotel = hotel_service::create_hotel(&db, hotel_request("Hilton", "Tashkent"))
        .await
        .unwrap();
    hotel_image_service::upload_images(&db, &store, hotel.id, vec![upload("a.jpg")])
        .await
        .unwrap();

    hotel_service::delete_hotel(&db, &store, hotel.id)
        .await
        .expect("Failed to delete hotel");

    assert_eq!(hotel_image::Entity::find().count(&db).await.unwrap(), 0);
    assert!(!dir.path().join(format!("hotels/{}", hotel.id)).exists());

    // Unknown ids are accepted
    hotel_service::delete_hotel(&db, &store, hotel.id)
        .await
        .expect("Second delete should succeed");
}
