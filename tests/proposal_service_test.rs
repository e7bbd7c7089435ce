use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use travel_desk::db;
use travel_desk::domain::DomainError;
use travel_desk::models::proposal_room::{self, ProposalRoomRequest};
use travel_desk::models::{HotelRequest, ProposalDto, ProposalRequest, proposal};
use travel_desk::services::{hotel_service, proposal_service};

async fn setup_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_hotel(db: &DatabaseConnection, max: Option<i32>, current: Option<i32>) -> i32 {
    let request = HotelRequest {
        name: "Hyatt Regency Tashkent".to_string(),
        address: "Navoi Street 1A".to_string(),
        city: "Tashkent".to_string(),
        kind: "hotel".to_string(),
        stars: 5,
        max_guests: max,
        current_guests: current,
        ..Default::default()
    };
    hotel_service::create_hotel(db, request)
        .await
        .expect("Failed to create hotel")
        .id
}

fn proposal_request(hotel_id: i32, guests: i32) -> ProposalRequest {
    ProposalRequest {
        hotel_id,
        client_name: "Dilnoza Karimova".to_string(),
        guests,
        check_in: "2024-06-10".to_string(),
        check_out: "2024-06-14T12:00:00Z".to_string(),
        price: 480.0,
        breakfast: true,
        free_cancel: false,
        rooms: vec![ProposalRoomRequest { count: 1 }, ProposalRoomRequest { count: 2 }],
    }
}

#[tokio::test]
async fn test_create_proposal_embeds_hotel_and_rooms() {
    let db = setup_db().await;
    let hotel_id = create_hotel(&db, None, None).await;

    let proposal = proposal_service::create_proposal(&db, proposal_request(hotel_id, 3))
        .await
        .expect("Failed to create proposal");

    assert_eq!(proposal.proposal_number, "P00001");
    assert_eq!(proposal.check_in, "2024-06-10T00:00:00+00:00");
    assert_eq!(proposal.rooms.len(), 2);
    assert_eq!(proposal.rooms[1].count, 2);
    assert_eq!(
        proposal.hotel.as_ref().map(|h| h.name.as_str()),
        Some("Hyatt Regency Tashkent")
    );

    let listed = proposal_service::list_proposals(&db).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].hotel.is_some());
}

#[tokio::test]
async fn test_check_out_before_check_in_creates_nothing() {
    let db = setup_db().await;
    let hotel_id = create_hotel(&db, None, None).await;

    let mut request = proposal_request(hotel_id, 2);
    request.check_in = "2024-06-14".to_string();
    request.check_out = "2024-06-10".to_string();

    let err = proposal_service::create_proposal(&db, request)
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::Validation(ref m) if m == "Check-out date must be after check-in date")
    );

    assert_eq!(proposal::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(proposal_room::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_hotel_is_not_found() {
    let db = setup_db().await;

    let err = proposal_service::create_proposal(&db, proposal_request(77, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(ref m) if m == "Hotel not found"));
}

#[tokio::test]
async fn test_capacity_error_names_available_spots() {
    let db = setup_db().await;
    let hotel_id = create_hotel(&db, Some(10), Some(7)).await;

    let err = proposal_service::create_proposal(&db, proposal_request(hotel_id, 4))
        .await
        .unwrap_err();
    match err {
        DomainError::Validation(msg) => assert!(msg.contains("3 spots available"), "{}", msg),
        other => panic!("Expected validation error, got {:?}", other),
    }

    let ok = proposal_service::create_proposal(&db, proposal_request(hotel_id, 3)).await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn test_update_replaces_rooms_and_keeps_number() {
    let db = setup_db().await;
    let hotel_id = create_hotel(&db, None, None).await;

    let created = proposal_service::create_proposal(&db, proposal_request(hotel_id, 2))
        .await
        .unwrap();

    let mut request = proposal_request(hotel_id, 4);
    request.rooms = vec![ProposalRoomRequest { count: 4 }];
    request.free_cancel = true;

    let updated = proposal_service::update_proposal(&db, created.id, request)
        .await
        .expect("Failed to update proposal");

    assert_eq!(updated.proposal_number, created.proposal_number);
    assert_eq!(updated.guests, 4);
    assert!(updated.free_cancel);
    assert_eq!(updated.rooms.len(), 1);
    assert_eq!(updated.rooms[0].count, 4);

    let stored_rooms = proposal_room::Entity::find()
        .filter(proposal_room::Column::ProposalId.eq(created.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(stored_rooms, 1);
}

#[tokio::test]
async fn test_delete_removes_rooms_then_get_is_not_found() {
    let db = setup_db().await;
    let hotel_id = create_hotel(&db, None, None).await;

    let created = proposal_service::create_proposal(&db, proposal_request(hotel_id, 2))
        .await
        .unwrap();

    proposal_service::delete_proposal(&db, created.id)
        .await
        .expect("Failed to delete proposal");
    proposal_service::delete_proposal(&db, created.id)
        .await
        .expect("Deleting twice should succeed");

    assert_eq!(proposal_room::Entity::find().count(&db).await.unwrap(), 0);
    assert!(matches!(
        proposal_service::get_proposal(&db, created.id).await,
        Err(DomainError::NotFound(ref m)) if m == "Proposal not found"
    ));
}

#[tokio::test]
async fn test_hotel_with_proposals_cannot_be_deleted() {
    let db = setup_db().await;
    let hotel_id = create_hotel(&db, None, None).await;
    let created = proposal_service::create_proposal(&db, proposal_request(hotel_id, 2))
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let store = travel_desk::infrastructure::storage::DiskImageStore::new(dir.path());

    let err = hotel_service::delete_hotel(&db, &store, hotel_id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    proposal_service::delete_proposal(&db, created.id).await.unwrap();
    hotel_service::delete_hotel(&db, &store, hotel_id)
        .await
        .expect("Hotel without proposals should be deletable");
}

fn room_counts(dto: &ProposalDto) -> Vec<i32> {
    dto.rooms.iter().map(|r| r.count).collect()
}

#[tokio::test]
async fn test_update_over_capacity_leaves_proposal_untouched() {
    let db = setup_db().await;
    let hotel_id = create_hotel(&db, Some(10), Some(7)).await;

    let created = proposal_service::create_proposal(&db, proposal_request(hotel_id, 2))
        .await
        .unwrap();

    let mut request = proposal_request(hotel_id, 4);
    request.rooms = vec![ProposalRoomRequest { count: 4 }];
    request.price = 999.0;

    match proposal_service::update_proposal(&db, created.id, request).await {
        Err(DomainError::Validation(msg)) => assert!(msg.contains("3 spots available"), "{}", msg),
        other => panic!("Expected validation error, got {:?}", other),
    }

    let stored = proposal_service::get_proposal(&db, created.id).await.unwrap();
    assert_eq!(stored.guests, 2);
    assert_eq!(stored.price, 480.0);
    assert_eq!(room_counts(&stored), vec![1, 2]);
    assert_eq!(proposal_room::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_update_with_unknown_hotel_is_not_found() {
    let db = setup_db().await;
    let hotel_id = create_hotel(&db, None, None).await;

    let created = proposal_service::create_proposal(&db, proposal_request(hotel_id, 2))
        .await
        .unwrap();

    let mut request = proposal_request(404, 3);
    request.rooms = vec![ProposalRoomRequest { count: 3 }];

    let err = proposal_service::update_proposal(&db, created.id, request)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(ref m) if m == "Hotel not found"));

    let stored = proposal_service::get_proposal(&db, created.id).await.unwrap();
    assert_eq!(stored.hotel_id, hotel_id);
    assert_eq!(stored.guests, 2);
    assert_eq!(room_counts(&stored), vec![1, 2]);
}

#[tokio::test]
async fn test_update_with_reversed_dates_is_rejected() {
    let db = setup_db().await;
    let hotel_id = create_hotel(&db, None, None).await;

    let created = proposal_service::create_proposal(&db, proposal_request(hotel_id, 2))
        .await
        .unwrap();

    let mut request = proposal_request(hotel_id, 2);
    request.check_out = "2024-06-09".to_string();

    let err = proposal_service::update_proposal(&db, created.id, request)
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::Validation(ref m) if m == "Check-out date must be after check-in date")
    );

    let stored = proposal_service::get_proposal(&db, created.id).await.unwrap();
    assert_eq!(stored.check_out, created.check_out);
    assert_eq!(room_counts(&stored), vec![1, 2]);
}
