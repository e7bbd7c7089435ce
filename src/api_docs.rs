use crate::api;
use crate::domain::{CarRental, CreateCarRentalInput};
use crate::models::activity::{ActivityDto, ActivityRequest};
use crate::models::hotel_image::HotelImageDto;
use crate::models::proposal_room::{ProposalRoomDto, ProposalRoomRequest};
use crate::models::{HotelDto, HotelRequest, ProposalDto, ProposalRequest, ReceiptDto, ReceiptRequest};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::receipts::create_receipt,
        api::receipts::list_receipts,
        api::receipts::search_receipts,
        api::receipts::get_receipt,
        api::receipts::update_receipt,
        api::receipts::delete_receipt,
        api::hotels::list_hotels,
        api::hotels::create_hotel,
        api::hotels::get_hotel,
        api::hotels::update_hotel,
        api::hotels::delete_hotel,
        api::hotel_images::upload_images,
        api::hotel_images::list_images,
        api::hotel_images::images_base64,
        api::car_rentals::list_car_rentals,
        api::car_rentals::create_car_rental,
        api::car_rentals::get_car_rental,
        api::car_rentals::delete_car_rental,
        api::proposals::list_proposals,
        api::proposals::create_proposal,
        api::proposals::get_proposal,
        api::proposals::update_proposal,
        api::proposals::delete_proposal,
    ),
    components(
        schemas(
            ReceiptRequest,
            ReceiptDto,
            ActivityRequest,
            ActivityDto,
            HotelRequest,
            HotelDto,
            HotelImageDto,
            CarRental,
            CreateCarRentalInput,
            ProposalRequest,
            ProposalDto,
            ProposalRoomRequest,
            ProposalRoomDto,
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "receipts", description = "Client receipts and their activities"),
        (name = "hotels", description = "Hotels and their images"),
        (name = "car-rentals", description = "Car rental companies"),
        (name = "proposals", description = "Price proposals and requested rooms")
    )
)]
pub struct ApiDoc;
