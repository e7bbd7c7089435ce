use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_owned(),
    ))
    .await?;
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute(db, "PRAGMA foreign_keys = ON").await?;

    // Hotels and their uploaded pictures
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS hotels (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            city TEXT NOT NULL,
            group_name TEXT,
            type TEXT NOT NULL DEFAULT 'hotel',
            stars INTEGER NOT NULL DEFAULT 3,
            breakfast BOOLEAN NOT NULL DEFAULT 0,
            location_link TEXT,
            website_link TEXT,
            max_guests INTEGER,
            current_guests INTEGER,
            price REAL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS hotel_images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hotel_id INTEGER NOT NULL,
            path TEXT NOT NULL,
            mime TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            FOREIGN KEY (hotel_id) REFERENCES hotels(id) ON DELETE CASCADE
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_hotel_images_hotel ON hotel_images(hotel_id, sort_order)",
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS car_rentals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Receipts own their activities
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS receipts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            receipt_number TEXT NOT NULL UNIQUE,
            client_name TEXT NOT NULL,
            client_email TEXT,
            client_phone TEXT,
            receipt_date TEXT NOT NULL,
            property_name TEXT,
            property_address TEXT,
            check_in TEXT,
            check_out TEXT,
            amount_paid REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            receipt_id INTEGER NOT NULL,
            type TEXT NOT NULL,
            property_name TEXT,
            property_address TEXT,
            check_in TEXT,
            check_out TEXT,
            amount REAL NOT NULL DEFAULT 0,
            car_model TEXT,
            car_plate TEXT,
            pickup_location TEXT,
            dropoff_location TEXT,
            transfer_type TEXT,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (receipt_id) REFERENCES receipts(id) ON DELETE CASCADE
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_activities_receipt ON activities(receipt_id)",
    )
    .await?;

    // Proposals reference a hotel and own their room requests
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS proposals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            proposal_number TEXT NOT NULL UNIQUE,
            hotel_id INTEGER NOT NULL,
            client_name TEXT NOT NULL,
            guests INTEGER NOT NULL,
            check_in TEXT NOT NULL,
            check_out TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,
            breakfast BOOLEAN NOT NULL DEFAULT 0,
            free_cancel BOOLEAN NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (hotel_id) REFERENCES hotels(id)
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS proposal_rooms (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            proposal_id INTEGER NOT NULL,
            count INTEGER NOT NULL CHECK (count >= 1),
            created_at TEXT NOT NULL,
            FOREIGN KEY (proposal_id) REFERENCES proposals(id) ON DELETE CASCADE
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_proposal_rooms_proposal ON proposal_rooms(proposal_id)",
    )
    .await?;

    // Last reference number handed out, one row per numbered kind
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS reference_counters (
            kind TEXT PRIMARY KEY NOT NULL,
            last_value INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        INSERT OR IGNORE INTO reference_counters (kind, last_value)
        VALUES ('receipt', 0), ('proposal', 0)
        "#,
    )
    .await?;

    tracing::debug!("Database migrations applied");
    Ok(())
}
