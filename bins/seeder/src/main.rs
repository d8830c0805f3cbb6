//! Database seeder for Stayledger development and testing.
//!
//! Seeds a test guest with a point balance, a host with two listed
//! properties, a few facilities, and a handful of ratings, then
//! recomputes the property averages.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use stayledger_db::entities::{accounts, facilities, properties, property_facilities, ratings};
use stayledger_db::repositories::RatingRepository;

/// Test guest account ID (consistent for all seeds)
const TEST_GUEST_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test host account ID (consistent for all seeds)
const TEST_HOST_ID: &str = "00000000-0000-0000-0000-000000000002";
/// First seeded property
const TEST_PROPERTY_A: &str = "00000000-0000-0000-0000-000000000011";
/// Second seeded property
const TEST_PROPERTY_B: &str = "00000000-0000-0000-0000-000000000012";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = stayledger_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding accounts...");
    seed_accounts(&db).await;

    println!("Seeding properties...");
    seed_properties(&db).await;

    println!("Seeding facilities...");
    seed_facilities(&db).await;

    println!("Seeding ratings...");
    seed_ratings(&db).await;

    println!("Seeding complete!");
}

fn test_guest_id() -> Uuid {
    Uuid::parse_str(TEST_GUEST_ID).unwrap()
}

fn test_host_id() -> Uuid {
    Uuid::parse_str(TEST_HOST_ID).unwrap()
}

fn test_property_a() -> Uuid {
    Uuid::parse_str(TEST_PROPERTY_A).unwrap()
}

fn test_property_b() -> Uuid {
    Uuid::parse_str(TEST_PROPERTY_B).unwrap()
}

/// Seeds a guest with a point balance and a host for development.
async fn seed_accounts(db: &DatabaseConnection) {
    let seeds = [
        (test_guest_id(), "guest@stayledger.dev", "Test Guest", 1000),
        (test_host_id(), "host@stayledger.dev", "Test Host", 0),
    ];

    for (id, email, full_name, points) in seeds {
        if accounts::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Account {email} already exists, skipping...");
            continue;
        }

        let account = accounts::ActiveModel {
            id: Set(id),
            email: Set(email.to_string()),
            password_hash: Set("$argon2id$v=19$m=65536,t=3,p=4$test_hash".to_string()),
            full_name: Set(full_name.to_string()),
            points: Set(points),
            is_admin: Set(false),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = account.insert(db).await {
            eprintln!("Failed to insert account {email}: {e}");
        } else {
            println!("  Created account: {email}");
        }
    }
}

/// Seeds two listed properties owned by the test host.
async fn seed_properties(db: &DatabaseConnection) {
    let seeds = [
        (
            test_property_a(),
            "Seaside Cottage",
            "12 Shore Road",
            120,
        ),
        (
            test_property_b(),
            "City Loft",
            "4 Market Street",
            80,
        ),
    ];

    for (id, name, address, price) in seeds {
        if properties::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Property {name} already exists, skipping...");
            continue;
        }

        let property = properties::ActiveModel {
            id: Set(id),
            owner_id: Set(test_host_id()),
            name: Set(name.to_string()),
            description: Set(None),
            address: Set(address.to_string()),
            price_per_night: Set(price),
            image_url: Set(None),
            rating_avg: Set(sea_orm::prelude::Decimal::ZERO),
            is_listed: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = property.insert(db).await {
            eprintln!("Failed to insert property {name}: {e}");
        } else {
            println!("  Created property: {name}");
        }
    }
}

/// Seeds facilities and attaches them to the first property.
async fn seed_facilities(db: &DatabaseConnection) {
    for name in ["WiFi", "Parking", "Pool"] {
        let facility_id = Uuid::new_v4();
        let facility = facilities::ActiveModel {
            id: Set(facility_id),
            name: Set(name.to_string()),
            created_at: Set(Utc::now().into()),
        };

        match facility.insert(db).await {
            Ok(facility) => {
                println!("  Created facility: {name}");
                let link = property_facilities::ActiveModel {
                    property_id: Set(test_property_a()),
                    facility_id: Set(facility.id),
                    created_at: Set(Utc::now().into()),
                };
                if let Err(e) = link.insert(db).await {
                    eprintln!("Failed to attach facility {name}: {e}");
                }
            }
            // Unique name constraint; already seeded.
            Err(e) => println!("  Facility {name} skipped: {e}"),
        }
    }
}

/// Seeds ratings from the guest, then recomputes the averages.
async fn seed_ratings(db: &DatabaseConnection) {
    use sea_orm::{ColumnTrait, QueryFilter};

    let existing = ratings::Entity::find()
        .filter(ratings::Column::AccountId.eq(test_guest_id()))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Ratings already seeded, skipping...");
        return;
    }

    let seeds = [
        (test_property_a(), 4, "Lovely view"),
        (test_property_a(), 5, "Would stay again"),
        (test_property_b(), 3, "A bit noisy"),
    ];

    for (property_id, score, comment) in seeds {
        let rating = ratings::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(test_guest_id()),
            property_id: Set(property_id),
            score: Set(score),
            comment: Set(Some(comment.to_string())),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = rating.insert(db).await {
            eprintln!("Failed to insert rating: {e}");
        }
    }

    let repo = RatingRepository::new(db.clone());
    for property_id in [test_property_a(), test_property_b()] {
        if let Err(e) = repo.recompute_average(property_id).await {
            eprintln!("Failed to recompute average for {property_id}: {e}");
        }
    }
    println!("  Seeded ratings and recomputed averages");
}
