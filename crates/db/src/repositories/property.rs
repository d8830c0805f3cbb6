//! Property repository for listings and facilities.
//!
//! `rating_avg` is never written here; only the rating repository's
//! recompute path touches it.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use stayledger_shared::types::pagination::{PageRequest, Paginated};

use crate::entities::{accounts, facilities, properties, property_facilities};

/// Error types for property operations.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// Property not found.
    #[error("Property not found: {0}")]
    NotFound(Uuid),

    /// Owner account not found.
    #[error("Owner account not found: {0}")]
    OwnerNotFound(Uuid),

    /// Facility not found.
    #[error("Facility not found: {0}")]
    FacilityNotFound(Uuid),

    /// Facility name already exists.
    #[error("Facility '{0}' already exists")]
    DuplicateFacility(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a property.
#[derive(Debug, Clone)]
pub struct CreatePropertyInput {
    /// Owning account.
    pub owner_id: Uuid,
    /// Listing name.
    pub name: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Street address.
    pub address: String,
    /// Nightly price in points.
    pub price_per_night: i64,
    /// Optional image URL (stored as-is; upload is handled elsewhere).
    pub image_url: Option<String>,
}

/// Input for updating a property. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePropertyInput {
    /// Listing name.
    pub name: Option<String>,
    /// Long description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// Street address.
    pub address: Option<String>,
    /// Nightly price in points.
    pub price_per_night: Option<i64>,
    /// Image URL (`Some(None)` clears it).
    pub image_url: Option<Option<String>>,
    /// Whether the property shows up in listings.
    pub is_listed: Option<bool>,
}

/// Property repository for CRUD and facility assignment.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a property after validating the owner exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the owner is missing or the insert fails.
    pub async fn create_property(
        &self,
        input: CreatePropertyInput,
    ) -> Result<properties::Model, PropertyError> {
        let owner = accounts::Entity::find_by_id(input.owner_id)
            .one(&self.db)
            .await?;
        if owner.is_none() {
            return Err(PropertyError::OwnerNotFound(input.owner_id));
        }

        let now = Utc::now().into();
        let property = properties::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(input.owner_id),
            name: Set(input.name),
            description: Set(input.description),
            address: Set(input.address),
            price_per_night: Set(input.price_per_night),
            image_url: Set(input.image_url),
            rating_avg: Set(stayledger_core::rating::DEFAULT_AVERAGE),
            is_listed: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let property = property.insert(&self.db).await?;
        info!(property_id = %property.id, owner_id = %property.owner_id, "property created");

        Ok(property)
    }

    /// Finds a property by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is missing or the query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<properties::Model, PropertyError> {
        properties::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PropertyError::NotFound(id))
    }

    /// Lists listed properties with pagination, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<Paginated<properties::Model>, PropertyError> {
        let query = properties::Entity::find()
            .filter(properties::Column::IsListed.eq(true))
            .order_by_desc(properties::Column::CreatedAt);

        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(Paginated::new(data, page.page, page.per_page, total))
    }

    /// Updates a property.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is missing or the update fails.
    pub async fn update_property(
        &self,
        id: Uuid,
        input: UpdatePropertyInput,
    ) -> Result<properties::Model, PropertyError> {
        let property = self.find_by_id(id).await?;

        let mut active: properties::ActiveModel = property.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(price) = input.price_per_night {
            active.price_per_night = Set(price);
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(is_listed) = input.is_listed {
            active.is_listed = Set(is_listed);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Delists a property (soft delete: existing bookings and ratings
    /// keep their reference).
    ///
    /// # Errors
    ///
    /// Returns an error if the property is missing or the update fails.
    pub async fn delist_property(&self, id: Uuid) -> Result<(), PropertyError> {
        let property = self.find_by_id(id).await?;

        let mut active: properties::ActiveModel = property.into();
        active.is_listed = Set(false);
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }

    /// Creates a facility.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the insert fails.
    pub async fn create_facility(&self, name: String) -> Result<facilities::Model, PropertyError> {
        let existing = facilities::Entity::find()
            .filter(facilities::Column::Name.eq(&name))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(PropertyError::DuplicateFacility(name));
        }

        let facility = facilities::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            created_at: Set(Utc::now().into()),
        };

        Ok(facility.insert(&self.db).await?)
    }

    /// Lists all facilities by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_facilities(&self) -> Result<Vec<facilities::Model>, PropertyError> {
        let facilities = facilities::Entity::find()
            .order_by_asc(facilities::Column::Name)
            .all(&self.db)
            .await?;

        Ok(facilities)
    }

    /// Attaches a facility to a property. Attaching one that is already
    /// present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is missing or the insert fails.
    pub async fn attach_facility(
        &self,
        property_id: Uuid,
        facility_id: Uuid,
    ) -> Result<(), PropertyError> {
        self.find_by_id(property_id).await?;

        let facility = facilities::Entity::find_by_id(facility_id)
            .one(&self.db)
            .await?;
        if facility.is_none() {
            return Err(PropertyError::FacilityNotFound(facility_id));
        }

        let existing = property_facilities::Entity::find_by_id((property_id, facility_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        let link = property_facilities::ActiveModel {
            property_id: Set(property_id),
            facility_id: Set(facility_id),
            created_at: Set(Utc::now().into()),
        };
        link.insert(&self.db).await?;

        Ok(())
    }

    /// Detaches a facility from a property.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is missing or the delete fails.
    pub async fn detach_facility(
        &self,
        property_id: Uuid,
        facility_id: Uuid,
    ) -> Result<(), PropertyError> {
        let link = property_facilities::Entity::find_by_id((property_id, facility_id))
            .one(&self.db)
            .await?
            .ok_or(PropertyError::FacilityNotFound(facility_id))?;

        link.delete(&self.db).await?;

        Ok(())
    }

    /// Lists the facilities attached to a property.
    ///
    /// # Errors
    ///
    /// Returns an error if the property is missing or the query fails.
    pub async fn facilities_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<facilities::Model>, PropertyError> {
        let property = self.find_by_id(property_id).await?;

        let facilities = property
            .find_related(facilities::Entity)
            .order_by_asc(facilities::Column::Name)
            .all(&self.db)
            .await?;

        Ok(facilities)
    }
}
