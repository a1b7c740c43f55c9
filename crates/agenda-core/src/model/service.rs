use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};

/// A bookable service offered by a staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    id: Option<i64>,
    staff_id: i64,
    name: String,
    duration_minutes: i32,
    price_cents: i64,
    created_at: DateTime<Utc>,
}

impl Service {
    /// ## Summary
    /// Creates a validated service.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidService` if the name is empty, the duration is not
    /// positive or the price is negative.
    pub fn new(
        clock: &dyn Clock,
        staff_id: i64,
        name: impl Into<String>,
        duration_minutes: i32,
        price_cents: i64,
    ) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::InvalidService(
                "service name is required".to_string(),
            ));
        }
        validate_duration(duration_minutes)?;
        validate_price(price_cents)?;

        Ok(Self {
            id: None,
            staff_id,
            name,
            duration_minutes,
            price_cents,
            created_at: clock.now(),
        })
    }

    #[must_use]
    pub const fn rehydrate(
        id: i64,
        staff_id: i64,
        name: String,
        duration_minutes: i32,
        price_cents: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            staff_id,
            name,
            duration_minutes,
            price_cents,
            created_at,
        }
    }

    /// ## Errors
    /// Returns `CoreError::InvariantViolation` if an identity was already assigned.
    pub fn assign_id(&mut self, id: i64) -> CoreResult<()> {
        if self.id.is_some() {
            return Err(CoreError::InvariantViolation(
                "service identity already assigned",
            ));
        }
        self.id = Some(id);
        Ok(())
    }

    /// ## Errors
    /// Returns `CoreError::InvalidService` if the new price is negative.
    pub fn change_price(&mut self, price_cents: i64) -> CoreResult<()> {
        validate_price(price_cents)?;
        self.price_cents = price_cents;
        Ok(())
    }

    /// ## Errors
    /// Returns `CoreError::InvalidService` if the new duration is not positive.
    pub fn change_duration(&mut self, duration_minutes: i32) -> CoreResult<()> {
        validate_duration(duration_minutes)?;
        self.duration_minutes = duration_minutes;
        Ok(())
    }

    /// Time an appointment for this service keeps the staff member busy.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    #[must_use]
    pub const fn staff_id(&self) -> i64 {
        self.staff_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn duration_minutes(&self) -> i32 {
        self.duration_minutes
    }

    #[must_use]
    pub const fn price_cents(&self) -> i64 {
        self.price_cents
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_duration(duration_minutes: i32) -> CoreResult<()> {
    if duration_minutes <= 0 {
        return Err(CoreError::InvalidService(
            "duration must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price_cents: i64) -> CoreResult<()> {
    if price_cents < 0 {
        return Err(CoreError::InvalidService(
            "price cannot be negative".to_string(),
        ));
    }
    Ok(())
}
