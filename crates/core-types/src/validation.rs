//! Field constraints applied to every payload before it reaches the store.
//!
//! `today` is always passed in by the caller so the date rules do not depend
//! on the wall clock at test time.

use crate::error::CoreError;
use crate::structs::{ChartUpdate, DataPointUpdate, NewChart, NewDataPoint};
use chrono::NaiveDate;

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_LABEL_LEN: usize = 255;

/// The earliest date a data point may carry.
pub fn earliest_allowed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err(CoreError::invalid("name", "name is required"));
    }
    if len > MAX_NAME_LEN {
        return Err(CoreError::invalid(
            "name",
            format!("name must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    // Stored values are trimmed, so only the trimmed length counts.
    if description.trim().chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::invalid(
            "description",
            format!("description must be at most {MAX_DESCRIPTION_LEN} characters"),
        ));
    }
    Ok(())
}

pub fn validate_measurement(measurement: f64) -> Result<(), CoreError> {
    if !measurement.is_finite() {
        return Err(CoreError::invalid(
            "measurement",
            "measurement must be a finite number",
        ));
    }
    Ok(())
}

pub fn validate_date(date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if date < earliest_allowed_date() {
        return Err(CoreError::invalid("date", "date must be on or after 1900-01-01"));
    }
    if date > today {
        return Err(CoreError::invalid("date", "date cannot be in the future"));
    }
    Ok(())
}

pub fn validate_label(label: &str) -> Result<(), CoreError> {
    if label.trim().chars().count() > MAX_LABEL_LEN {
        return Err(CoreError::invalid(
            "label",
            format!("label must be at most {MAX_LABEL_LEN} characters"),
        ));
    }
    Ok(())
}

impl NewChart {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

impl ChartUpdate {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

impl NewDataPoint {
    pub fn validate(&self, today: NaiveDate) -> Result<(), CoreError> {
        validate_measurement(self.measurement)?;
        validate_date(self.date, today)?;
        if let Some(label) = &self.label {
            validate_label(label)?;
        }
        Ok(())
    }
}

impl DataPointUpdate {
    pub fn validate(&self, today: NaiveDate) -> Result<(), CoreError> {
        if let Some(measurement) = self.measurement {
            validate_measurement(measurement)?;
        }
        if let Some(date) = self.date {
            validate_date(date, today)?;
        }
        if let Some(label) = &self.label {
            validate_label(label)?;
        }
        Ok(())
    }
}
