use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BboxError {
    #[error("Longitude values must be between -180 and 180")]
    Longitude,
    #[error("Latitude values must be between -90 and 90")]
    Latitude,
    #[error("Min values must be <= max values")]
    Order,
}

/// Checks a single lon/lat pair against the geographic ranges
pub fn validate_position(lon: f64, lat: f64) -> Result<(), BboxError> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(BboxError::Longitude);
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(BboxError::Latitude);
    }
    Ok(())
}

/// Geographic selection window (degrees), edges included
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bbox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Bbox {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, BboxError> {
        validate_position(xmin, ymin)?;
        validate_position(xmax, ymax)?;

        if xmin > xmax || ymin > ymax {
            return Err(BboxError::Order);
        }

        Ok(Bbox {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.xmin..=self.xmax).contains(&lon) && (self.ymin..=self.ymax).contains(&lat)
    }
}
