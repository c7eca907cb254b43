//! Room configuration - geometry, accessory sizes, capacity limits.
//!
//! Every constant the layout engine needs about the room lives here rather
//! than being hard-coded, so a different hall is just a different JSON file:
//!
//! ```
//! use seatplan_logic::config::RoomConfig;
//!
//! let room = RoomConfig::from_json(r#"{ "width": 1200.0, "height": 700.0 }"#).unwrap();
//! assert_eq!(room.margin, 20.0);
//! assert!(room.validate().is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::footprint::{compute_footprint, TableVariant};
use crate::geometry::Point;

/// How an accessory marker is kept inside the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampMode {
    /// May hang out of the room, but at least `margin` of it stays inside.
    Soft,
    /// Fully inside the room, `margin` away from every wall.
    Contained,
}

/// Movement rule for the gift table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftPlacement {
    /// Moves freely inside the room bounds.
    Free,
    /// Slides along the top wall only.
    TopWall,
}

/// Room geometry and engine limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Room width (x extent).
    pub width: f32,
    /// Room height (y extent).
    pub height: f32,
    /// Minimum distance between a placed item and a wall.
    pub margin: f32,

    /// Photo box edge length (square marker).
    pub photo_box_size: f32,
    pub photo_box_clamp: ClampMode,
    pub dj_width: f32,
    pub dj_height: f32,
    pub dj_clamp: ClampMode,

    pub gift_placement: GiftPlacement,

    /// Hard cap on the number of non-gift tables after reconciliation.
    pub max_tables: usize,
    pub min_guests: u32,
    pub max_guests: u32,
    pub default_guests: u32,

    /// Gap between a table and its duplicate.
    pub duplicate_gap: f32,
    /// Grid step of the empty-space scan.
    pub scan_step: f32,
    /// Clearance the empty-space scan keeps around existing tables.
    pub scan_spacing: f32,
    /// Pointer travel below which a press/release counts as a click.
    pub click_threshold: f32,

    /// Where the gift table stands when first created.
    pub gift_default: Point,
    /// Off-room parking spot of a "deleted" gift table.
    pub gift_holding: Point,
    /// Nominal position of tables staged by reconciliation.
    pub staging: Point,
    pub dj_default: Point,
    pub dj_holding: Point,
    pub photo_box_default: Point,
    pub photo_box_holding: Point,
}

impl Default for RoomConfig {
    fn default() -> Self {
        let height = 600.0;
        Self {
            width: 1000.0,
            height,
            margin: 20.0,
            photo_box_size: 56.0,
            photo_box_clamp: ClampMode::Contained,
            dj_width: 140.0,
            dj_height: 60.0,
            dj_clamp: ClampMode::Soft,
            gift_placement: GiftPlacement::Free,
            max_tables: 13,
            min_guests: 10,
            max_guests: 100,
            default_guests: 38,
            duplicate_gap: 50.0,
            scan_step: 80.0,
            scan_spacing: 20.0,
            click_threshold: 5.0,
            gift_default: Point::new(0.0, 400.0),
            gift_holding: Point::new(0.0, height + 300.0),
            staging: Point::new(0.0, height + 50.0),
            dj_default: Point::new(900.0, 400.0),
            dj_holding: Point::new(0.0, height + 400.0),
            photo_box_default: Point::new(400.0, 400.0),
            photo_box_holding: Point::new(0.0, height + 200.0),
        }
    }
}

/// Configuration loading/validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("room must have positive dimensions, got {width}×{height}")]
    NonPositiveRoom { width: f32, height: f32 },
    #[error("margin {0} leaves no usable room area")]
    MarginTooLarge(f32),
    #[error("room too small: usable area must fit a {needed_width}×{needed_height} table")]
    RoomTooSmall { needed_width: f32, needed_height: f32 },
    #[error("guest range [{min}, {max}] is empty")]
    InvalidGuestRange { min: u32, max: u32 },
    #[error("default guest count {0} is outside the guest range")]
    DefaultGuestsOutOfRange(u32),
    #[error("max_tables must be at least 1")]
    ZeroMaxTables,
    #[error("scan step must be positive, got {0}")]
    NonPositiveScanStep(f32),
    #[error("invalid room config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RoomConfig {
    /// Parse a (possibly partial) JSON room description and validate it.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RoomConfig = serde_json::from_str(json)?;
        match config.validate().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(config),
        }
    }

    /// Validate the configuration, returning all errors found.
    ///
    /// The layout engine assumes the usable room area can hold the largest
    /// footprint any table variant produces; this is where that
    /// precondition is checked.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.width <= 0.0 || self.height <= 0.0 {
            errors.push(ConfigError::NonPositiveRoom {
                width: self.width,
                height: self.height,
            });
        } else if self.margin < 0.0
            || self.margin * 2.0 >= self.width
            || self.margin * 2.0 >= self.height
        {
            errors.push(ConfigError::MarginTooLarge(self.margin));
        } else {
            let (needed_width, needed_height) = largest_container();
            if self.usable_width() < needed_width || self.usable_height() < needed_height {
                errors.push(ConfigError::RoomTooSmall {
                    needed_width,
                    needed_height,
                });
            }
        }

        if self.min_guests > self.max_guests {
            errors.push(ConfigError::InvalidGuestRange {
                min: self.min_guests,
                max: self.max_guests,
            });
        } else if !(self.min_guests..=self.max_guests).contains(&self.default_guests) {
            errors.push(ConfigError::DefaultGuestsOutOfRange(self.default_guests));
        }

        if self.max_tables == 0 {
            errors.push(ConfigError::ZeroMaxTables);
        }
        if self.scan_step <= 0.0 {
            errors.push(ConfigError::NonPositiveScanStep(self.scan_step));
        }

        errors
    }

    pub fn usable_width(&self) -> f32 {
        self.width - self.margin * 2.0
    }

    pub fn usable_height(&self) -> f32 {
        self.height - self.margin * 2.0
    }

    /// Clamp a requested guest total into the accepted range.
    pub fn clamp_guests(&self, guests: u32) -> u32 {
        guests.clamp(self.min_guests, self.max_guests.max(self.min_guests))
    }
}

/// Largest container width and height any supported table can have.
fn largest_container() -> (f32, f32) {
    use crate::constants::seats;

    [
        compute_footprint(seats::MAX_STANDARD, TableVariant::Standard),
        compute_footprint(seats::MAX_ROYAL, TableVariant::Royal),
        compute_footprint(seats::GIFT_NOMINAL, TableVariant::Gift),
    ]
    .iter()
    .fold((0.0f32, 0.0f32), |(w, h), f| {
        (w.max(f.container_width), h.max(f.container_height))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RoomConfig::default().validate().is_empty());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let room = RoomConfig::from_json(r#"{ "margin": 10.0, "max_tables": 20 }"#).unwrap();
        assert_eq!(room.margin, 10.0);
        assert_eq!(room.max_tables, 20);
        assert_eq!(room.width, 1000.0);
        assert_eq!(room.gift_placement, GiftPlacement::Free);
    }

    #[test]
    fn enum_fields_parse_by_name() {
        let json = r#"{ "gift_placement": "TopWall", "dj_clamp": "Contained" }"#;
        let room = RoomConfig::from_json(json).unwrap();
        assert_eq!(room.gift_placement, GiftPlacement::TopWall);
        assert_eq!(room.dj_clamp, ClampMode::Contained);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = RoomConfig::from_json("{ width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn tiny_room_rejected() {
        let room = RoomConfig {
            width: 100.0,
            height: 100.0,
            ..RoomConfig::default()
        };
        let errors = room.validate();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::RoomTooSmall { .. })));
    }

    #[test]
    fn huge_margin_rejected() {
        let room = RoomConfig {
            margin: 400.0,
            ..RoomConfig::default()
        };
        assert!(matches!(
            room.validate().first(),
            Some(ConfigError::MarginTooLarge(_))
        ));
    }

    #[test]
    fn guest_range_checks() {
        let room = RoomConfig {
            min_guests: 50,
            max_guests: 20,
            ..RoomConfig::default()
        };
        assert!(matches!(
            room.validate().first(),
            Some(ConfigError::InvalidGuestRange { min: 50, max: 20 })
        ));

        let room = RoomConfig {
            default_guests: 5,
            ..RoomConfig::default()
        };
        assert!(matches!(
            room.validate().first(),
            Some(ConfigError::DefaultGuestsOutOfRange(5))
        ));
    }

    #[test]
    fn clamp_guests_to_range() {
        let room = RoomConfig::default();
        assert_eq!(room.clamp_guests(0), 10);
        assert_eq!(room.clamp_guests(38), 38);
        assert_eq!(room.clamp_guests(500), 100);
    }
}
