use tickstar_core::{Point, Range};

use crate::error::SearchError;

/// Board construction parameters for [`Search::from_config`](crate::Search::from_config).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub width: i32,
    pub height: i32,
    /// Start cell; picked at random when `None`.
    pub start: Option<Point>,
    /// Finish cell; picked at random when `None`.
    pub finish: Option<Point>,
    /// Chance, in percent, that each non-special cell is blocked.
    pub obstacle_percent: u8,
    /// Seed for obstacle and endpoint placement. A fresh seed is drawn (and
    /// logged) when `None`.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 12,
            start: None,
            finish: None,
            obstacle_percent: 25,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Check dimensions, obstacle density and any fixed endpoints.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SearchError::InvalidConfig(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.obstacle_percent > 100 {
            return Err(SearchError::InvalidConfig(format!(
                "obstacle_percent must be at most 100, got {}",
                self.obstacle_percent
            )));
        }
        let bounds = self.bounds();
        for pos in [self.start, self.finish].into_iter().flatten() {
            if !bounds.contains(pos) {
                return Err(tickstar_core::GridError::InvalidPosition { pos, bounds }.into());
            }
        }
        Ok(())
    }

    /// The grid rectangle this config describes.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickstar_core::GridError;

    #[test]
    fn default_is_valid() {
        assert_eq!(SearchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = SearchConfig {
            width: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SearchError::InvalidConfig(_))));

        let cfg = SearchConfig {
            obstacle_percent: 101,
            ..SearchConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_endpoint_outside_grid() {
        let cfg = SearchConfig {
            width: 4,
            height: 4,
            finish: Some(Point::new(4, 0)),
            ..SearchConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(SearchError::Grid(GridError::InvalidPosition {
                pos: Point::new(4, 0),
                bounds: Range::new(0, 0, 4, 4),
            }))
        );
    }
}
