use serde::{Deserialize, Serialize};

/// What a flag update means for the refresh loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagChange {
    /// Nothing changed, or the update was rejected by the grid dependency rule.
    Unchanged,
    /// Only cell styling changes; existing grid cells are reclassified.
    Cosmetic,
    /// The refresh cadence must be restarted.
    Cadence,
    /// The grid became visible and its cells must be rebuilt.
    Structural,
}

/// User-toggleable display options.
///
/// `show_circles`, `show_holidays` and `show_solstice` only make sense while
/// the grid is visible. The setters keep that rule; code that builds the
/// struct directly should call [`FeatureFlags::normalized`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FeatureFlags {
    pub show_milliseconds: bool,
    pub show_grid: bool,
    pub show_circles: bool,
    pub show_holidays: bool,
    pub show_solstice: bool,
    pub style_season: bool,
}

impl FeatureFlags {
    pub fn normalized(mut self) -> Self {
        if !self.show_grid {
            self.clear_grid_options();
        }
        self
    }

    /// Flags enabled in either `self` or `other`.
    pub fn union(self, other: FeatureFlags) -> Self {
        FeatureFlags {
            show_milliseconds: self.show_milliseconds || other.show_milliseconds,
            show_grid: self.show_grid || other.show_grid,
            show_circles: self.show_circles || other.show_circles,
            show_holidays: self.show_holidays || other.show_holidays,
            show_solstice: self.show_solstice || other.show_solstice,
            style_season: self.style_season || other.style_season,
        }
        .normalized()
    }

    pub fn set_milliseconds(&mut self, on: bool) -> FlagChange {
        if self.show_milliseconds == on {
            return FlagChange::Unchanged;
        }
        self.show_milliseconds = on;
        FlagChange::Cadence
    }

    pub fn set_grid(&mut self, on: bool) -> FlagChange {
        if self.show_grid == on {
            return FlagChange::Unchanged;
        }
        self.show_grid = on;
        if on {
            FlagChange::Structural
        } else {
            self.clear_grid_options();
            FlagChange::Cosmetic
        }
    }

    pub fn set_circles(&mut self, on: bool) -> FlagChange {
        Self::set_grid_option(self.show_grid, &mut self.show_circles, on)
    }

    pub fn set_holidays(&mut self, on: bool) -> FlagChange {
        Self::set_grid_option(self.show_grid, &mut self.show_holidays, on)
    }

    pub fn set_solstice(&mut self, on: bool) -> FlagChange {
        Self::set_grid_option(self.show_grid, &mut self.show_solstice, on)
    }

    pub fn set_season(&mut self, on: bool) -> FlagChange {
        if self.style_season == on {
            return FlagChange::Unchanged;
        }
        self.style_season = on;
        FlagChange::Cosmetic
    }

    fn set_grid_option(grid_visible: bool, slot: &mut bool, on: bool) -> FlagChange {
        if !grid_visible || *slot == on {
            return FlagChange::Unchanged;
        }
        *slot = on;
        FlagChange::Cosmetic
    }

    fn clear_grid_options(&mut self) {
        self.show_circles = false;
        self.show_holidays = false;
        self.show_solstice = false;
    }
}
