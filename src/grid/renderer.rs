use crate::calc::DateFormatter;
use crate::data::FeatureFlags;
use crate::grid::model::{day_count, Classification, DayClass, YearAnnotations, GRID_CAPACITY};
use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

/// Identity of a visual cell; never reused within one renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u64);

/// A grid cell standing for one day of the rendered year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayCell {
    id: CellId,
    class: Option<DayClass>,
    tooltip: String,
}

impl DayCell {
    fn new(id: CellId) -> Self {
        DayCell {
            id,
            class: None,
            tooltip: String::new(),
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    /// `None` only before the first classification pass after a rebuild.
    pub fn class(&self) -> Option<DayClass> {
        self.class
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Replaces whatever class and tooltip the cell had before.
    fn apply(&mut self, classification: Classification, date_text: String) {
        self.class = Some(classification.class);
        self.tooltip = match classification.label {
            Some(label) => format!("{date_text} — {label}"),
            None => date_text,
        };
    }
}

/// Filler slot past the last day of a short year. Never classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverflowCell {
    id: CellId,
}

impl OverflowCell {
    pub fn id(&self) -> CellId {
        self.id
    }
}

/// One grid position in row-major order.
#[derive(Clone, Copy, Debug)]
pub enum GridSlot<'a> {
    Day(&'a DayCell),
    Overflow,
}

/// Container-level visual state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridContainer {
    pub visible: bool,
    pub circles: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CacheState {
    #[default]
    NeedsRebuild,
    UpToDate { year: i32 },
}

#[derive(Debug, Default)]
struct YearGridCache {
    state: CacheState,
    cells: Vec<DayCell>,
    overflow: Vec<OverflowCell>,
}

impl YearGridCache {
    fn is_current_for(&self, year: i32) -> bool {
        matches!(self.state, CacheState::UpToDate { year: y } if y == year)
    }
}

/// Keeps the year grid's cells in step with the clock and the display flags.
///
/// Cells are created once per year and reclassified on every pass. A new
/// year, or an explicit [`GridRenderer::invalidate`], replaces the whole cell
/// set; no cell ever survives into a different year.
#[derive(Debug)]
pub struct GridRenderer {
    cache: YearGridCache,
    container: GridContainer,
    formatter: DateFormatter,
    next_id: u64,
    rebuilds: u64,
}

impl GridRenderer {
    pub fn new(formatter: DateFormatter) -> Self {
        GridRenderer {
            cache: YearGridCache::default(),
            container: GridContainer::default(),
            formatter,
            next_id: 0,
            rebuilds: 0,
        }
    }

    pub fn render_grid(&mut self, now: NaiveDateTime, flags: &FeatureFlags) {
        if !flags.show_grid {
            self.container.visible = false;
            return;
        }
        self.container.visible = true;

        let year = now.year();
        if !self.cache.is_current_for(year) {
            self.rebuild(year);
        }

        self.container.circles = flags.show_circles;

        let annotations = YearAnnotations::new(year, now, flags);
        for (i, cell) in self.cache.cells.iter_mut().enumerate() {
            let date_text = annotations
                .date_of(i)
                .map(|date| self.formatter.long_date(date))
                .unwrap_or_default();
            cell.apply(annotations.classify(i), date_text);
        }
    }

    /// Forces a full rebuild on the next visible pass.
    pub fn invalidate(&mut self) {
        self.cache.state = CacheState::NeedsRebuild;
    }

    fn rebuild(&mut self, year: i32) {
        let total = day_count(year);
        let mut cells = Vec::with_capacity(total);
        let mut overflow = Vec::with_capacity(GRID_CAPACITY.saturating_sub(total));
        for slot in 0..GRID_CAPACITY {
            let id = self.next_cell_id();
            if slot < total {
                cells.push(DayCell::new(id));
            } else {
                overflow.push(OverflowCell { id });
            }
        }
        self.rebuilds += 1;
        debug!(
            year,
            days = total,
            rebuild = self.rebuilds,
            first_cell = ?cells.first().map(DayCell::id),
            last_cell = ?overflow.last().map(OverflowCell::id).or(cells.last().map(DayCell::id)),
            "rebuilt year grid"
        );
        self.cache = YearGridCache {
            state: CacheState::UpToDate { year },
            cells,
            overflow,
        };
    }

    fn next_cell_id(&mut self) -> CellId {
        let id = CellId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn rendered_year(&self) -> Option<i32> {
        match self.cache.state {
            CacheState::UpToDate { year } => Some(year),
            CacheState::NeedsRebuild => None,
        }
    }

    pub fn container(&self) -> GridContainer {
        self.container
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cache.cells
    }

    #[cfg(test)]
    fn overflow(&self) -> &[OverflowCell] {
        &self.cache.overflow
    }

    /// Day cells followed by overflow cells, i.e. grid positions row-major.
    pub fn slots(&self) -> impl Iterator<Item = GridSlot<'_>> {
        self.cache
            .cells
            .iter()
            .map(GridSlot::Day)
            .chain(self.cache.overflow.iter().map(|_| GridSlot::Overflow))
    }

    #[cfg(test)]
    pub(crate) fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}
