use std::collections::BTreeSet;
use std::sync::Arc;

use crate::data::aggregate::Statistic;
use crate::data::filter::{all_regions, RegionSelection};
use crate::data::model::{PokeType, Region, Table};
use crate::view::{render, DashboardView};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Type,
    Height,
    Weight,
    HeightVsWeight,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Type, Tab::Height, Tab::Weight, Tab::HeightVsWeight];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Type => "Type",
            Tab::Height => "Height",
            Tab::Weight => "Weight",
            Tab::HeightVsWeight => "Height vs Weight",
        }
    }
}

// ---------------------------------------------------------------------------
// Selections – everything the widgets control
// ---------------------------------------------------------------------------

/// Widget state that drives [`render`].
#[derive(Debug, Clone, PartialEq)]
pub struct Selections {
    pub regions: RegionSelection,
    pub types: BTreeSet<PokeType>,
    pub height_stat: Statistic,
    pub weight_stat: Statistic,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            regions: all_regions(),
            types: PokeType::ALL.into_iter().collect(),
            height_stat: Statistic::default(),
            weight_stat: Statistic::default(),
        }
    }
}

impl Selections {
    pub fn set_region(&mut self, region: Region, selected: bool) {
        if selected {
            self.regions.insert(region);
        } else {
            self.regions.remove(&region);
        }
        log::debug!("regions now {:?}", self.regions);
    }

    pub fn select_all_regions(&mut self) {
        self.regions = all_regions();
    }

    pub fn select_no_regions(&mut self) {
        self.regions.clear();
    }

    pub fn set_type(&mut self, ptype: PokeType, selected: bool) {
        if selected {
            self.types.insert(ptype);
        } else {
            self.types.remove(&ptype);
        }
        log::debug!("types now {:?}", self.types);
    }

    pub fn select_all_types(&mut self) {
        self.types = PokeType::ALL.into_iter().collect();
    }

    pub fn select_no_types(&mut self) {
        self.types.clear();
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup and shared with the loader cache.
    pub table: Arc<Table>,
    pub selections: Selections,
    pub tab: Tab,
}

impl AppState {
    pub fn new(table: Arc<Table>) -> Self {
        Self {
            table,
            selections: Selections::default(),
            tab: Tab::default(),
        }
    }

    /// Recompute every chart from the current selections.
    pub fn view(&self) -> DashboardView {
        render(&self.table, &self.selections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    #[test]
    fn defaults_select_everything() {
        let sel = Selections::default();
        assert_eq!(sel.regions.len(), 5);
        assert_eq!(sel.types.len(), 18);
        assert_eq!(sel.height_stat, Statistic::Min);
        assert_eq!(sel.weight_stat, Statistic::Min);
    }

    #[test]
    fn toggling_regions_and_types() {
        let mut sel = Selections::default();
        sel.set_region(Region::Hoenn, false);
        assert!(!sel.regions.contains(&Region::Hoenn));
        sel.set_region(Region::Hoenn, true);
        assert!(sel.regions.contains(&Region::Hoenn));

        sel.select_no_regions();
        assert!(sel.regions.is_empty());
        sel.select_all_regions();
        assert_eq!(sel.regions, all_regions());

        sel.set_type(PokeType::Ghost, false);
        assert_eq!(sel.types.len(), 17);
        sel.select_no_types();
        assert!(sel.types.is_empty());
        sel.select_all_types();
        assert_eq!(sel.types.len(), 18);
    }

    #[test]
    fn view_follows_selection_changes() {
        let table = Arc::new(Table::new(vec![
            Record::new(Region::Kanto, vec![PokeType::Fire], 0.6, 8.5),
            Record::new(Region::Johto, vec![PokeType::Water], 1.1, 9.0),
        ]));
        let mut state = AppState::new(Arc::clone(&table));
        assert_eq!(state.view().visible_records, 2);

        state.selections.set_region(Region::Johto, false);
        let view = state.view();
        assert_eq!(view.visible_records, 1);
        assert_eq!(view.total_records, 2);
        assert_eq!(state.table.len(), 2);
    }
}
