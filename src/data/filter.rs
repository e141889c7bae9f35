use std::collections::BTreeSet;

use super::model::{Record, Region, Table};

// ---------------------------------------------------------------------------
// Region selection
// ---------------------------------------------------------------------------

/// Set of regions currently selected in the side panel.
pub type RegionSelection = BTreeSet<Region>;

/// Initialise a [`RegionSelection`] with every region selected.
pub fn all_regions() -> RegionSelection {
    Region::ALL.into_iter().collect()
}

/// Return indices of records whose region is selected, in table order.
///
/// An empty selection hides everything.
pub fn filtered_indices(table: &Table, regions: &RegionSelection) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| regions.contains(&rec.region))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredTable – borrowed view over the source table
// ---------------------------------------------------------------------------

/// The records of a [`Table`] that pass the region filter.
///
/// Borrows from the source table; row order is preserved.
#[derive(Debug, Clone)]
pub struct FilteredTable<'a> {
    table: &'a Table,
    indices: Vec<usize>,
}

impl<'a> FilteredTable<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| &table.records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Narrow `table` to the selected regions.
pub fn filter_by_region<'a>(table: &'a Table, regions: &RegionSelection) -> FilteredTable<'a> {
    FilteredTable {
        table,
        indices: filtered_indices(table, regions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PokeType;

    fn sample() -> Table {
        Table::new(vec![
            Record::new(Region::Kanto, vec![PokeType::Fire], 0.6, 8.5),
            Record::new(Region::Johto, vec![PokeType::Water], 1.1, 9.0),
            Record::new(Region::Kanto, vec![PokeType::Grass], 0.7, 6.9),
            Record::new(Region::Unova, vec![PokeType::Dark], 1.5, 30.0),
            Record::new(Region::Hoenn, vec![PokeType::Rock], 2.0, 120.0),
        ])
    }

    #[test]
    fn every_region_subset_yields_an_ordered_subset() {
        let table = sample();
        // All 32 subsets of the five regions.
        for mask in 0u32..(1 << Region::ALL.len()) {
            let selection: RegionSelection = Region::ALL
                .into_iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, r)| r)
                .collect();

            let view = filter_by_region(&table, &selection);
            let expected: Vec<&Record> = table
                .records
                .iter()
                .filter(|rec| selection.contains(&rec.region))
                .collect();
            let got: Vec<&Record> = view.iter().collect();
            // Same records, same order, and every one borrowed from the table.
            assert_eq!(got.len(), expected.len());
            for (g, e) in got.iter().zip(&expected) {
                assert!(std::ptr::eq(*g, *e));
            }
            assert!(view.iter().all(|rec| selection.contains(&rec.region)));
        }
    }

    #[test]
    fn empty_selection_hides_everything() {
        let table = sample();
        let view = filter_by_region(&table, &RegionSelection::new());
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
    }

    #[test]
    fn default_selection_keeps_everything() {
        let table = sample();
        let view = filter_by_region(&table, &all_regions());
        assert_eq!(view.len(), table.len());
        assert_eq!(filtered_indices(&table, &all_regions()), vec![0, 1, 2, 3, 4]);
    }
}
