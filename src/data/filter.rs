use std::collections::BTreeSet;

use super::model::{Penguin, PenguinDataset, Species};

// ---------------------------------------------------------------------------
// Filtered view: which rows of the dataset pass the species selection
// ---------------------------------------------------------------------------

/// Row indices into a [`PenguinDataset`], in original order.
///
/// A view has no identity of its own: it is a pure function of the dataset
/// and the species selection it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// A view that contains every row of `dataset`.
    #[cfg(test)]
    pub(crate) fn all(dataset: &PenguinDataset) -> Self {
        FilteredView {
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Rows of `dataset` selected by this view.
    pub fn rows<'a>(&'a self, dataset: &'a PenguinDataset) -> impl Iterator<Item = &'a Penguin> + 'a {
        self.indices.iter().filter_map(move |&i| dataset.get(i))
    }
}

/// Return the view of rows whose species is in `selected`.
///
/// * Empty selection → empty view (not "show all").
/// * A selected species absent from the dataset contributes nothing.
pub fn filter_by_species(dataset: &PenguinDataset, selected: &BTreeSet<Species>) -> FilteredView {
    if selected.is_empty() {
        return FilteredView::default();
    }
    let indices = dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, p)| selected.contains(&p.species))
        .map(|(i, _)| i)
        .collect();
    FilteredView { indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Island;
    use pretty_assertions::assert_eq;

    fn penguin(species: Species, flipper: f64, mass: f64) -> Penguin {
        Penguin {
            species,
            island: Island::Dream,
            bill_length_mm: None,
            bill_depth_mm: None,
            flipper_length_mm: Some(flipper),
            body_mass_g: Some(mass),
            sex: None,
            year: Some(2007),
        }
    }

    fn three_rows() -> PenguinDataset {
        PenguinDataset::from_rows(vec![
            penguin(Species::Adelie, 180.0, 3700.0),
            penguin(Species::Gentoo, 210.0, 5000.0),
            penguin(Species::Chinstrap, 195.0, 3800.0),
        ])
    }

    fn mixed_rows() -> PenguinDataset {
        PenguinDataset::from_rows(vec![
            penguin(Species::Gentoo, 215.0, 5100.0),
            penguin(Species::Adelie, 181.0, 3750.0),
            penguin(Species::Chinstrap, 192.0, 3500.0),
            penguin(Species::Adelie, 186.0, 3800.0),
            penguin(Species::Gentoo, 230.0, 5700.0),
        ])
    }

    fn all_subsets() -> Vec<BTreeSet<Species>> {
        (0..8u8)
            .map(|mask| {
                Species::ALL
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, s)| *s)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn scenario_two_of_three_species() {
        let ds = three_rows();
        let selected = BTreeSet::from([Species::Adelie, Species::Gentoo]);
        let view = filter_by_species(&ds, &selected);
        assert_eq!(view.indices(), &[0, 1]);
        let species: Vec<_> = view.rows(&ds).map(|p| p.species).collect();
        assert_eq!(species, vec![Species::Adelie, Species::Gentoo]);
    }

    #[test]
    fn empty_selection_gives_empty_view() {
        let view = filter_by_species(&mixed_rows(), &BTreeSet::new());
        assert!(view.is_empty());
    }

    #[test]
    fn full_domain_is_identity() {
        let ds = mixed_rows();
        let view = filter_by_species(&ds, &Species::ALL.into_iter().collect());
        assert_eq!(view, FilteredView::all(&ds));
        assert_eq!(ds.subset(&view), ds);
    }

    #[test]
    fn every_subset_keeps_exactly_matching_rows_in_order() {
        let ds = mixed_rows();
        for selected in all_subsets() {
            let view = filter_by_species(&ds, &selected);
            let expected: Vec<usize> = ds
                .rows()
                .iter()
                .enumerate()
                .filter(|(_, p)| selected.contains(&p.species))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(view.indices(), expected.as_slice(), "selection {selected:?}");
        }
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let ds = mixed_rows();
        for selected in all_subsets() {
            let once = ds.subset(&filter_by_species(&ds, &selected));
            let twice = once.subset(&filter_by_species(&once, &selected));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn species_absent_from_dataset_contributes_nothing() {
        let ds = PenguinDataset::from_rows(vec![
            penguin(Species::Adelie, 180.0, 3700.0),
            penguin(Species::Adelie, 190.0, 3900.0),
        ]);
        let only_missing = filter_by_species(&ds, &BTreeSet::from([Species::Chinstrap]));
        assert!(only_missing.is_empty());

        let with_missing =
            filter_by_species(&ds, &BTreeSet::from([Species::Adelie, Species::Chinstrap]));
        assert_eq!(with_missing.len(), 2);
    }

    #[test]
    fn rows_with_missing_values_stay_in_the_view() {
        let mut incomplete = penguin(Species::Adelie, 0.0, 0.0);
        incomplete.flipper_length_mm = None;
        incomplete.body_mass_g = None;
        let ds = PenguinDataset::from_rows(vec![incomplete, penguin(Species::Adelie, 181.0, 3750.0)]);
        let view = filter_by_species(&ds, &BTreeSet::from([Species::Adelie]));
        assert_eq!(view.len(), 2);
    }
}
