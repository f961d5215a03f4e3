use std::collections::BTreeSet;
use std::sync::Arc;

use crate::chart::{ScatterOptions, ScatterSpec, render_scatter};
use crate::color::ColorMap;
use crate::config::{ControlDefaults, MAX_BIN_COUNT, SLIDER_BIN_RANGE};
use crate::data::filter::{FilteredView, filter_by_species};
use crate::data::model::{Column, PenguinDataset, Species};
use crate::reactive::{Memo, Signal};

// ---------------------------------------------------------------------------
// Render phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    AwaitingFirstRender,
    /// `cycle` counts reactive cycles that produced a new chart.
    Rendered { cycle: u64 },
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One user's view of the shared dataset: control values plus the cached
/// derivations that depend on them.
///
/// Only the species selection feeds the filter. The attribute and the two
/// bin counts are kept and shown but drive nothing.
pub struct Session {
    dataset: Arc<PenguinDataset>,

    selected_species: Signal<BTreeSet<Species>>,
    selected_attribute: Signal<Column>,
    plotly_bin_count: Signal<u32>,
    seaborn_bin_count: Signal<u32>,

    filtered: Memo<u64, Arc<FilteredView>>,
    chart: Memo<u64, Arc<ScatterSpec>>,

    /// Species that occur in the shared table.
    species_present: BTreeSet<Species>,

    options: ScatterOptions,
    colors: ColorMap,
    phase: RenderPhase,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Session {
    pub fn new(dataset: Arc<PenguinDataset>, options: ScatterOptions, defaults: &ControlDefaults) -> Self {
        Self {
            species_present: dataset.species_present(),
            dataset,
            selected_species: Signal::new(defaults.selected_species.iter().copied().collect()),
            selected_attribute: Signal::new(defaults.selected_attribute),
            plotly_bin_count: Signal::new(defaults.plotly_bin_count.clamp(1, MAX_BIN_COUNT)),
            seaborn_bin_count: Signal::new(
                defaults
                    .seaborn_bin_count
                    .clamp(SLIDER_BIN_RANGE.0, SLIDER_BIN_RANGE.1),
            ),
            filtered: Memo::new(),
            chart: Memo::new(),
            options,
            colors: ColorMap::for_species(),
            phase: RenderPhase::AwaitingFirstRender,
            status_message: None,
        }
    }

    pub fn dataset(&self) -> &PenguinDataset {
        &self.dataset
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    // -- Controls --

    pub fn selected_species(&self) -> &BTreeSet<Species> {
        self.selected_species.get()
    }

    pub fn is_species_selected(&self, species: Species) -> bool {
        self.selected_species.get().contains(&species)
    }

    /// `false` for a species the table has no rows for; selecting it
    /// contributes nothing to the view.
    pub fn is_species_present(&self, species: Species) -> bool {
        self.species_present.contains(&species)
    }

    pub fn set_species(&mut self, selected: BTreeSet<Species>) {
        if self.selected_species.set(selected) {
            log::debug!("species selection -> {:?}", self.selected_species.get());
        }
    }

    /// Toggle a single species in the selection.
    pub fn toggle_species(&mut self, species: Species) {
        let changed = self.selected_species.update(|selected| {
            if !selected.remove(&species) {
                selected.insert(species);
            }
        });
        if changed {
            log::debug!("toggled {species} -> {:?}", self.selected_species.get());
        }
    }

    /// Select the whole species domain.
    pub fn select_all_species(&mut self) {
        self.set_species(Species::ALL.into_iter().collect());
    }

    /// Deselect every species.
    pub fn select_no_species(&mut self) {
        self.set_species(BTreeSet::new());
    }

    pub fn selected_attribute(&self) -> Column {
        *self.selected_attribute.get()
    }

    pub fn set_selected_attribute(&mut self, column: Column) {
        if !column.is_numeric() {
            log::warn!("ignoring non-numeric attribute '{column}'");
            return;
        }
        if self.selected_attribute.set(column) {
            log::debug!("selected attribute -> {column}");
        }
    }

    pub fn plotly_bin_count(&self) -> u32 {
        *self.plotly_bin_count.get()
    }

    pub fn set_plotly_bin_count(&mut self, bins: u32) {
        let bins = bins.clamp(1, MAX_BIN_COUNT);
        if self.plotly_bin_count.set(bins) {
            log::debug!("plotly bin count -> {bins}");
        }
    }

    pub fn seaborn_bin_count(&self) -> u32 {
        *self.seaborn_bin_count.get()
    }

    pub fn set_seaborn_bin_count(&mut self, bins: u32) {
        let bins = bins.clamp(SLIDER_BIN_RANGE.0, SLIDER_BIN_RANGE.1);
        if self.seaborn_bin_count.set(bins) {
            log::debug!("seaborn bin count -> {bins}");
        }
    }

    // -- Derived values --

    /// Rows matching the current species selection, recomputed only when
    /// the selection changed.
    pub fn filtered_view(&mut self) -> Arc<FilteredView> {
        let dataset = &self.dataset;
        let selected = &self.selected_species;
        let view = self.filtered.get(selected.version(), || {
            let view = filter_by_species(dataset, selected.get());
            log::debug!("filtered view: {} of {} rows", view.len(), dataset.len());
            Arc::new(view)
        });
        Arc::clone(view)
    }

    /// The chart for the current selection. Pulling it completes a reactive
    /// cycle.
    pub fn chart(&mut self) -> Arc<ScatterSpec> {
        let view = self.filtered_view();
        let generation = self.filtered.generation();

        let fresh = self.chart.is_stale(&generation);
        let dataset = &self.dataset;
        let options = &self.options;
        let colors = &self.colors;
        let spec = Arc::clone(self.chart.get(generation, || {
            let spec = render_scatter(dataset, &view, options, colors);
            log::debug!("rendered scatter with {} points", spec.point_count());
            Arc::new(spec)
        }));

        if fresh {
            self.phase = RenderPhase::Rendered {
                cycle: self.chart.generation(),
            };
        }
        spec
    }

    /// Number of times the filter has run.
    pub fn filter_evaluations(&self) -> u64 {
        self.filtered.generation()
    }

    /// Number of times the chart has been rebuilt.
    pub fn render_evaluations(&self) -> u64 {
        self.chart.generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Island, Penguin};
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

    fn session() -> Session {
        let ds = PenguinDataset::from_rows(vec![
            penguin(Species::Adelie, 180.0, 3700.0),
            penguin(Species::Gentoo, 210.0, 5000.0),
            penguin(Species::Chinstrap, 195.0, 3800.0),
        ]);
        Session::new(Arc::new(ds), ScatterOptions::default(), &ControlDefaults::default())
    }

    #[test]
    fn starts_with_every_species_and_awaits_first_render() {
        let mut s = session();
        assert_eq!(s.phase(), RenderPhase::AwaitingFirstRender);
        assert_eq!(s.filtered_view().len(), 3);
        // Filtering alone does not render.
        assert_eq!(s.phase(), RenderPhase::AwaitingFirstRender);

        assert_eq!(s.chart().point_count(), 3);
        assert_eq!(s.phase(), RenderPhase::Rendered { cycle: 1 });
    }

    #[test]
    fn selection_change_runs_one_cycle() {
        let mut s = session();
        s.chart();
        s.set_species(BTreeSet::from([Species::Adelie, Species::Gentoo]));

        let chart = s.chart();
        assert_eq!(chart.point_count(), 2);
        assert_eq!(s.filtered_view().indices(), &[0, 1]);
        assert_eq!(s.phase(), RenderPhase::Rendered { cycle: 2 });

        // Pulling again is served from cache.
        s.chart();
        assert_eq!(s.filter_evaluations(), 2);
        assert_eq!(s.render_evaluations(), 2);
    }

    #[test]
    fn setting_the_same_selection_does_not_recompute() {
        let mut s = session();
        s.chart();
        s.select_all_species();
        s.chart();
        assert_eq!(s.filter_evaluations(), 1);
        assert_eq!(s.render_evaluations(), 1);
    }

    #[test]
    fn empty_selection_renders_empty_chart() {
        let mut s = session();
        s.select_no_species();
        assert!(s.filtered_view().is_empty());
        let chart = s.chart();
        assert!(chart.is_empty());
        assert_eq!(s.phase(), RenderPhase::Rendered { cycle: 1 });
    }

    #[test]
    fn toggle_species_round_trip() {
        let mut s = session();
        s.toggle_species(Species::Gentoo);
        assert!(!s.is_species_selected(Species::Gentoo));
        assert_eq!(s.chart().point_count(), 2);
        s.toggle_species(Species::Gentoo);
        assert!(s.is_species_selected(Species::Gentoo));
        assert_eq!(s.chart().point_count(), 3);
    }

    #[test]
    fn attribute_and_bin_counts_do_not_trigger_recompute() {
        let mut s = session();
        s.chart();
        s.set_selected_attribute(Column::BodyMassG);
        s.set_plotly_bin_count(12);
        s.set_seaborn_bin_count(50);
        s.chart();

        assert_eq!(s.selected_attribute(), Column::BodyMassG);
        assert_eq!(s.plotly_bin_count(), 12);
        assert_eq!(s.seaborn_bin_count(), 50);
        assert_eq!(s.filter_evaluations(), 1);
        assert_eq!(s.render_evaluations(), 1);
    }

    #[test]
    fn controls_are_constrained_to_their_domains() {
        let mut s = session();
        s.set_selected_attribute(Column::Island);
        assert_eq!(s.selected_attribute(), Column::BillLengthMm);
        s.set_plotly_bin_count(0);
        assert_eq!(s.plotly_bin_count(), 1);
        s.set_seaborn_bin_count(500);
        assert_eq!(s.seaborn_bin_count(), 100);
    }

    #[test]
    fn absent_species_is_reported_and_filters_to_nothing() {
        let ds = PenguinDataset::from_rows(vec![penguin(Species::Gentoo, 210.0, 5000.0)]);
        let mut s = Session::new(Arc::new(ds), ScatterOptions::default(), &ControlDefaults::default());
        assert!(s.is_species_present(Species::Gentoo));
        assert!(!s.is_species_present(Species::Adelie));

        s.set_species(BTreeSet::from([Species::Adelie]));
        assert!(s.filtered_view().is_empty());
        assert!(s.chart().is_empty());
    }

    #[test]
    fn sessions_share_the_dataset_but_not_selection() {
        let shared = Arc::new(PenguinDataset::from_rows(vec![
            penguin(Species::Adelie, 180.0, 3700.0),
            penguin(Species::Gentoo, 210.0, 5000.0),
        ]));
        let defaults = ControlDefaults::default();
        let mut a = Session::new(Arc::clone(&shared), ScatterOptions::default(), &defaults);
        let mut b = Session::new(Arc::clone(&shared), ScatterOptions::default(), &defaults);

        a.select_no_species();
        assert_eq!(a.chart().point_count(), 0);
        assert_eq!(b.chart().point_count(), 2);
        assert!(std::ptr::eq(a.dataset(), b.dataset()));
    }
}
