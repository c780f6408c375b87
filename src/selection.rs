//! Cascading vehicle selection state.
//!
//! One value tracks the whole cascade (category -> manufacturer -> model ->
//! model-year) plus the orthogonal region choice. Each user action is a
//! single transition function that performs the dependent resets and hands
//! back the lookup the caller must run. Lookup results are applied through
//! generation-guarded `apply_*` methods: every stage carries a counter that
//! is bumped whenever a selection supersedes it, so a response from an
//! in-flight lookup for an abandoned selection is discarded on arrival.

use crate::fipe::{PricedVehicle, SelectionOption, VehicleCategory};

/// Cascade stages that require a lookup round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Manufacturers,
    Models,
    ModelYears,
    Vehicle,
}

/// A lookup the caller must perform on behalf of the state machine.
///
/// The captured generation must be handed back to the matching `apply_*`
/// call; only the response for the stage's current generation is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub stage: Stage,
    pub generation: u64,
    pub category: VehicleCategory,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<String>,
}

/// The in-memory selection and lookup-result state for one session.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    category: Option<VehicleCategory>,
    manufacturer: Option<String>,
    model: Option<String>,
    model_year: Option<String>,
    region: Option<String>,
    manufacturer_options: Vec<SelectionOption>,
    model_options: Vec<SelectionOption>,
    model_year_options: Vec<SelectionOption>,
    vehicle: Option<PricedVehicle>,
    generations: [u64; 4],
}

impl SelectionState {
    pub fn category(&self) -> Option<VehicleCategory> {
        self.category
    }

    pub fn manufacturer(&self) -> Option<&str> {
        self.manufacturer.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn model_year(&self) -> Option<&str> {
        self.model_year.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn manufacturer_options(&self) -> &[SelectionOption] {
        &self.manufacturer_options
    }

    pub fn model_options(&self) -> &[SelectionOption] {
        &self.model_options
    }

    pub fn model_year_options(&self) -> &[SelectionOption] {
        &self.model_year_options
    }

    pub fn vehicle(&self) -> Option<&PricedVehicle> {
        self.vehicle.as_ref()
    }

    /// Choose the vehicle category. Invalidates the entire cascade and
    /// tickets a manufacturers fetch.
    pub fn select_category(&mut self, category: VehicleCategory) -> FetchTicket {
        self.category = Some(category);
        self.reset_from(Stage::Manufacturers);
        self.ticket(Stage::Manufacturers, category)
    }

    /// Choose (or clear) the manufacturer. Invalidates model, model-year and
    /// the resolved vehicle; tickets a models fetch unless cleared.
    pub fn select_manufacturer(&mut self, code: Option<String>) -> Option<FetchTicket> {
        let category = self.category?;
        self.reset_from(Stage::Models);
        self.manufacturer = code;
        self.manufacturer.as_ref()?;
        Some(self.ticket(Stage::Models, category))
    }

    /// Choose (or clear) the model. Invalidates model-year and the resolved
    /// vehicle; tickets a model-years fetch unless cleared.
    pub fn select_model(&mut self, code: Option<String>) -> Option<FetchTicket> {
        let category = self.category?;
        if self.manufacturer.is_none() {
            return None;
        }
        self.reset_from(Stage::ModelYears);
        self.model = code;
        self.model.as_ref()?;
        Some(self.ticket(Stage::ModelYears, category))
    }

    /// Choose (or clear) the model-year. Invalidates the resolved vehicle;
    /// tickets a priced-vehicle fetch unless cleared.
    pub fn select_model_year(&mut self, code: Option<String>) -> Option<FetchTicket> {
        let category = self.category?;
        if self.model.is_none() {
            return None;
        }
        self.reset_from(Stage::Vehicle);
        self.model_year = code;
        self.model_year.as_ref()?;
        Some(self.ticket(Stage::Vehicle, category))
    }

    /// Choose (or clear) the region. Orthogonal to the cascade: never resets
    /// selections, options, or the resolved vehicle.
    pub fn select_region(&mut self, uf: Option<String>) {
        self.region = uf;
    }

    /// Apply a manufacturers payload; rejected when superseded.
    pub fn apply_manufacturers(&mut self, generation: u64, options: Vec<SelectionOption>) -> bool {
        if !self.is_current(Stage::Manufacturers, generation) {
            return false;
        }
        self.manufacturer_options = options;
        true
    }

    /// Apply a models payload; rejected when superseded.
    pub fn apply_models(&mut self, generation: u64, options: Vec<SelectionOption>) -> bool {
        if !self.is_current(Stage::Models, generation) {
            return false;
        }
        self.model_options = options;
        true
    }

    /// Apply a model-years payload; rejected when superseded.
    pub fn apply_model_years(&mut self, generation: u64, options: Vec<SelectionOption>) -> bool {
        if !self.is_current(Stage::ModelYears, generation) {
            return false;
        }
        self.model_year_options = options;
        true
    }

    /// Apply a resolved vehicle; rejected when superseded.
    pub fn apply_vehicle(&mut self, generation: u64, vehicle: Option<PricedVehicle>) -> bool {
        if !self.is_current(Stage::Vehicle, generation) {
            return false;
        }
        self.vehicle = vehicle;
        true
    }

    /// Record a failed priced-vehicle lookup: the model-year selection is
    /// rolled back so the cascade stands at its model choice with no vehicle.
    /// Rejected when superseded.
    pub fn fail_vehicle(&mut self, generation: u64) -> bool {
        if !self.is_current(Stage::Vehicle, generation) {
            return false;
        }
        self.model_year = None;
        self.vehicle = None;
        true
    }

    fn is_current(&self, stage: Stage, generation: u64) -> bool {
        self.generations[stage as usize] == generation
    }

    /// Clear values and option lists from `stage` downward and invalidate
    /// any in-flight lookups for those stages.
    fn reset_from(&mut self, stage: Stage) {
        let start = stage as usize;
        for generation in &mut self.generations[start..] {
            *generation += 1;
        }
        if start <= Stage::Manufacturers as usize {
            self.manufacturer = None;
            self.manufacturer_options.clear();
        }
        if start <= Stage::Models as usize {
            self.model = None;
            self.model_options.clear();
        }
        if start <= Stage::ModelYears as usize {
            self.model_year = None;
            self.model_year_options.clear();
        }
        self.vehicle = None;
    }

    fn ticket(&self, stage: Stage, category: VehicleCategory) -> FetchTicket {
        FetchTicket {
            stage,
            generation: self.generations[stage as usize],
            category,
            manufacturer: self.manufacturer.clone(),
            model: self.model.clone(),
            model_year: self.model_year.clone(),
        }
    }
}
