// Dashboard - the six independent panel controllers
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::energy_data_source::EnergyDataSource;
use crate::application::panel_controller::PanelController;
use crate::domain::panel::PanelId;

pub struct Dashboard {
    cities: Arc<Vec<String>>,
    panels: HashMap<PanelId, PanelController>,
}

impl Dashboard {
    /// One controller per panel. They share the data source and the city list
    /// and nothing else.
    pub fn new(source: Arc<dyn EnergyDataSource>, cities: Vec<String>) -> Self {
        let cities = Arc::new(cities);
        let panels = PanelId::ALL
            .into_iter()
            .map(|id| (id, PanelController::new(id, source.clone(), cities.clone())))
            .collect();
        Self { cities, panels }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn controller(&self, id: PanelId) -> Option<&PanelController> {
        self.panels.get(&id)
    }
}
