// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::events::EventBus;
use crate::infrastructure::{LocalFileSystem, WorkingArea};
use crate::services::{ExecutionService, ReportService, ResolutionService};

/// Application state shared by every command.
/// All services are Arc-wrapped; `AppState::new` does the wiring.
pub struct AppState {
    pub config: AppConfig,
    pub event_bus: Arc<EventBus>,
    pub resolution_service: Arc<ResolutionService>,
    pub execution_service: Arc<ExecutionService>,
    pub report_service: Arc<ReportService>,
    pub working_area: Arc<dyn WorkingArea>,
}

impl AppState {
    /// Wire the services over the local filesystem.
    pub fn new(config: AppConfig) -> Self {
        Self::with_working_area(config, Arc::new(LocalFileSystem::new()))
    }

    pub fn with_working_area(config: AppConfig, working_area: Arc<dyn WorkingArea>) -> Self {
        let event_bus = Arc::new(EventBus::new());
        let resolution_service = Arc::new(ResolutionService::new(event_bus.clone()));
        let execution_service = Arc::new(ExecutionService::new(
            resolution_service.clone(),
            event_bus.clone(),
        ));

        Self {
            config,
            event_bus,
            resolution_service,
            execution_service,
            report_service: Arc::new(ReportService::new()),
            working_area,
        }
    }
}
