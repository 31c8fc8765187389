use crate::{
    config::Config,
    services::{
        adherence::AdherenceService, drug_info::DrugInfoService, interaction::InteractionService,
        notification::NotificationService, prescription::PrescriptionService, store::RecordStore,
        user::UserService,
    },
};
use std::sync::Arc;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub user_service: UserService,
    pub drug_info_service: DrugInfoService,
    pub interaction_service: InteractionService,
    pub notification_service: NotificationService,
    pub prescription_service: PrescriptionService,
    pub adherence_service: AdherenceService,
}

impl AppState {
    pub fn is_production(&self) -> bool {
        self.config.is_production()
    }

    pub fn is_development(&self) -> bool {
        self.config.is_development()
    }
}
