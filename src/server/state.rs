//! Application state shared across handlers

use crate::actions::{InvoiceActions, InvoiceListView};
use crate::core::validation::MessageStyle;
use crate::seed::SeedRunner;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub actions: Arc<InvoiceActions>,
    pub views: Arc<InvoiceListView>,
    pub seeder: Arc<SeedRunner>,
}

impl FromRef<AppState> for MessageStyle {
    fn from_ref(state: &AppState) -> Self {
        state.actions.messages()
    }
}
