use crate::services::auth::AuthService;
use crate::store::vehicles::VehicleStore;
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared by every handler.
///
/// The vehicle store sits behind one mutex; each operation holds it for the
/// whole read-modify-write and never across an `.await`.
#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<Mutex<VehicleStore>>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(vehicles: VehicleStore, auth: AuthService) -> Self {
        Self {
            vehicles: Arc::new(Mutex::new(vehicles)),
            auth: Arc::new(auth),
        }
    }
}
