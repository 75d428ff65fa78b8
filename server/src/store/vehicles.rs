use crate::models::vehicle::{NewVehicle, Vehicle, VehicleStatus};
use crate::utils::validation::validate_vehicle_name;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Veículo não encontrado")]
    NotFound,

    #[error("{0}")]
    Validation(String),
}

/// In-memory vehicle list.
///
/// Records keep insertion order and are looked up by `nome` with a linear scan.
/// Ids come from a counter that only moves forward, so an id is never handed out
/// twice even after deletes. Names are not unique: `add` accepts duplicates,
/// lookups return the first match and `delete` drops every match.
///
/// The store itself does no locking. `AppState` wraps it in a mutex.
#[derive(Debug, Clone)]
pub struct VehicleStore {
    vehicles: Vec<Vehicle>,
    next_id: u64,
}

impl Default for VehicleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleStore {
    /// Empty store, first id is 1.
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            next_id: 1,
        }
    }

    /// Store pre-loaded with the six demo vehicles (ids 1 to 6).
    pub fn seeded() -> Self {
        let mut store = Self::new();
        let demo = [
            ("Fusca", "Volkswagen Fusca", VehicleStatus::Conectado),
            ("Civic", "Honda Civic", VehicleStatus::Desconectado),
            ("Corsa", "Chevrolet Corsa", VehicleStatus::Conectado),
            ("Onix", "Chevrolet Onix", VehicleStatus::Desconectado),
            ("Focus", "Ford Focus", VehicleStatus::Conectado),
            ("Golf", "Volkswagen Golf", VehicleStatus::Desconectado),
        ];

        for (nome, modelo, status) in demo {
            store.push(nome.to_string(), modelo.to_string(), status);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn list_names(&self) -> Vec<String> {
        self.vehicles.iter().map(|v| v.nome.clone()).collect()
    }

    /// Adds a vehicle and returns it with its new id.
    ///
    /// The HTTP layer already rejects empty names, but the check is repeated here
    /// for callers that use the store directly.
    pub fn add(&mut self, vehicle: NewVehicle) -> Result<Vehicle, StoreError> {
        validate_vehicle_name(&vehicle.nome).map_err(StoreError::Validation)?;
        Ok(self.push(vehicle.nome, vehicle.modelo, vehicle.status))
    }

    pub fn get_by_name(&self, nome: &str) -> Result<&Vehicle, StoreError> {
        self.vehicles
            .iter()
            .find(|v| v.nome == nome)
            .ok_or(StoreError::NotFound)
    }

    /// Sets the status of the first vehicle named `nome`.
    ///
    /// The lookup happens before the status is parsed, so an unknown vehicle is
    /// always `NotFound` whatever the status. An invalid status leaves the record
    /// untouched.
    pub fn update_status(&mut self, nome: &str, status: &str) -> Result<Vehicle, StoreError> {
        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|v| v.nome == nome)
            .ok_or(StoreError::NotFound)?;

        let status: VehicleStatus = status
            .parse()
            .map_err(|_| StoreError::Validation("Status inválido".to_string()))?;

        vehicle.status = status;
        Ok(vehicle.clone())
    }

    /// Removes every vehicle named `nome` and returns the first one removed.
    pub fn delete(&mut self, nome: &str) -> Result<Vehicle, StoreError> {
        let removed = self.get_by_name(nome)?.clone();
        self.vehicles.retain(|v| v.nome != nome);
        Ok(removed)
    }

    fn push(&mut self, nome: String, modelo: String, status: VehicleStatus) -> Vehicle {
        let vehicle = Vehicle {
            id: self.next_id,
            nome,
            modelo,
            status,
        };
        self.next_id += 1;
        self.vehicles.push(vehicle.clone());
        vehicle
    }
}
