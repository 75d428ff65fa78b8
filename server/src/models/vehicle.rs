use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Connectivity status of a vehicle. Serialized exactly as the upper-case names
/// clients already send (`CONECTADO`, `DESCONECTADO`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Conectado,
    Desconectado,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Conectado => "CONECTADO",
            VehicleStatus::Desconectado => "DESCONECTADO",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the two status names.
/// Matching is exact: "conectado" is rejected just like "INEXISTENTE".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status '{0}'")]
pub struct InvalidStatus(pub String);

impl FromStr for VehicleStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONECTADO" => Ok(VehicleStatus::Conectado),
            "DESCONECTADO" => Ok(VehicleStatus::Desconectado),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    pub nome: String,
    pub modelo: String,
    pub status: VehicleStatus,
}

/// Body of `POST /veiculos`, also the input to `VehicleStore::add`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVehicle {
    pub nome: String,
    pub modelo: String,
    pub status: VehicleStatus,
}

/// Body of `PUT /veiculos/{nome}`.
///
/// `status` stays a plain string here so unknown values reach the store and come
/// back as 400 rather than a schema error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&VehicleStatus::Desconectado).unwrap();
        assert_eq!(json, "\"DESCONECTADO\"");

        let parsed: VehicleStatus = serde_json::from_str("\"CONECTADO\"").unwrap();
        assert_eq!(parsed, VehicleStatus::Conectado);
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert!("conectado".parse::<VehicleStatus>().is_err());
        assert_eq!(
            "INEXISTENTE".parse::<VehicleStatus>(),
            Err(InvalidStatus("INEXISTENTE".to_string()))
        );
    }

    #[test]
    fn new_vehicle_rejects_unknown_status() {
        let body = r#"{"nome":"Tesla","modelo":"Model S","status":"DESCONHECIDO"}"#;
        assert!(serde_json::from_str::<NewVehicle>(body).is_err());
    }
}
