//! The typed repair-order record.

use serde::{Serialize, Serializer};

/// Column names of the repair list, shared by the source rows and the
/// serialized record.
pub mod columns {
    pub const MAQUINA: &str = "Maquina";
    pub const NUM_MAQUINA: &str = "NumMaquina";
    pub const MARCA: &str = "Marca";
    pub const ORDEM_REPARACAO: &str = "OrdemReparacao";
    pub const ACTUALIZADA: &str = "Actualizada";
    pub const OBSERVACOES: &str = "Observacoes";
    pub const DATA_TIME: &str = "DataTime";
    pub const ACESSORIOS: &str = "Acessorios";
    pub const TIPO: &str = "Tipo";
    pub const MODELO_ELECTREX: &str = "ModeloElectrex";
    pub const INT_EXT: &str = "IntExt";
    pub const UTILIZADOR: &str = "Utilizador";
    pub const CLIENTE: &str = "Cliente";
    pub const AVARIAS: &str = "Avarias";
    pub const EXTRAS: &str = "Extras";
}

/// Repair order number.
///
/// `NotANumber` marks a source value that did not parse as an integer; it
/// serializes as `null` because JSON has no NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderNumber {
    Value(i64),
    NotANumber,
}

impl OrderNumber {
    pub fn value(self) -> Option<i64> {
        match self {
            Self::Value(number) => Some(number),
            Self::NotANumber => None,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Self::NotANumber)
    }
}

impl Serialize for OrderNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(number) => serializer.serialize_i64(*number),
            Self::NotANumber => serializer.serialize_none(),
        }
    }
}

/// A normalized date field.
///
/// `NotApplicable` (no source value) serializes as `null`. `Invalid` (the
/// source value did not parse) is left out of the serialized record, so a
/// present date is always a valid ISO 8601 timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateField {
    Value(String),
    NotApplicable,
    Invalid,
}

impl DateField {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(iso) => Some(iso),
            Self::NotApplicable | Self::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl Serialize for DateField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(iso) => serializer.serialize_str(iso),
            Self::NotApplicable | Self::Invalid => serializer.serialize_none(),
        }
    }
}

/// One repair order, as written to `tblRepairList.json`.
///
/// Field order here is the serialized field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepairRecord {
    pub maquina: Option<String>,
    pub num_maquina: Option<String>,
    pub marca: Option<String>,
    pub ordem_reparacao: OrderNumber,
    pub actualizada: Option<String>,
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "DateField::is_invalid")]
    pub data_time: DateField,
    pub acessorios: Option<String>,
    pub tipo: Option<String>,
    pub modelo_electrex: Option<String>,
    pub int_ext: Option<String>,
    pub utilizador: Option<String>,
    pub cliente: Option<String>,
    pub avarias: Option<Vec<String>>,
    pub extras: Option<Vec<String>>,
}

impl RepairRecord {
    /// Text scalar by column name.
    pub fn scalar(&self, column: &str) -> Option<&str> {
        let value = match column {
            columns::MAQUINA => &self.maquina,
            columns::NUM_MAQUINA => &self.num_maquina,
            columns::MARCA => &self.marca,
            columns::ACTUALIZADA => &self.actualizada,
            columns::OBSERVACOES => &self.observacoes,
            columns::ACESSORIOS => &self.acessorios,
            columns::TIPO => &self.tipo,
            columns::MODELO_ELECTREX => &self.modelo_electrex,
            columns::INT_EXT => &self.int_ext,
            columns::UTILIZADOR => &self.utilizador,
            columns::CLIENTE => &self.cliente,
            columns::DATA_TIME => return self.data_time.as_str(),
            _ => return None,
        };
        value.as_deref()
    }

    /// List field by column name.
    pub fn list(&self, column: &str) -> Option<&[String]> {
        match column {
            columns::AVARIAS => self.avarias.as_deref(),
            columns::EXTRAS => self.extras.as_deref(),
            _ => None,
        }
    }

    pub fn date_time(&self) -> Option<&str> {
        self.data_time.as_str()
    }
}
