//! Unified error codes for the raffle service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Raffle domain errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the marketing site can
/// branch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Caller is not authenticated
    NotAuthenticated = 1001,
    /// Admin key did not match
    InvalidAdminKey = 1008,

    // ==================== 4xxx: Raffle ====================
    /// Raffle not found
    RaffleNotFound = 4001,
    /// Raffle is not accepting this operation in its current status
    RaffleNotActive = 4002,
    /// No raffle scheduled for today
    NoRaffleToday = 4003,
    /// User not found
    UserNotFound = 4101,
    /// Email already registered
    EmailAlreadyRegistered = 4102,
    /// Email format rejected
    InvalidEmail = 4103,
    /// Phone format rejected
    InvalidPhone = 4104,
    /// Entry count out of range
    InvalidEntryCount = 4201,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default public message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operación completada",
            ErrorCode::Unknown => "Error desconocido",
            ErrorCode::ValidationFailed => "Datos inválidos",
            ErrorCode::NotFound => "Recurso no encontrado",
            ErrorCode::AlreadyExists => "El recurso ya existe",
            ErrorCode::InvalidRequest => "Solicitud inválida",
            ErrorCode::RequiredField => "Todos los campos son requeridos",

            // Auth
            ErrorCode::NotAuthenticated => "No autorizado",
            ErrorCode::InvalidAdminKey => "No autorizado",

            // Raffle
            ErrorCode::RaffleNotFound => "Sorteo no encontrado",
            ErrorCode::RaffleNotActive => "El sorteo no está activo",
            ErrorCode::NoRaffleToday => "No hay sorteo activo hoy",
            ErrorCode::UserNotFound => "Usuario no encontrado",
            ErrorCode::EmailAlreadyRegistered => "Ya existe un usuario con este email",
            ErrorCode::InvalidEmail => "Formato de email inválido",
            ErrorCode::InvalidPhone => "Formato de teléfono inválido",
            ErrorCode::InvalidEntryCount => "Número de participaciones inválido",

            // System
            ErrorCode::InternalError => "Error interno del servidor",
            ErrorCode::DatabaseError => "Error interno del servidor",
            ErrorCode::ConfigError => "Error de configuración",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1008 => Ok(ErrorCode::InvalidAdminKey),

            // Raffle
            4001 => Ok(ErrorCode::RaffleNotFound),
            4002 => Ok(ErrorCode::RaffleNotActive),
            4003 => Ok(ErrorCode::NoRaffleToday),
            4101 => Ok(ErrorCode::UserNotFound),
            4102 => Ok(ErrorCode::EmailAlreadyRegistered),
            4103 => Ok(ErrorCode::InvalidEmail),
            4104 => Ok(ErrorCode::InvalidPhone),
            4201 => Ok(ErrorCode::InvalidEntryCount),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
