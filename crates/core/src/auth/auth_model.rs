//! Identity types and provider error-code mapping.

use serde::{Deserialize, Serialize};

/// The identity a successful sign-in yields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// User-facing message for a sign-in failure. Known provider codes get a
/// specific text, anything else the generic fallback.
pub fn sign_in_error_message(error_code: &str) -> &'static str {
    match error_code {
        "ERROR_USER_NOT_FOUND" => "Usuario no encontrado",
        "ERROR_WRONG_PASSWORD" => "Contraseña incorrecta",
        _ => "Error al iniciar sesión",
    }
}

/// User-facing message for a registration failure.
pub fn register_error_message(error_code: &str) -> &'static str {
    match error_code {
        "ERROR_EMAIL_ALREADY_IN_USE" => "El correo ya está en uso",
        "ERROR_WEAK_PASSWORD" => "La contraseña es demasiado débil",
        _ => "Error al registrarse",
    }
}
