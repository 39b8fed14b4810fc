//! User-facing response text.

use agency_models::{contact::ContactField, locale::Locale};

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const INVALID_PAYLOAD: &str = "Invalid payload";
pub const REQUEST_TOO_LARGE: &str = "Request too large";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

pub fn contact_success(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "¡Gracias por contactarnos! Te responderemos lo antes posible.",
        Locale::En => "Thank you for contacting us! We will get back to you as soon as possible.",
    }
}

pub fn too_many_requests(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "Demasiadas solicitudes. Por favor, inténtalo de nuevo más tarde.",
        Locale::En => "Too many requests. Please try again later.",
    }
}

pub fn email_not_configured(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => {
            "El formulario de contacto no está disponible en este momento. \
             Por favor, escríbenos por teléfono o WhatsApp."
        }
        Locale::En => {
            "The contact form is currently unavailable. \
             Please reach us by phone or WhatsApp."
        }
    }
}

pub fn send_failed(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "No se pudo enviar el mensaje. Por favor, inténtalo de nuevo.",
        Locale::En => "Your message could not be sent. Please try again.",
    }
}

pub fn invalid_field(field: ContactField, locale: Locale) -> &'static str {
    use ContactField::*;

    match (field, locale) {
        (FullName, Locale::Es) => "El nombre debe tener entre 2 y 100 letras.",
        (FullName, Locale::En) => "Name must be 2 to 100 letters.",
        (Company, Locale::Es) => {
            "La empresa debe tener entre 2 y 100 caracteres (letras, números, espacios, . - &)."
        }
        (Company, Locale::En) => {
            "Company must be 2 to 100 characters (letters, digits, spaces, . - &)."
        }
        (Country, Locale::Es) => "El país solo puede contener letras y tener hasta 60 caracteres.",
        (Country, Locale::En) => "Country may only contain letters and up to 60 characters.",
        (Phone, Locale::Es) => "El teléfono debe tener entre 10 y 15 dígitos.",
        (Phone, Locale::En) => "Phone must be 10 to 15 digits.",
        (Email, Locale::Es) => "Introduce un correo electrónico válido.",
        (Email, Locale::En) => "Enter a valid email address.",
        (Services, Locale::Es) => "Selecciona entre 1 y 10 servicios.",
        (Services, Locale::En) => "Select between 1 and 10 services.",
        (CustomMessage, Locale::Es) => "El mensaje no puede superar los 1000 caracteres.",
        (CustomMessage, Locale::En) => "Message must not exceed 1000 characters.",
        (Date, Locale::Es) => "Fecha no válida.",
        (Date, Locale::En) => "Invalid date.",
        (Time, Locale::Es) => "Hora no válida.",
        (Time, Locale::En) => "Invalid time.",
        (PrivacyAccepted, Locale::Es) => "Debes aceptar la política de privacidad.",
        (PrivacyAccepted, Locale::En) => "You must accept the privacy policy.",
    }
}
