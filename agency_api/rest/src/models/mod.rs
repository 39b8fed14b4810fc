use serde::Serialize;

pub mod contact;

#[derive(Debug, Serialize)]
pub struct ApiSuccess {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ApiFieldError>>,
}

#[derive(Debug, Serialize)]
pub struct ApiFieldError {
    pub field: &'static str,
    pub message: &'static str,
}
