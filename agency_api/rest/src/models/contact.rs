use agency_models::contact::ContactForm;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Request body of `POST /api/contact`.
///
/// Missing fields decode to their defaults and are rejected by validation;
/// fields of the wrong JSON type fail decoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiContactForm {
    pub full_name: String,
    pub company: String,
    pub country: Option<String>,
    pub phone: String,
    pub email: String,
    pub services: Vec<String>,
    pub custom_message: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub privacy_accepted: bool,
}

impl ApiContactForm {
    /// Decode a JSON object. Any other top level value is rejected, including
    /// arrays that serde would otherwise accept as a positional struct.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let object = serde_json::from_str::<Map<String, Value>>(text)?;
        serde_json::from_value(Value::Object(object))
    }
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            full_name: value.full_name,
            company: value.company,
            country: value.country,
            phone: value.phone,
            email: value.email,
            services: value.services,
            custom_message: value.custom_message,
            date: value.date,
            time: value.time,
            privacy_accepted: value.privacy_accepted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_camel_case() {
        let form: ContactForm = ApiContactForm::from_json(
            r#"{"fullName":"Ana","company":"Acme","phone":"5551234567","email":"a@b.co",
                "services":["Consulting"],"customMessage":"hi","privacyAccepted":true}"#,
        )
        .unwrap()
        .into();

        assert_eq!(form.full_name, "Ana");
        assert_eq!(form.custom_message.as_deref(), Some("hi"));
        assert_eq!(form.country, None);
        assert!(form.privacy_accepted);
    }

    #[test]
    fn missing_fields_default() {
        let form = ApiContactForm::from_json("{}").unwrap();

        assert_eq!(form.full_name, "");
        assert!(form.services.is_empty());
        assert!(!form.privacy_accepted);
    }

    #[test]
    fn wrong_types_fail() {
        assert!(ApiContactForm::from_json(r#"{"services":"Consulting"}"#).is_err());
        assert!(ApiContactForm::from_json(r#"{"privacyAccepted":"yes"}"#).is_err());
    }

    #[test]
    fn non_object_fails() {
        for payload in [
            "[]",
            r#"["Ana","Acme",null,"5551234567","a@b.co",["Consulting"],null,null,null,true]"#,
            "null",
            "42",
            r#""text""#,
        ] {
            assert!(ApiContactForm::from_json(payload).is_err(), "{payload}");
        }
    }
}
