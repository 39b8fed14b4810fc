use std::sync::Arc;

use agency_di::Build;
use agency_templates_contracts::{
    RenderedTemplate, Template, TemplateService, BASE_TEMPLATE, TEMPLATES,
};
use tera::Tera;

#[derive(Debug, Clone, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        tera.add_raw_template("base.html", BASE_TEMPLATE).unwrap();

        // autoescaping is keyed on the template name, so only the `.html`
        // variants are escaped
        for &(name, text, html) in TEMPLATES {
            tera.add_raw_template(&text_name(name), text).unwrap();
            tera.add_raw_template(&html_name(name), html).unwrap();
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<RenderedTemplate> {
        let context = tera::Context::from_serialize(template)?;
        Ok(RenderedTemplate {
            text: self.state.0.render(&text_name(T::NAME), &context)?,
            html: self.state.0.render(&html_name(T::NAME), &context)?,
        })
    }
}

fn text_name(name: &str) -> String {
    format!("{name}.txt")
}

fn html_name(name: &str) -> String {
    format!("{name}.html")
}

#[cfg(test)]
mod tests {
    use agency_templates_contracts::ContactNotificationTemplate;

    use super::*;

    fn template() -> ContactNotificationTemplate {
        ContactNotificationTemplate {
            full_name: "Ana López".into(),
            company: "Tacos & Co.".into(),
            country: "".into(),
            phone: "(555) 123-4567".into(),
            email: "ana@example.com".into(),
            services: vec!["Desarrollo Web".into(), "SEO Optimization".into()],
            custom_message: "Necesitamos una web \"nueva\"".into(),
            date: "2024-05-17".into(),
            time: "".into(),
        }
    }

    #[test]
    fn contact_notification_text() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };

        // Act
        let result = sut.render(&template()).unwrap();

        // Assert
        assert!(result.text.contains("Nombre: Ana López"));
        assert!(result.text.contains("Empresa: Tacos & Co."));
        assert!(result.text.contains("País: -"));
        assert!(result.text.contains("Servicios: Desarrollo Web, SEO Optimization"));
        assert!(result.text.contains("Fecha preferida: 2024-05-17"));
        assert!(result.text.contains("Hora preferida: -"));
        assert!(result.text.contains("Necesitamos una web \"nueva\""));
    }

    #[test]
    fn contact_notification_html_is_escaped() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };

        // Act
        let result = sut.render(&template()).unwrap();

        // Assert
        assert!(result.html.contains("Tacos &amp; Co."));
        assert!(result.html.contains("&quot;nueva&quot;"));
        assert!(result.html.contains("<h2"));
    }
}
