//! Built-in listing templates and their field rules.

use crate::DataError;

/// Format rule applied to a non-blank cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    NonEmpty,
    PositiveNumber,
    /// Loose check; blank is acceptable for optional fields.
    Email,
    Phone,
}

impl Rule {
    pub fn check(self, value: &str) -> bool {
        let trimmed = value.trim();
        match self {
            Rule::NonEmpty => !trimmed.is_empty(),
            Rule::PositiveNumber => trimmed.parse::<f64>().map(|n| n > 0.0).unwrap_or(false),
            Rule::Email => {
                trimmed.is_empty() || (trimmed.contains('@') && trimmed.contains('.'))
            }
            Rule::Phone => {
                trimmed.is_empty()
                    || trimmed
                        .chars()
                        .all(|c| c.is_ascii_digit() || "+ -()".contains(c))
            }
        }
    }
}

/// One column of a listing template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateField {
    pub name: &'static str,
    pub required: bool,
    pub rule: Option<Rule>,
    pub description: &'static str,
}

impl TemplateField {
    fn required(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            required: true,
            rule: Some(rule),
            description: "",
        }
    }

    fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            rule: None,
            description: "",
        }
    }

    fn optional_with(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            required: false,
            rule: Some(rule),
            description: "",
        }
    }
}

/// A named listing layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportTemplate {
    pub key: &'static str,
    pub label: &'static str,
    pub fields: Vec<TemplateField>,
}

impl ImportTemplate {
    pub fn header(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }
}

fn fabric_template() -> ImportTemplate {
    ImportTemplate {
        key: "tejidos",
        label: "Tejidos",
        fields: vec![
            TemplateField {
                name: "codigo",
                required: true,
                rule: Some(Rule::NonEmpty),
                description: "SKU interno",
            },
            TemplateField::required("nombre", Rule::NonEmpty),
            TemplateField::required("tipo", Rule::NonEmpty),
            TemplateField::required("ancho_cm", Rule::PositiveNumber),
            TemplateField::required("peso_gm2", Rule::PositiveNumber),
            TemplateField::optional("color"),
            TemplateField::optional("proveedor"),
        ],
    }
}

fn material_template() -> ImportTemplate {
    ImportTemplate {
        key: "materiales",
        label: "Materiales",
        fields: vec![
            TemplateField::required("codigo", Rule::NonEmpty),
            TemplateField::required("nombre", Rule::NonEmpty),
            TemplateField::required("categoria", Rule::NonEmpty),
            TemplateField::required("unidad_medida", Rule::NonEmpty),
            TemplateField::required("costo_unitario", Rule::PositiveNumber),
            TemplateField::optional("proveedor"),
        ],
    }
}

fn supplier_template() -> ImportTemplate {
    ImportTemplate {
        key: "proveedores",
        label: "Proveedores",
        fields: vec![
            TemplateField::required("razon_social", Rule::NonEmpty),
            TemplateField::required("identificacion", Rule::NonEmpty),
            TemplateField::optional_with("email", Rule::Email),
            TemplateField::optional_with("telefono", Rule::Phone),
            TemplateField::optional("direccion"),
            TemplateField::optional("ciudad"),
            TemplateField::optional("pais"),
        ],
    }
}

fn customer_template() -> ImportTemplate {
    ImportTemplate {
        key: "clientes",
        label: "Clientes",
        fields: vec![
            TemplateField::required("razon_social", Rule::NonEmpty),
            TemplateField::required("identificacion", Rule::NonEmpty),
            TemplateField::optional_with("email", Rule::Email),
            TemplateField::optional_with("telefono", Rule::Phone),
            TemplateField::optional("direccion"),
            TemplateField::optional("ciudad"),
            TemplateField::optional("pais"),
            TemplateField::optional("segmento"),
        ],
    }
}

/// All built-in templates.
pub fn templates() -> Vec<ImportTemplate> {
    vec![
        fabric_template(),
        material_template(),
        supplier_template(),
        customer_template(),
    ]
}

/// Look up a template by key (case-insensitive, trimmed).
pub fn template(key: &str) -> Result<ImportTemplate, DataError> {
    let normalized = key.trim().to_lowercase();
    templates()
        .into_iter()
        .find(|t| t.key == normalized)
        .ok_or_else(|| DataError::UnknownTemplate {
            requested: key.to_string(),
            available: templates()
                .iter()
                .map(|t| t.key)
                .collect::<Vec<_>>()
                .join(", "),
        })
}
