use crate::error::humanize;
use crate::field::kind_for;
use crate::model::place_holder::{FieldKind, PlaceHolder};
use crate::placeholder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An administrator-authored document skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub title: String,
    pub category: String,
    /// Free text with `{name}` placeholders.
    pub content: String,
    /// Explicit kinds for some placeholders; the rest are guessed from their names.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldKind>,
    pub created_at: DateTime<Utc>,
}

impl Template {
    /// The form fields for this template, in the order they first appear.
    pub fn placeholders(&self) -> Vec<PlaceHolder> {
        placeholder::extract(&self.content)
            .into_iter()
            .map(|name| PlaceHolder {
                label: humanize(&name),
                kind: kind_for(&name, &self.fields),
                name,
            })
            .collect()
    }
}

/// Validated, trimmed input for creating or updating a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub title: String,
    pub category: String,
    pub content: String,
    pub fields: BTreeMap<String, FieldKind>,
}

/// A template together with the form it produces.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDetail {
    #[serde(flatten)]
    pub template: Template,
    pub placeholders: Vec<PlaceHolder>,
}

impl From<Template> for TemplateDetail {
    fn from(template: Template) -> Self {
        let placeholders = template.placeholders();
        TemplateDetail {
            template,
            placeholders,
        }
    }
}

/// Templates sharing a category, for the catalogue listing.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub templates: Vec<Template>,
}

/// Groups templates by category, keeping the incoming order of both the categories
/// and the templates inside each one. Expects input already sorted by category.
pub fn group_by_category(templates: Vec<Template>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for template in templates {
        match groups.last_mut() {
            Some(group) if group.category == template.category => group.templates.push(template),
            _ => groups.push(CategoryGroup {
                category: template.category.clone(),
                templates: vec![template],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn template(id: i64, category: &str, title: &str, content: &str) -> Template {
        Template {
            id,
            title: title.to_string(),
            category: category.to_string(),
            content: content.to_string(),
            fields: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn placeholders_carry_labels_and_kinds() {
        let mut t = template(
            1,
            "Real Estate",
            "Lease",
            "On {date}, {tenant_name} pays {rent_amount} per {payment_schedule}.",
        );
        t.fields
            .insert("payment_schedule".to_string(), FieldKind::Plain);

        let fields = t.placeholders();
        let summary: Vec<(&str, &str, &FieldKind)> = fields
            .iter()
            .map(|p| (p.name.as_str(), p.label.as_str(), &p.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("date", "Date", &FieldKind::Date),
                ("tenant_name", "Tenant Name", &FieldKind::Plain),
                ("rent_amount", "Rent Amount", &FieldKind::Currency { symbol: None }),
                ("payment_schedule", "Payment Schedule", &FieldKind::Plain),
            ]
        );
    }

    #[test]
    fn groups_consecutive_categories() {
        let groups = group_by_category(vec![
            template(3, "Business", "NDA", ""),
            template(1, "Business", "Offer Letter", ""),
            template(2, "Real Estate", "Lease", ""),
        ]);
        let shape: Vec<(&str, Vec<i64>)> = groups
            .iter()
            .map(|g| (g.category.as_str(), g.templates.iter().map(|t| t.id).collect()))
            .collect();
        assert_eq!(shape, vec![("Business", vec![3, 1]), ("Real Estate", vec![2])]);
    }

    #[test]
    fn detail_flattens_the_template() {
        let detail = TemplateDetail::from(template(7, "Misc", "Note", "Hi {name}"));
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["placeholders"][0]["name"], "name");
        assert_eq!(json["placeholders"][0]["kind"]["kind"], "plain");
    }
}
