use super::{json_column, Store, StoreError};
use chrono::Utc;
use common::model::template::{Template, TemplateDraft};
use rusqlite::{params, OptionalExtension, Row};

const TEMPLATE_COLUMNS: &str = "id, title, category, content, fields_json, created_at";

fn template_from_row(row: &Row<'_>) -> rusqlite::Result<Template> {
    Ok(Template {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        content: row.get(3)?,
        fields: json_column(4, row.get(4)?)?.unwrap_or_default(),
        created_at: row.get(5)?,
    })
}

/// Field declarations are stored as JSON, or NULL when there are none.
fn encode_fields(draft: &TemplateDraft) -> Result<Option<String>, StoreError> {
    if draft.fields.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::to_string(&draft.fields)?))
    }
}

impl Store {
    pub fn create_template(&self, draft: &TemplateDraft) -> Result<Template, StoreError> {
        let conn = self.connect()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO templates (title, category, content, fields_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.title,
                draft.category,
                draft.content,
                encode_fields(draft)?,
                created_at
            ],
        )?;

        Ok(Template {
            id: conn.last_insert_rowid(),
            title: draft.title.clone(),
            category: draft.category.clone(),
            content: draft.content.clone(),
            fields: draft.fields.clone(),
            created_at,
        })
    }

    pub fn template(&self, id: i64) -> Result<Option<Template>, StoreError> {
        let conn = self.connect()?;
        let template = conn
            .query_row(
                &format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = ?1"),
                params![id],
                template_from_row,
            )
            .optional()?;
        Ok(template)
    }

    /// All templates ordered by category, then title.
    pub fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates ORDER BY category, title, id"
        ))?;
        let templates = stmt
            .query_map([], template_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(templates)
    }

    /// Replaces the editable fields of a template. Returns `None` if it does not exist.
    pub fn update_template(
        &self,
        id: i64,
        draft: &TemplateDraft,
    ) -> Result<Option<Template>, StoreError> {
        let changed = {
            let conn = self.connect()?;
            conn.execute(
                "UPDATE templates SET title = ?1, category = ?2, content = ?3, fields_json = ?4
                 WHERE id = ?5",
                params![
                    draft.title,
                    draft.category,
                    draft.content,
                    encode_fields(draft)?,
                    id
                ],
            )?
        };
        if changed == 0 {
            return Ok(None);
        }
        self.template(id)
    }

    /// Returns whether a template was deleted.
    pub fn delete_template(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let deleted = conn.execute("DELETE FROM templates WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    pub fn count_templates(&self) -> Result<i64, StoreError> {
        let conn = self.connect()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM templates", [], |row| row.get(0))?)
    }
}
