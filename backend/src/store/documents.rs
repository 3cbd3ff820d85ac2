use super::{json_column, Store, StoreError};
use chrono::Utc;
use common::model::document::{GeneratedDocument, NewDocument};
use rusqlite::{params, OptionalExtension, Row};
use std::collections::HashSet;

const DOCUMENT_COLUMNS: &str = "id, uuid, template_id, title, filled_content, signature_data, \
                                pdf_filename, variables_json, created_at";

fn document_from_row(row: &Row<'_>) -> rusqlite::Result<GeneratedDocument> {
    Ok(GeneratedDocument {
        id: row.get(0)?,
        uuid: row.get(1)?,
        template_id: row.get(2)?,
        title: row.get(3)?,
        filled_content: row.get(4)?,
        signature_data: row.get(5)?,
        pdf_filename: row.get(6)?,
        variables: json_column(7, row.get(7)?)?,
        created_at: row.get(8)?,
    })
}

impl Store {
    pub fn insert_document(&self, doc: &NewDocument) -> Result<GeneratedDocument, StoreError> {
        // An empty map is stored as NULL, like a document without variables.
        let variables_json = match &doc.variables {
            Some(vars) if !vars.is_empty() => Some(serde_json::to_string(vars)?),
            _ => None,
        };
        let created_at = Utc::now();

        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO contracts (uuid, template_id, title, filled_content, signature_data,
                                    pdf_filename, variables_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                doc.uuid,
                doc.template_id,
                doc.title,
                doc.filled_content,
                doc.signature_data,
                doc.pdf_filename,
                variables_json,
                created_at
            ],
        )?;

        Ok(GeneratedDocument {
            id: conn.last_insert_rowid(),
            uuid: doc.uuid.clone(),
            template_id: doc.template_id,
            title: doc.title.clone(),
            filled_content: doc.filled_content.clone(),
            signature_data: doc.signature_data.clone(),
            variables: doc.variables.clone().filter(|vars| !vars.is_empty()),
            pdf_filename: doc.pdf_filename.clone(),
            created_at,
        })
    }

    pub fn document_by_uuid(&self, uuid: &str) -> Result<Option<GeneratedDocument>, StoreError> {
        let conn = self.connect()?;
        let doc = conn
            .query_row(
                &format!("SELECT {DOCUMENT_COLUMNS} FROM contracts WHERE uuid = ?1"),
                params![uuid],
                document_from_row,
            )
            .optional()?;
        Ok(doc)
    }

    /// All documents, newest first.
    pub fn list_documents(&self) -> Result<Vec<GeneratedDocument>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM contracts ORDER BY created_at DESC, id DESC"
        ))?;
        let docs = stmt
            .query_map([], document_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(docs)
    }

    /// Removes the row for `uuid` in one transaction and hands back what was removed,
    /// so the caller can clean up the PDF afterwards.
    pub fn delete_document(&self, uuid: &str) -> Result<Option<GeneratedDocument>, StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let doc = tx
            .query_row(
                &format!("SELECT {DOCUMENT_COLUMNS} FROM contracts WHERE uuid = ?1"),
                params![uuid],
                document_from_row,
            )
            .optional()?;
        if let Some(doc) = &doc {
            tx.execute("DELETE FROM contracts WHERE id = ?1", params![doc.id])?;
        }
        tx.commit()?;
        Ok(doc)
    }

    /// Every PDF filename some document row points at.
    pub fn referenced_pdf_filenames(&self) -> Result<HashSet<String>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT pdf_filename FROM contracts")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<HashSet<String>, _>>()?;
        Ok(names)
    }
}
