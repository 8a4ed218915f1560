//! Note/tag repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, pagination and tag lookup over `notes`/`tags`/`note_tags`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Read queries skip soft-deleted rows (`deleted_at IS NOT NULL`).
//! - A saved note's `note_tags` rows equal its `tags` field exactly.
//! - `delete_all_notes` is the only path that physically removes rows.
//! - Every method is one unit of work; multi-statement writes use their own
//!   transaction and nothing is cached between calls.

use crate::db::StorageResult;
use crate::model::note::{Note, NoteId, Tag};
use crate::repo::pagination::{paginate, PageWindow};
use log::{debug, info};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::{BTreeSet, HashMap};

const NOTE_SELECT_SQL: &str = "SELECT
    notes.id,
    notes.title,
    notes.content,
    notes.created_at,
    notes.updated_at,
    notes.deleted_at
FROM notes";

/// Repository interface for note and tag persistence.
///
/// Callers depend on this trait; `SqliteNoteRepository` is the default
/// implementation.
pub trait NoteRepository {
    /// Inserts a note and its tag links, returning the stored row with the
    /// generated id and timestamps.
    fn create_note(&self, note: &Note) -> StorageResult<Note>;
    /// Lists every live note. Tags are not loaded.
    fn get_notes(&self) -> StorageResult<Vec<Note>>;
    /// Lists one page of live notes. Tags are not loaded.
    fn get_notes_with_pagination(&self, page: i64, page_size: i64) -> StorageResult<Vec<Note>>;
    /// Gets one live note with its tags, or `None` when absent or deleted.
    fn get_note_by_id(&self, id: NoteId) -> StorageResult<Option<Note>>;
    /// Saves every field of `note` and replaces its tag set.
    ///
    /// There is no existence check: an unknown id is inserted.
    fn update_note_by_id(&self, note: &Note) -> StorageResult<()>;
    /// Soft-deletes one note. Unknown or already deleted ids are a no-op.
    fn delete_note_by_id(&self, id: NoteId) -> StorageResult<()>;
    /// Physically removes all notes, tag links and tags. Test teardown only.
    fn delete_all_notes(&self) -> StorageResult<()>;
    /// Lists one page of distinct live notes linked to `tag`, tags loaded.
    fn get_notes_by_tag(&self, tag: &str, page: i64, page_size: i64) -> StorageResult<Vec<Note>>;
    /// Returns all tags sorted by name.
    fn get_all_tags(&self) -> StorageResult<Vec<Tag>>;
    /// Returns tags whose name equals `name` exactly.
    fn get_tags_by_name(&self, name: &str) -> StorageResult<Vec<Tag>>;
}

/// SQLite-backed note repository over an injected connection.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Wraps a bootstrapped connection, see [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> StorageResult<Note> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO notes (id, title, content, created_at, updated_at, deleted_at)
             VALUES (
                ?1,
                ?2,
                ?3,
                COALESCE(?4, strftime('%s', 'now') * 1000),
                strftime('%s', 'now') * 1000,
                ?5
             );",
            params![
                persisted_id(note.id),
                note.title.as_str(),
                note.content.as_str(),
                non_zero(note.created_at),
                note.deleted_at,
            ],
        )?;

        let id = tx.last_insert_rowid();
        replace_note_tags(&tx, id, &note.tags)?;
        let mut stored = tx.query_row(
            &format!("{NOTE_SELECT_SQL} WHERE notes.id = ?1;"),
            [id],
            parse_note_row,
        )?;
        stored.tags = load_tags_for_note(&tx, id)?;
        tx.commit()?;

        debug!("event=note_create module=repo status=ok note_id={id}");
        Ok(stored)
    }

    fn get_notes(&self) -> StorageResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE notes.deleted_at IS NULL
             ORDER BY notes.id ASC;"
        ))?;
        let notes = stmt
            .query_map([], parse_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn get_notes_with_pagination(&self, page: i64, page_size: i64) -> StorageResult<Vec<Note>> {
        let PageWindow { offset, limit } = paginate(page, page_size);
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE notes.deleted_at IS NULL
             ORDER BY notes.id ASC
             LIMIT ?1 OFFSET ?2;"
        ))?;
        let notes = stmt
            .query_map(params![limit, offset], parse_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    fn get_note_by_id(&self, id: NoteId) -> StorageResult<Option<Note>> {
        debug!("event=note_get module=repo status=start note_id={id}");
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE notes.id = ?1
               AND notes.deleted_at IS NULL;"
        ))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            let mut note = parse_note_row(row)?;
            note.tags = load_tags_for_note(self.conn, id)?;
            return Ok(Some(note));
        }

        Ok(None)
    }

    fn update_note_by_id(&self, note: &Note) -> StorageResult<()> {
        debug!(
            "event=note_update module=repo status=start note_id={} tag_count={}",
            note.id,
            note.tags.len()
        );

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO notes (id, title, content, created_at, updated_at, deleted_at)
             VALUES (
                ?1,
                ?2,
                ?3,
                COALESCE(?4, strftime('%s', 'now') * 1000),
                strftime('%s', 'now') * 1000,
                ?5
             )
             ON CONFLICT (id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                created_at = COALESCE(?4, notes.created_at),
                updated_at = excluded.updated_at,
                deleted_at = excluded.deleted_at;",
            params![
                persisted_id(note.id),
                note.title.as_str(),
                note.content.as_str(),
                non_zero(note.created_at),
                note.deleted_at,
            ],
        )?;

        let id = if note.id > 0 {
            note.id
        } else {
            tx.last_insert_rowid()
        };
        replace_note_tags(&tx, id, &note.tags)?;
        tx.commit()?;
        Ok(())
    }

    fn delete_note_by_id(&self, id: NoteId) -> StorageResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET deleted_at = strftime('%s', 'now') * 1000
             WHERE id = ?1
               AND deleted_at IS NULL;",
            [id],
        )?;
        debug!("event=note_delete module=repo status=ok note_id={id} changed={changed}");
        Ok(())
    }

    fn delete_all_notes(&self) -> StorageResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let links = tx.execute("DELETE FROM note_tags;", [])?;
        let notes = tx.execute("DELETE FROM notes;", [])?;
        let tags = tx.execute("DELETE FROM tags;", [])?;
        tx.commit()?;

        info!(
            "event=notes_purge module=repo status=ok notes={notes} tags={tags} links={links}"
        );
        Ok(())
    }

    fn get_notes_by_tag(&self, tag: &str, page: i64, page_size: i64) -> StorageResult<Vec<Note>> {
        let PageWindow { offset, limit } = paginate(page, page_size);
        debug!(
            "event=notes_by_tag module=repo status=start tag={tag} offset={offset} limit={limit}"
        );

        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE notes.deleted_at IS NULL
               AND EXISTS (
                    SELECT 1
                    FROM note_tags
                    INNER JOIN tags ON tags.name = note_tags.tag_name
                    WHERE note_tags.note_id = notes.id
                      AND tags.name = ?1
               )
             ORDER BY notes.id ASC
             LIMIT ?2 OFFSET ?3;"
        ))?;
        let mut notes = stmt
            .query_map(params![tag, limit, offset], parse_note_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        attach_tags(self.conn, &mut notes)?;
        Ok(notes)
    }

    fn get_all_tags(&self) -> StorageResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare("SELECT name FROM tags ORDER BY name ASC;")?;
        let tags = stmt
            .query_map([], |row| row.get("name").map(|name: String| Tag { name }))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    fn get_tags_by_name(&self, name: &str) -> StorageResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare("SELECT name FROM tags WHERE name = ?1;")?;
        let tags = stmt
            .query_map([name], |row| row.get("name").map(|name: String| Tag { name }))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }
}

fn parse_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        deleted_at: row.get("deleted_at")?,
        tags: Vec::new(),
    })
}

fn load_tags_for_note(conn: &Connection, note_id: NoteId) -> StorageResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT tag_name
         FROM note_tags
         WHERE note_id = ?1
         ORDER BY tag_name ASC;",
    )?;
    let tags = stmt
        .query_map([note_id], |row| row.get(0).map(|name: String| Tag { name }))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}

/// Fills `tags` on every note with one `IN (...)` query over `note_tags`.
fn attach_tags(conn: &Connection, notes: &mut [Note]) -> StorageResult<()> {
    if notes.is_empty() {
        return Ok(());
    }

    let placeholders = vec!["?"; notes.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT note_id, tag_name
         FROM note_tags
         WHERE note_id IN ({placeholders})
         ORDER BY note_id ASC, tag_name ASC;"
    ))?;
    let mut rows = stmt.query(params_from_iter(notes.iter().map(|note| note.id)))?;

    let mut by_note: HashMap<NoteId, Vec<Tag>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let note_id: NoteId = row.get("note_id")?;
        by_note.entry(note_id).or_default().push(Tag {
            name: row.get("tag_name")?,
        });
    }

    for note in notes.iter_mut() {
        note.tags = by_note.remove(&note.id).unwrap_or_default();
    }
    Ok(())
}

/// Rewrites the join rows of `note_id` so they match `tags`.
///
/// Must run inside the caller's transaction.
fn replace_note_tags(conn: &Connection, note_id: NoteId, tags: &[Tag]) -> StorageResult<()> {
    conn.execute("DELETE FROM note_tags WHERE note_id = ?1;", [note_id])?;

    let unique: BTreeSet<&str> = tags.iter().map(|tag| tag.name.as_str()).collect();
    for name in unique {
        conn.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1);", [name])?;
        conn.execute(
            "INSERT INTO note_tags (note_id, tag_name) VALUES (?1, ?2);",
            params![note_id, name],
        )?;
    }
    Ok(())
}

/// Maps the unset id `0` to `NULL` so SQLite generates one.
fn persisted_id(id: NoteId) -> Option<NoteId> {
    (id > 0).then_some(id)
}

fn non_zero(value: i64) -> Option<i64> {
    (value != 0).then_some(value)
}
