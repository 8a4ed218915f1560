use notebook_core::db::open_db_in_memory;
use notebook_core::{Note, NoteRepository, SqliteNoteRepository, Tag, MAX_PAGE_SIZE};

fn seed(repo: &SqliteNoteRepository<'_>, count: usize) -> Vec<i64> {
    (0..count)
        .map(|idx| {
            repo.create_note(&Note::new(format!("note {idx}"), "body"))
                .unwrap()
                .id
        })
        .collect()
}

#[test]
fn pagination_returns_window_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let ids = seed(&repo, 25);

    let page = repo.get_notes_with_pagination(2, 10).unwrap();
    let page_ids: Vec<i64> = page.iter().map(|note| note.id).collect();
    assert_eq!(page_ids, ids[10..20].to_vec());

    let last = repo.get_notes_with_pagination(3, 10).unwrap();
    assert_eq!(last.len(), 5);
    assert!(repo.get_notes_with_pagination(4, 10).unwrap().is_empty());
}

#[test]
fn pagination_clamps_page_and_size() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    seed(&repo, 120);

    assert_eq!(
        repo.get_notes_with_pagination(0, 7).unwrap(),
        repo.get_notes_with_pagination(1, 7).unwrap()
    );
    assert_eq!(repo.get_notes_with_pagination(1, 0).unwrap().len(), 10);
    assert_eq!(repo.get_notes_with_pagination(1, -5).unwrap().len(), 10);
    assert_eq!(
        repo.get_notes_with_pagination(1, 500).unwrap().len() as i64,
        MAX_PAGE_SIZE
    );
}

#[test]
fn pagination_skips_deleted_notes_and_does_not_load_tags() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let first = repo
        .create_note(&Note::new("", "first").with_tags(["t"]))
        .unwrap();
    let second = repo.create_note(&Note::new("", "second")).unwrap();
    repo.delete_note_by_id(first.id).unwrap();

    let page = repo.get_notes_with_pagination(1, 10).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, second.id);
    assert!(page[0].tags.is_empty());
}

#[test]
fn notes_by_tag_returns_distinct_linked_notes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let work = repo
        .create_note(&Note::new("", "work note").with_tags(["work", "work", "x"]))
        .unwrap();
    let both = repo
        .create_note(&Note::new("", "both").with_tags(["home", "work"]))
        .unwrap();
    repo.create_note(&Note::new("", "home only").with_tags(["home"]))
        .unwrap();

    let found = repo.get_notes_by_tag("work", 1, 10).unwrap();
    let ids: Vec<i64> = found.iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![work.id, both.id]);
    assert_eq!(found[0].tag_names(), vec!["work", "x"]);
    assert_eq!(found[1].tag_names(), vec!["home", "work"]);
}

#[test]
fn notes_by_tag_matches_name_exactly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    repo.create_note(&Note::new("", "upper").with_tags(["Work"]))
        .unwrap();

    assert!(repo.get_notes_by_tag("work", 1, 10).unwrap().is_empty());
    assert_eq!(repo.get_notes_by_tag("Work", 1, 10).unwrap().len(), 1);
    assert!(repo.get_notes_by_tag("missing", 1, 10).unwrap().is_empty());
}

#[test]
fn notes_by_tag_is_paginated_and_skips_deleted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let ids: Vec<i64> = (0..5)
        .map(|idx| {
            repo.create_note(&Note::new(format!("n{idx}"), "").with_tags(["t"]))
                .unwrap()
                .id
        })
        .collect();
    repo.delete_note_by_id(ids[0]).unwrap();

    let first_page = repo.get_notes_by_tag("t", 1, 2).unwrap();
    let first_ids: Vec<i64> = first_page.iter().map(|note| note.id).collect();
    assert_eq!(first_ids, vec![ids[1], ids[2]]);

    let third_page = repo.get_notes_by_tag("t", 3, 2).unwrap();
    assert!(third_page.is_empty());

    assert_eq!(
        repo.get_notes_by_tag("t", 0, 2).unwrap(),
        repo.get_notes_by_tag("t", 1, 2).unwrap()
    );
}

#[test]
fn tags_are_shared_across_notes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    repo.create_note(&Note::new("", "a").with_tags(["shared", "zeta"]))
        .unwrap();
    repo.create_note(&Note::new("", "b").with_tags(["shared", "alpha"]))
        .unwrap();

    let tags = repo.get_all_tags().unwrap();
    assert_eq!(
        tags,
        vec![Tag::new("alpha"), Tag::new("shared"), Tag::new("zeta")]
    );
}

#[test]
fn tags_by_name_finds_exact_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    repo.create_note(&Note::new("", "a").with_tags(["rust"]))
        .unwrap();

    assert_eq!(repo.get_tags_by_name("rust").unwrap(), vec![Tag::new("rust")]);
    assert!(repo.get_tags_by_name("Rust").unwrap().is_empty());
}

#[test]
fn repository_works_through_trait_object() {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteNoteRepository::new(&conn);
    let repo: &dyn NoteRepository = &sqlite;

    let created = repo
        .create_note(&Note::new("dyn", "dispatch").with_tags(["di"]))
        .unwrap();
    assert_eq!(repo.get_notes_by_tag("di", 1, 10).unwrap()[0].id, created.id);
}

#[test]
fn notes_by_tag_attaches_each_notes_own_tags_on_a_full_page() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    for idx in 0..MAX_PAGE_SIZE {
        let own = format!("own-{idx:03}");
        repo.create_note(&Note::new(format!("n{idx}"), "").with_tags(["all".to_string(), own]))
            .unwrap();
    }
    repo.create_note(&Note::new("untagged-by-all", "").with_tags(["own-x"]))
        .unwrap();

    let page = repo.get_notes_by_tag("all", 1, MAX_PAGE_SIZE).unwrap();
    assert_eq!(page.len() as i64, MAX_PAGE_SIZE);
    for (idx, note) in page.iter().enumerate() {
        let own = format!("own-{idx:03}");
        assert_eq!(note.tag_names(), vec!["all", own.as_str()]);
    }
}

#[test]
fn notes_by_tag_page_past_the_end_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    repo.create_note(&Note::new("", "only").with_tags(["t"]))
        .unwrap();

    assert!(repo.get_notes_by_tag("t", 2, 10).unwrap().is_empty());
}
