use super::*;

fn no_fonts() -> FontSources {
    FontSources {
        dirs: Vec::new(),
        system: false,
    }
}

#[test]
fn databases_are_shared_per_source_set() {
    let a = database(&no_fonts());
    let b = database(&no_fonts());
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.len(), 0);
}

#[test]
fn empty_database_resolves_no_face() {
    let db = database(&no_fonts());
    assert!(resolve_face(&db, "Sans", FontSlant::Normal, FontWeight::Bold).is_none());
}

#[test]
fn missing_font_dir_is_not_fatal() {
    let sources = FontSources {
        dirs: vec![PathBuf::from("target/tagdraw-no-such-font-dir")],
        system: false,
    };
    assert_eq!(database(&sources).len(), 0);
}
