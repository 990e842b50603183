use checkin::{
    core::store::RosterStore,
    guest::GuestRecord,
    import::normalize_rows,
    persist::memory::MemoryKv,
    types::{CellValue, RawRow},
};

fn row(name: &str, phone: &str) -> RawRow {
    RawRow::new().with("nome", name).with("telefone", phone)
}

#[test]
fn header_case_does_not_matter() {
    let lower = normalize_rows(&[row("Ana", "1199")]);
    let mixed = normalize_rows(&[RawRow::new().with("Nome", "Ana").with("TELEFONE", "1199")]);
    assert_eq!(lower, mixed);
    assert_eq!(lower, vec![GuestRecord::new("Ana", "1199", "")]);
}

#[test]
fn rows_without_phone_column_are_dropped() {
    let rows = vec![
        row("Ana", "1199"),
        RawRow::new().with("Nome", "Bia").with("celular", "2288").with("convidadoPor", "Ana"),
        row("Caio", "3377"),
    ];
    let guests = normalize_rows(&rows);
    assert_eq!(guests.len(), 2);
    assert!(guests.iter().all(|g| g.name != "Bia"));
}

#[test]
fn blank_required_cells_are_dropped() {
    let rows = vec![
        RawRow::new().with("nome", "Ana").with("telefone", CellValue::Empty),
        RawRow::new().with("nome", "").with("telefone", "1199"),
        row("Caio", "3377"),
    ];
    assert_eq!(normalize_rows(&rows), vec![GuestRecord::new("Caio", "3377", "")]);
}

#[test]
fn invited_by_is_trimmed_and_presence_ignored() {
    let rows = vec![
        RawRow::new()
            .with("NOME", "  Ana  ")
            .with("Telefone", " 1199 ")
            .with("ConvidadoPor", "  Rita ")
            .with("presente", true),
    ];
    let guests = normalize_rows(&rows);
    assert_eq!(guests, vec![GuestRecord::new("Ana", "1199", "Rita")]);
    assert!(!guests[0].present);
}

#[test]
fn extra_columns_are_ignored() {
    let rows = vec![
        RawRow::new()
            .with("email", "ana@example.com")
            .with("nome", "Ana")
            .with("telefone", 1199.0)
            .with("mesa", 4.0),
    ];
    assert_eq!(normalize_rows(&rows), vec![GuestRecord::new("Ana", "1199", "")]);
}

#[test]
fn second_import_fully_replaces_first() {
    let mut store = RosterStore::open(MemoryKv::new()).expect("open");
    store
        .import_rows(&[row("Ana", "1"), row("Bia", "2"), row("Caio", "3")])
        .expect("first import");
    store.check_in(1).expect("check in");
    store.add_or_save_walk_in("Duda", "4").expect("walk-in");

    store.import_rows(&[row("Eva", "5")]).expect("second import");

    assert_eq!(store.invited(), &[GuestRecord::new("Eva", "5", "")]);
    assert_eq!(store.walk_ins().len(), 1, "walk-ins survive an import");
}

#[test]
fn import_with_no_valid_rows_empties_the_roster() {
    let mut store = RosterStore::open(MemoryKv::new()).expect("open");
    store.import_rows(&[row("Ana", "1")]).expect("import");
    store
        .import_rows(&[RawRow::new().with("nome", "Sem telefone")])
        .expect("import");
    assert!(store.invited().is_empty());
}
