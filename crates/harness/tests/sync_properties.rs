use rostersync_core::{ChangeKind, PersonField, RawDate, RawHousehold};
use rostersync_harness::{family, household, person, TestDirectory, TestSync};

fn sample_roster() -> Vec<RawHousehold> {
    let mut head = person(100, "Alice");
    head.email = Some("a@x.com".into());
    head.birth_day = Some(RawDate::Iso("1980-01-01".into()));

    let mut spouse = person(101, "Ben");
    spouse.phone = Some("555-0101".into());

    vec![
        family(head, spouse, vec![person(102, "Cara")]),
        household(person(200, "Dmitri")),
    ]
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn identical_snapshot_twice_is_all_no_change() -> Result<(), Box<dyn std::error::Error>> {
    let mut sync = TestSync::new()?;
    let directory = TestDirectory::with_households(sample_roster());

    sync.run(&directory)?;
    let before = sync.people()?;

    let report = sync.run(&directory)?;
    assert_eq!(report.tally.no_change, 4);
    assert_eq!(report.tally.total(), 4);
    assert!(report.entries.iter().all(|e| e.kind == ChangeKind::NoChange));

    // The store's field values are identical before and after.
    assert_eq!(before, sync.people()?);
    Ok(())
}

// ============================================================================
// Additivity
// ============================================================================

#[test]
fn superset_snapshot_adds_only_the_new_identifiers() -> Result<(), Box<dyn std::error::Error>> {
    let mut sync = TestSync::new()?;
    let mut directory = TestDirectory::with_households(sample_roster());
    sync.run(&directory)?;

    // S2 = S1 plus two fresh identifiers.
    let mut roster = sample_roster();
    roster.push(household(person(300, "Erin")));
    roster.push(household(person(301, "Femi")));
    directory.set_households(roster);

    let report = sync.run(&directory)?;
    assert_eq!(report.tally.added, 2);
    assert_eq!(report.tally.no_change, 4);
    assert_eq!(report.tally.changed, 0);
    assert_eq!(report.tally.removed, 0);

    let added_ids: Vec<i64> = report
        .entries
        .iter()
        .filter(|e| e.kind == ChangeKind::Added)
        .map(|e| e.person.individual_id)
        .collect();
    assert_eq!(added_ids, vec![300, 301]);
    Ok(())
}

// ============================================================================
// Removal completeness
// ============================================================================

#[test]
fn omitted_identifier_is_removed_from_store_and_reported() -> Result<(), Box<dyn std::error::Error>>
{
    let mut sync = TestSync::new()?;
    let mut directory = TestDirectory::with_households(sample_roster());
    sync.run(&directory)?;

    // Drop the standalone household (id 200) from the snapshot.
    let mut roster = sample_roster();
    roster.pop();
    directory.set_households(roster);

    let report = sync.run(&directory)?;
    assert_eq!(report.tally.removed, 1);
    let removed: Vec<&rostersync_core::Outcome> = report
        .entries
        .iter()
        .filter(|e| e.kind == ChangeKind::Removed)
        .collect();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].person.individual_id, 200);
    assert_eq!(removed[0].person.name.as_deref(), Some("Dmitri"));

    assert!(sync.people()?.iter().all(|p| p.individual_id != 200));
    Ok(())
}

// ============================================================================
// Change granularity
// ============================================================================

#[test]
fn one_field_change_yields_exactly_one_delta() -> Result<(), Box<dyn std::error::Error>> {
    let mut sync = TestSync::new()?;
    let mut directory = TestDirectory::with_households(sample_roster());
    sync.run(&directory)?;

    let mut roster = sample_roster();
    if let Some(head) = roster[0].head_of_house.as_mut() {
        head.email = Some("alice@x.com".into());
    }
    directory.set_households(roster);

    let report = sync.run(&directory)?;
    assert_eq!(report.tally.changed, 1);
    assert_eq!(report.tally.no_change, 3);

    let changed = report
        .entries
        .iter()
        .find(|e| e.kind == ChangeKind::Changed)
        .expect("one changed entry");
    assert_eq!(changed.person.individual_id, 100);
    assert_eq!(changed.deltas.len(), 1);
    assert_eq!(changed.deltas[0].field, PersonField::Email);
    Ok(())
}

// ============================================================================
// Invalid-candidate isolation
// ============================================================================

#[test]
fn one_invalid_candidate_never_errors_the_cycle() -> Result<(), Box<dyn std::error::Error>> {
    let mut sync = TestSync::new()?;

    let mut roster: Vec<RawHousehold> =
        (1..=9).map(|id| household(person(id, &format!("Member {id}")))).collect();
    let mut bad = person(0, "Broken");
    bad.individual_id = Some(-1);
    roster.push(household(bad));

    let report = sync.run(&TestDirectory::with_households(roster))?;
    assert_eq!(report.entries.len(), 9);
    assert_eq!(report.tally.added, 9);
    assert_eq!(report.skipped_invalid, 1);
    assert_eq!(sync.people()?.len(), 9);
    Ok(())
}

// ============================================================================
// Notification gating
// ============================================================================

#[test]
fn only_net_change_triggers_notification() -> Result<(), Box<dyn std::error::Error>> {
    let mut sync = TestSync::new()?;
    let directory = TestDirectory::with_households(sample_roster());

    // First sync adds everyone — notify.
    assert!(sync.run(&directory)?.has_changes());
    // Second identical sync — the writes still happen, but nothing to say.
    assert!(!sync.run(&directory)?.has_changes());
    Ok(())
}
