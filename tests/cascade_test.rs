mod helpers;

use helpers::test_store;
use ideapile::store::types::EnrichmentKind;
use ideapile::Error;

#[test]
fn delete_cascades_enrichments() {
    let mut store = test_store();
    let idea = store.create("doomed", &[]).unwrap();
    store
        .add_enrichment(&idea.id, EnrichmentKind::Expand, "detail", &[])
        .unwrap();
    store
        .add_enrichment(&idea.id, EnrichmentKind::Inspire, "angle", &[])
        .unwrap();

    store.delete(&idea.id).unwrap();

    assert!(matches!(
        store.get(&idea.id).unwrap_err(),
        Error::NotFound(_)
    ));
    // No enrichment for the deleted idea is retrievable anywhere
    for survivor in store.list_all().unwrap() {
        assert!(survivor.enrichments.iter().all(|e| e.idea_id != idea.id));
    }
    assert_eq!(store.stats().unwrap().enrichments, 0);
}

#[test]
fn delete_does_not_prune_peer_connections() {
    // The deleted idea's id stays in its peers' connection lists; readers
    // treat dangling ids as absent.
    let mut store = test_store();
    let keeper = store.create("keeper", &[]).unwrap();
    let doomed = store.create("doomed", &[]).unwrap();
    store.connect(&keeper.id, &doomed.id).unwrap();

    store.delete(&doomed.id).unwrap();

    let keeper = store.get(&keeper.id).unwrap();
    assert_eq!(keeper.connections, vec![doomed.id.clone()]);
    // The dangling id resolves to nothing
    assert!(store.get(&doomed.id).is_err());
}

#[test]
fn delete_leaves_unrelated_ideas_alone() {
    let mut store = test_store();
    let keep = store.create("keep me", &[]).unwrap();
    let kept_enrichment = store
        .add_enrichment(&keep.id, EnrichmentKind::Suggest, "1. stay", &[])
        .unwrap();
    let doomed = store.create("doomed", &[]).unwrap();

    store.delete(&doomed.id).unwrap();

    let keep = store.get(&keep.id).unwrap();
    assert_eq!(keep.enrichments.len(), 1);
    assert_eq!(keep.enrichments[0].id, kept_enrichment.id);
}
