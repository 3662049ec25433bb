mod helpers;

use helpers::test_store;
use ideapile::Error;

#[test]
fn connect_is_symmetric() {
    let mut store = test_store();
    let a = store.create("idea a", &[]).unwrap();
    let b = store.create("idea b", &[]).unwrap();

    store.connect(&a.id, &b.id).unwrap();

    assert!(store.get(&a.id).unwrap().connections.contains(&b.id));
    assert!(store.get(&b.id).unwrap().connections.contains(&a.id));
}

#[test]
fn connect_twice_is_a_no_op() {
    let mut store = test_store();
    let a = store.create("idea a", &[]).unwrap();
    let b = store.create("idea b", &[]).unwrap();

    store.connect(&a.id, &b.id).unwrap();
    store.connect(&a.id, &b.id).unwrap();
    // Order of arguments must not matter either
    store.connect(&b.id, &a.id).unwrap();

    assert_eq!(store.get(&a.id).unwrap().connections.len(), 1);
    assert_eq!(store.get(&b.id).unwrap().connections.len(), 1);
}

#[test]
fn connect_builds_a_set_per_idea() {
    let mut store = test_store();
    let hub = store.create("hub", &[]).unwrap();
    let x = store.create("spoke x", &[]).unwrap();
    let y = store.create("spoke y", &[]).unwrap();

    store.connect(&hub.id, &x.id).unwrap();
    store.connect(&hub.id, &y.id).unwrap();

    let hub_conns = store.get(&hub.id).unwrap().connections;
    assert_eq!(hub_conns.len(), 2);
    assert!(hub_conns.contains(&x.id));
    assert!(hub_conns.contains(&y.id));
    assert_eq!(store.get(&x.id).unwrap().connections, vec![hub.id.clone()]);
}

#[test]
fn connect_rejects_self_and_missing() {
    let mut store = test_store();
    let a = store.create("idea a", &[]).unwrap();

    assert!(matches!(
        store.connect(&a.id, &a.id).unwrap_err(),
        Error::Validation(_)
    ));
    assert!(matches!(
        store.connect(&a.id, "missing").unwrap_err(),
        Error::NotFound(_)
    ));
    assert!(matches!(
        store.connect("missing", &a.id).unwrap_err(),
        Error::NotFound(_)
    ));

    assert!(store.get(&a.id).unwrap().connections.is_empty());
}

#[test]
fn connection_count_in_stats_counts_pairs_once() {
    let mut store = test_store();
    let a = store.create("a", &[]).unwrap();
    let b = store.create("b", &[]).unwrap();
    let c = store.create("c", &[]).unwrap();

    store.connect(&a.id, &b.id).unwrap();
    store.connect(&b.id, &c.id).unwrap();

    let stats = store.stats().unwrap();
    assert_eq!(stats.total_ideas, 3);
    assert_eq!(stats.connections, 2);
}
