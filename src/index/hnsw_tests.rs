use super::*;

fn index_of(rows: &[&[f64]], metric: Metric) -> HnswIndex {
    let mut index = HnswIndex::new(16, 200, 7, metric);
    for row in rows {
        index.add(row).expect("uniform dimensionality");
    }
    index
}

#[test]
fn test_empty_index() {
    let index = HnswIndex::new(16, 200, 0, Metric::Euclidean);
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
}

#[test]
fn test_add_assigns_rows_in_order() {
    let mut index = HnswIndex::new(16, 200, 0, Metric::Euclidean);
    assert_eq!(index.add(&[1.0, 2.0, 3.0]).expect("first"), 0);
    assert_eq!(index.add(&[3.0, 2.0, 1.0]).expect("second"), 1);
    assert_eq!(index.len(), 2);
    assert_eq!(index.dimensions(), 3);
    assert_eq!(index.row_vector(1), Some(&[3.0, 2.0, 1.0][..]));
}

#[test]
fn test_add_wrong_dimension() {
    let mut index = HnswIndex::new(16, 200, 0, Metric::Euclidean);
    index.add(&[1.0, 2.0]).expect("first");
    assert!(matches!(
        index.add(&[1.0]),
        Err(BiblioError::DimensionMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_search_single_item() {
    let index = index_of(&[&[1.0, 2.0, 3.0]], Metric::Cosine);
    let results = index.query(&[1.0, 2.0, 3.0], 1).expect("k == len");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].row, 0);
    assert!(results[0].distance < 1e-6); // Distance ~0
}

#[test]
fn test_search_multiple_items() {
    let index = index_of(
        &[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]],
        Metric::Cosine,
    );
    let results = index.query(&[0.9, 0.1, 0.0], 2).expect("k <= len");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].row, 0); // Closest to [1,0,0]
}

#[test]
fn test_search_k_larger_than_index() {
    let index = index_of(&[&[1.0], &[2.0]], Metric::Euclidean);
    let err = index.query(&[1.5], 10).unwrap_err();
    assert!(matches!(
        err,
        BiblioError::InsufficientData {
            requested: 10,
            available: 2
        }
    ));
}

#[test]
fn test_search_order_by_similarity() {
    // Cosine distance measures angle, not magnitude
    let index = index_of(
        &[&[1.0, 0.1], &[1.0, 1.0], &[0.1, 1.0]],
        Metric::Cosine,
    );
    let results = index.query(&[1.0, 0.0], 3).expect("k == len");

    assert_eq!(results.len(), 3);
    assert!(results[0].distance <= results[1].distance);
    assert!(results[1].distance <= results[2].distance);
    assert_eq!(results[0].row, 0);
    assert_eq!(results[2].row, 2);
}

#[test]
fn test_search_wrong_dimension() {
    let index = index_of(&[&[1.0, 2.0, 3.0]], Metric::Euclidean);
    assert!(matches!(
        index.query(&[1.0, 2.0], 1),
        Err(BiblioError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_search_k_zero() {
    let index = index_of(&[&[1.0, 0.0]], Metric::Euclidean);
    assert!(index.query(&[1.0, 0.0], 0).expect("k=0").is_empty());
}

#[test]
fn test_query_empty_index_with_k_zero() {
    let index = HnswIndex::new(16, 200, 0, Metric::Euclidean);
    assert!(index.query(&[], 0).expect("k=0").is_empty());
}

#[test]
fn test_add_many_items_triggers_pruning() {
    // Small M forces connection pruning
    let mut index = HnswIndex::new(2, 10, 3, Metric::Euclidean);
    for i in 0..20 {
        let val = f64::from(i) * 0.1;
        index.add(&[val, 1.0 - val]).expect("uniform");
    }
    assert_eq!(index.len(), 20);

    let results = index.query(&[0.5, 0.5], 5).expect("k <= len");
    assert_eq!(results.len(), 5);
    assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn test_always_returns_exactly_k() {
    let mut index = HnswIndex::new(2, 2, 11, Metric::Euclidean);
    for i in 0..50 {
        index.add(&[f64::from(i)]).expect("uniform");
    }
    for k in [1, 7, 25, 50] {
        assert_eq!(index.query(&[0.0], k).expect("k <= len").len(), k);
    }
}

#[test]
fn test_matches_exact_scan_on_small_data() {
    let rows: Vec<Vec<f64>> = (0..30)
        .map(|i| {
            let x = f64::from(i);
            vec![x.sin(), x.cos(), (x * 0.5).sin()]
        })
        .collect();
    let store = VectorStore::from_rows((0..30).map(|i| format!("t{i}")).collect(), &rows)
        .expect("valid store");
    let hnsw = HnswIndex::from_store(&store, HnswParams::default(), Metric::Euclidean);
    let exact = crate::index::BruteForceIndex::from_store(&store, Metric::Euclidean);

    let query = store.vector_at(4);
    let approx: Vec<usize> = hnsw.query(query, 5).expect("k").iter().map(|n| n.row).collect();
    let truth: Vec<usize> = exact.query(query, 5).expect("k").iter().map(|n| n.row).collect();
    assert_eq!(approx, truth);
}

#[test]
fn test_duplicates_all_found_at_zero_distance() {
    let dup: &[f64] = &[1.0, 1.0];
    let mut rows = vec![dup; 5];
    rows.push(&[9.0, 0.0]);
    rows.push(&[0.0, 9.0]);
    rows.push(&[5.0, 5.0]);
    let index = index_of(&rows, Metric::Euclidean);

    let results = index.query(&[1.0, 1.0], 5).expect("k <= len");
    let mut found: Vec<usize> = results.iter().map(|n| n.row).collect();
    found.sort_unstable();
    assert_eq!(found, vec![0, 1, 2, 3, 4]);
    assert!(results.iter().all(|n| n.distance == 0.0));
}

#[test]
fn test_same_seed_same_results() {
    let rows: Vec<Vec<f64>> = (0..40).map(|i| vec![f64::from(i % 7), f64::from(i % 5)]).collect();
    let store = VectorStore::from_rows((0..40).map(|i| format!("t{i}")).collect(), &rows)
        .expect("valid store");
    let params = HnswParams {
        m: 4,
        ef_construction: 8,
        seed: 99,
    };
    let a = HnswIndex::from_store(&store, params, Metric::Euclidean);
    let b = HnswIndex::from_store(&store, params, Metric::Euclidean);
    assert_eq!(
        a.query(&[3.0, 2.0], 6).expect("k"),
        b.query(&[3.0, 2.0], 6).expect("k")
    );
}

#[test]
fn test_accessors() {
    let index = HnswIndex::new(32, 100, 0, Metric::Cosine);
    assert_eq!(index.m(), 32);
    assert_eq!(index.ef_construction(), 100);
    assert_eq!(index.metric(), Metric::Cosine);
}

#[test]
fn test_params_default() {
    let params = HnswParams::default();
    assert_eq!(params.m, 16);
    assert_eq!(params.ef_construction, 200);
    assert_eq!(params.seed, 42);
}
