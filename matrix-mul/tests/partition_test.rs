use matrix_mul::{Error, Partition, partition, worker_count};

#[test]
fn test_partitions_cover_rows_exactly() {
    for total_rows in 0..40 {
        for workers in 1..50 {
            let parts = partition(total_rows, workers).unwrap();
            assert_eq!(parts.len(), workers);

            let mut next = 0;
            for part in &parts {
                assert_eq!(part.begin, next, "gap or overlap at {:?}", part);
                next = part.end();
            }
            assert_eq!(next, total_rows);
        }
    }
}

#[test]
fn test_partition_sizes_differ_by_at_most_one() {
    for total_rows in 0..40 {
        for workers in 1..50 {
            let parts = partition(total_rows, workers).unwrap();
            let base = total_rows / workers;

            assert!(parts.iter().all(|p| p.count == base || p.count == base + 1));
            let larger = parts.iter().filter(|p| p.count == base + 1).count();
            assert_eq!(larger, total_rows % workers);
        }
    }
}

#[test]
fn test_remainder_goes_to_earliest_workers() {
    let parts = partition(10, 4).unwrap();
    let counts: Vec<_> = parts.iter().map(|p| p.count).collect();
    assert_eq!(counts, vec![3, 3, 2, 2]);
    assert_eq!(parts[3], Partition { begin: 8, count: 2 });
}

#[test]
fn test_more_workers_than_rows_leaves_trailing_workers_empty() {
    let parts = partition(2, 5).unwrap();
    assert_eq!(parts[0], Partition { begin: 0, count: 1 });
    assert_eq!(parts[1], Partition { begin: 1, count: 1 });
    assert!(parts[2..].iter().all(|p| p.is_empty() && p.begin == 2));
}

#[test]
fn test_single_worker_gets_everything() {
    let parts = partition(13, 1).unwrap();
    assert_eq!(parts, vec![Partition { begin: 0, count: 13 }]);
    assert_eq!(parts[0].range(), 0..13);
}

#[test]
fn test_zero_workers_is_rejected() {
    assert!(matches!(partition(4, 0), Err(Error::InvalidWorkerCount(0))));
}

#[test]
fn test_worker_count_validation() {
    assert_eq!(worker_count(3).unwrap(), 3);
    assert!(matches!(worker_count(0), Err(Error::InvalidWorkerCount(0))));
    assert!(matches!(worker_count(-2), Err(Error::InvalidWorkerCount(-2))));
}
