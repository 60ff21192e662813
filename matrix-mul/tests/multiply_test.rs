use std::sync::Arc;

use matrix_mul::{BufferLedger, Error, Matrix, ParallelExecutor, multiply_parallel, multiply_serial};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    let data = (0..rows * cols).map(|_| rng.gen_range(-10.0..10.0)).collect();
    Matrix::from_vec(rows, cols, data).unwrap()
}

fn example() -> (Matrix, Matrix) {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]).unwrap();
    (a, b)
}

#[test]
fn test_example_product() {
    let (a, b) = example();
    let expected = vec![vec![19.0, 22.0], vec![43.0, 50.0]];

    assert_eq!(multiply_serial(&a, &b).unwrap().to_rows(), expected);
    assert_eq!(multiply_parallel(&a, &b, 2).unwrap().to_rows(), expected);
    assert_eq!(multiply_parallel(&a, &b, 3).unwrap().to_rows(), expected);
}

#[test]
fn test_parallel_matches_serial() {
    let mut rng = StdRng::seed_from_u64(7);

    for (m, n, p) in [(1, 1, 1), (5, 3, 4), (17, 9, 6), (32, 32, 32), (3, 40, 2)] {
        let a = random_matrix(&mut rng, m, n);
        let b = random_matrix(&mut rng, n, p);
        let serial = multiply_serial(&a, &b).unwrap();

        for workers in [1, 2, m, m + 5] {
            let parallel = multiply_parallel(&a, &b, workers).unwrap();
            assert_eq!(parallel.shape(), (m, p));
            assert_eq!(
                parallel.as_slice(),
                serial.as_slice(),
                "{}x{}x{} with {} workers",
                m,
                n,
                p,
                workers
            );
        }
    }
}

#[test]
fn test_single_worker_matches_serial_row_for_row() {
    let mut rng = StdRng::seed_from_u64(11);
    let a = random_matrix(&mut rng, 9, 4);
    let b = random_matrix(&mut rng, 4, 7);

    let serial = multiply_serial(&a, &b).unwrap();
    let parallel = multiply_parallel(&a, &b, 1).unwrap();
    for r in 0..serial.rows() {
        assert_eq!(parallel.row(r), serial.row(r));
    }
}

#[test]
fn test_dimension_mismatch_fails_on_both_paths() {
    let a = Matrix::zeros(2, 3).unwrap();
    let b = Matrix::zeros(2, 3).unwrap();

    assert!(matches!(
        multiply_serial(&a, &b),
        Err(Error::DimensionMismatch(2, 3, 2, 3))
    ));

    let ledger = Arc::new(BufferLedger::new());
    let executor = ParallelExecutor::new(2).unwrap().with_ledger(Arc::clone(&ledger));
    assert!(matches!(
        executor.multiply(&a, &b),
        Err(Error::DimensionMismatch(2, 3, 2, 3))
    ));
    assert_eq!(ledger.acquired(), 0);
}

#[test]
fn test_zero_workers_is_rejected() {
    let (a, b) = example();
    assert!(matches!(
        multiply_parallel(&a, &b, 0),
        Err(Error::InvalidWorkerCount(0))
    ));
}

#[test]
fn test_ledger_balanced_after_each_call() {
    let (a, b) = example();
    let ledger = Arc::new(BufferLedger::new());

    for workers in 1..6 {
        let executor = ParallelExecutor::new(workers)
            .unwrap()
            .with_ledger(Arc::clone(&ledger));
        executor.multiply(&a, &b).unwrap();
        assert!(ledger.is_balanced());
    }
    assert_eq!(ledger.acquired(), 5);
    assert_eq!(ledger.released(), 5);
}

#[test]
fn test_unallocatable_result_is_resource_exhausted() {
    let a = Matrix::from_vec(usize::MAX / 2, 0, Vec::new()).unwrap();
    let b = Matrix::from_vec(0, 1, Vec::new()).unwrap();
    let ledger = Arc::new(BufferLedger::new());

    let executor = ParallelExecutor::new(4).unwrap().with_ledger(Arc::clone(&ledger));
    assert!(matches!(
        executor.multiply(&a, &b),
        Err(Error::ResourceExhausted(_))
    ));
    assert_eq!(ledger.acquired(), 0);
    assert!(ledger.is_balanced());
}

#[test]
fn test_unallocatable_serial_result_is_resource_exhausted() {
    let a = Matrix::from_vec(usize::MAX / 2, 0, Vec::new()).unwrap();
    let b = Matrix::from_vec(0, 1, Vec::new()).unwrap();

    assert!(matches!(
        multiply_serial(&a, &b),
        Err(Error::ResourceExhausted(_))
    ));
}

#[test]
fn test_empty_shapes() {
    let a = Matrix::zeros(0, 3).unwrap();
    let b = Matrix::zeros(3, 4).unwrap();
    let c = multiply_parallel(&a, &b, 4).unwrap();
    assert_eq!(c.shape(), (0, 4));

    let a = Matrix::zeros(3, 2).unwrap();
    let b = Matrix::zeros(2, 0).unwrap();
    let c = multiply_parallel(&a, &b, 2).unwrap();
    assert_eq!(c.shape(), (3, 0));

    let a = Matrix::zeros(2, 0).unwrap();
    let b = Matrix::zeros(0, 2).unwrap();
    let c = multiply_parallel(&a, &b, 2).unwrap();
    assert_eq!(c, Matrix::zeros(2, 2).unwrap());
    assert_eq!(c, multiply_serial(&a, &b).unwrap());
}
