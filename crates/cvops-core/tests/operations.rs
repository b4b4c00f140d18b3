mod common;

use common::{checkerboard, gradient};
use cvops_core::{catalog, dispatch, DispatchError, Image};

const NONE: [(&str, &str); 0] = [];

#[test]
fn every_catalog_entry_runs_with_defaults() {
    let _ = env_logger::builder().is_test(true).try_init();
    let image = gradient(16, 12);
    for entry in catalog().entries {
        for operation in entry.operations {
            let out = dispatch(entry.category, operation, NONE, &image)
                .unwrap_or_else(|e| panic!("{operation} failed: {e}"));
            assert_eq!(out.width(), image.width(), "{operation}");
            assert_eq!(out.height(), image.height(), "{operation}");
            assert_eq!(out.pixels().len(), image.pixels().len(), "{operation}");
        }
    }
}

#[test]
fn contrast_stretch_leaves_flat_image_alone() {
    let image = Image::filled(10, 10, 100).unwrap();
    let out = dispatch("Contrast Stretching", "Contrast Stretching", NONE, &image).unwrap();
    assert_eq!(out, image);
}

#[test]
fn even_mean_kernel_rounds_up_to_odd() {
    let image = gradient(9, 7);
    let even = dispatch("Neighbourhood Operations", "Mean filter", [("ksize", "2")], &image).unwrap();
    let odd = dispatch("Neighbourhood Operations", "Mean filter", [("ksize", "3")], &image).unwrap();
    assert_eq!(even, odd);
}

#[test]
fn median_of_constant_image_is_identity() {
    let image = Image::filled(8, 8, 42).unwrap();
    let out = dispatch("Neighbourhood Operations", "Median Filter", [("ksize", "5")], &image).unwrap();
    assert_eq!(out, image);
}

#[test]
fn sobel_responds_to_edges_only() {
    let _ = env_logger::builder().is_test(true).try_init();
    let flat = Image::filled(8, 8, 90).unwrap();
    let out = dispatch("Neighbourhood Operations", "Sobel Filter", NONE, &flat).unwrap();
    assert!(out.pixels().iter().all(|&v| v == 0));

    let board = checkerboard(16, 16, 4);
    let out = dispatch("Neighbourhood Operations", "Sobel Filter", NONE, &board).unwrap();
    assert_eq!(out.pixels().iter().copied().max(), Some(255));
}

#[test]
fn threshold_output_is_binary_gray() {
    let image = gradient(20, 5);
    let out = dispatch(
        "Point Operations",
        "Threshold transformation",
        [("thresh", "100"), ("category", "ignored")],
        &image,
    )
    .unwrap();
    for px in out.pixels().chunks(3) {
        assert!(px == [0, 0, 0] || px == [255, 255, 255]);
    }
}

#[test]
fn float_kernel_size_is_truncated() {
    let image = gradient(10, 10);
    let a = dispatch("Neighbourhood Operations", "Gaussian Filter", [("ksize", "5.9")], &image).unwrap();
    let b = dispatch("Neighbourhood Operations", "Gaussian Filter", [("ksize", "5")], &image).unwrap();
    assert_eq!(a, b);
}

#[test]
fn selection_errors_are_distinguished_from_failures() {
    let image = gradient(4, 4);
    let err = dispatch("Point Operations", "Median Filter", NONE, &image).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownOperation { .. }));

    let err = dispatch("Point Operations", "Gamma transformation", [("gamma", "bright")], &image)
        .unwrap_err();
    assert!(matches!(err, DispatchError::Computation(_)));
}
