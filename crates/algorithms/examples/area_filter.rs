//! Area filter demo: connected-filter denoising pipeline
//!
//! Generates a 200x200 synthetic "image" with:
//! - Uniform background (value 50)
//! - Large bright rectangle (value 200)
//! - Small bright spots (single-pixel, value 220) — "salt" noise
//! - Small dark spots (single-pixel, value 5) — "pepper" noise
//!
//! Then runs the connected-filter pipeline:
//!   1. area opening  — removes the salt specks, rectangle untouched
//!   2. area closing  — fills the pepper specks
//!   3. regional maxima labelling on the cleaned result
//!
//! Unlike a structural opening, the area opening does not round the
//! rectangle's corners: components above the threshold survive unchanged.
//!
//! Run:
//!   cargo run -p maxtree-algorithms --example area_filter

use maxtree_algorithms::extrema::{max_tree_local_maxima, LocalMaximaParams};
use maxtree_algorithms::filters::{
    area_closing, area_opening, AreaClosingParams, AreaOpeningParams,
};
use maxtree_core::Grid;

const ROWS: usize = 200;
const COLS: usize = 200;

fn main() {
    // --- 1. Build synthetic image ---
    let input = build_synthetic_image();
    println!("Synthetic image: {}x{}", COLS, ROWS);
    print_stats("  input", &input);

    // --- 2. Area opening (removes salt noise) ---
    let params = AreaOpeningParams {
        area_threshold: 16.0,
        connectivity: 1,
    };
    let opened = area_opening(&input, params).expect("area_opening failed");
    print_stats("  opened", &opened);

    // --- 3. Area closing (fills pepper noise) ---
    let params = AreaClosingParams {
        area_threshold: 16.0,
        connectivity: 1,
    };
    let cleaned = area_closing(&opened, params).expect("area_closing failed");
    print_stats("  cleaned", &cleaned);

    // --- 4. Regional maxima of the cleaned image ---
    let maxima =
        max_tree_local_maxima(&cleaned, LocalMaximaParams::default()).expect("maxima failed");
    let label_count = maxima.as_slice().iter().copied().max().unwrap_or(0);
    println!("\nRegional maxima after cleaning: {}", label_count);

    // --- 5. Verify noise removal ---
    verify_noise_removal(&input, &opened, &cleaned);
}

/// Build a 200x200 synthetic grid with one large object and speck noise.
fn build_synthetic_image() -> Grid<f64> {
    let mut img: Grid<f64> = Grid::filled(&[ROWS, COLS], 50.0);
    let mut view = img.view_mut();

    // Large bright rectangle: rows 30..70, cols 30..90 → value 200
    for r in 30..70 {
        for c in 30..90 {
            view[[r, c]] = 200.0;
        }
    }

    // Salt noise: 80 bright single-pixel spots (value 220)
    // Deterministic positions using a simple LCG
    let mut seed: u64 = 42;
    for _ in 0..80 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let r = ((seed >> 33) as usize) % ROWS;
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let c = ((seed >> 33) as usize) % COLS;
        view[[r, c]] = 220.0;
    }

    // Pepper noise: 80 dark single-pixel spots (value 5)
    seed = 137;
    for _ in 0..80 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let r = ((seed >> 33) as usize) % ROWS;
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let c = ((seed >> 33) as usize) % COLS;
        view[[r, c]] = 5.0;
    }

    img
}

fn print_stats(label: &str, grid: &Grid<f64>) {
    let pixels = grid.as_slice();
    let min = pixels.iter().copied().fold(f64::INFINITY, f64::min);
    let max = pixels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = pixels.iter().sum::<f64>() / pixels.len() as f64;
    println!(
        "{:<10} min={:>6.1}  max={:>6.1}  mean={:>6.1}",
        label, min, max, mean
    );
}

/// Verify that opening removed the salt and closing filled the pepper.
fn verify_noise_removal(original: &Grid<f64>, opened: &Grid<f64>, cleaned: &Grid<f64>) {
    let mut orig_salt = 0usize;
    let mut orig_pepper = 0usize;
    let mut opened_salt = 0usize;
    let mut cleaned_pepper = 0usize;

    for i in 0..original.len() {
        let ov = original.as_slice()[i];
        if (ov - 220.0).abs() < 0.1 {
            orig_salt += 1;
        }
        if (ov - 5.0).abs() < 0.1 {
            orig_pepper += 1;
        }
        if (opened.as_slice()[i] - 220.0).abs() < 0.1 {
            opened_salt += 1;
        }
        if (cleaned.as_slice()[i] - 5.0).abs() < 0.1 {
            cleaned_pepper += 1;
        }
    }

    println!("\n--- Verification ---");
    println!(
        "  Original:  salt pixels = {}, pepper pixels = {}",
        orig_salt, orig_pepper
    );
    println!(
        "  Opened:    salt pixels = {} (should be 0 — removed by area opening)",
        opened_salt
    );
    println!(
        "  Cleaned:   pepper pixels = {} (should be 0 — filled by area closing)",
        cleaned_pepper
    );
}
