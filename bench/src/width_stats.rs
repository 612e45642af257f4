use colints::bitmap::Bitmap;
use colints::prelude::*;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

const NUM_VALUES: usize = 1 << 16;
const SEED_VALUES: u64 = 114514;

fn main() {
    for max_bits in [7, 8, 15, 16, 31, 32, 48] {
        show_widths(max_bits);
    }
}

fn gen_random_ints(len: usize, max_bits: u32, seed: u64) -> Vec<u64> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<u64>() >> (64 - max_bits)).collect()
}

fn show_widths(max_bits: u32) {
    let vals = gen_random_ints(NUM_VALUES, max_bits, SEED_VALUES);
    let max = vals.iter().copied().max().unwrap();
    println!("[max_bits={max_bits}] n_vals={}, max_val={max:#x}", vals.len());

    let width = detect_width(&IntArray::new(&vals), Width::One);
    print_width("all valid", width, vals.len());

    // Nulls every other slot, holding garbage.
    let mut garbled = vals.clone();
    for v in garbled.iter_mut().skip(1).step_by(2) {
        *v = u64::MAX;
    }
    let validity = Bitmap::from_bits((0..vals.len()).map(|i| i % 2 == 0));
    let array = IntArray::with_validity(&garbled, validity.view()).unwrap();
    print_width("half null", detect_width(&array, Width::One), vals.len());
}

fn print_width(name: &str, width: Width, nvals: usize) {
    println!(
        "{}: width={} ({}), {} bytes for {} values",
        name,
        width,
        width.unsigned_kind(),
        width.bytes() * nvals,
        nvals
    );
}
