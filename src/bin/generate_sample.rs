//! Writes `penguins_sample.parquet`: a synthetic penguin table in the same
//! schema the dashboard reads, including some missing cells. Point the
//! `[dataset] path` config key at it to exercise the parquet loader.

use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Per-species means and standard deviations:
/// (bill length, bill depth, flipper length, body mass).
struct Profile {
    species: &'static str,
    islands: &'static [&'static str],
    mean: [f64; 4],
    sd: [f64; 4],
    count: usize,
}

const PROFILES: [Profile; 3] = [
    Profile {
        species: "Adelie",
        islands: &["Torgersen", "Biscoe", "Dream"],
        mean: [38.8, 18.3, 190.0, 3700.0],
        sd: [2.7, 1.2, 6.5, 460.0],
        count: 150,
    },
    Profile {
        species: "Gentoo",
        islands: &["Biscoe"],
        mean: [47.5, 15.0, 217.0, 5075.0],
        sd: [3.1, 1.0, 6.5, 500.0],
        count: 120,
    },
    Profile {
        species: "Chinstrap",
        islands: &["Dream"],
        mean: [48.8, 18.4, 196.0, 3730.0],
        sd: [3.3, 1.1, 7.1, 380.0],
        count: 68,
    },
];

/// Roughly one row in this many gets all measurements blanked.
const MISSING_EVERY: u64 = 40;

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut species = Vec::new();
    let mut island = Vec::new();
    let mut measures: [Vec<Option<f64>>; 4] = Default::default();
    let mut sex = Vec::new();
    let mut year = Vec::new();

    for profile in &PROFILES {
        for i in 0..profile.count {
            let missing = rng.next_u64() % MISSING_EVERY == 0;
            let male = rng.next_f64() < 0.5;
            // Males run slightly larger.
            let scale = if male { 1.04 } else { 0.96 };

            species.push(profile.species);
            island.push(profile.islands[i % profile.islands.len()]);
            for (k, column) in measures.iter_mut().enumerate() {
                let value = rng.gauss(profile.mean[k] * scale, profile.sd[k]);
                column.push(if missing { None } else { Some((value * 10.0).round() / 10.0) });
            }
            sex.push(if missing { None } else if male { Some("male") } else { Some("female") });
            year.push(2007 + (i % 3) as i64);
        }
    }

    let [bill_length, bill_depth, flipper_length, body_mass] = measures;

    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("island", DataType::Utf8, false),
        Field::new("bill_length_mm", DataType::Float64, true),
        Field::new("bill_depth_mm", DataType::Float64, true),
        Field::new("flipper_length_mm", DataType::Float64, true),
        Field::new("body_mass_g", DataType::Float64, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("year", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(species)),
            Arc::new(StringArray::from(island)),
            Arc::new(Float64Array::from(bill_length)),
            Arc::new(Float64Array::from(bill_depth)),
            Arc::new(Float64Array::from(flipper_length)),
            Arc::new(Float64Array::from(body_mass)),
            Arc::new(StringArray::from(sex)),
            Arc::new(Int64Array::from(year)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let rows = batch.num_rows();

    // Write Parquet
    let output_path = "penguins_sample.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {rows} penguins to {output_path}");
}
