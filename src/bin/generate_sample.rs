use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use celestial_classifier::data::model::PhotometricRecord;
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

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Typical colours and redshift range of one object population.
struct Population {
    name: &'static str,
    count: usize,
    r_mag: (f64, f64),
    /// Mean u-g, g-r, r-i, i-z.
    colors: [f64; 4],
    redshift: (f64, f64),
}

const POPULATIONS: [Population; 3] = [
    Population {
        name: "galaxy",
        count: 60,
        r_mag: (16.0, 19.5),
        colors: [1.6, 0.8, 0.4, 0.3],
        redshift: (0.02, 0.4),
    },
    Population {
        name: "quasar",
        count: 30,
        r_mag: (18.0, 20.5),
        colors: [0.3, 0.2, 0.15, 0.1],
        redshift: (0.8, 3.5),
    },
    Population {
        name: "star",
        count: 40,
        r_mag: (14.0, 19.0),
        colors: [1.2, 0.5, 0.2, 0.1],
        redshift: (-0.0005, 0.0008),
    },
];

fn synthesize(pop: &Population, rng: &mut SimpleRng) -> PhotometricRecord {
    // Dust reddening scales each band's extinction from a common E(B-V).
    let ebv = rng.uniform(0.01, 0.12);
    let ext = [5.155, 3.793, 2.751, 2.086, 1.479].map(|k| (k * ebv).min(1.0));

    let r = rng.uniform(pop.r_mag.0, pop.r_mag.1);
    let [ug, gr, ri, iz] = pop.colors.map(|c| rng.gauss(c, 0.15));
    let g = r + gr;
    let u = g + ug;
    let i = r - ri;
    let z = i - iz;

    PhotometricRecord {
        ra: rng.uniform(0.0, 360.0),
        dec: rng.uniform(-10.0, 70.0),
        u: u + ext[0],
        g: g + ext[1],
        r: r + ext[2],
        i: i + ext[3],
        z: z + ext[4],
        // Stars may carry tiny negative redshifts; clamp so they stay valid.
        redshift: rng.uniform(pop.redshift.0, pop.redshift.1).max(0.0),
        extinction_u: ext[0],
        extinction_g: ext[1],
        extinction_r: ext[2],
        extinction_i: ext[3],
        extinction_z: ext[4],
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut records: Vec<PhotometricRecord> = Vec::new();
    for pop in &POPULATIONS {
        for _ in 0..pop.count {
            records.push(synthesize(pop, &mut rng));
        }
        println!("{:>4} {}", pop.count, pop.name);
    }

    // A few rows the validator must reject.
    let mut bad_ra = synthesize(&POPULATIONS[0], &mut rng);
    bad_ra.ra = 400.0;
    let mut bad_mag = synthesize(&POPULATIONS[2], &mut rng);
    bad_mag.u = 35.0;
    records.extend([bad_ra, bad_mag, PhotometricRecord::default()]);

    // Build one Float64 column per record field
    let columns: Vec<ArrayRef> = (0..PhotometricRecord::FIELD_NAMES.len())
        .map(|k| {
            let values: Vec<f64> = records.iter().map(|r| r.values()[k]).collect();
            Arc::new(Float64Array::from(values)) as ArrayRef
        })
        .collect();

    let schema = Arc::new(Schema::new(
        PhotometricRecord::FIELD_NAMES
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(schema.clone(), columns)
        .expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_catalogue.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    let preview = pretty_format_batches(&[batch.slice(0, 5)]).expect("Failed to format preview");
    println!("{preview}");
    println!("Wrote {} records to {output_path}", records.len());
}
