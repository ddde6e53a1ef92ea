use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One synthetic customer, in the column layout the viewer expects.
#[derive(Debug, Serialize)]
struct Customer {
    customer_id: i64,
    total_spent: f64,
    number_of_purchases: i64,
    age: f64,
    region: &'static str,
}

/// Centre and spread of one synthetic segment:
/// (name, share, spent mean/sd, purchases mean/sd, age mean/sd).
type Segment = (&'static str, usize, (f64, f64), (f64, f64), (f64, f64));

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

fn main() {
    let mut rng = SimpleRng::new(42);

    let segments: [Segment; 3] = [
        ("occasional", 120, (150.0, 60.0), (4.0, 2.0), (24.0, 4.0)),
        ("regular", 80, (900.0, 200.0), (25.0, 6.0), (38.0, 6.0)),
        ("loyal", 40, (3000.0, 500.0), (70.0, 12.0), (52.0, 7.0)),
    ];
    let regions = ["north", "south", "east", "west"];

    let mut customers = Vec::new();
    let mut next_id: i64 = 1;
    for &(name, share, spent, purchases, age) in &segments {
        for i in 0..share {
            customers.push(Customer {
                customer_id: next_id,
                total_spent: (rng.gauss(spent.0, spent.1).max(0.0) * 100.0).round() / 100.0,
                number_of_purchases: rng.gauss(purchases.0, purchases.1).round().max(0.0) as i64,
                age: rng.gauss(age.0, age.1).round().clamp(18.0, 90.0),
                region: regions[i % regions.len()],
            });
            next_id += 1;
        }
        println!("{name}: {share} customers");
    }

    // Write CSV
    let csv_path = "sample_customers.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    for c in &customers {
        writer.serialize(c).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // Build Arrow arrays
    let schema = Arc::new(Schema::new(vec![
        Field::new("customer_id", DataType::Int64, false),
        Field::new("total_spent", DataType::Float64, false),
        Field::new("number_of_purchases", DataType::Int64, false),
        Field::new("age", DataType::Float64, false),
        Field::new("region", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(customers.iter().map(|c| c.customer_id))),
            Arc::new(Float64Array::from_iter_values(customers.iter().map(|c| c.total_spent))),
            Arc::new(Int64Array::from_iter_values(
                customers.iter().map(|c| c.number_of_purchases),
            )),
            Arc::new(Float64Array::from_iter_values(customers.iter().map(|c| c.age))),
            Arc::new(StringArray::from_iter_values(customers.iter().map(|c| c.region))),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_customers.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} customers to {csv_path} and {parquet_path}",
        customers.len()
    );
}
