use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    /// Pick from `(item, weight)` pairs.
    fn weighted<T: Copy>(&mut self, items: &[(T, f64)]) -> T {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut target = self.next_f64() * total;
        for &(item, w) in items {
            if target < w {
                return item;
            }
            target -= w;
        }
        items[items.len() - 1].0
    }
}

const YEARS: [(i64, f64); 6] = [
    (2020, 0.02),
    (2021, 0.05),
    (2022, 0.12),
    (2023, 0.25),
    (2024, 0.40),
    (2025, 0.16),
];
const SENIORITY: [(&str, f64); 4] = [
    ("junior", 0.12),
    ("pleno", 0.25),
    ("senior", 0.55),
    ("executivo", 0.08),
];
const CONTRACTS: [(&str, f64); 4] = [
    ("integral", 0.95),
    ("contrato", 0.02),
    ("parcial", 0.02),
    ("freelancer", 0.01),
];
const SIZES: [(&str, f64); 3] = [("pequena", 0.05), ("media", 0.85), ("grande", 0.10)];
const REMOTE: [(&str, f64); 3] = [("presencial", 0.65), ("remoto", 0.30), ("hibrido", 0.05)];
const COUNTRIES: [(&str, f64); 8] = [
    ("USA", 0.70),
    ("CAN", 0.06),
    ("GBR", 0.06),
    ("DEU", 0.04),
    ("ESP", 0.03),
    ("FRA", 0.03),
    ("BRA", 0.04),
    ("IND", 0.04),
];
/// Title and its typical annual salary in USD.
const TITLES: [(&str, f64); 8] = [
    ("Data Scientist", 150_000.0),
    ("Data Engineer", 145_000.0),
    ("Data Analyst", 105_000.0),
    ("Machine Learning Engineer", 190_000.0),
    ("Research Scientist", 195_000.0),
    ("Analytics Engineer", 155_000.0),
    ("Data Architect", 170_000.0),
    ("Applied Scientist", 200_000.0),
];

fn seniority_factor(s: &str) -> f64 {
    match s {
        "junior" => 0.6,
        "pleno" => 0.85,
        "executivo" => 1.4,
        _ => 1.0,
    }
}

fn country_factor(c: &str) -> f64 {
    match c {
        "USA" => 1.0,
        "CAN" | "GBR" | "DEU" => 0.7,
        "ESP" | "FRA" => 0.55,
        _ => 0.35,
    }
}

const HEADER: [&str; 8] = [
    "ano",
    "senioridade",
    "contrato",
    "tamanho_empresa",
    "cargo",
    "remoto",
    "residencia_iso3",
    "usd",
];

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);
    let n_rows = 2_000;

    let title_weights: Vec<(&str, f64)> = TITLES.iter().map(|&(t, _)| (t, 1.0)).collect();

    let mut years = Vec::with_capacity(n_rows);
    let mut seniority = Vec::with_capacity(n_rows);
    let mut contract = Vec::with_capacity(n_rows);
    let mut size = Vec::with_capacity(n_rows);
    let mut title = Vec::with_capacity(n_rows);
    let mut remote = Vec::with_capacity(n_rows);
    let mut country = Vec::with_capacity(n_rows);
    let mut usd = Vec::with_capacity(n_rows);

    // CSV rows are written as they are generated; the columns then move into Arrow.
    let csv_path = "sample_salaries.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path)?;
    csv_writer.write_record(HEADER)?;

    for _ in 0..n_rows {
        let year = rng.weighted(&YEARS);
        let sr = rng.weighted(&SENIORITY);
        let t = rng.weighted(&title_weights);
        let c = rng.weighted(&COUNTRIES);
        let base = TITLES
            .iter()
            .find(|(name, _)| *name == t)
            .map_or(120_000.0, |&(_, b)| b);
        let salary = rng
            .gauss(base * seniority_factor(sr) * country_factor(c), base * 0.2)
            .max(15_000.0)
            .round();
        let ct = rng.weighted(&CONTRACTS);
        let sz = rng.weighted(&SIZES);
        let rm = rng.weighted(&REMOTE);

        csv_writer.write_record([
            year.to_string().as_str(),
            sr,
            ct,
            sz,
            t,
            rm,
            c,
            format!("{salary:.0}").as_str(),
        ])?;

        years.push(year);
        seniority.push(sr);
        contract.push(ct);
        size.push(sz);
        title.push(t);
        remote.push(rm);
        country.push(c);
        usd.push(salary);
    }
    csv_writer.flush()?;

    let schema = Arc::new(Schema::new(vec![
        Field::new(HEADER[0], DataType::Int64, false),
        Field::new(HEADER[1], DataType::Utf8, false),
        Field::new(HEADER[2], DataType::Utf8, false),
        Field::new(HEADER[3], DataType::Utf8, false),
        Field::new(HEADER[4], DataType::Utf8, false),
        Field::new(HEADER[5], DataType::Utf8, false),
        Field::new(HEADER[6], DataType::Utf8, false),
        Field::new(HEADER[7], DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(years)),
            Arc::new(StringArray::from(seniority)),
            Arc::new(StringArray::from(contract)),
            Arc::new(StringArray::from(size)),
            Arc::new(StringArray::from(title)),
            Arc::new(StringArray::from(remote)),
            Arc::new(StringArray::from(country)),
            Arc::new(Float64Array::from(usd)),
        ],
    )?;

    // Write Parquet
    let parquet_path = "sample_salaries.parquet";
    let file = std::fs::File::create(parquet_path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("{}", pretty_format_batches(&[batch.slice(0, 5)])?);
    log::info!("Wrote {n_rows} salary records to {parquet_path} and {csv_path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_years_are_integers_from_the_table() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..200 {
            let year = rng.weighted(&YEARS);
            assert!(YEARS.iter().any(|&(y, _)| y == year));
        }
    }

    #[test]
    fn test_weighted_skips_zero_weight() {
        let mut rng = SimpleRng::new(1);
        let items = [("never", 0.0), ("always", 1.0)];
        for _ in 0..100 {
            assert_eq!(rng.weighted(&items), "always");
        }
    }
}
