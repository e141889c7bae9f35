//! Writes a synthetic creature dataset as CSV and Parquet under `data/`.
//!
//! Output is deterministic (fixed seed), so the files can be regenerated
//! and diffed.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const REGIONS: [(&str, usize); 5] = [
    ("Kanto", 151),
    ("Johto", 100),
    ("Hoenn", 135),
    ("Sinnoh", 107),
    ("Unova", 156),
];

const TYPES: [&str; 18] = [
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dark", "dragon", "steel", "fairy",
];

/// Relative frequency of each type in `TYPES`, roughly as in the games.
const TYPE_WEIGHTS: [f64; 18] = [
    10.0, 6.0, 13.0, 5.0, 9.0, 3.0, 4.0, 6.0, 5.0, 7.0, 7.0, 8.0, 5.0, 3.0, 4.0, 3.0, 3.0, 3.0,
];

/// Share of creatures with a second type.
const DUAL_TYPE_RATE: f64 = 0.5;

/// splitmix64: small, seedable and good enough for sample data.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// `exp(N(mu, sigma))`, the normal draw coming from Box-Muller.
    fn log_normal(&mut self, mu: f64, sigma: f64) -> f64 {
        let radius = (-2.0 * (1.0 - self.unit()).ln()).sqrt();
        let angle = std::f64::consts::TAU * self.unit();
        (mu + sigma * radius * angle.cos()).exp()
    }

    /// Index drawn with probability proportional to `weights`.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut target = self.unit() * total;
        for (i, &w) in weights.iter().enumerate() {
            if target < w {
                return i;
            }
            target -= w;
        }
        weights.len() - 1
    }
}

#[derive(Debug, Serialize)]
struct Row {
    id: usize,
    name: String,
    region: &'static str,
    /// Python-style list, the way pandas writes a list column to CSV.
    types: String,
    height: f64,
    weight: f64,
}

fn round1(v: f64) -> f64 {
    ((v * 10.0).round() / 10.0).max(0.1)
}

fn generate(rng: &mut SampleRng) -> Vec<(Row, Vec<&'static str>)> {
    let mut rows = Vec::new();
    let mut id = 1;

    for (region, count) in REGIONS {
        for n in 0..count {
            let first = rng.weighted(&TYPE_WEIGHTS);
            let mut types = vec![TYPES[first]];
            if rng.unit() < DUAL_TYPE_RATE {
                let mut weights = TYPE_WEIGHTS;
                weights[first] = 0.0;
                types.push(TYPES[rng.weighted(&weights)]);
            }

            // Log-normal height; weight grows roughly with volume.
            let height = round1(rng.log_normal(-0.1, 0.6));
            let weight = round1(25.0 * height.powf(2.6) * rng.log_normal(0.0, 0.5));

            let encoded = format!(
                "[{}]",
                types
                    .iter()
                    .map(|t| format!("'{t}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            rows.push((
                Row {
                    id,
                    name: format!("{}-{:03}", region.to_ascii_lowercase(), n + 1),
                    region,
                    types: encoded,
                    height,
                    weight,
                },
                types,
            ));
            id += 1;
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[(Row, Vec<&'static str>)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for (row, _) in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[(Row, Vec<&'static str>)]) -> Result<()> {
    let mut types_builder = ListBuilder::new(StringBuilder::new());
    for (_, types) in rows {
        for t in types {
            types_builder.values().append_value(t);
        }
        types_builder.append(true);
    }
    let types_array = types_builder.finish();

    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, false),
        Field::new(
            "types",
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        ),
        Field::new("height", DataType::Float64, false),
        Field::new("weight", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|(r, _)| r.name.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|(r, _)| r.region))),
            Arc::new(types_array),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|(r, _)| r.height))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|(r, _)| r.weight))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SampleRng(42);
    let rows = generate(&mut rng);

    let csv_path = out_dir.join("synthetic.csv");
    write_csv(&csv_path, &rows)?;
    log::info!("Wrote {} rows to {}", rows.len(), csv_path.display());

    let parquet_path = out_dir.join("synthetic.parquet");
    write_parquet(&parquet_path, &rows)?;
    log::info!("Wrote {} rows to {}", rows.len(), parquet_path.display());

    println!(
        "Wrote {} creatures to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_deterministic_and_well_formed() {
        let a = generate(&mut SampleRng(42));
        let b = generate(&mut SampleRng(42));
        let total: usize = REGIONS.iter().map(|(_, n)| n).sum();
        assert_eq!(a.len(), total);

        for ((ra, ta), (rb, tb)) in a.iter().zip(&b) {
            assert_eq!(ra.types, rb.types);
            assert_eq!(ta, tb);
            assert!(ra.height >= 0.1 && ra.weight >= 0.1);
            assert!(matches!(ta.len(), 1 | 2));
            if let [first, second] = ta.as_slice() {
                assert_ne!(first, second);
            }
        }
    }

    #[test]
    fn encoded_types_use_python_list_syntax() {
        let rows = generate(&mut SampleRng(7));
        for (row, types) in &rows {
            assert!(row.types.starts_with("['") && row.types.ends_with("']"));
            assert_eq!(row.types.matches('\'').count(), types.len() * 2);
        }
    }

    #[test]
    fn draws_stay_in_range_and_centre_on_mu() {
        let mut rng = SampleRng(1);
        assert!((0..10_000).all(|_| (0.0..1.0).contains(&rng.unit())));

        let mut logs: Vec<f64> = (0..10_000).map(|_| rng.log_normal(-0.1, 0.6).ln()).collect();
        assert!(logs.iter().all(|v| v.is_finite()));
        logs.sort_by(f64::total_cmp);
        let median = logs[logs.len() / 2];
        assert!((median + 0.1).abs() < 0.05, "median {median}");
    }
}
