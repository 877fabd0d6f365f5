use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a deterministic synthetic employee table for the attrition dashboard.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", version, about, long_about = None)]
struct Args {
    /// Output file; `.parquet` / `.pq` writes Parquet, anything else CSV
    #[arg(default_value = "IBM HR Employee Attrition Data.csv")]
    output: PathBuf,

    /// Number of employees to generate
    #[arg(short = 'n', long, default_value_t = 1470)]
    employees: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One synthetic employee. Column order mirrors the public HR dataset, with a
/// couple of extra columns the dashboard ignores.
#[derive(Debug, Serialize)]
struct Employee {
    #[serde(rename = "EmployeeNumber")]
    employee_number: i64,
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Attrition")]
    attrition: &'static str,
    #[serde(rename = "Department")]
    department: &'static str,
    #[serde(rename = "JobLevel")]
    job_level: i64,
    #[serde(rename = "MonthlyIncome")]
    monthly_income: f64,
    #[serde(rename = "OverTime")]
    over_time: &'static str,
    #[serde(rename = "WorkLifeBalance")]
    work_life_balance: i64,
}

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

    /// Pick an item with probability proportional to its weight.
    fn weighted<T: Copy>(&mut self, choices: &[(T, f64)]) -> T {
        let total: f64 = choices.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for &(item, weight) in choices {
            if roll < weight {
                return item;
            }
            roll -= weight;
        }
        choices[choices.len() - 1].0
    }
}

fn generate(rng: &mut SimpleRng, count: usize) -> Vec<Employee> {
    let departments = [
        ("Research & Development", 0.65),
        ("Sales", 0.30),
        ("Human Resources", 0.05),
    ];
    let levels = [(1, 0.37), (2, 0.36), (3, 0.15), (4, 0.07), (5, 0.05)];
    let work_life = [(1, 0.05), (2, 0.23), (3, 0.61), (4, 0.11)];

    (0..count)
        .map(|i| {
            let department = rng.weighted(&departments);
            let job_level = rng.weighted(&levels);
            let work_life_balance = rng.weighted(&work_life);
            let over_time = rng.next_f64() < 0.28;

            let income = rng
                .gauss(3_500.0 * job_level as f64, 600.0 * job_level as f64)
                .max(1_009.0)
                .round();
            let age = rng.gauss(30.0 + 4.0 * job_level as f64, 6.0).clamp(18.0, 60.0) as i64;

            let mut p_leave = 0.08;
            if over_time {
                p_leave += 0.17;
            }
            if job_level == 1 {
                p_leave += 0.10;
            }
            if work_life_balance == 1 {
                p_leave += 0.10;
            }
            if department == "Sales" {
                p_leave += 0.04;
            }
            let left = rng.next_f64() < p_leave;

            Employee {
                employee_number: i as i64 + 1,
                age,
                attrition: if left { "Yes" } else { "No" },
                department,
                job_level,
                monthly_income: income,
                over_time: if over_time { "Yes" } else { "No" },
                work_life_balance,
            }
        })
        .collect()
}

fn write_csv(path: &Path, employees: &[Employee]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for employee in employees {
        writer.serialize(employee).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, employees: &[Employee]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("EmployeeNumber", DataType::Int64, false),
        Field::new("Age", DataType::Int64, false),
        Field::new("Attrition", DataType::Utf8, false),
        Field::new("Department", DataType::Utf8, false),
        Field::new("JobLevel", DataType::Int64, false),
        Field::new("MonthlyIncome", DataType::Float64, false),
        Field::new("OverTime", DataType::Utf8, false),
        Field::new("WorkLifeBalance", DataType::Int64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(employees.iter().map(|e| e.employee_number))),
        Arc::new(Int64Array::from_iter_values(employees.iter().map(|e| e.age))),
        Arc::new(StringArray::from_iter_values(employees.iter().map(|e| e.attrition))),
        Arc::new(StringArray::from_iter_values(employees.iter().map(|e| e.department))),
        Arc::new(Int64Array::from_iter_values(employees.iter().map(|e| e.job_level))),
        Arc::new(Float64Array::from_iter_values(employees.iter().map(|e| e.monthly_income))),
        Arc::new(StringArray::from_iter_values(employees.iter().map(|e| e.over_time))),
        Arc::new(Int64Array::from_iter_values(employees.iter().map(|e| e.work_life_balance))),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let output_path = &args.output;

    let mut rng = SimpleRng::new(args.seed);
    let employees = generate(&mut rng, args.employees);
    let leavers = employees.iter().filter(|e| e.attrition == "Yes").count();

    let is_parquet = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(output_path, &employees)?;
    } else {
        write_csv(output_path, &employees)?;
    }

    println!(
        "Wrote {} employees ({leavers} left) to {}",
        employees.len(),
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_hr_dataset() {
        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.output, PathBuf::from("IBM HR Employee Attrition Data.csv"));
        assert_eq!((args.employees, args.seed), (1470, 42));
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert!(Args::try_parse_from(["generate_sample", "out.csv", "extra"]).is_err());
        assert!(Args::try_parse_from(["generate_sample", "--rows", "10"]).is_err());
    }

    #[test]
    fn same_seed_same_employees() {
        let a = generate(&mut SimpleRng::new(7), 50);
        let b = generate(&mut SimpleRng::new(7), 50);
        assert_eq!(a.len(), 50);
        let key = |e: &Employee| (e.department, e.job_level, e.attrition, e.monthly_income.to_bits());
        assert!(a.iter().map(key).eq(b.iter().map(key)));
    }

    #[test]
    fn csv_output_has_required_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        write_csv(&path, &generate(&mut SimpleRng::new(1), 5)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        for column in ["Department", "JobLevel", "Attrition", "OverTime", "WorkLifeBalance", "MonthlyIncome"] {
            assert!(header.split(',').any(|h| h == column), "{column}");
        }
        assert_eq!(text.lines().count(), 6);
    }
}
