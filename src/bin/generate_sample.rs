//! Writes a synthetic pet adoption dataset for demoing the explorer.
//!
//! Usage: `generate_sample [OUTPUT_CSV]` (defaults to `pet_adoption_dataset.csv`).

use anyhow::Context;

const N_ROWS: usize = 2000;
const DEFAULT_OUTPUT: &str = "pet_adoption_dataset.csv";

const PET_TYPES: [(&str, &[&str], f64, f64); 4] = [
    ("Dog", &["Labrador", "Golden Retriever", "Poodle"], 22.0, 8.0),
    ("Cat", &["Persian", "Siamese"], 4.5, 1.2),
    ("Rabbit", &["Rabbit"], 2.0, 0.6),
    ("Bird", &["Parakeet"], 0.2, 0.08),
];
const COLORS: [&str; 5] = ["Black", "White", "Brown", "Gray", "Orange"];
const SIZES: [&str; 3] = ["Small", "Medium", "Large"];

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

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Blank out roughly 2% of text cells. Numeric cells stay complete so PCA runs.
fn maybe_missing(rng: &mut SimpleRng, cell: String) -> String {
    if rng.chance(0.02) {
        String::new()
    } else {
        cell
    }
}

fn main() -> anyhow::Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {output}"))?;
    writer.write_record([
        "PetID",
        "PetType",
        "Breed",
        "AgeMonths",
        "Color",
        "Size",
        "WeightKg",
        "Vaccinated",
        "HealthCondition",
        "TimeInShelterDays",
        "AdoptionFee",
        "PreviousOwner",
        "AdoptionLikelihood",
    ])?;

    for i in 0..N_ROWS {
        let &(pet_type, breeds, weight_mean, weight_sd) = rng.pick(&PET_TYPES);
        let breed = *rng.pick(breeds);
        let age = rng.range(1, 179);
        let weight = rng.gauss(weight_mean, weight_sd).max(0.05);
        let vaccinated = rng.chance(0.7);
        let healthy = rng.chance(0.8);
        let shelter_days = rng.range(1, 89);
        let fee = rng.range(0, 499);
        let previous_owner = rng.chance(0.3);

        // Young, vaccinated, healthy pets with a short stay get adopted more.
        let score = 0.4 * f64::from(u8::from(vaccinated))
            + 0.3 * f64::from(u8::from(healthy))
            + 0.2 * (1.0 - age as f64 / 180.0)
            - 0.1 * (shelter_days as f64 / 90.0)
            + rng.gauss(0.0, 0.15);
        let likely = score > 0.55;

        let color = (*rng.pick(&COLORS)).to_string();
        let size = (*rng.pick(&SIZES)).to_string();
        writer.write_record([
            (500 + i).to_string(),
            pet_type.to_string(),
            maybe_missing(&mut rng, breed.to_string()),
            age.to_string(),
            maybe_missing(&mut rng, color),
            size,
            format!("{weight:.6}"),
            u8::from(vaccinated).to_string(),
            u8::from(!healthy).to_string(),
            shelter_days.to_string(),
            fee.to_string(),
            u8::from(previous_owner).to_string(),
            u8::from(likely).to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {N_ROWS} pet adoption records to {output}");
    Ok(())
}
